mod command;
mod config;

pub use command::*;
pub use config::*;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Relmap CLI library for building custom command-line tools
pub struct RelmapCli {
    config: Option<Config>,
}

impl RelmapCli {
    /// Create a new RelmapCli instance. Configuration is read from
    /// `--config`, or from `relmap.toml` when present.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Create a new RelmapCli instance with a fixed configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    /// Like [`parse_from`](Self::parse_from), returning the output instead
    /// of printing it
    pub fn render_from<I, T>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        let config = self.load_config(cli.config.as_deref())?;
        cli.command.render(&config)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        let config = self.load_config(cli.config.as_deref())?;
        println!("{}", cli.command.render(&config)?);
        Ok(())
    }

    fn load_config(&self, path: Option<&std::path::Path>) -> Result<Config> {
        match (path, &self.config) {
            (Some(path), _) => Config::load(path),
            (None, Some(config)) => Ok(config.clone()),
            (None, None) => Config::load_or_default(config::DEFAULT_CONFIG_FILE),
        }
    }
}

impl Default for RelmapCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "relmap")]
#[command(about = "Relmap CLI - derive relational schemas and queries from type graphs")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}
