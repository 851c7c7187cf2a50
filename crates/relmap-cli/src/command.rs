mod query;
pub use query::QueryCommand;

mod schema;
pub use schema::SchemaCommand;

mod tables;
pub use tables::TablesCommand;

use crate::Config;

use anyhow::{Context, Result};
use clap::Subcommand;
use relmap_core::{Schema, TypeGraph};
use relmap_sql::Flavor;
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the DDL creating every mapped table
    Schema(SchemaCommand),

    /// Translate a predicate into a parameterized query
    Query(QueryCommand),

    /// List tables in emission order with their mapping strategy
    Tables(TablesCommand),
}

impl Command {
    pub(crate) fn render(&self, config: &Config) -> Result<String> {
        match self {
            Command::Schema(cmd) => cmd.render(config),
            Command::Query(cmd) => cmd.render(config),
            Command::Tables(cmd) => cmd.render(config),
        }
    }
}

/// Loads the type graph at `path` and maps it with the configured options.
fn load_schema(path: &Path, config: &Config) -> Result<Schema> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let graph = TypeGraph::from_toml(&src)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let schema = config.schema.builder().build(&graph)?;

    log::info!(
        "mapped {} types to {} tables and {} join tables",
        graph.types.len(),
        schema.db.tables.len(),
        schema.db.join_tables.len()
    );

    Ok(schema)
}

fn flavor(arg: Option<Flavor>, config: &Config) -> Flavor {
    arg.unwrap_or(config.flavor)
}
