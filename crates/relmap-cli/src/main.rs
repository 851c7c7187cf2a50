use relmap_cli::RelmapCli;

fn main() -> anyhow::Result<()> {
    // Mapping warnings are logged; RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    RelmapCli::new().parse_and_run()
}
