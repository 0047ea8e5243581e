use anyhow::Context;
use clap::Parser;
use folder_rename::cli::{Cli, run_cli};
use log::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let report = run_cli(&cli)
        .with_context(|| format!("Run aborted in {}", cli.start_path.display()))?;
    debug!("{:?}", report);

    Ok(())
}
