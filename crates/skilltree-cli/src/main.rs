//! `skilltree` entry point.

use clap::Parser;
use skilltree_cli::{Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(command = ?cli.command, "starting");
    skilltree_cli::run(cli)?;
    Ok(())
}
