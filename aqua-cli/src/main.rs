//! AquaGuardian CLI - regional water stress and household water footprint.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "aqua-cli",
    version,
    about = "Water scarcity visualizer data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aqua_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("starting aqua-cli");
    aqua_cmd::run(cli.command)
}
