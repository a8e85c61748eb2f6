//! MPA CLI - Command line tool for querying the MPA dashboard backend.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mpa-cli",
    version,
    about = "MPA ocean-conditions data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: mpa_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    mpa_cmd::run(cli.command).await
}
