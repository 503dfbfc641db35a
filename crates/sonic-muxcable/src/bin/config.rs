//! `config` entry point: mux cable mode changes.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use sonic_muxcable::cli::{self, ConfigCli};
use sonic_muxcable::logging::init_logging;
use sonic_muxcable::MuxCableResult;

async fn run(args: &ConfigCli) -> MuxCableResult<String> {
    let db = cli::open_db(&args.global).await?;
    cli::run_config(&args.command, db.as_ref()).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ConfigCli::parse();
    init_logging(&args.global.log_level);

    info!("Running {:?}", args.command);
    cli::finish(run(&args).await)
}
