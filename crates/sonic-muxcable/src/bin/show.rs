//! `show` entry point: read-only views of mux cable state.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use sonic_muxcable::cli::{self, ShowCli};
use sonic_muxcable::logging::init_logging;
use sonic_muxcable::MuxCableResult;

async fn run(args: &ShowCli) -> MuxCableResult<String> {
    let db = cli::open_db(&args.global).await?;
    cli::run_show(&args.command, db.as_ref()).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ShowCli::parse();
    init_logging(&args.global.log_level);

    debug!("Running {:?}", args.command);
    cli::finish(run(&args).await)
}
