//! Command line interface for reactor_releaser.
//!
//! Parses arguments, sets up logging and hands off to the release command.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(args.verbose);
    execute_command(args).await
}

/// Install the global logger.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate under `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,reactor_releaser=debug"
    } else {
        "warn"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
