//! Command execution and error presentation.

mod release;

use crate::cli::{Args, OutputManager};
use crate::error::{ReleaserError, Result};

use release::execute_release;

/// Execute the release based on parsed arguments, returning the exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, false);

    match execute_release(&args, &output).await {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            report_error(&e, args.verbose, &output);
            Ok(1)
        }
    }
}

/// Print an error the way the exit policy requires.
///
/// Operational errors show only their message unless `verbose`; unexpected
/// errors always show the full chain.
pub fn report_error(error: &ReleaserError, verbose: bool, output: &OutputManager) {
    log::debug!("Run failed with code {:?}", error.code());

    if verbose || !error.is_operational() {
        output.error(&error.detailed());

        if verbose {
            let suggestions = error.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.println(&format!("  • {}", suggestion));
                }
            }
        }
        return;
    }

    output.error(&error.to_string());
    output.error("run in --verbose mode for full stack trace");
}
