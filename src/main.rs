//! reactor_releaser - release development extension packages on Adobe
//! Experience Platform Launch.
//!
//! Exits 0 on success or when the release is declined, 1 on any error.

use reactor_releaser::cli;
use reactor_releaser::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {}", e.detailed()));
            process::exit(1);
        }
    }
}
