//! Release command execution.

use crate::cli::{Args, OutputManager};
use crate::config::{EffectiveConfig, EnvConfig};
use crate::error::Result;
use crate::release::{ReleaseOutcome, TerminalPrompt, release_extension_package};

/// Resolve configuration and run the release pipeline from the current directory
pub(super) async fn execute_release(args: &Args, output: &OutputManager) -> Result<i32> {
    let config = EffectiveConfig::resolve(args, &EnvConfig::from_process())?;

    if let Some(legacy) = config.redirected_from {
        output.warn(&format!(
            "'--environment={legacy}' is currently redirecting to '--environment={}' on your behalf, and will be removed in the future.",
            config.environment
        ));
        output.warn(&format!(
            "Prefer usage of '--environment={}'.",
            config.environment
        ));
    }

    let working_dir = std::env::current_dir()?;
    match release_extension_package(&config, &working_dir, output, TerminalPrompt).await? {
        ReleaseOutcome::Released(package) => {
            log::info!("Released {} ({})", package.id, package.version);
            Ok(0)
        }
        ReleaseOutcome::Aborted => Ok(0),
    }
}
