//! Release orchestration.
//!
//! [`release_extension_package`] runs the whole pipeline: token, technical
//! account, manifest, package lookup, then the confirmation gate and the
//! availability change driven by [`ReleaseOrchestrator`].

mod prompt;

pub use prompt::{ConfirmationPrompt, StreamPrompt, TerminalPrompt, prompt_confirmation};

use crate::cli::OutputManager;
use crate::config::EffectiveConfig;
use crate::error::Result;
use crate::manifest::ExtensionManifest;
use crate::reactor::{
    self, AvailabilityAction, ExtensionPackage, ReactorClient, TechnicalAccountData,
};
use std::path::Path;

// Phase of the release state machine
#[derive(Debug)]
enum ReleasePhase {
    AwaitingConfirmation,
    Releasing,
    Done(ExtensionPackage),
    Aborted,
}

/// Terminal result of a release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Package was released
    Released(ExtensionPackage),
    /// User declined at the prompt
    Aborted,
}

/// Drives a located package through confirmation and release
pub struct ReleaseOrchestrator<'a, P: ConfirmationPrompt> {
    client: &'a ReactorClient,
    account: &'a TechnicalAccountData,
    config: &'a EffectiveConfig,
    output: &'a OutputManager,
    prompt: P,
    phase: ReleasePhase,
}

impl<'a, P: ConfirmationPrompt> ReleaseOrchestrator<'a, P> {
    /// Start awaiting confirmation
    pub fn new(
        client: &'a ReactorClient,
        account: &'a TechnicalAccountData,
        config: &'a EffectiveConfig,
        output: &'a OutputManager,
        prompt: P,
    ) -> Self {
        Self {
            client,
            account,
            config,
            output,
            prompt,
            phase: ReleasePhase::AwaitingConfirmation,
        }
    }

    /// Advance until `Done` or `Aborted`
    pub async fn run(mut self, package: &ExtensionPackage) -> Result<ReleaseOutcome> {
        loop {
            self.phase = match std::mem::replace(&mut self.phase, ReleasePhase::Releasing) {
                ReleasePhase::AwaitingConfirmation => {
                    if self.config.confirm_release {
                        log::debug!("Confirmation skipped by --confirm-package-release");
                        ReleasePhase::Releasing
                    } else if self.confirm(package)? {
                        ReleasePhase::Releasing
                    } else {
                        ReleasePhase::Aborted
                    }
                }
                ReleasePhase::Releasing => {
                    self.output.progress(&format!(
                        "Releasing {} {} to {}...",
                        package.name, package.version, self.config.environment
                    ));
                    let released = reactor::change_availability(
                        self.client,
                        self.account,
                        package,
                        AvailabilityAction::ReleasePrivate,
                    )
                    .await?;
                    ReleasePhase::Done(released)
                }
                ReleasePhase::Done(released) => {
                    self.output.success(&format!(
                        "The extension package {} {} has been released{}.",
                        released.label(),
                        released.version,
                        released
                            .availability
                            .as_deref()
                            .map(|a| format!(" with {a} availability"))
                            .unwrap_or_default()
                    ));
                    return Ok(ReleaseOutcome::Released(released));
                }
                ReleasePhase::Aborted => {
                    self.output.info("Release cancelled. No changes were made.");
                    return Ok(ReleaseOutcome::Aborted);
                }
            };
        }
    }

    fn confirm(&mut self, package: &ExtensionPackage) -> Result<bool> {
        self.output.section("Extension package");
        self.output.indent(&format!("Name:         {}", package.label()));
        self.output.indent(&format!("Package name: {}", package.name));
        self.output.indent(&format!("Version:      {}", package.version));
        if let Some(platform) = &package.platform {
            self.output.indent(&format!("Platform:     {platform}"));
        }
        self.output.indent(&format!("ID:           {}", package.id));
        if let Some(availability) = &package.availability {
            self.output.indent(&format!("Availability: {availability}"));
        }
        self.output
            .indent(&format!("Environment:  {}", self.config.environment));
        self.output.println("");

        let question = format!(
            "Are you sure you want to release {} {} to {}? This cannot be undone.",
            package.label(),
            package.version,
            self.config.environment
        );
        Ok(self.prompt.confirm(&question)?)
    }
}

/// Run the full release pipeline from the extension in `working_dir`
pub async fn release_extension_package<P: ConfirmationPrompt>(
    config: &EffectiveConfig,
    working_dir: &Path,
    output: &OutputManager,
    prompt: P,
) -> Result<ReleaseOutcome> {
    let http = reactor::build_http_client(&config.http)?;

    output.verbose(&format!("Environment: {}", config.environment));
    let token = reactor::acquire_token(&http, config).await?;
    output.verbose("✓ Access token acquired");

    let client = ReactorClient::new(http, config, token);
    let account = reactor::resolve_technical_account(&client).await?;
    output.verbose(&format!("✓ Organization: {}", account.org_id));

    let manifest = ExtensionManifest::load_from_dir(working_dir)?;
    output.verbose(&format!(
        "✓ Manifest: {} {} ({})",
        manifest.name, manifest.version, manifest.platform
    ));

    let package =
        reactor::locate_package(&client, &account, &manifest, config.environment).await?;
    output.verbose(&format!("✓ Found extension package {}", package.id));

    ReleaseOrchestrator::new(&client, &account, config, output, prompt)
        .run(&package)
        .await
}
