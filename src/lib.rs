//! # Reactor Releaser
//!
//! Releases a development extension package on the Adobe Experience Platform
//! Launch (Reactor) API.
//!
//! A run is a strictly sequential pipeline:
//!
//! 1. Resolve configuration from flags and environment variables
//! 2. Acquire an OAuth2 server-to-server access token (or use the one given)
//! 3. Resolve the technical account (company and IMS org)
//! 4. Read `extension.json` from the working directory
//! 5. Page through the package listing for the manifest's name and version
//! 6. Confirm with the user, then change the package's availability
//!
//! ## Usage
//!
//! ```bash
//! reactor_releaser --auth.client-id=<id> --auth.client-secret=<secret>
//! reactor_releaser --auth.access-token=<token> --confirm-package-release
//! reactor_releaser --environment=stage --verbose
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod reactor;
pub mod release;

// Re-export main types for public API
pub use cli::Args;
pub use config::{EffectiveConfig, EnvConfig, Environment};
pub use error::{ReleaserError, Result};
pub use manifest::ExtensionManifest;
pub use reactor::{AccessToken, ExtensionPackage, ReactorClient, TechnicalAccountData};
pub use release::{ReleaseOrchestrator, ReleaseOutcome, release_extension_package};
