//! Error types for reactor_releaser operations.
//!
//! Every failure the pipeline can hit is a variant of [`ReleaserError`]. The
//! nested enums carry the structured payload for each area; the top-level
//! handler in `main` decides how much of it to show.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reactor_releaser operations
pub type Result<T> = std::result::Result<T, ReleaserError>;

/// Main error type for all reactor_releaser operations
#[derive(Error, Debug)]
pub enum ReleaserError {
    /// Configuration resolution errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Extension manifest errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Token and technical account errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Extension package lookup errors
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Availability change errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment flag value is not one we know
    #[error(
        "Unknown environment '{value}'. Expected one of: stage, qe, integration (omit for production)"
    )]
    UnknownEnvironment {
        /// Value passed on the command line
        value: String,
    },

    /// Neither an access token nor a client id/secret pair was provided
    #[error(
        "No credentials provided. Pass --auth.access-token, or --auth.client-id and --auth.client-secret (or set {id_var}/{secret_var})"
    )]
    MissingCredentials {
        /// Environment-specific client id variable that was consulted
        id_var: String,
        /// Environment-specific client secret variable that was consulted
        secret_var: String,
    },

    /// The API key could not be derived from the supplied access token
    #[error("Could not determine the client ID from the access token: {reason}. Pass --auth.client-id")]
    ApiKeyUnavailable {
        /// Reason for the error
        reason: String,
    },

    /// An endpoint override is not a valid URL
    #[error("Invalid URL '{value}' in {variable}: {reason}")]
    InvalidUrl {
        /// Environment variable that held the value
        variable: String,
        /// Offending value
        value: String,
        /// Reason for the error
        reason: String,
    },
}

/// Extension manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No manifest in the working directory
    #[error("No extension.json found at {path}. Run this command from the extension's root directory.")]
    NotFound {
        /// Path where extension.json was expected
        path: PathBuf,
    },

    /// Manifest exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON
    #[error("Failed to parse {path}: {source}")]
    Invalid {
        /// Manifest path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A required field is absent or empty
    #[error("extension.json is missing the required '{field}' field")]
    MissingField {
        /// Field name
        field: &'static str,
    },

    /// Version field is not semver
    #[error("Invalid version '{version}' in extension.json: {source}")]
    InvalidVersion {
        /// Version string
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },
}

/// Token acquisition and technical account errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token endpoint answered with a non-2xx status
    #[error("Error retrieving access token: {status} - {detail}")]
    TokenRejected {
        /// HTTP status code
        status: u16,
        /// Error detail reported by the server
        detail: String,
    },

    /// Token endpoint answered 2xx without a token
    #[error("Token endpoint returned no access_token")]
    MalformedTokenResponse,

    /// Company listing failed
    #[error("Error retrieving technical account data: {status} - {detail}")]
    AccountLookupFailed {
        /// HTTP status code
        status: u16,
        /// Error detail reported by the server
        detail: String,
    },

    /// The credentials did not map to exactly one company
    #[error("Expected the integration to belong to exactly one company, found {count}")]
    AccountNotResolved {
        /// Number of companies returned
        count: usize,
    },
}

/// Extension package lookup errors
#[derive(Error, Debug)]
pub enum LookupError {
    /// No package matched the manifest
    #[error(
        "No development extension package was found on the server with the name {name} and version {version}. You must first upload the extension package to the {environment} environment."
    )]
    NotFound {
        /// Package name
        name: String,
        /// Package version
        version: String,
        /// Target environment
        environment: String,
    },

    /// More than one package matched the manifest
    #[error(
        "Found {count} extension packages named {name} with version {version}: {joined}",
        count = .ids.len(),
        joined = .ids.join(", ")
    )]
    Ambiguous {
        /// Package name
        name: String,
        /// Package version
        version: String,
        /// Ids of every matching package
        ids: Vec<String>,
    },

    /// Listing request failed
    #[error("Error retrieving extension packages: {status} - {detail}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Error detail reported by the server
        detail: String,
    },
}

/// Availability change errors
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Server refused the availability change
    #[error("Error releasing extension package {package_id}: {status} - {detail}")]
    Rejected {
        /// Package id
        package_id: String,
        /// HTTP status code
        status: u16,
        /// Error detail reported by the server
        detail: String,
    },
}

impl ReleaserError {
    /// Stable code for operational errors, `None` for unexpected ones
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ReleaserError::Config(_) => Some("config"),
            ReleaserError::Manifest(_) => Some("manifest"),
            ReleaserError::Auth(_) => Some("auth"),
            ReleaserError::Lookup(LookupError::Ambiguous { .. }) => Some("ambiguous"),
            ReleaserError::Lookup(LookupError::NotFound { .. }) => Some("not_found"),
            ReleaserError::Lookup(LookupError::RequestFailed { .. }) => Some("lookup"),
            ReleaserError::Release(_) => Some("release"),
            ReleaserError::Http(_) | ReleaserError::Io(_) | ReleaserError::Json(_) => None,
        }
    }

    /// Whether the error is an expected operational failure
    pub fn is_operational(&self) -> bool {
        self.code().is_some()
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ReleaserError::Auth(AuthError::TokenRejected { status, .. })
            | ReleaserError::Auth(AuthError::AccountLookupFailed { status, .. })
            | ReleaserError::Lookup(LookupError::RequestFailed { status, .. })
            | ReleaserError::Release(ReleaseError::Rejected { status, .. }) => Some(*status),
            ReleaserError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaserError::Config(ConfigError::MissingCredentials { .. }) => vec![
                "Copy the Client ID and Client Secret from your integration in the Adobe Developer Console".to_string(),
                "Or pass a token obtained elsewhere with --auth.access-token".to_string(),
            ],
            ReleaserError::Manifest(ManifestError::NotFound { .. }) => vec![
                "Change to the directory containing extension.json".to_string(),
            ],
            ReleaserError::Auth(AuthError::TokenRejected { .. }) => vec![
                "Verify the client secret has not been rotated".to_string(),
                "Check that --environment matches the environment of the integration".to_string(),
            ],
            ReleaserError::Auth(AuthError::AccountNotResolved { .. }) => vec![
                "Ensure the integration is assigned to a single organization with Launch access".to_string(),
            ],
            ReleaserError::Lookup(LookupError::NotFound { .. }) => vec![
                "Upload the extension package with reactor-uploader first".to_string(),
                "Check that the version in extension.json matches the uploaded package".to_string(),
            ],
            ReleaserError::Release(ReleaseError::Rejected { .. }) => vec![
                "Only packages in development availability can be released".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Full diagnostic rendering including the source chain
    pub fn detailed(&self) -> String {
        let mut out = format!("{self}");
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        out.push_str(&format!("\n\n{self:#?}"));
        out
    }
}
