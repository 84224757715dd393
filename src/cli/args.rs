//! Command line argument parsing.
//!
//! Flag names mirror the Reactor tooling (`--auth.client-id`, ...). Value
//! validation beyond clap's own lives in [`crate::config`].

use crate::config::AuthScheme;
use clap::Parser;

/// Release a development extension package on Adobe Experience Platform Launch
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reactor_releaser",
    version,
    about = "Release a development extension package on Adobe Experience Platform Launch",
    long_about = "Finds the extension package described by ./extension.json on the Reactor \
API and releases it after confirmation.

Credentials may also be provided through REACTOR_IO_INTEGRATION_CLIENT_ID_<ENV>, \
REACTOR_IO_INTEGRATION_CLIENT_SECRET_<ENV>, REACTOR_IO_INTEGRATION_CLIENT_ID and \
REACTOR_IO_INTEGRATION_CLIENT_SECRET, where <ENV> is PRODUCTION, STAGE or INTEGRATION."
)]
pub struct Args {
    /// The method to obtain an access token
    #[arg(long = "auth.scheme", value_enum, default_value_t = AuthScheme::OauthServerToServer)]
    pub auth_scheme: AuthScheme,

    /// Client ID of your Adobe I/O integration
    #[arg(long = "auth.client-id", value_name = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// Client Secret of your Adobe I/O integration
    #[arg(long = "auth.client-secret", value_name = "CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// Comma-separated list of scopes to request instead of the defaults
    #[arg(long = "auth.scope", value_name = "SCOPES")]
    pub scope: Option<String>,

    /// Access token to use instead of exchanging client credentials
    #[arg(long = "auth.access-token", value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Environment receiving the release: stage, qe or integration (Adobe internal use only)
    #[arg(long, value_name = "ENV")]
    pub environment: Option<String>,

    /// Log additional information useful for debugging
    #[arg(long)]
    pub verbose: bool,

    /// Skip the confirmation that this is the extension package to release
    #[arg(long = "confirm-package-release")]
    pub confirm_package_release: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_flags() {
        let args = Args::try_parse_from([
            "reactor_releaser",
            "--auth.client-id",
            "id",
            "--auth.client-secret=secret",
            "--auth.scope",
            "openid",
            "--environment",
            "stage",
            "--verbose",
            "--confirm-package-release",
        ])
        .unwrap();
        assert_eq!(args.client_id.as_deref(), Some("id"));
        assert_eq!(args.client_secret.as_deref(), Some("secret"));
        assert_eq!(args.scope.as_deref(), Some("openid"));
        assert_eq!(args.environment.as_deref(), Some("stage"));
        assert!(args.verbose);
        assert!(args.confirm_package_release);
    }

    #[test]
    fn test_auth_scheme_default_and_validation() {
        let args = Args::try_parse_from(["reactor_releaser"]).unwrap();
        assert_eq!(args.auth_scheme, AuthScheme::OauthServerToServer);
        assert!(!args.verbose);
        assert!(!args.confirm_package_release);

        assert!(Args::try_parse_from(["reactor_releaser", "--auth.scheme", "jwt"]).is_err());
    }
}
