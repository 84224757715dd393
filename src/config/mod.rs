//! Configuration resolution.
//!
//! Turns parsed CLI flags and an environment snapshot into one immutable
//! [`EffectiveConfig`]. Precedence for every field is: explicit flag, then the
//! environment-specific variable, then the generic variable, then the default.

mod env;
mod environment;

pub use env::EnvConfig;
pub use environment::{Environment, LEGACY_QE, SelectedEnvironment};

use crate::cli::Args;
use crate::error::{ConfigError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Prefix of the credential environment variables
pub const ENV_PREFIX: &str = "REACTOR_IO_INTEGRATION";

/// Overrides the token endpoint of the selected environment
pub const TOKEN_URL_VAR: &str = "REACTOR_RELEASER_TOKEN_URL";

/// Overrides the Reactor API base URL of the selected environment
pub const API_URL_VAR: &str = "REACTOR_RELEASER_API_URL";

/// Request timeout in seconds
pub const TIMEOUT_VAR: &str = "REACTOR_RELEASER_TIMEOUT_SECS";

/// Scopes requested when `--auth.scope` is not given
pub const DEFAULT_SCOPE: &str = "AdobeID,openid,read_organizations,additional_info.job_function,additional_info.projectedProductContext,additional_info.roles";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MAX_TIMEOUT_SECS: u64 = 600;

/// Method used to obtain an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AuthScheme {
    /// OAuth2 client-credentials against Adobe IMS
    #[default]
    #[value(name = "oauth-server-to-server")]
    OauthServerToServer,
}

/// Service endpoints for one environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// IMS token endpoint
    pub token_url: Url,
    /// Reactor API base URL
    pub reactor_url: Url,
}

/// Settings shared by every outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fully resolved, immutable run configuration
#[derive(Clone)]
pub struct EffectiveConfig {
    /// Environment receiving the release
    pub environment: Environment,
    /// Deprecated `--environment` token that was remapped, if any
    pub redirected_from: Option<&'static str>,
    /// Token acquisition method
    pub auth_scheme: AuthScheme,
    /// Integration client id
    pub client_id: Option<String>,
    /// Integration client secret
    pub client_secret: Option<String>,
    /// Comma-separated scopes for the token request
    pub scope: String,
    /// Pre-supplied access token, bypasses the token exchange
    pub access_token: Option<String>,
    /// Value sent as `x-api-key`
    pub api_key: String,
    /// Verbose diagnostics
    pub verbose: bool,
    /// Skip the interactive confirmation
    pub confirm_release: bool,
    /// Endpoints for `environment`
    pub endpoints: Endpoints,
    /// HTTP client settings
    pub http: HttpSettings,
}

impl fmt::Debug for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveConfig")
            .field("environment", &self.environment)
            .field("redirected_from", &self.redirected_from)
            .field("auth_scheme", &self.auth_scheme)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("scope", &self.scope)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_key", &self.api_key)
            .field("verbose", &self.verbose)
            .field("confirm_release", &self.confirm_release)
            .field("endpoints", &self.endpoints)
            .field("http", &self.http)
            .finish()
    }
}

impl EffectiveConfig {
    /// Resolve configuration from CLI flags and environment variables
    pub fn resolve(args: &Args, env: &EnvConfig) -> Result<Self> {
        let selected = Environment::select(args.environment.as_deref())?;
        let environment = selected.environment;

        let id_vars = credential_vars("CLIENT_ID", environment);
        let secret_vars = credential_vars("CLIENT_SECRET", environment);

        let client_id = non_empty(args.client_id.as_deref()).or_else(|| env.first_of(&id_vars));
        let client_secret =
            non_empty(args.client_secret.as_deref()).or_else(|| env.first_of(&secret_vars));
        let access_token = non_empty(args.access_token.as_deref());

        let api_key = match (&client_id, &client_secret, &access_token) {
            (Some(id), Some(_), _) | (Some(id), None, Some(_)) => id.clone(),
            (None, _, Some(token)) => client_id_from_token(token)?,
            (_, _, None) => {
                return Err(ConfigError::MissingCredentials {
                    id_var: id_vars[0].clone(),
                    secret_var: secret_vars[0].clone(),
                }
                .into());
            }
        };

        let endpoints = Endpoints {
            token_url: endpoint(env, TOKEN_URL_VAR, environment.token_url())?,
            reactor_url: endpoint(env, API_URL_VAR, environment.reactor_url())?,
        };

        let http = HttpSettings {
            timeout: Duration::from_secs(env.parse_clamped(
                TIMEOUT_VAR,
                DEFAULT_TIMEOUT_SECS,
                1,
                MAX_TIMEOUT_SECS,
            )),
        };

        let config = Self {
            environment,
            redirected_from: selected.redirected_from,
            auth_scheme: args.auth_scheme,
            client_id,
            client_secret,
            scope: non_empty(args.scope.as_deref()).unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            access_token,
            api_key,
            verbose: args.verbose,
            confirm_release: args.confirm_package_release,
            endpoints,
            http,
        };

        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }
}

/// Variable names consulted for a credential, most specific first
fn credential_vars(kind: &str, environment: Environment) -> Vec<String> {
    vec![
        format!("{ENV_PREFIX}_{kind}_{}", environment.env_suffix()),
        format!("{ENV_PREFIX}_{kind}"),
    ]
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn endpoint(env: &EnvConfig, variable: &str, default: &str) -> std::result::Result<Url, ConfigError> {
    let value = env.get(variable).unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        variable: variable.to_string(),
        value: value.clone(),
        reason: e.to_string(),
    })
}

/// Read the `client_id` claim from an IMS JWT
fn client_id_from_token(token: &str) -> std::result::Result<String, ConfigError> {
    let unavailable = |reason: &str| ConfigError::ApiKeyUnavailable {
        reason: reason.to_string(),
    };

    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| unavailable("token is not a JWT"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| unavailable(&format!("payload is not base64url ({e})")))?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| unavailable(&format!("payload is not JSON ({e})")))?;

    claims
        .get("client_id")
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| unavailable("no client_id claim"))
}
