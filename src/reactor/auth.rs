//! OAuth2 server-to-server token acquisition against Adobe IMS

use crate::config::{AuthScheme, EffectiveConfig};
use crate::error::{AuthError, ConfigError, Result};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::client::ApiFailure;

/// Bearer token valid for the current process only
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_in: Option<Duration>,
}

impl AccessToken {
    /// Wrap a token obtained elsewhere
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_in: None,
        }
    }

    /// Raw token value for the Authorization header
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Lifetime reported by the token endpoint
    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[USER_ACCESS_TOKEN]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Obtain the access token for this run.
///
/// A token supplied with `--auth.access-token` is returned verbatim without
/// touching the network. Otherwise the client credentials are exchanged at
/// the environment's IMS token endpoint.
pub async fn acquire_token(http: &reqwest::Client, config: &EffectiveConfig) -> Result<AccessToken> {
    if let Some(token) = &config.access_token {
        log::debug!("Using access token supplied on the command line");
        return Ok(AccessToken::new(token.clone()));
    }

    match config.auth_scheme {
        AuthScheme::OauthServerToServer => exchange_client_credentials(http, config).await,
    }
}

async fn exchange_client_credentials(
    http: &reqwest::Client,
    config: &EffectiveConfig,
) -> Result<AccessToken> {
    let (Some(client_id), Some(client_secret)) = (&config.client_id, &config.client_secret) else {
        let env = config.environment.env_suffix();
        return Err(ConfigError::MissingCredentials {
            id_var: format!("{}_CLIENT_ID_{env}", crate::config::ENV_PREFIX),
            secret_var: format!("{}_CLIENT_SECRET_{env}", crate::config::ENV_PREFIX),
        }
        .into());
    };

    let url = config.endpoints.token_url.clone();
    log::debug!("→ POST {url}");

    let response = http
        .post(url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("scope", config.scope.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let failure = ApiFailure::from_response(response).await;
        return Err(AuthError::TokenRejected {
            status: failure.status,
            detail: failure.detail,
        }
        .into());
    }

    // Body holds the token, so only the status is logged.
    log::debug!("← {}", response.status().as_u16());
    let body: TokenResponse = response.json().await?;
    let value = body
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedTokenResponse)?;

    Ok(AccessToken {
        value,
        expires_in: body.expires_in.map(Duration::from_secs),
    })
}
