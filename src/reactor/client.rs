//! Reactor API client.
//!
//! Wraps a `reqwest::Client` and applies the headers every Reactor call
//! needs: bearer token, API key, JSON:API media types and, once known, the
//! IMS org of the technical account.

use super::auth::AccessToken;
use super::models::{ErrorDocument, OAuthErrorResponse};
use crate::config::{API_URL_VAR, EffectiveConfig, HttpSettings};
use crate::error::{ConfigError, ReleaserError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// JSON:API request media type
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Accept header pinning the Reactor API revision
pub const ACCEPT_REVISION: &str = "application/vnd.api+json;revision=1";

/// Header carrying the integration client id
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header scoping a request to an IMS organization
pub const ORG_HEADER: &str = "x-gw-ims-org-id";

/// Build the HTTP client shared by every step of a run
pub fn build_http_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("reactor_releaser/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.timeout)
        .build()?;
    Ok(client)
}

/// Non-2xx answer from a remote endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status code
    pub status: u16,
    /// Best-effort error detail extracted from the body
    pub detail: String,
}

impl ApiFailure {
    /// Consume a failed response into status and detail
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body)
            .or_else(|| status.canonical_reason().map(String::from))
            .unwrap_or_else(|| "unknown error".to_string());
        log::debug!("← {} {}", status.as_u16(), detail);
        Self {
            status: status.as_u16(),
            detail,
        }
    }
}

/// Extract a readable message from a JSON:API, OAuth or plain-text error body
pub fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(doc) = serde_json::from_str::<ErrorDocument>(trimmed) {
        let messages: Vec<String> = doc
            .errors
            .iter()
            .filter_map(|e| match (&e.title, &e.detail) {
                (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
                (Some(only), None) | (None, Some(only)) => Some(only.clone()),
                (None, None) => None,
            })
            .collect();
        if !messages.is_empty() {
            return Some(messages.join("; "));
        }
    }

    if let Ok(oauth) = serde_json::from_str::<OAuthErrorResponse>(trimmed)
        && let Some(message) = oauth.error_description.or(oauth.error)
    {
        return Some(message);
    }

    Some(trimmed.to_string())
}

/// Authenticated client for the Reactor API
#[derive(Debug, Clone)]
pub struct ReactorClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    token: AccessToken,
}

impl ReactorClient {
    /// Create a client for the configured environment
    pub fn new(http: reqwest::Client, config: &EffectiveConfig, token: AccessToken) -> Self {
        let mut base_url = config.endpoints.reactor_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            token,
        }
    }

    /// Resolve a path relative to the API base URL
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                ConfigError::InvalidUrl {
                    variable: API_URL_VAR.to_string(),
                    value: format!("{}{path}", self.base_url),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn request(&self, method: Method, url: Url, org_id: Option<&str>) -> RequestBuilder {
        log::debug!("→ {method} {url}");
        let builder = self
            .http
            .request(method, url)
            .bearer_auth(self.token.as_str())
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, ACCEPT_REVISION)
            .header(CONTENT_TYPE, JSON_API_MEDIA_TYPE);

        match org_id {
            Some(org) => builder.header(ORG_HEADER, org),
            None => builder,
        }
    }

    /// GET a JSON:API document, mapping non-2xx answers with `on_failure`
    pub async fn get_json<T, F>(&self, url: Url, org_id: Option<&str>, on_failure: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(ApiFailure) -> ReleaserError,
    {
        let response = self.request(Method::GET, url, org_id).send().await?;
        Self::decode(response, on_failure).await
    }

    /// PATCH a JSON:API document, mapping non-2xx answers with `on_failure`
    pub async fn patch_json<B, T, F>(
        &self,
        url: Url,
        org_id: Option<&str>,
        body: &B,
        on_failure: F,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        F: FnOnce(ApiFailure) -> ReleaserError,
    {
        let payload = serde_json::to_vec(body)?;
        log::debug!("  body: {}", String::from_utf8_lossy(&payload));
        let response = self
            .request(Method::PATCH, url, org_id)
            .body(payload)
            .send()
            .await?;
        Self::decode(response, on_failure).await
    }

    async fn decode<T, F>(response: Response, on_failure: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(ApiFailure) -> ReleaserError,
    {
        if !response.status().is_success() {
            return Err(on_failure(ApiFailure::from_response(response).await));
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("← {status} {body}");
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_json_api() {
        let body = r#"{"errors":[{"title":"Unprocessable","detail":"already released"}]}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("Unprocessable: already released")
        );
    }

    #[test]
    fn test_error_detail_oauth() {
        let body = r#"{"error":"invalid_client","error_description":"invalid client_secret parameter"}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("invalid client_secret parameter")
        );
    }

    #[test]
    fn test_error_detail_plain_text() {
        assert_eq!(error_detail("  gateway down \n").as_deref(), Some("gateway down"));
        assert_eq!(error_detail("   "), None);
    }
}
