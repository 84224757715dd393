//! JSON:API documents exchanged with the Reactor API

use serde::{Deserialize, Serialize};

/// Top-level JSON:API document
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    /// Primary data
    pub data: T,
    /// Listing metadata
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

/// A single JSON:API resource object
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    /// Resource id (e.g., "EP1234...")
    pub id: String,
    /// Resource attributes
    pub attributes: A,
    /// Resource links
    #[serde(default)]
    pub links: Option<Links>,
}

/// Resource links
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    /// Canonical URL of the resource
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

/// Listing metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeta {
    /// Pagination cursor
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Page cursor returned with every listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    /// Next page to request, `None` on the last page
    #[serde(default)]
    pub next_page: Option<u32>,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Company attributes
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyAttributes {
    /// Company display name
    #[serde(default)]
    pub name: Option<String>,
    /// IMS organization id
    pub org_id: String,
}

/// Extension package attributes
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionPackageAttributes {
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
    /// Target platform
    #[serde(default)]
    pub platform: Option<String>,
    /// Current availability (development, private, public)
    #[serde(default)]
    pub availability: Option<String>,
    /// Human readable name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Owning IMS organization
    #[serde(default)]
    pub owner_org_id: Option<String>,
}

/// Body of an availability change request
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityRequest<'a> {
    /// Resource identifier and action
    pub data: AvailabilityData<'a>,
}

/// Resource identifier carrying the action meta
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityData<'a> {
    /// Package id
    pub id: &'a str,
    /// Always "extension_packages"
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Requested action
    pub meta: AvailabilityMeta,
}

/// Action requested on the package
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityMeta {
    /// Action name (e.g., "release_private")
    pub action: &'static str,
}

/// JSON:API error document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    /// Reported errors
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// One JSON:API error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    /// Short summary
    #[serde(default)]
    pub title: Option<String>,
    /// Explanation specific to this occurrence
    #[serde(default)]
    pub detail: Option<String>,
}

/// OAuth2 error response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthErrorResponse {
    /// Error code
    #[serde(default)]
    pub error: Option<String>,
    /// Human readable description
    #[serde(default)]
    pub error_description: Option<String>,
}
