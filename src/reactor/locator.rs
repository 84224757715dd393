//! Extension package lookup.
//!
//! The listing endpoint is paginated. [`PackagePages`] walks it one page at a
//! time and stops when the server reports no further page.

use super::account::TechnicalAccountData;
use super::client::ReactorClient;
use super::models::{Document, ExtensionPackageAttributes, Resource};
use crate::config::Environment;
use crate::error::{LookupError, Result};
use crate::manifest::ExtensionManifest;

/// Records requested per page
pub const PAGE_SIZE: u32 = 100;

/// Availability of a package that can still be released
pub const DEVELOPMENT: &str = "development";

/// Extension package as stored on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPackage {
    /// Package id (e.g., "EP...")
    pub id: String,
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
    /// Target platform
    pub platform: Option<String>,
    /// Current availability
    pub availability: Option<String>,
    /// Human readable name
    pub display_name: Option<String>,
    /// Owning IMS organization
    pub owner_org_id: Option<String>,
    /// Canonical resource URL
    pub self_link: Option<String>,
}

impl ExtensionPackage {
    /// Name shown to the user, falling back to the package name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether the package is the development build described by `manifest`
    pub fn matches(&self, manifest: &ExtensionManifest) -> bool {
        self.name == manifest.name
            && self.version == manifest.version
            && self.availability.as_deref() == Some(DEVELOPMENT)
    }
}

impl From<Resource<ExtensionPackageAttributes>> for ExtensionPackage {
    fn from(resource: Resource<ExtensionPackageAttributes>) -> Self {
        let attributes = resource.attributes;
        Self {
            id: resource.id,
            name: attributes.name,
            version: attributes.version,
            platform: attributes.platform,
            availability: attributes.availability,
            display_name: attributes.display_name,
            owner_org_id: attributes.owner_org_id,
            self_link: resource.links.and_then(|l| l.self_link),
        }
    }
}

/// Lazy cursor over the extension package listing
pub struct PackagePages<'a> {
    client: &'a ReactorClient,
    account: &'a TechnicalAccountData,
    manifest: &'a ExtensionManifest,
    next: Option<u32>,
}

impl<'a> PackagePages<'a> {
    /// Start at the first page
    pub fn new(
        client: &'a ReactorClient,
        account: &'a TechnicalAccountData,
        manifest: &'a ExtensionManifest,
    ) -> Self {
        Self {
            client,
            account,
            manifest,
            next: Some(1),
        }
    }

    /// Fetch the next page, or `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Vec<ExtensionPackage>>> {
        let Some(page) = self.next else {
            return Ok(None);
        };

        let mut url = self.client.url("extension_packages")?;
        url.query_pairs_mut()
            .append_pair("filter[name]", &format!("EQ {}", self.manifest.name))
            .append_pair("filter[version]", &format!("EQ {}", self.manifest.version))
            .append_pair("filter[platform]", &format!("EQ {}", self.manifest.platform))
            .append_pair("filter[availability]", &format!("EQ {DEVELOPMENT}"))
            .append_pair("page[size]", &PAGE_SIZE.to_string())
            .append_pair("page[number]", &page.to_string());

        let document: Document<Vec<Resource<ExtensionPackageAttributes>>> = self
            .client
            .get_json(url, Some(self.account.org_id.as_str()), |failure| {
                LookupError::RequestFailed {
                    status: failure.status,
                    detail: failure.detail,
                }
                .into()
            })
            .await?;

        let pagination = document.meta.and_then(|m| m.pagination).unwrap_or_default();

        // A cursor that does not move forward, or runs past the reported
        // page count, would loop forever.
        self.next = match (pagination.next_page, pagination.total_pages) {
            (None, _) => None,
            (Some(_), Some(total)) if page >= total => {
                log::warn!("Server reported next_page after last page {page} of {total}");
                None
            }
            (Some(n), _) if n > page => Some(n),
            (Some(n), _) => {
                log::warn!("Server returned non-advancing next_page {n} after page {page}");
                None
            }
        };

        log::debug!(
            "Extension package page {page}: {} record(s), next page {:?}",
            document.data.len(),
            self.next
        );
        Ok(Some(document.data.into_iter().map(ExtensionPackage::from).collect()))
    }
}

/// Find the one package matching the manifest's name and version.
///
/// Every page is scanned so that duplicates on later pages are reported as
/// ambiguous instead of silently picking the first hit.
pub async fn locate_package(
    client: &ReactorClient,
    account: &TechnicalAccountData,
    manifest: &ExtensionManifest,
    environment: Environment,
) -> Result<ExtensionPackage> {
    let mut pages = PackagePages::new(client, account, manifest);
    let mut matches = Vec::new();

    while let Some(page) = pages.next_page().await? {
        matches.extend(page.into_iter().filter(|p| p.matches(manifest)));
    }

    match matches.len() {
        0 => Err(LookupError::NotFound {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            environment: environment.to_string(),
        }
        .into()),
        1 => Ok(matches.remove(0)),
        _ => Err(LookupError::Ambiguous {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            ids: matches.into_iter().map(|p| p.id).collect(),
        }
        .into()),
    }
}
