//! Availability changes on extension packages

use super::account::TechnicalAccountData;
use super::client::ReactorClient;
use super::locator::ExtensionPackage;
use super::models::{
    AvailabilityData, AvailabilityMeta, AvailabilityRequest, Document, ExtensionPackageAttributes,
    Resource,
};
use crate::error::{ReleaseError, Result};

/// Availability transition requested from the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityAction {
    /// Promote a development package to private availability
    ReleasePrivate,
}

impl AvailabilityAction {
    /// Action name understood by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityAction::ReleasePrivate => "release_private",
        }
    }
}

/// PATCH the package with `action` and return its updated state
pub async fn change_availability(
    client: &ReactorClient,
    account: &TechnicalAccountData,
    package: &ExtensionPackage,
    action: AvailabilityAction,
) -> Result<ExtensionPackage> {
    let url = client.url(&format!("extension_packages/{}", package.id))?;
    let body = AvailabilityRequest {
        data: AvailabilityData {
            id: &package.id,
            kind: "extension_packages",
            meta: AvailabilityMeta {
                action: action.as_str(),
            },
        },
    };

    let document: Document<Resource<ExtensionPackageAttributes>> = client
        .patch_json(url, Some(account.org_id.as_str()), &body, |failure| {
            ReleaseError::Rejected {
                package_id: package.id.clone(),
                status: failure.status,
                detail: failure.detail,
            }
            .into()
        })
        .await?;

    Ok(document.data.into())
}
