//! Technical account resolution

use super::client::ReactorClient;
use super::models::{CompanyAttributes, Document, Resource};
use crate::error::{AuthError, Result};

/// Company and IMS org the integration belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicalAccountData {
    /// Reactor company id (e.g., "CO...")
    pub company_id: String,
    /// IMS organization id (e.g., "...@AdobeOrg")
    pub org_id: String,
    /// Company display name
    pub company_name: Option<String>,
}

/// Look up the single company visible to the integration
pub async fn resolve_technical_account(client: &ReactorClient) -> Result<TechnicalAccountData> {
    let url = client.url("companies")?;
    let document: Document<Vec<Resource<CompanyAttributes>>> = client
        .get_json(url, None, |failure| {
            AuthError::AccountLookupFailed {
                status: failure.status,
                detail: failure.detail,
            }
            .into()
        })
        .await?;

    let mut companies = document.data;
    if companies.len() != 1 {
        return Err(AuthError::AccountNotResolved {
            count: companies.len(),
        }
        .into());
    }

    let company = companies.remove(0);
    log::info!(
        "Technical account resolved: company {} in org {}",
        company.id,
        company.attributes.org_id
    );

    Ok(TechnicalAccountData {
        company_id: company.id,
        org_id: company.attributes.org_id,
        company_name: company.attributes.name,
    })
}
