//! Reactor API integration: token exchange, account lookup, package lookup
//! and availability changes

mod account;
mod auth;
mod availability;
mod client;
mod locator;
pub mod models;

pub use account::{TechnicalAccountData, resolve_technical_account};
pub use auth::{AccessToken, acquire_token};
pub use availability::{AvailabilityAction, change_availability};
pub use client::{ApiFailure, ReactorClient, build_http_client, error_detail};
pub use locator::{ExtensionPackage, PAGE_SIZE, PackagePages, locate_package};
