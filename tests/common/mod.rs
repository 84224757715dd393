#![allow(dead_code)]

use clap::Parser;
use reactor_releaser::config::{API_URL_VAR, TOKEN_URL_VAR};
use reactor_releaser::{Args, EffectiveConfig, EnvConfig};
use serde_json::{Value, json};
use std::path::Path;
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const TOKEN: &str = "test-token";
pub const ORG_ID: &str = "ABC123@AdobeOrg";
pub const TOKEN_PATH: &str = "/ims/token/v3";

/// Environment pointing both endpoints at the mock server
pub fn mock_env(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        (TOKEN_URL_VAR, format!("{}{}", server.uri(), TOKEN_PATH)),
        (API_URL_VAR, server.uri()),
    ]
}

pub fn config_for(server: &MockServer, extra: &[&str]) -> EffectiveConfig {
    let mut argv = vec![
        "reactor_releaser",
        "--auth.client-id",
        CLIENT_ID,
        "--auth.client-secret",
        CLIENT_SECRET,
    ];
    argv.extend_from_slice(extra);
    let args = Args::try_parse_from(argv).unwrap();
    EffectiveConfig::resolve(&args, &EnvConfig::from_pairs(mock_env(server))).unwrap()
}

pub fn token_body() -> Value {
    json!({ "access_token": TOKEN, "token_type": "bearer", "expires_in": 86399 })
}

pub fn companies_body(org_ids: &[&str]) -> Value {
    let data: Vec<Value> = org_ids
        .iter()
        .enumerate()
        .map(|(i, org)| {
            json!({
                "id": format!("CO{i}"),
                "type": "companies",
                "attributes": { "name": format!("Company {i}"), "org_id": org }
            })
        })
        .collect();
    json!({ "data": data, "meta": { "pagination": { "current_page": 1, "next_page": null } } })
}

pub fn package(id: &str, name: &str, version: &str) -> Value {
    package_with_availability(id, name, version, "development")
}

pub fn package_with_availability(id: &str, name: &str, version: &str, availability: &str) -> Value {
    json!({
        "id": id,
        "type": "extension_packages",
        "attributes": {
            "name": name,
            "version": version,
            "platform": "web",
            "availability": availability,
            "display_name": "My Extension",
            "owner_org_id": ORG_ID
        },
        "links": { "self": format!("https://reactor.adobe.io/extension_packages/{id}") }
    })
}

pub fn listing(data: Vec<Value>, page: u32, next_page: Option<u32>) -> Value {
    json!({
        "data": data,
        "meta": {
            "pagination": {
                "current_page": page,
                "next_page": next_page,
                "prev_page": if page > 1 { Some(page - 1) } else { None },
                "total_pages": next_page.unwrap_or(page),
                "total_count": 0
            }
        }
    })
}

pub fn write_manifest(dir: &Path, name: &str, version: &str) {
    std::fs::write(
        dir.join("extension.json"),
        json!({ "name": name, "version": version, "displayName": "My Extension", "platform": "web" })
            .to_string(),
    )
    .unwrap();
}
