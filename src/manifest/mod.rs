//! Extension package manifest discovery from extension.json

use crate::error::{ManifestError, Result};
use std::path::Path;

/// File name of the extension manifest
pub const MANIFEST_FILE: &str = "extension.json";

/// Platform assumed when the manifest does not name one
pub const DEFAULT_PLATFORM: &str = "web";

/// Package identity extracted from extension.json
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionManifest {
    /// Extension name (e.g., "my-extension")
    pub name: String,

    /// Extension version (e.g., "1.0.0")
    pub version: String,

    /// Target platform ("web", "mobile", "edge")
    pub platform: String,

    /// Human readable name, if specified
    pub display_name: Option<String>,
}

impl ExtensionManifest {
    /// Load extension.json from `dir`
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(MANIFEST_FILE))
    }

    /// Load and validate a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| ManifestError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;

        let manifest = Self::from_value(&value)?;
        log::debug!(
            "Loaded {} from {}: {}@{}",
            MANIFEST_FILE,
            path.display(),
            manifest.name,
            manifest.version
        );
        Ok(manifest)
    }

    /// Extract the consumed fields from a parsed manifest
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let name = required_str(value, "name")?;
        let version = required_str(value, "version")?;

        semver::Version::parse(&version).map_err(|source| ManifestError::InvalidVersion {
            version: version.clone(),
            source,
        })?;

        Ok(Self {
            name,
            version,
            platform: value
                .get("platform")
                .and_then(|v| v.as_str())
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_PLATFORM)
                .to_string(),
            display_name: value
                .get("displayName")
                .and_then(|v| v.as_str())
                .map(String::from),
        })
    }

    /// Name shown to the user, falling back to the package name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

fn required_str(value: &serde_json::Value, field: &'static str) -> Result<String> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| ManifestError::MissingField { field }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaserError;

    fn write_manifest(dir: &Path, content: &str) {
        std::fs::write(dir.join(MANIFEST_FILE), content).unwrap();
    }

    #[test]
    fn test_load_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{"name":"my-ext","version":"1.0.0","displayName":"My Ext","platform":"edge"}"#,
        );

        let manifest = ExtensionManifest::load_from_dir(dir.path()).unwrap();
        assert_eq!(manifest.name, "my-ext");
        assert_eq!(manifest.version, "1.0.0");
        assert_eq!(manifest.platform, "edge");
        assert_eq!(manifest.label(), "My Ext");
    }

    #[test]
    fn test_platform_defaults_to_web() {
        let manifest = ExtensionManifest::from_value(&serde_json::json!({
            "name": "my-ext",
            "version": "2.3.4"
        }))
        .unwrap();
        assert_eq!(manifest.platform, "web");
        assert_eq!(manifest.label(), "my-ext");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExtensionManifest::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaserError::Manifest(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "{ not json");
        let err = ExtensionManifest::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaserError::Manifest(ManifestError::Invalid { .. })));
    }

    #[test]
    fn test_missing_fields() {
        let err = ExtensionManifest::from_value(&serde_json::json!({ "version": "1.0.0" }))
            .unwrap_err();
        assert!(matches!(
            err,
            ReleaserError::Manifest(ManifestError::MissingField { field: "name" })
        ));

        let err = ExtensionManifest::from_value(&serde_json::json!({ "name": "x", "version": "" }))
            .unwrap_err();
        assert!(matches!(
            err,
            ReleaserError::Manifest(ManifestError::MissingField { field: "version" })
        ));
    }

    #[test]
    fn test_non_semver_version() {
        let err = ExtensionManifest::from_value(&serde_json::json!({
            "name": "x",
            "version": "one"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ReleaserError::Manifest(ManifestError::InvalidVersion { .. })
        ));
    }
}
