//! Target environments and their service endpoints.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Legacy environment token that is silently mapped onto stage
pub const LEGACY_QE: &str = "qe";

/// Reactor environment receiving the release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Public production environment
    #[default]
    Production,
    /// Adobe-internal stage environment
    Stage,
    /// Adobe-internal integration environment
    Integration,
}

/// Result of parsing an `--environment` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedEnvironment {
    /// Environment that will actually be used
    pub environment: Environment,
    /// Deprecated token the user typed, when it was remapped
    pub redirected_from: Option<&'static str>,
}

impl Environment {
    /// Lower-case name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Stage => "stage",
            Environment::Integration => "integration",
        }
    }

    /// Suffix for environment-specific variables (`..._CLIENT_ID_STAGE`)
    pub fn env_suffix(&self) -> &'static str {
        match self {
            Environment::Production => "PRODUCTION",
            Environment::Stage => "STAGE",
            Environment::Integration => "INTEGRATION",
        }
    }

    /// Default IMS token endpoint
    pub fn token_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://ims-na1.adobelogin.com/ims/token/v3",
            Environment::Stage | Environment::Integration => {
                "https://ims-na1-stg1.adobelogin.com/ims/token/v3"
            }
        }
    }

    /// Default Reactor API base URL
    pub fn reactor_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://reactor.adobe.io",
            Environment::Stage => "https://reactor-stage.adobe.io",
            Environment::Integration => "https://reactor-integration.adobe.io",
        }
    }

    /// Resolve the optional `--environment` flag, remapping `qe` to stage
    pub fn select(value: Option<&str>) -> Result<SelectedEnvironment, ConfigError> {
        let Some(raw) = value else {
            return Ok(SelectedEnvironment {
                environment: Environment::Production,
                redirected_from: None,
            });
        };

        if raw.trim().eq_ignore_ascii_case(LEGACY_QE) {
            return Ok(SelectedEnvironment {
                environment: Environment::Stage,
                redirected_from: Some(LEGACY_QE),
            });
        }

        Ok(SelectedEnvironment {
            environment: raw.parse()?,
            redirected_from: None,
        })
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "stage" => Ok(Environment::Stage),
            "integration" => Ok(Environment::Integration),
            _ => Err(ConfigError::UnknownEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
