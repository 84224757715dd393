//! Snapshot of the process environment.
//!
//! Resolution reads variables through [`EnvConfig`] instead of `std::env`
//! so tests can supply their own values without touching the process.

use std::collections::HashMap;

/// Immutable view of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Capture the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable, treating empty values as unset
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars
            .get(name)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    /// Return the first variable in `names` that is set
    pub fn first_of(&self, names: &[String]) -> Option<String> {
        names.iter().find_map(|name| self.get(name))
    }

    /// Parse a numeric variable, clamped to `[min, max]`
    pub fn parse_clamped(&self, name: &str, default: u64, min: u64, max: u64) -> u64 {
        self.get(name)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|v| v.clamp(min, max))
            .unwrap_or(default)
    }
}
