//! Matcher configuration.

use crate::errors::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// Limits applied to one top-level match.
///
/// # Examples
///
/// ```rust
/// use cstmatch::config::MatchConfig;
/// let config = MatchConfig::from_json(r#"{ "max_depth": 64 }"#).unwrap();
/// assert_eq!(config.max_depth, 64);
/// assert_eq!(config.max_fallbacks, MatchConfig::default().max_fallbacks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Deepest nesting of child matches before giving up.
    pub max_depth: usize,
    /// How many times a single node may restart on a fallback source.
    pub max_fallbacks: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_fallbacks: 4,
        }
    }
}

impl MatchConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_fallbacks(mut self, max_fallbacks: usize) -> Self {
        self.max_fallbacks = max_fallbacks;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MatchError::InvalidConfig {
            message: e.to_string(),
        })
    }
}
