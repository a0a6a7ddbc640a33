//! Algebra configuration
//!
//! Tuning knobs for [`TypeAlgebra`](crate::TypeAlgebra), loadable from TOML:
//!
//! ```toml
//! memoize = true
//! max_depth = 256
//! cache_capacity = 4096
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse TOML
    #[error("Failed to parse algebra config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid algebra config: {0}")]
    Invalid(String),
}

/// Configuration of a [`TypeAlgebra`](crate::TypeAlgebra)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlgebraConfig {
    /// Memoize subset and intersection results by operand pair
    #[serde(default = "default_memoize")]
    pub memoize: bool,

    /// Deepest recursion allowed before a query gives up
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Entries per memo table before it is flushed
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_memoize() -> bool {
    true
}

fn default_max_depth() -> usize {
    256
}

fn default_cache_capacity() -> usize {
    4096
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self {
            memoize: default_memoize(),
            max_depth: default_max_depth(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl AlgebraConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AlgebraConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".to_string()));
        }
        if self.memoize && self.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "cache_capacity must be at least 1 when memoize is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Same configuration with memoization turned off
    pub fn without_memoization(mut self) -> Self {
        self.memoize = false;
        self
    }
}
