//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_STORE_BUFFER` - Request channel capacity of every store (default: 32, must be > 0)
//! - `SHOP_SEED_DEMO` - Load the demo data set at startup (default: false)
//!
//! The binary loads a `.env` file first, so both can live there.

use thiserror::Error;

const DEFAULT_STORE_BUFFER: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Runtime configuration of a [`ShopSystem`](crate::lifecycle::ShopSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Capacity of each store's request channel; senders wait while it is full.
    pub store_buffer: usize,
    /// Whether `main` seeds the demo data set.
    pub seed_demo: bool,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            store_buffer: DEFAULT_STORE_BUFFER,
            seed_demo: false,
        }
    }
}

impl ShopConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_buffer = match lookup("SHOP_STORE_BUFFER") {
            Some(raw) => parse_buffer("SHOP_STORE_BUFFER", &raw)?,
            None => DEFAULT_STORE_BUFFER,
        };
        let seed_demo = match lookup("SHOP_SEED_DEMO") {
            Some(raw) => parse_flag("SHOP_SEED_DEMO", &raw)?,
            None => false,
        };
        Ok(Self {
            store_buffer,
            seed_demo,
        })
    }
}

fn parse_buffer(key: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ShopConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ShopConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(load(&[]).unwrap(), ShopConfig::default());
    }

    #[test]
    fn values_are_parsed() {
        let config = load(&[("SHOP_STORE_BUFFER", "64"), ("SHOP_SEED_DEMO", "TRUE")]).unwrap();
        assert_eq!(config.store_buffer, 64);
        assert!(config.seed_demo);
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let err = load(&[("SHOP_STORE_BUFFER", "0")]).unwrap_err();
        assert!(err.to_string().contains("SHOP_STORE_BUFFER"));
    }

    #[test]
    fn garbage_flag_is_rejected() {
        assert!(load(&[("SHOP_SEED_DEMO", "maybe")]).is_err());
    }
}
