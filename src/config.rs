use crate::domain::gateway::DEFAULT_CURRENCY;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::path::Path;

pub const ENV_DEFAULT_CURRENCY: &str = "LOCALPAY_DEFAULT_CURRENCY";
pub const ENV_DEFAULT_DRIVER: &str = "LOCALPAY_DEFAULT_DRIVER";
pub const ENV_DRIVERS: &str = "LOCALPAY_DRIVERS";

/// Settings for the gateway manager.
///
/// `drivers` is the whitelist of driver names a gateway record may select.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    pub default_currency: String,
    pub default_driver: String,
    pub drivers: Vec<String>,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            default_driver: "LocalDummy".to_string(),
            drivers: vec!["LocalDummy".to_string()],
        }
    }
}

impl PaymentsConfig {
    /// Reads a JSON config file; missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| PaymentError::Config(format!("{}: {e}", path.display())))
    }

    /// Defaults, then the optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies overrides from `lookup`, which maps an env var name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup(ENV_DEFAULT_CURRENCY).filter(|v| !v.trim().is_empty()) {
            self.default_currency = currency.trim().to_string();
        }
        if let Some(driver) = lookup(ENV_DEFAULT_DRIVER).filter(|v| !v.trim().is_empty()) {
            self.default_driver = driver.trim().to_string();
        }
        if let Some(drivers) = lookup(ENV_DRIVERS) {
            self.drivers = drivers
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }
        self
    }
}
