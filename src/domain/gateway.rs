use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "NPR";

/// Settable configuration of a gateway instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayParameters {
    pub token: String,
    pub currency: String,
    pub test_mode: bool,
}

impl Default for GatewayParameters {
    fn default() -> Self {
        Self {
            token: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            test_mode: false,
        }
    }
}

impl GatewayParameters {
    /// Applies a setting by name, ignoring `-`, `_` and case in the key.
    ///
    /// Returns `false` when the key is not a known setting or the value does
    /// not parse.
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "token" | "authtoken" => {
                self.token = value.to_string();
                true
            }
            "currency" | "currencycode" => {
                self.currency = value.to_string();
                true
            }
            "testmode" => match parse_flag(value) {
                Some(flag) => {
                    self.test_mode = flag;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// The configurable fields a gateway exposes, with their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultParameters {
    pub token: String,
    pub currency: String,
}

impl Default for DefaultParameters {
    fn default() -> Self {
        Self {
            token: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// A stored gateway configuration row, as an admin would edit it.
///
/// `parameters` holds a JSON object of provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRecord {
    pub slug: String,
    pub name: String,
    pub driver: Option<String>,
    pub parameters: String,
    pub is_test_mode: bool,
    pub is_active: bool,
}

impl GatewayRecord {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            driver: None,
            parameters: "{}".to_string(),
            is_test_mode: false,
            is_active: true,
        }
    }
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
