use super::ports::PaymentResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RedirectMethod {
    #[default]
    Get,
    Post,
}

/// Where a payer must be sent to finish a payment off-site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub url: String,
    pub method: RedirectMethod,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// Raw outcome fields as reported by a provider.
///
/// A missing `success` flag reads as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseData {
    pub success: bool,
    pub transaction_reference: Option<String>,
    pub message: Option<String>,
    pub redirect: Option<Redirect>,
}

/// Immutable, provider-agnostic result of a sent request.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    data: ResponseData,
}

impl GatewayResponse {
    pub fn new(data: ResponseData) -> Self {
        Self { data }
    }
}

impl PaymentResponse for GatewayResponse {
    fn is_successful(&self) -> bool {
        self.data.success
    }

    fn is_redirect(&self) -> bool {
        self.data.redirect.is_some()
    }

    fn redirect(&self) -> Option<&Redirect> {
        self.data.redirect.as_ref()
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.data.transaction_reference.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.data.message.as_deref()
    }

    fn data(&self) -> serde_json::Value {
        serde_json::to_value(&self.data).unwrap_or(serde_json::Value::Null)
    }
}
