use super::amount::Amount;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};

/// Caller-supplied parameters for a single purchase attempt.
///
/// Every field is optional here; `PurchaseData::build` decides which of them
/// are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseParameters {
    pub amount: Option<Amount>,
    pub currency: Option<String>,
    pub transaction_id: Option<String>,
    pub description: Option<String>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
}

impl PurchaseParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    /// Fills in the currency from the gateway when the caller left it unset.
    pub(crate) fn or_currency(mut self, currency: &str) -> Self {
        if non_empty(self.currency.as_deref()).is_none() {
            self.currency = Some(currency.to_string());
        }
        self
    }
}

/// Normalized purchase data produced by a request once validation passes.
///
/// The optional fields are always part of the shape, serialized as `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseData {
    pub amount: Amount,
    pub currency: String,
    pub transaction_id: String,
    pub description: Option<String>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
}

impl PurchaseData {
    /// Validates `params` and normalizes them.
    ///
    /// Fails with `PaymentError::Validation` naming every missing field when
    /// `amount` or `transactionId` is absent or empty.
    pub fn build(params: &PurchaseParameters, default_currency: &str) -> Result<Self> {
        let transaction_id = non_empty(params.transaction_id.as_deref());

        let mut missing = Vec::new();
        if params.amount.is_none() {
            missing.push("amount");
        }
        if transaction_id.is_none() {
            missing.push("transactionId");
        }

        match (params.amount, transaction_id) {
            (Some(amount), Some(transaction_id)) => Ok(Self {
                amount,
                currency: non_empty(params.currency.as_deref())
                    .unwrap_or(default_currency)
                    .to_string(),
                transaction_id: transaction_id.to_string(),
                description: non_empty(params.description.as_deref()).map(str::to_string),
                return_url: non_empty(params.return_url.as_deref()).map(str::to_string),
                cancel_url: non_empty(params.cancel_url.as_deref()).map(str::to_string),
            }),
            _ => Err(PaymentError::Validation { fields: missing }),
        }
    }
}

/// Treats whitespace-only values as absent but keeps the value untouched.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
