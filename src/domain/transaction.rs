use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// Audit record of one purchase attempt against a gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct GatewayTransaction {
    pub id: Uuid,
    pub order_id: String,
    pub gateway_slug: String,
    pub driver: String,
    pub provider_reference: Option<String>,
    pub status: TransactionStatus,
    pub request_payload: serde_json::Value,
    pub response_payload: serde_json::Value,
    pub metadata: serde_json::Value,
}

/// Everything needed to open a pending ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGatewayTransaction {
    pub order_id: String,
    pub gateway_slug: String,
    pub driver: String,
    pub provider_reference: Option<String>,
    pub request_payload: serde_json::Value,
    pub response_payload: serde_json::Value,
    pub metadata: serde_json::Value,
}

impl NewGatewayTransaction {
    pub fn into_pending(self) -> GatewayTransaction {
        GatewayTransaction {
            id: Uuid::new_v4(),
            order_id: self.order_id,
            gateway_slug: self.gateway_slug,
            driver: self.driver,
            provider_reference: self.provider_reference,
            status: TransactionStatus::Pending,
            request_payload: self.request_payload,
            response_payload: self.response_payload,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn test_into_pending_assigns_fresh_ids() {
        let new_tx = NewGatewayTransaction {
            order_id: "42".to_string(),
            gateway_slug: "local".to_string(),
            driver: "LocalDummy".to_string(),
            provider_reference: None,
            request_payload: serde_json::Value::Null,
            response_payload: serde_json::Value::Null,
            metadata: serde_json::Value::Null,
        };

        let a = new_tx.clone().into_pending();
        let b = new_tx.into_pending();
        assert_eq!(a.status, TransactionStatus::Pending);
        assert_ne!(a.id, b.id);
    }
}
