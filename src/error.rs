use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: missing required field(s): {}", .fields.join(", "))]
    Validation { fields: Vec<&'static str> },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Gateway {0} not found")]
    GatewayNotFound(String),
    #[error("Driver {0} is not whitelisted")]
    DriverNotAllowed(String),
    #[error("Unknown driver: {0}")]
    UnknownDriver(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl PaymentError {
    /// True when a required field was absent or a value was rejected before sending.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PaymentError::Validation { .. } | PaymentError::InvalidAmount(_)
        )
    }

    /// True when the provider could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, PaymentError::Transport(_))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(err: rocksdb::Error) -> Self {
        PaymentError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = PaymentError::Validation {
            fields: vec!["amount", "transactionId"],
        };
        assert_eq!(
            err.to_string(),
            "Validation error: missing required field(s): amount, transactionId"
        );
        assert!(err.is_validation());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_is_distinct_from_validation() {
        let err = PaymentError::Transport("connection refused".to_string());
        assert!(err.is_transport());
        assert!(!err.is_validation());
    }
}
