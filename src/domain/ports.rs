use super::gateway::{DefaultParameters, GatewayParameters, GatewayRecord};
use super::purchase::{PurchaseData, PurchaseParameters};
use super::response::Redirect;
use super::transaction::{GatewayTransaction, NewGatewayTransaction, TransactionStatus};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// A payment provider: holds its configuration and creates requests.
pub trait PaymentGateway: Send + Sync {
    /// Human-readable provider label.
    fn name(&self) -> &'static str;

    /// Driver name the provider is registered under.
    fn short_name(&self) -> &'static str;

    fn default_parameters(&self) -> DefaultParameters {
        DefaultParameters::default()
    }

    fn parameters(&self) -> &GatewayParameters;

    fn parameters_mut(&mut self) -> &mut GatewayParameters;

    fn token(&self) -> &str {
        &self.parameters().token
    }

    fn set_token(&mut self, token: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.parameters_mut().token = token.into();
        self
    }

    fn currency(&self) -> &str {
        &self.parameters().currency
    }

    fn set_currency(&mut self, currency: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.parameters_mut().currency = currency.into();
        self
    }

    fn test_mode(&self) -> bool {
        self.parameters().test_mode
    }

    fn set_test_mode(&mut self, test_mode: bool) -> &mut Self
    where
        Self: Sized,
    {
        self.parameters_mut().test_mode = test_mode;
        self
    }

    /// Name-keyed setter used when configuring a boxed gateway from stored
    /// settings. Returns `false` for settings this provider does not have.
    fn set_parameter(&mut self, key: &str, value: &str) -> bool {
        self.parameters_mut().apply(key, value)
    }

    /// Creates a request bound to `params`. Performs no validation or I/O.
    fn purchase(&self, params: PurchaseParameters) -> PaymentRequestBox;

    /// Creates a request that finalizes a purchase after the payer returns.
    fn complete_purchase(&self, params: PurchaseParameters) -> PaymentRequestBox;
}

/// One transaction attempt.
///
/// `send` borrows the request so it stays usable through `PaymentRequestBox`.
/// Calling it again delivers the same parameters again and yields a new
/// response. Whether to resend is up to the caller, since retry policy lives
/// outside the request.
#[async_trait]
pub trait PaymentRequest: Send + Sync {
    fn parameters(&self) -> &PurchaseParameters;

    /// Validates the bound parameters and normalizes them.
    fn build_data(&self) -> Result<PurchaseData>;

    /// Delivers `data` to the provider. Unreachable providers fail with
    /// `PaymentError::Transport`; declines come back as a response.
    async fn send_data(&self, data: PurchaseData) -> Result<PaymentResponseBox>;

    async fn send(&self) -> Result<PaymentResponseBox> {
        let data = self.build_data()?;
        self.send_data(data).await
    }
}

/// Read-only outcome of a sent request.
pub trait PaymentResponse: Send + Sync + std::fmt::Debug {
    fn is_successful(&self) -> bool;

    fn is_redirect(&self) -> bool {
        false
    }

    fn redirect(&self) -> Option<&Redirect> {
        None
    }

    fn transaction_reference(&self) -> Option<&str>;

    fn message(&self) -> Option<&str>;

    /// Snapshot of the provider's response fields, kept for auditing.
    fn data(&self) -> serde_json::Value;
}

#[async_trait]
pub trait GatewayRepository: Send + Sync {
    async fn store(&self, record: GatewayRecord) -> Result<()>;
    /// Returns only active gateways.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<GatewayRecord>>;
}

#[async_trait]
pub trait TransactionLedger: Send + Sync {
    async fn create_pending(&self, tx: NewGatewayTransaction) -> Result<Uuid>;
    async fn get(&self, id: Uuid) -> Result<Option<GatewayTransaction>>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<GatewayTransaction>>;
    /// Returns `false` when no entry with `id` exists.
    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
        provider_reference: Option<String>,
        response_payload: serde_json::Value,
    ) -> Result<bool>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
/// Builds a provider that `Driver` does not know, registered on the manager by name.
pub type GatewayFactory = Box<dyn Fn() -> PaymentGatewayBox + Send + Sync>;
pub type PaymentRequestBox = Box<dyn PaymentRequest>;
pub type PaymentResponseBox = Box<dyn PaymentResponse>;
pub type GatewayRepositoryBox = Box<dyn GatewayRepository>;
pub type TransactionLedgerBox = Box<dyn TransactionLedger>;
