use crate::config::PaymentsConfig;
use crate::domain::amount::Amount;
use crate::domain::gateway::{GatewayRecord, parse_flag};
use crate::domain::ports::{
    GatewayFactory, GatewayRepository, GatewayRepositoryBox, PaymentGateway, PaymentGatewayBox,
    PaymentRequest, PaymentResponse, PaymentResponseBox, TransactionLedger, TransactionLedgerBox,
};
use crate::domain::purchase::PurchaseParameters;
use crate::domain::response::Redirect;
use crate::domain::transaction::{NewGatewayTransaction, TransactionStatus};
use crate::error::{PaymentError, Result};
use crate::infrastructure::driver::{Driver, normalize_driver_name};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

pub const DEFAULT_DESCRIPTION: &str = "Order Payment";

/// What the checkout hands over when a payer starts paying for an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutPayload {
    pub order_id: String,
    pub amount: Option<Decimal>,
    /// Falls back to `order_id` when unset.
    pub transaction_id: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
    pub metadata: Value,
}

/// Outcome of `GatewayManager::initiate_purchase`: the provider response plus
/// the id of the ledger entry recorded for it.
#[derive(Debug)]
pub struct PaymentSession {
    response: PaymentResponseBox,
    transaction_id: Uuid,
}

impl PaymentSession {
    pub fn transaction_id(&self) -> Uuid {
        self.transaction_id
    }

    pub fn into_response(self) -> PaymentResponseBox {
        self.response
    }
}

impl PaymentResponse for PaymentSession {
    fn is_successful(&self) -> bool {
        self.response.is_successful()
    }

    fn is_redirect(&self) -> bool {
        self.response.is_redirect()
    }

    fn redirect(&self) -> Option<&Redirect> {
        self.response.redirect()
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.response.transaction_reference()
    }

    fn message(&self) -> Option<&str> {
        self.response.message()
    }

    fn data(&self) -> Value {
        self.response.data()
    }
}

/// Builds configured gateways from stored records and keeps the transaction
/// ledger in step with purchase outcomes.
pub struct GatewayManager {
    config: PaymentsConfig,
    gateways: GatewayRepositoryBox,
    ledger: TransactionLedgerBox,
    /// Extra providers keyed by normalized driver name, consulted before `Driver`.
    factories: HashMap<String, GatewayFactory>,
}

impl GatewayManager {
    pub fn new(
        config: PaymentsConfig,
        gateways: GatewayRepositoryBox,
        ledger: TransactionLedgerBox,
    ) -> Self {
        Self {
            config,
            gateways,
            ledger,
            factories: HashMap::new(),
        }
    }

    /// Registers a provider under `name`. Records naming it still have to pass
    /// the driver whitelist.
    pub fn register_driver(&mut self, name: &str, factory: GatewayFactory) -> &mut Self {
        self.factories.insert(normalize_driver_name(name), factory);
        self
    }

    pub fn config(&self) -> &PaymentsConfig {
        &self.config
    }

    pub fn default_currency(&self) -> &str {
        &self.config.default_currency
    }

    pub fn available_drivers(&self) -> &[String] {
        &self.config.drivers
    }

    pub fn gateways(&self) -> &GatewayRepositoryBox {
        &self.gateways
    }

    pub fn ledger(&self) -> &TransactionLedgerBox {
        &self.ledger
    }

    /// Looks up an active gateway record by slug and builds its gateway.
    pub async fn create_gateway(&self, slug: &str) -> Result<PaymentGatewayBox> {
        let record = self
            .gateways
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| PaymentError::GatewayNotFound(slug.to_string()))?;
        self.create_gateway_from_record(&record)
    }

    pub fn create_gateway_from_record(&self, record: &GatewayRecord) -> Result<PaymentGatewayBox> {
        let parameters = self.decode_parameters(record);
        let driver_name = self.resolve_driver_with(record, &parameters);

        if !self.is_driver_allowed(&driver_name) {
            return Err(PaymentError::DriverNotAllowed(driver_name));
        }

        let mut gateway = match self.factories.get(&normalize_driver_name(&driver_name)) {
            Some(factory) => factory(),
            None => driver_name.parse::<Driver>()?.create(),
        };
        self.apply_settings(gateway.as_mut(), &parameters, record);
        Ok(gateway)
    }

    /// Starts a purchase and records it as pending.
    ///
    /// Nothing is recorded when the request fails validation or transport.
    #[tracing::instrument(skip_all, fields(gateway = %record.slug, order_id = %payload.order_id))]
    pub async fn initiate_purchase(
        &self,
        record: &GatewayRecord,
        payload: CheckoutPayload,
    ) -> Result<PaymentSession> {
        let gateway = self.create_gateway_from_record(record)?;
        let params = self.format_payload(&payload, gateway.currency())?;

        let request = gateway.purchase(params);
        let response = request.send().await.inspect_err(|e| {
            tracing::warn!(error = %e, "purchase not sent");
        })?;

        let transaction_id = self
            .ledger
            .create_pending(NewGatewayTransaction {
                order_id: payload.order_id,
                gateway_slug: record.slug.clone(),
                driver: self.resolve_driver(record),
                provider_reference: response.transaction_reference().map(str::to_string),
                request_payload: serde_json::to_value(request.parameters())?,
                response_payload: response.data(),
                metadata: payload.metadata,
            })
            .await?;

        tracing::info!(
            %transaction_id,
            successful = response.is_successful(),
            redirect = response.is_redirect(),
            reference = response.transaction_reference().unwrap_or_default(),
            "purchase initiated"
        );

        Ok(PaymentSession {
            response,
            transaction_id,
        })
    }

    /// Finalizes a purchase from the provider's return or webhook parameters.
    ///
    /// When the response names a reference the ledger knows, that entry is
    /// marked completed or failed.
    #[tracing::instrument(skip_all, fields(gateway = %record.slug))]
    pub async fn complete_purchase(
        &self,
        record: &GatewayRecord,
        params: PurchaseParameters,
    ) -> Result<PaymentResponseBox> {
        let gateway = self.create_gateway_from_record(record)?;
        let response = gateway.complete_purchase(params).send().await?;

        if let Some(reference) = response.transaction_reference()
            && let Some(tx) = self.ledger.find_by_reference(reference).await?
        {
            let status = if response.is_successful() {
                TransactionStatus::Completed
            } else {
                TransactionStatus::Failed
            };
            self.ledger
                .update_status(tx.id, status, Some(reference.to_string()), response.data())
                .await?;
            tracing::info!(transaction_id = %tx.id, ?status, "ledger entry settled");
        }

        Ok(response)
    }

    /// Parses the record's JSON settings. Anything but a JSON object yields an
    /// empty map.
    pub fn decode_parameters(&self, record: &GatewayRecord) -> Map<String, Value> {
        match serde_json::from_str::<Value>(&record.parameters) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Driver named in the record's settings, else on the record, else the
    /// configured default.
    pub fn resolve_driver(&self, record: &GatewayRecord) -> String {
        self.resolve_driver_with(record, &self.decode_parameters(record))
    }

    fn resolve_driver_with(&self, record: &GatewayRecord, parameters: &Map<String, Value>) -> String {
        parameters
            .get("driver")
            .and_then(Value::as_str)
            .filter(|d| !d.trim().is_empty())
            .or_else(|| record.driver.as_deref().filter(|d| !d.trim().is_empty()))
            .unwrap_or(&self.config.default_driver)
            .to_string()
    }

    fn is_driver_allowed(&self, driver: &str) -> bool {
        let normalized = normalize_driver_name(driver);
        self.config
            .drivers
            .iter()
            .any(|allowed| normalize_driver_name(allowed) == normalized)
    }

    fn apply_settings(
        &self,
        gateway: &mut dyn PaymentGateway,
        parameters: &Map<String, Value>,
        record: &GatewayRecord,
    ) {
        let test_mode = parameters
            .get("test_mode")
            .map(is_truthy)
            .unwrap_or(record.is_test_mode);
        gateway.parameters_mut().test_mode = test_mode;

        gateway.parameters_mut().currency = parameters
            .get("currency")
            .and_then(Value::as_str)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&self.config.default_currency)
            .to_string();

        for (key, value) in parameters {
            if matches!(key.as_str(), "driver" | "currency" | "test_mode") {
                continue;
            }
            let Some(value) = setting_value(value) else {
                continue;
            };
            if !gateway.set_parameter(key, &value) {
                tracing::debug!(key = %key, driver = gateway.short_name(), "ignoring unsupported gateway setting");
            }
        }
    }

    fn format_payload(&self, payload: &CheckoutPayload, currency: &str) -> Result<PurchaseParameters> {
        let amount = payload
            .amount
            .map(Amount::new)
            .transpose()?
            .map(|a| a.rounded());

        let transaction_id = payload
            .transaction_id
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| payload.order_id.clone());

        Ok(PurchaseParameters {
            amount,
            currency: Some(non_empty(&payload.currency).unwrap_or(currency).to_string()),
            transaction_id: Some(transaction_id),
            description: Some(
                non_empty(&payload.description)
                    .unwrap_or(DEFAULT_DESCRIPTION)
                    .to_string(),
            ),
            return_url: non_empty(&payload.return_url).map(str::to_string),
            cancel_url: non_empty(&payload.cancel_url).map(str::to_string),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn setting_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => parse_flag(s).unwrap_or(false),
        _ => false,
    }
}
