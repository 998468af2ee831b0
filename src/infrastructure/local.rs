use crate::domain::gateway::{DEFAULT_CURRENCY, GatewayParameters};
use crate::domain::ports::{
    PaymentGateway, PaymentRequest, PaymentRequestBox, PaymentResponseBox,
};
use crate::domain::purchase::{PurchaseData, PurchaseParameters};
use crate::domain::response::{GatewayResponse, ResponseData};
use crate::error::Result;
use async_trait::async_trait;

pub const APPROVED_MESSAGE: &str = "Simulated payment approved";

/// In-process provider for local development and tests.
///
/// Never talks to a network. Every validated request settles immediately as
/// approved, echoing the caller's transaction id as the reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalDummyGateway {
    parameters: GatewayParameters,
}

impl LocalDummyGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(&self, params: PurchaseParameters) -> PaymentRequestBox {
        Box::new(LocalPurchaseRequest::new(
            params.or_currency(&self.parameters.currency),
        ))
    }
}

impl PaymentGateway for LocalDummyGateway {
    fn name(&self) -> &'static str {
        "Local Dummy"
    }

    fn short_name(&self) -> &'static str {
        "LocalDummy"
    }

    fn parameters(&self) -> &GatewayParameters {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut GatewayParameters {
        &mut self.parameters
    }

    fn purchase(&self, params: PurchaseParameters) -> PaymentRequestBox {
        self.request(params)
    }

    // No off-site hop exists for this provider, so completing is the same
    // request as purchasing.
    fn complete_purchase(&self, params: PurchaseParameters) -> PaymentRequestBox {
        self.request(params)
    }
}

/// Request created by `LocalDummyGateway`, already seeded with the gateway's
/// currency.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPurchaseRequest {
    parameters: PurchaseParameters,
}

impl LocalPurchaseRequest {
    pub fn new(parameters: PurchaseParameters) -> Self {
        Self { parameters }
    }
}

#[async_trait]
impl PaymentRequest for LocalPurchaseRequest {
    fn parameters(&self) -> &PurchaseParameters {
        &self.parameters
    }

    fn build_data(&self) -> Result<PurchaseData> {
        PurchaseData::build(&self.parameters, DEFAULT_CURRENCY).inspect_err(|e| {
            tracing::debug!(error = %e, "local purchase rejected");
        })
    }

    async fn send_data(&self, data: PurchaseData) -> Result<PaymentResponseBox> {
        tracing::debug!(
            transaction_id = %data.transaction_id,
            amount = %data.amount,
            currency = %data.currency,
            "settling local purchase"
        );

        Ok(Box::new(GatewayResponse::new(ResponseData {
            success: true,
            transaction_reference: Some(data.transaction_id),
            message: Some(APPROVED_MESSAGE.to_string()),
            redirect: None,
        })))
    }
}
