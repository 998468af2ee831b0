use crate::domain::ports::PaymentResponse;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One output row describing how a purchase attempt ended.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PurchaseResult {
    pub order_id: String,
    pub transaction_reference: Option<String>,
    pub successful: bool,
    pub redirect: bool,
    pub message: Option<String>,
}

impl PurchaseResult {
    pub fn from_response(order_id: impl Into<String>, response: &dyn PaymentResponse) -> Self {
        Self {
            order_id: order_id.into(),
            transaction_reference: response.transaction_reference().map(str::to_string),
            successful: response.is_successful(),
            redirect: response.is_redirect(),
            message: response.message().map(str::to_string),
        }
    }
}

pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes every result under a single header row and flushes.
    pub fn write_results<I>(&mut self, results: I) -> Result<()>
    where
        I: IntoIterator<Item = PurchaseResult>,
    {
        for result in results {
            self.writer.serialize(result)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
