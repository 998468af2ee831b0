use crate::application::manager::CheckoutPayload;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a purchases CSV.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PurchaseRow {
    pub order_id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

impl From<PurchaseRow> for CheckoutPayload {
    fn from(row: PurchaseRow) -> Self {
        let metadata = serde_json::json!({ "order_id": row.order_id });
        CheckoutPayload {
            order_id: row.order_id,
            amount: row.amount,
            transaction_id: row.transaction_id,
            return_url: row.return_url,
            cancel_url: row.cancel_url,
            metadata,
            ..Default::default()
        }
    }
}

/// Reads purchase rows from a CSV source.
///
/// Whitespace is trimmed and trailing optional columns may be left off.
pub struct PurchaseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PurchaseReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows, one `Result` per record.
    pub fn purchases(self) -> impl Iterator<Item = Result<PurchaseRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
