use crate::domain::ports::TransactionLedger;
use crate::domain::transaction::{GatewayTransaction, NewGatewayTransaction, TransactionStatus};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for ledger entries, keyed by entry id.
pub const CF_TRANSACTIONS: &str = "transactions";
/// Column Family mapping provider references to entry ids.
pub const CF_REFERENCES: &str = "references";

/// A persistent transaction ledger backed by RocksDB.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBLedger {
    db: Arc<DB>,
}

impl RocksDBLedger {
    /// Opens or creates a RocksDB instance at `path`, creating the ledger
    /// column families when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let cf_references = ColumnFamilyDescriptor::new(CF_REFERENCES, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions, cf_references])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    /// Stores `tx` and its reference index entry in one batch, dropping
    /// `stale_reference` from the index when it differs from the current one.
    fn write(&self, tx: &GatewayTransaction, stale_reference: Option<&str>) -> Result<()> {
        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_TRANSACTIONS)?, tx.id.as_bytes(), serde_json::to_vec(tx)?);
        if let Some(stale) = stale_reference
            && tx.provider_reference.as_deref() != Some(stale)
        {
            batch.delete_cf(self.cf(CF_REFERENCES)?, stale.as_bytes());
        }
        if let Some(reference) = &tx.provider_reference {
            batch.put_cf(self.cf(CF_REFERENCES)?, reference.as_bytes(), tx.id.as_bytes());
        }
        self.db.write(batch)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionLedger for RocksDBLedger {
    async fn create_pending(&self, tx: NewGatewayTransaction) -> Result<Uuid> {
        let tx = tx.into_pending();
        self.write(&tx, None)?;
        Ok(tx.id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<GatewayTransaction>> {
        match self.db.get_cf(self.cf(CF_TRANSACTIONS)?, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<GatewayTransaction>> {
        let Some(bytes) = self.db.get_cf(self.cf(CF_REFERENCES)?, reference.as_bytes())? else {
            return Ok(None);
        };
        let id = Uuid::from_slice(&bytes)
            .map_err(|e| PaymentError::InternalError(Box::new(e)))?;
        self.get(id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
        provider_reference: Option<String>,
        response_payload: serde_json::Value,
    ) -> Result<bool> {
        let Some(mut tx) = self.get(id).await? else {
            return Ok(false);
        };

        tx.status = status;
        tx.response_payload = response_payload;
        let previous = match provider_reference {
            Some(reference) => tx.provider_reference.replace(reference),
            None => None,
        };
        self.write(&tx, previous.as_deref())?;
        Ok(true)
    }
}
