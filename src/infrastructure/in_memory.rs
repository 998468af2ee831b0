use crate::domain::gateway::GatewayRecord;
use crate::domain::ports::{GatewayRepository, TransactionLedger};
use crate::domain::transaction::{GatewayTransaction, NewGatewayTransaction, TransactionStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for gateway configuration records, keyed by slug.
#[derive(Default, Clone)]
pub struct InMemoryGatewayRepository {
    gateways: Arc<RwLock<HashMap<String, GatewayRecord>>>,
}

impl InMemoryGatewayRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GatewayRepository for InMemoryGatewayRepository {
    async fn store(&self, record: GatewayRecord) -> Result<()> {
        let mut gateways = self.gateways.write().await;
        gateways.insert(record.slug.clone(), record);
        Ok(())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<GatewayRecord>> {
        let gateways = self.gateways.read().await;
        Ok(gateways.get(slug).filter(|r| r.is_active).cloned())
    }
}

/// A thread-safe in-memory ledger of gateway transactions.
///
/// Keeps a secondary index from provider reference to entry id so that
/// completion callbacks can find their pending entry.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLedger {
    inner: Arc<RwLock<LedgerState>>,
}

#[derive(Default)]
struct LedgerState {
    transactions: HashMap<Uuid, GatewayTransaction>,
    references: HashMap<String, Uuid>,
}

impl InMemoryTransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries recorded so far.
    pub async fn len(&self) -> usize {
        self.inner.read().await.transactions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TransactionLedger for InMemoryTransactionLedger {
    async fn create_pending(&self, tx: NewGatewayTransaction) -> Result<Uuid> {
        let tx = tx.into_pending();
        let id = tx.id;

        let mut state = self.inner.write().await;
        if let Some(reference) = &tx.provider_reference {
            state.references.insert(reference.clone(), id);
        }
        state.transactions.insert(id, tx);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<GatewayTransaction>> {
        let state = self.inner.read().await;
        Ok(state.transactions.get(&id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<GatewayTransaction>> {
        let state = self.inner.read().await;
        Ok(state
            .references
            .get(reference)
            .and_then(|id| state.transactions.get(id))
            .cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
        provider_reference: Option<String>,
        response_payload: serde_json::Value,
    ) -> Result<bool> {
        let mut state = self.inner.write().await;
        let Some(tx) = state.transactions.get_mut(&id) else {
            return Ok(false);
        };

        tx.status = status;
        tx.response_payload = response_payload;
        let Some(reference) = provider_reference else {
            return Ok(true);
        };
        let previous = tx.provider_reference.replace(reference.clone());

        if let Some(previous) = previous
            && previous != reference
        {
            state.references.remove(&previous);
        }
        state.references.insert(reference, id);
        Ok(true)
    }
}
