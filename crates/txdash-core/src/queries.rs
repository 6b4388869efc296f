//! Transaction lookups on top of a [`TransactionSource`]
//!
//! Every call performs its own full fetch. Failures that are already
//! [`ClientError`]s propagate unchanged; anything else is replaced by the
//! operation's own fallback error.

use crate::client::SourceRef;
use crate::error::{ClientError, ClientResult};
use crate::models::{Transaction, TransactionData};
use crate::types::{TransactionStatus, TransactionType};

/// Query operations over a shared transaction source
#[derive(Clone)]
pub struct TransactionQueries {
    source: SourceRef,
}

impl TransactionQueries {
    pub fn new(source: SourceRef) -> Self {
        Self { source }
    }

    /// Fetch the full snapshot
    pub async fn fetch_all(&self) -> ClientResult<TransactionData> {
        self.fetch(ClientError::Unknown).await
    }

    /// Fetch everything and return the transaction with exactly this `id`
    pub async fn find_by_id(&self, id: &str) -> ClientResult<Transaction> {
        let data = self.fetch(ClientError::LookupFailed).await?;
        data.transactions
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::NotFound { id: id.to_string() })
    }

    /// Fetch everything and keep the transactions with this status
    pub async fn filter_by_status(&self, status: TransactionStatus) -> ClientResult<Vec<Transaction>> {
        let data = self.fetch(ClientError::StatusFilterFailed).await?;
        Ok(data
            .transactions
            .into_iter()
            .filter(|t| t.status == status)
            .collect())
    }

    /// Fetch everything and keep the transactions of this exact type
    pub async fn filter_by_type(&self, tx_type: TransactionType) -> ClientResult<Vec<Transaction>> {
        let data = self.fetch(ClientError::TypeFilterFailed).await?;
        Ok(data
            .transactions
            .into_iter()
            .filter(|t| t.tx_type == tx_type)
            .collect())
    }

    async fn fetch(&self, fallback: ClientError) -> ClientResult<TransactionData> {
        self.source
            .fetch_all()
            .await
            .map_err(|error| ClientError::from_source(error, fallback))
    }
}

impl std::fmt::Debug for TransactionQueries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionQueries").finish_non_exhaustive()
    }
}
