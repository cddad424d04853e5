mod client;
mod error;
mod types;

pub use client::{parse_node_url, NodeClient, NodeClientConfig};
pub use error::ApiError;
pub use types::*;

use async_trait::async_trait;

use crate::{
    crypto::Address,
    transaction::{Transaction, TxKind},
};

/// Read and write access to a ledger node.
///
/// Every query returns fresh node state. Implementations must not cache.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Submit a signed transaction
    async fn broadcast(&self, transaction: &Transaction) -> Result<BroadcastReceipt, ApiError>;

    /// Look up a transaction by id, `None` while the node does not know it
    async fn transaction_info(&self, id: &str) -> Result<Option<TransactionRecord>, ApiError>;

    /// Most recent transactions of an address, optionally of one kind
    async fn transactions(
        &self,
        address: &Address,
        kind: Option<TxKind>,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ApiError>;

    /// Leases currently active for an address, in either direction
    async fn lease_list(&self, address: &Address) -> Result<Vec<LeaseInfo>, ApiError>;

    async fn association_status(&self, address: &Address) -> Result<AssociationStatus, ApiError>;

    async fn balance_details(&self, address: &Address) -> Result<BalanceDetails, ApiError>;
}
