use serde::{Deserialize, Serialize};

use crate::transaction::{DataEntry, TransferEntry};

/// Node response to a broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastReceipt {
    pub id: String,
}

/// A transaction as reported by the node.
///
/// Only the fields the suite inspects are decoded, the rest is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<TransferEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

/// Active lease, as listed by `/leasing/active/{address}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseInfo {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationInfo {
    #[serde(alias = "type")]
    pub association_type: u64,
    pub sender: String,
    pub recipient: String,
    /// Base58 subject, absent when the association has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub data: Vec<DataEntry>,
    pub issue_transaction_id: String,
}

impl AssociationInfo {
    pub fn data_value(&self, key: &str) -> Option<&crate::transaction::DataValue> {
        self.data
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }
}

/// Associations of an address, by direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationStatus {
    pub address: String,
    #[serde(default)]
    pub outgoing: Vec<AssociationInfo>,
    #[serde(default)]
    pub incoming: Vec<AssociationInfo>,
}

/// Balances of an address, in units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDetails {
    pub regular: u64,
    pub generating: u64,
    pub available: u64,
    pub effective: u64,
}
