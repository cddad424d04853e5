//! In-memory ledger node.
//!
//! Applies broadcast transactions immediately against a simple balance,
//! lease and association state. It checks proofs, fees and funds so that
//! failing scenarios fail the same way they do against a real node.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use lto_common::{
    api::{
        ApiError, AssociationInfo, AssociationStatus, BalanceDetails, BroadcastReceipt, LeaseInfo,
        NodeApi, TransactionRecord,
    },
    crypto::{base58_encode, Address},
    transaction::{DataEntry, Payload, Transaction, TxKind},
};
use parking_lot::Mutex;

fn rejected(message: impl Into<String>) -> ApiError {
    ApiError::Status {
        status: 400,
        message: message.into(),
    }
}

#[derive(Debug, Clone)]
struct Lease {
    sender: Address,
    recipient: Address,
    amount: u64,
}

#[derive(Debug, Clone)]
struct Association {
    sender: Address,
    recipient: Address,
    association_type: u64,
    subject: Vec<u8>,
    data: Vec<DataEntry>,
    issue_transaction_id: String,
}

impl Association {
    fn is(&self, sender: &Address, recipient: &Address, association_type: u64, subject: &[u8]) -> bool {
        self.sender == *sender
            && self.recipient == *recipient
            && self.association_type == association_type
            && self.subject == subject
    }

    fn info(&self) -> AssociationInfo {
        AssociationInfo {
            association_type: self.association_type,
            sender: self.sender.to_string(),
            recipient: self.recipient.to_string(),
            subject: (!self.subject.is_empty()).then(|| base58_encode(&self.subject)),
            data: self.data.clone(),
            issue_transaction_id: self.issue_transaction_id.clone(),
        }
    }
}

#[derive(Default)]
struct LedgerState {
    balances: HashMap<Address, u64>,
    leases: IndexMap<String, Lease>,
    associations: Vec<Association>,
    transactions: IndexMap<String, TransactionRecord>,
    height: u64,
}

impl LedgerState {
    fn regular(&self, address: &Address) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    fn leased_out(&self, address: &Address) -> u64 {
        self.leases
            .values()
            .filter(|lease| lease.sender == *address)
            .map(|lease| lease.amount)
            .sum()
    }

    fn leased_in(&self, address: &Address) -> u64 {
        self.leases
            .values()
            .filter(|lease| lease.recipient == *address)
            .map(|lease| lease.amount)
            .sum()
    }

    fn available(&self, address: &Address) -> u64 {
        self.regular(address).saturating_sub(self.leased_out(address))
    }

    fn details(&self, address: &Address) -> BalanceDetails {
        let available = self.available(address);
        let effective = available + self.leased_in(address);
        BalanceDetails {
            regular: self.regular(address),
            generating: effective,
            available,
            effective,
        }
    }

    fn credit(&mut self, address: &Address, amount: u64) {
        let balance = self.balances.entry(*address).or_default();
        *balance = balance.saturating_add(amount);
    }

    fn debit(&mut self, address: &Address, amount: u64) {
        let balance = self.balances.entry(*address).or_default();
        *balance = balance.saturating_sub(amount);
    }

    // Every check runs before any state changes
    fn apply(&mut self, transaction: &Transaction, id: &str) -> Result<TransactionRecord, ApiError> {
        let sender = transaction
            .sender()
            .ok_or_else(|| rejected("transaction is not signed"))?
            .address;
        let payer = transaction
            .fee_payer()
            .map(|party| party.address)
            .unwrap_or(sender);
        let fee = transaction.fee();

        let minimum_fee = transaction.payload().fee();
        if fee < minimum_fee {
            return Err(rejected(format!(
                "fee {} is below the minimum of {}",
                fee, minimum_fee
            )));
        }

        let spent = match transaction.payload() {
            Payload::Transfer(p) => Some(p.amount),
            Payload::MassTransfer(p) => p.total_amount(),
            Payload::Lease(p) => Some(p.amount),
            _ => Some(0),
        };
        let required = if payer == sender {
            spent.and_then(|spent| spent.checked_add(fee))
        } else {
            spent
        }
        .ok_or_else(|| rejected("amount overflow"))?;
        if self.available(&sender) < required {
            return Err(rejected(format!(
                "insufficient funds: {} available, {} required",
                self.available(&sender),
                required
            )));
        }
        if payer != sender && self.available(&payer) < fee {
            return Err(rejected("sponsor cannot pay the transaction fee"));
        }

        let mut record = TransactionRecord {
            id: id.to_string(),
            tx_type: transaction.kind().type_id(),
            sender: sender.to_string(),
            sponsor: transaction.sponsor().map(|party| party.address.to_string()),
            anchors: Vec::new(),
            recipient: None,
            amount: None,
            transfers: Vec::new(),
            height: None,
        };

        match transaction.payload() {
            Payload::Transfer(p) => {
                self.debit(&sender, p.amount);
                self.credit(&p.recipient, p.amount);
                record.recipient = Some(p.recipient.to_string());
                record.amount = Some(p.amount);
            }
            Payload::MassTransfer(p) => {
                for transfer in &p.transfers {
                    self.debit(&sender, transfer.amount);
                    self.credit(&transfer.recipient, transfer.amount);
                }
                record.transfers = p.transfers.clone();
            }
            Payload::Anchor(p) => {
                record.anchors = p.anchors.iter().map(base58_encode).collect();
            }
            Payload::Association(p) => {
                let existing = self.associations.iter_mut().find(|association| {
                    association.is(&sender, &p.recipient, p.association_type, &p.subject)
                });
                match existing {
                    Some(association) => {
                        association.data = p.data.clone();
                        association.issue_transaction_id = id.to_string();
                    }
                    None => self.associations.push(Association {
                        sender,
                        recipient: p.recipient,
                        association_type: p.association_type,
                        subject: p.subject.clone(),
                        data: p.data.clone(),
                        issue_transaction_id: id.to_string(),
                    }),
                }
                record.recipient = Some(p.recipient.to_string());
            }
            Payload::RevokeAssociation(p) => {
                let before = self.associations.len();
                self.associations.retain(|association| {
                    !association.is(&sender, &p.recipient, p.association_type, &p.subject)
                });
                if self.associations.len() == before {
                    return Err(rejected("association not found"));
                }
                record.recipient = Some(p.recipient.to_string());
            }
            Payload::Lease(p) => {
                if p.recipient == sender {
                    return Err(rejected("cannot lease to self"));
                }
                self.leases.insert(
                    id.to_string(),
                    Lease {
                        sender,
                        recipient: p.recipient,
                        amount: p.amount,
                    },
                );
                record.recipient = Some(p.recipient.to_string());
                record.amount = Some(p.amount);
            }
            Payload::CancelLease(p) => {
                match self.leases.get(&p.lease_id) {
                    Some(lease) if lease.sender == sender => {}
                    Some(_) => return Err(rejected("lease was not issued by the sender")),
                    None => return Err(rejected(format!("lease {} not found", p.lease_id))),
                }
                self.leases.shift_remove(&p.lease_id);
            }
        }

        self.debit(&payer, fee);
        self.height += 1;
        record.height = Some(self.height);
        Ok(record)
    }

    fn involves(record: &TransactionRecord, address: &str) -> bool {
        record.sender == address
            || record.recipient.as_deref() == Some(address)
            || record
                .transfers
                .iter()
                .any(|transfer| transfer.recipient.to_string() == address)
    }
}

/// A ledger node kept entirely in memory
#[derive(Default)]
pub struct MemoryNode {
    state: Mutex<LedgerState>,
}

impl MemoryNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node whose genesis gives `amount` units to `address`
    pub fn with_balance(address: &Address, amount: u64) -> Self {
        let node = Self::new();
        node.state.lock().credit(address, amount);
        node
    }

    pub fn transaction_count(&self) -> usize {
        self.state.lock().transactions.len()
    }
}

#[async_trait]
impl NodeApi for MemoryNode {
    async fn broadcast(&self, transaction: &Transaction) -> Result<BroadcastReceipt, ApiError> {
        if !transaction.verify_proofs()? {
            return Err(rejected("invalid proof"));
        }
        let id = transaction.id()?;

        let mut state = self.state.lock();
        if state.transactions.contains_key(&id) {
            return Err(rejected(format!("transaction {} is already in the state", id)));
        }

        let record = state.apply(transaction, &id)?;
        debug!(
            "Applied {} transaction {} at height {}",
            transaction.kind(),
            id,
            state.height
        );
        state.transactions.insert(id.clone(), record);

        Ok(BroadcastReceipt { id })
    }

    async fn transaction_info(&self, id: &str) -> Result<Option<TransactionRecord>, ApiError> {
        Ok(self.state.lock().transactions.get(id).cloned())
    }

    async fn transactions(
        &self,
        address: &Address,
        kind: Option<TxKind>,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ApiError> {
        let address = address.to_string();
        let state = self.state.lock();
        Ok(state
            .transactions
            .values()
            .rev()
            .filter(|record| LedgerState::involves(record, &address))
            .filter(|record| kind.map_or(true, |kind| record.tx_type == kind.type_id()))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn lease_list(&self, address: &Address) -> Result<Vec<LeaseInfo>, ApiError> {
        let state = self.state.lock();
        Ok(state
            .leases
            .iter()
            .filter(|(_, lease)| lease.sender == *address || lease.recipient == *address)
            .map(|(id, lease)| LeaseInfo {
                id: id.clone(),
                sender: lease.sender.to_string(),
                recipient: lease.recipient.to_string(),
                amount: lease.amount,
            })
            .collect())
    }

    async fn association_status(&self, address: &Address) -> Result<AssociationStatus, ApiError> {
        let state = self.state.lock();
        Ok(AssociationStatus {
            address: address.to_string(),
            outgoing: state
                .associations
                .iter()
                .filter(|association| association.sender == *address)
                .map(Association::info)
                .collect(),
            incoming: state
                .associations
                .iter()
                .filter(|association| association.recipient == *address)
                .map(Association::info)
                .collect(),
        })
    }

    async fn balance_details(&self, address: &Address) -> Result<BalanceDetails, ApiError> {
        Ok(self.state.lock().details(address))
    }
}
