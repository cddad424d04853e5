use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use serde_json::{Map, Value};

use crate::crypto::{
    base58_encode, blake2b256, verify_signature, Account, Address, KeyType, PUBLIC_KEY_SIZE,
    SIGNATURE_SIZE,
};

mod data;
mod error;
mod kind;
mod payload;
mod writer;

pub use data::{DataEntry, DataValue};
pub use error::TransactionError;
pub use kind::TxKind;
pub use payload::*;
pub use writer::Writer;

static LAST_TIMESTAMP: AtomicU64 = AtomicU64::new(0);

// Current time in millis, strictly increasing within the process so two
// identical transactions signed back to back still get distinct ids
fn next_timestamp() -> u64 {
    let now = chrono::Utc::now().timestamp_millis() as u64;
    let previous = LAST_TIMESTAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

/// Public identity of a signer or sponsor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub address: Address,
    pub key_type: KeyType,
    pub public_key: [u8; PUBLIC_KEY_SIZE],
}

impl Party {
    fn of(account: &Account) -> Self {
        Self {
            address: *account.address(),
            key_type: account.key_type(),
            public_key: account.public_key(),
        }
    }
}

/// A ledger transaction: the typed payload plus the fields set while signing.
///
/// Build one with the payload constructors, optionally pick a version, then
/// call [`Transaction::sign_with`] and, for sponsored transactions,
/// [`Transaction::sponsor_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    version: u8,
    fee: u64,
    timestamp: Option<u64>,
    sender: Option<Party>,
    sponsor: Option<Party>,
    proofs: Vec<[u8; SIGNATURE_SIZE]>,
    payload: Payload,
}

impl Transaction {
    pub fn new(payload: Payload) -> Self {
        Self {
            version: payload.kind().default_version(),
            fee: payload.fee(),
            timestamp: None,
            sender: None,
            sponsor: None,
            proofs: Vec::new(),
            payload,
        }
    }

    pub fn transfer(recipient: Address, amount: u64) -> Self {
        Self::new(Payload::Transfer(TransferPayload {
            recipient,
            amount,
            attachment: Vec::new(),
        }))
    }

    pub fn mass_transfer(transfers: Vec<TransferEntry>) -> Self {
        Self::new(Payload::MassTransfer(MassTransferPayload {
            transfers,
            attachment: Vec::new(),
        }))
    }

    pub fn anchor(anchors: Vec<Vec<u8>>) -> Self {
        Self::new(Payload::Anchor(AnchorPayload { anchors }))
    }

    pub fn association(
        recipient: Address,
        association_type: u64,
        subject: Vec<u8>,
        data: Vec<DataEntry>,
    ) -> Self {
        Self::new(Payload::Association(AssociationPayload {
            recipient,
            association_type,
            subject,
            expires: None,
            data,
        }))
    }

    pub fn revoke_association(recipient: Address, association_type: u64, subject: Vec<u8>) -> Self {
        Self::new(Payload::RevokeAssociation(RevokeAssociationPayload {
            recipient,
            association_type,
            subject,
        }))
    }

    pub fn lease(recipient: Address, amount: u64) -> Self {
        Self::new(Payload::Lease(LeasePayload { recipient, amount }))
    }

    pub fn cancel_lease(lease_id: impl Into<String>) -> Self {
        Self::new(Payload::CancelLease(CancelLeasePayload {
            lease_id: lease_id.into(),
        }))
    }

    pub fn with_version(mut self, version: u8) -> Result<Self, TransactionError> {
        let kind = self.kind();
        if !kind.supports_version(version) {
            return Err(TransactionError::UnsupportedVersion {
                kind: kind.name(),
                version,
            });
        }
        self.version = version;
        Ok(self)
    }

    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn kind(&self) -> TxKind {
        self.payload.kind()
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    pub fn sender(&self) -> Option<&Party> {
        self.sender.as_ref()
    }

    pub fn sponsor(&self) -> Option<&Party> {
        self.sponsor.as_ref()
    }

    /// Account paying the fee: the sponsor if any, else the sender
    pub fn fee_payer(&self) -> Option<&Party> {
        self.sponsor.as_ref().or(self.sender.as_ref())
    }

    pub fn proofs(&self) -> &[[u8; SIGNATURE_SIZE]] {
        &self.proofs
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Sign as sender. Sets the timestamp if none was given.
    pub fn sign_with(&mut self, account: &Account) -> Result<(), TransactionError> {
        self.payload.validate(self.version)?;

        if self.timestamp.is_none() {
            self.timestamp = Some(next_timestamp());
        }
        self.sender = Some(Party::of(account));

        let message = self.to_binary()?;
        self.proofs.push(account.sign(&message));

        debug!(
            "Signed {} v{} by {}",
            self.kind(),
            self.version,
            account.address()
        );
        Ok(())
    }

    /// Co-sign as sponsor, who then pays the fee
    pub fn sponsor_with(&mut self, account: &Account) -> Result<(), TransactionError> {
        let sender = self.sender.as_ref().ok_or(TransactionError::NotSigned)?;
        if sender.address == *account.address() {
            return Err(TransactionError::SponsorIsSender);
        }

        let message = self.to_binary()?;
        self.sponsor = Some(Party::of(account));
        self.proofs.push(account.sign(&message));

        debug!("Sponsored {} by {}", self.kind(), account.address());
        Ok(())
    }

    /// Bytes covered by the proofs
    pub fn to_binary(&self) -> Result<Vec<u8>, TransactionError> {
        let sender = self.sender.as_ref().ok_or(TransactionError::NotSigned)?;
        let timestamp = self.timestamp.ok_or(TransactionError::NotSigned)?;

        let header = payload::SigningHeader {
            kind: self.kind(),
            version: self.version,
            chain_id: sender.address.chain_id(),
            timestamp,
            fee: self.fee,
            sender,
        };

        let mut writer = Writer::new();
        self.payload.write(&mut writer, &header)?;
        Ok(writer.into_bytes())
    }

    /// Transaction id, base58 of the blake2b-256 of the signed bytes
    pub fn id(&self) -> Result<String, TransactionError> {
        Ok(base58_encode(blake2b256(&self.to_binary()?)))
    }

    /// Check the sender proof and, when sponsored, the sponsor proof
    pub fn verify_proofs(&self) -> Result<bool, TransactionError> {
        let sender = self.sender.as_ref().ok_or(TransactionError::NotSigned)?;
        let message = self.to_binary()?;

        let mut signers = vec![sender];
        signers.extend(self.sponsor.as_ref());
        if self.proofs.len() < signers.len() {
            return Ok(false);
        }

        for (signer, proof) in signers.iter().zip(&self.proofs) {
            if !verify_signature(&signer.public_key, &message, proof)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// JSON body accepted by `/transactions/broadcast`
    pub fn to_json(&self) -> Result<Value, TransactionError> {
        let sender = self.sender.as_ref().ok_or(TransactionError::NotSigned)?;
        let timestamp = self.timestamp.ok_or(TransactionError::NotSigned)?;

        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id()?));
        map.insert("type".into(), Value::from(self.kind().type_id()));
        map.insert("version".into(), Value::from(self.version));
        map.insert("sender".into(), Value::from(sender.address.to_string()));
        map.insert("senderKeyType".into(), Value::from(sender.key_type.name()));
        map.insert(
            "senderPublicKey".into(),
            Value::from(base58_encode(sender.public_key)),
        );
        map.insert("fee".into(), Value::from(self.fee));
        map.insert("timestamp".into(), Value::from(timestamp));

        if let Some(sponsor) = &self.sponsor {
            map.insert("sponsor".into(), Value::from(sponsor.address.to_string()));
            map.insert("sponsorKeyType".into(), Value::from(sponsor.key_type.name()));
            map.insert(
                "sponsorPublicKey".into(),
                Value::from(base58_encode(sponsor.public_key)),
            );
        }

        self.payload.write_json(&mut map);

        let proofs = self
            .proofs
            .iter()
            .map(|proof| Value::from(base58_encode(proof)))
            .collect();
        map.insert("proofs".into(), Value::Array(proofs));

        Ok(Value::Object(map))
    }
}
