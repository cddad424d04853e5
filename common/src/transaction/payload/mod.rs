mod anchor;
mod association;
mod lease;
mod transfer;

pub use anchor::AnchorPayload;
pub use association::{AssociationPayload, RevokeAssociationPayload};
pub use lease::{CancelLeasePayload, LeasePayload};
pub use transfer::{MassTransferPayload, TransferEntry, TransferPayload};

use serde_json::{Map, Value};

use super::{Party, TransactionError, TxKind, Writer};

/// Fields shared by every payload layout
pub(crate) struct SigningHeader<'a> {
    pub kind: TxKind,
    pub version: u8,
    pub chain_id: u8,
    pub timestamp: u64,
    pub fee: u64,
    pub sender: &'a Party,
}

impl SigningHeader<'_> {
    // type, version, chain id, timestamp, key type, public key, fee
    pub fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.kind.type_id());
        writer.write_u8(self.version);
        writer.write_u8(self.chain_id);
        writer.write_u64(self.timestamp);
        writer.write_u8(self.sender.key_type.id());
        writer.write_bytes(&self.sender.public_key);
        writer.write_u64(self.fee);
    }

    // Versions before 3 start with type and version only
    pub fn write_legacy_prefix(&self, writer: &mut Writer) {
        writer.write_u8(self.kind.type_id());
        writer.write_u8(self.version);
    }
}

// this enum represent all types of transaction the suite submits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Transfer(TransferPayload),
    MassTransfer(MassTransferPayload),
    Anchor(AnchorPayload),
    Association(AssociationPayload),
    RevokeAssociation(RevokeAssociationPayload),
    Lease(LeasePayload),
    CancelLease(CancelLeasePayload),
}

impl Payload {
    pub fn kind(&self) -> TxKind {
        match self {
            Payload::Transfer(_) => TxKind::Transfer,
            Payload::MassTransfer(_) => TxKind::MassTransfer,
            Payload::Anchor(_) => TxKind::Anchor,
            Payload::Association(_) => TxKind::Association,
            Payload::RevokeAssociation(_) => TxKind::RevokeAssociation,
            Payload::Lease(_) => TxKind::Lease,
            Payload::CancelLease(_) => TxKind::CancelLease,
        }
    }

    /// Minimum fee for this payload
    pub fn fee(&self) -> u64 {
        let kind = self.kind();
        let items = match self {
            Payload::MassTransfer(p) => p.transfers.len(),
            Payload::Anchor(p) => p.anchors.len(),
            Payload::Association(p) => p.data.len(),
            _ => 0,
        } as u64;

        kind.base_fee() + kind.var_fee() * items
    }

    pub(crate) fn validate(&self, version: u8) -> Result<(), TransactionError> {
        match self {
            Payload::Transfer(p) => p.validate(),
            Payload::MassTransfer(p) => p.validate(),
            Payload::Anchor(p) => p.validate(),
            Payload::Association(p) => p.validate(version),
            Payload::RevokeAssociation(p) => p.validate(version),
            Payload::Lease(_) => Ok(()),
            Payload::CancelLease(p) => p.validate(),
        }
    }

    pub(crate) fn write(
        &self,
        writer: &mut Writer,
        header: &SigningHeader,
    ) -> Result<(), TransactionError> {
        match self {
            Payload::Transfer(p) => p.write(writer, header),
            Payload::MassTransfer(p) => p.write(writer, header),
            Payload::Anchor(p) => p.write(writer, header),
            Payload::Association(p) => p.write(writer, header),
            Payload::RevokeAssociation(p) => p.write(writer, header),
            Payload::Lease(p) => {
                p.write(writer, header);
                Ok(())
            }
            Payload::CancelLease(p) => p.write(writer, header),
        }
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        match self {
            Payload::Transfer(p) => p.write_json(map),
            Payload::MassTransfer(p) => p.write_json(map),
            Payload::Anchor(p) => p.write_json(map),
            Payload::Association(p) => p.write_json(map),
            Payload::RevokeAssociation(p) => p.write_json(map),
            Payload::Lease(p) => p.write_json(map),
            Payload::CancelLease(p) => p.write_json(map),
        }
    }
}
