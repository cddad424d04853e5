use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SigningHeader;
use crate::{
    config::{MAX_ATTACHMENT_SIZE, MAX_MASS_TRANSFER_COUNT},
    crypto::{base58_encode, Address},
    transaction::{TransactionError, Writer},
};

fn check_attachment(attachment: &[u8]) -> Result<(), TransactionError> {
    if attachment.len() > MAX_ATTACHMENT_SIZE {
        return Err(TransactionError::AttachmentTooLarge {
            size: attachment.len(),
            max: MAX_ATTACHMENT_SIZE,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayload {
    pub recipient: Address,
    pub amount: u64,
    pub attachment: Vec<u8>,
}

impl TransferPayload {
    pub(crate) fn validate(&self) -> Result<(), TransactionError> {
        check_attachment(&self.attachment)
    }

    pub(crate) fn write(
        &self,
        writer: &mut Writer,
        header: &SigningHeader,
    ) -> Result<(), TransactionError> {
        match header.version {
            2 => {
                header.write_legacy_prefix(writer);
                writer.write_bytes(&header.sender.public_key);
                writer.write_u64(header.timestamp);
                writer.write_u64(self.amount);
                writer.write_u64(header.fee);
                writer.write_bytes(self.recipient.as_bytes());
            }
            _ => {
                header.write(writer);
                writer.write_bytes(self.recipient.as_bytes());
                writer.write_u64(self.amount);
            }
        }
        writer.write_sized_bytes("attachment", &self.attachment)
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        map.insert("recipient".into(), Value::from(self.recipient.to_string()));
        map.insert("amount".into(), Value::from(self.amount));
        map.insert(
            "attachment".into(),
            Value::from(base58_encode(&self.attachment)),
        );
    }
}

/// One recipient of a mass transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEntry {
    pub recipient: Address,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassTransferPayload {
    pub transfers: Vec<TransferEntry>,
    pub attachment: Vec<u8>,
}

impl MassTransferPayload {
    /// Sum of every transfer, `None` when it does not fit in a `u64`
    pub fn total_amount(&self) -> Option<u64> {
        self.transfers
            .iter()
            .try_fold(0u64, |total, t| total.checked_add(t.amount))
    }

    pub(crate) fn validate(&self) -> Result<(), TransactionError> {
        if self.transfers.is_empty() {
            return Err(TransactionError::NoTransfers);
        }
        if self.transfers.len() > MAX_MASS_TRANSFER_COUNT {
            return Err(TransactionError::TooManyTransfers {
                count: self.transfers.len(),
                max: MAX_MASS_TRANSFER_COUNT,
            });
        }
        check_attachment(&self.attachment)
    }

    fn write_transfers(&self, writer: &mut Writer) -> Result<(), TransactionError> {
        writer.write_count("transfers", self.transfers.len())?;
        for transfer in &self.transfers {
            writer.write_bytes(transfer.recipient.as_bytes());
            writer.write_u64(transfer.amount);
        }
        Ok(())
    }

    pub(crate) fn write(
        &self,
        writer: &mut Writer,
        header: &SigningHeader,
    ) -> Result<(), TransactionError> {
        match header.version {
            1 => {
                header.write_legacy_prefix(writer);
                writer.write_bytes(&header.sender.public_key);
                self.write_transfers(writer)?;
                writer.write_u64(header.timestamp);
                writer.write_u64(header.fee);
            }
            _ => {
                header.write(writer);
                self.write_transfers(writer)?;
            }
        }
        writer.write_sized_bytes("attachment", &self.attachment)
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        let transfers = self
            .transfers
            .iter()
            .map(|t| {
                serde_json::json!({
                    "recipient": t.recipient.to_string(),
                    "amount": t.amount,
                })
            })
            .collect::<Vec<_>>();
        map.insert("transfers".into(), Value::Array(transfers));
        map.insert(
            "attachment".into(),
            Value::from(base58_encode(&self.attachment)),
        );
    }
}
