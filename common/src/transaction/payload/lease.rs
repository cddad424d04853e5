use serde_json::{Map, Value};

use super::SigningHeader;
use crate::{
    crypto::{base58_decode, Address, HASH_SIZE},
    transaction::{TransactionError, Writer},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeasePayload {
    pub recipient: Address,
    pub amount: u64,
}

impl LeasePayload {
    pub(crate) fn write(&self, writer: &mut Writer, header: &SigningHeader) {
        match header.version {
            2 => {
                header.write_legacy_prefix(writer);
                // no asset id
                writer.write_u8(0);
                writer.write_bytes(&header.sender.public_key);
                writer.write_bytes(self.recipient.as_bytes());
                writer.write_u64(self.amount);
                writer.write_u64(header.fee);
                writer.write_u64(header.timestamp);
            }
            _ => {
                header.write(writer);
                writer.write_bytes(self.recipient.as_bytes());
                writer.write_u64(self.amount);
            }
        }
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        map.insert("recipient".into(), Value::from(self.recipient.to_string()));
        map.insert("amount".into(), Value::from(self.amount));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelLeasePayload {
    /// Id of the lease transaction, base58
    pub lease_id: String,
}

impl CancelLeasePayload {
    fn lease_id_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let bytes = base58_decode(&self.lease_id)
            .map_err(|_| TransactionError::InvalidLeaseId(self.lease_id.clone()))?;
        if bytes.len() != HASH_SIZE {
            return Err(TransactionError::InvalidLeaseId(self.lease_id.clone()));
        }
        Ok(bytes)
    }

    pub(crate) fn validate(&self) -> Result<(), TransactionError> {
        self.lease_id_bytes().map(|_| ())
    }

    pub(crate) fn write(
        &self,
        writer: &mut Writer,
        header: &SigningHeader,
    ) -> Result<(), TransactionError> {
        let lease_id = self.lease_id_bytes()?;
        match header.version {
            2 => {
                header.write_legacy_prefix(writer);
                writer.write_u8(header.chain_id);
                writer.write_bytes(&header.sender.public_key);
                writer.write_u64(header.fee);
                writer.write_u64(header.timestamp);
            }
            _ => header.write(writer),
        }
        writer.write_bytes(&lease_id);
        Ok(())
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        map.insert("leaseId".into(), Value::from(self.lease_id.clone()));
    }
}
