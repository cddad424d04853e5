use serde_json::{Map, Value};

use super::SigningHeader;
use crate::{
    config::MAX_ANCHOR_COUNT,
    crypto::base58_encode,
    transaction::{TransactionError, Writer},
};

/// Arbitrary digests to timestamp on the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPayload {
    pub anchors: Vec<Vec<u8>>,
}

impl AnchorPayload {
    pub(crate) fn validate(&self) -> Result<(), TransactionError> {
        if self.anchors.len() > MAX_ANCHOR_COUNT {
            return Err(TransactionError::TooManyAnchors {
                count: self.anchors.len(),
                max: MAX_ANCHOR_COUNT,
            });
        }
        Ok(())
    }

    fn write_anchors(&self, writer: &mut Writer) -> Result<(), TransactionError> {
        writer.write_count("anchors", self.anchors.len())?;
        for anchor in &self.anchors {
            writer.write_sized_bytes("anchor", anchor)?;
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
                self.write_anchors(writer)?;
                writer.write_u64(header.timestamp);
                writer.write_u64(header.fee);
            }
            _ => {
                header.write(writer);
                self.write_anchors(writer)?;
            }
        }
        Ok(())
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        let anchors = self
            .anchors
            .iter()
            .map(|anchor| Value::from(base58_encode(anchor)))
            .collect();
        map.insert("anchors".into(), Value::Array(anchors));
    }
}
