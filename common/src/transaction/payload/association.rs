use serde_json::{Map, Value};

use super::SigningHeader;
use crate::{
    crypto::{base58_encode, Address},
    transaction::{DataEntry, TransactionError, Writer},
};

fn legacy_type(association_type: u64) -> Result<i32, TransactionError> {
    i32::try_from(association_type).map_err(|_| TransactionError::FieldTooLong {
        field: "association type",
        len: 8,
    })
}

// Version 1 layout shared by issue and revoke
fn write_legacy(
    writer: &mut Writer,
    header: &SigningHeader,
    recipient: &Address,
    association_type: u64,
    subject: &[u8],
) -> Result<(), TransactionError> {
    header.write_legacy_prefix(writer);
    writer.write_u8(header.chain_id);
    writer.write_bytes(&header.sender.public_key);
    writer.write_bytes(recipient.as_bytes());
    writer.write_i32(legacy_type(association_type)?);
    if subject.is_empty() {
        writer.write_u8(0);
    } else {
        writer.write_u8(1);
        writer.write_sized_bytes("subject", subject)?;
    }
    writer.write_u64(header.timestamp);
    writer.write_u64(header.fee);
    Ok(())
}

fn write_subject_json(map: &mut Map<String, Value>, subject: &[u8]) {
    if !subject.is_empty() {
        map.insert("subject".into(), Value::from(base58_encode(subject)));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationPayload {
    pub recipient: Address,
    pub association_type: u64,
    pub subject: Vec<u8>,
    pub expires: Option<u64>,
    pub data: Vec<DataEntry>,
}

impl AssociationPayload {
    pub(crate) fn validate(&self, version: u8) -> Result<(), TransactionError> {
        if !self.data.is_empty() && version < 4 {
            return Err(TransactionError::DataRequiresVersion4(version));
        }
        if version == 1 {
            legacy_type(self.association_type)?;
        }
        Ok(())
    }

    pub(crate) fn write(
        &self,
        writer: &mut Writer,
        header: &SigningHeader,
    ) -> Result<(), TransactionError> {
        match header.version {
            1 => write_legacy(
                writer,
                header,
                &self.recipient,
                self.association_type,
                &self.subject,
            )?,
            3 => {
                header.write(writer);
                writer.write_bytes(self.recipient.as_bytes());
                writer.write_u64(self.association_type);
                writer.write_u64(self.expires.unwrap_or(0));
                writer.write_sized_bytes("subject", &self.subject)?;
            }
            _ => {
                header.write(writer);
                writer.write_u64(self.association_type);
                writer.write_bytes(self.recipient.as_bytes());
                writer.write_u64(self.expires.unwrap_or(0));
                writer.write_sized_bytes("subject", &self.subject)?;
                writer.write_count("data", self.data.len())?;
                for entry in &self.data {
                    entry.write(writer)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        map.insert("recipient".into(), Value::from(self.recipient.to_string()));
        map.insert("associationType".into(), Value::from(self.association_type));
        write_subject_json(map, &self.subject);
        if let Some(expires) = self.expires {
            map.insert("expires".into(), Value::from(expires));
        }
        if !self.data.is_empty() {
            let data = self
                .data
                .iter()
                .filter_map(|entry| serde_json::to_value(entry).ok())
                .collect();
            map.insert("data".into(), Value::Array(data));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeAssociationPayload {
    pub recipient: Address,
    pub association_type: u64,
    pub subject: Vec<u8>,
}

impl RevokeAssociationPayload {
    pub(crate) fn validate(&self, version: u8) -> Result<(), TransactionError> {
        if version == 1 {
            legacy_type(self.association_type)?;
        }
        Ok(())
    }

    pub(crate) fn write(
        &self,
        writer: &mut Writer,
        header: &SigningHeader,
    ) -> Result<(), TransactionError> {
        match header.version {
            1 => write_legacy(
                writer,
                header,
                &self.recipient,
                self.association_type,
                &self.subject,
            ),
            _ => {
                header.write(writer);
                writer.write_bytes(self.recipient.as_bytes());
                writer.write_u64(self.association_type);
                writer.write_sized_bytes("subject", &self.subject)
            }
        }
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        map.insert("recipient".into(), Value::from(self.recipient.to_string()));
        map.insert("associationType".into(), Value::from(self.association_type));
        write_subject_json(map, &self.subject);
    }
}
