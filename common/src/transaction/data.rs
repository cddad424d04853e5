use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{TransactionError, Writer};

/// Typed value of an association data entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl DataValue {
    fn type_name(&self) -> &'static str {
        match self {
            DataValue::Integer(_) => "integer",
            DataValue::Boolean(_) => "boolean",
            DataValue::String(_) => "string",
        }
    }

    fn type_id(&self) -> u8 {
        match self {
            DataValue::Integer(_) => 0,
            DataValue::Boolean(_) => 1,
            DataValue::String(_) => 3,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Integer(value) => write!(f, "{}", value),
            DataValue::Boolean(value) => write!(f, "{}", value),
            DataValue::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Boolean(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

/// Key/value pair carried by a version 4 association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDataEntry", into = "RawDataEntry")]
pub struct DataEntry {
    pub key: String,
    pub value: DataValue,
}

impl DataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> Result<(), TransactionError> {
        writer.write_sized_bytes("data key", self.key.as_bytes())?;
        writer.write_u8(self.value.type_id());
        match &self.value {
            DataValue::Integer(value) => writer.write_i64(*value),
            DataValue::Boolean(value) => writer.write_u8(u8::from(*value)),
            DataValue::String(value) => writer.write_sized_bytes("data value", value.as_bytes())?,
        }
        Ok(())
    }
}

/// Wire form: `{"key": .., "type": .., "value": ..}`
#[derive(Serialize, Deserialize)]
struct RawDataEntry {
    key: String,
    #[serde(rename = "type")]
    kind: String,
    value: Value,
}

impl TryFrom<RawDataEntry> for DataEntry {
    type Error = TransactionError;

    fn try_from(raw: RawDataEntry) -> Result<Self, Self::Error> {
        let value = match (raw.kind.as_str(), &raw.value) {
            ("integer", Value::Number(n)) => n.as_i64().map(DataValue::Integer),
            ("boolean", Value::Bool(b)) => Some(DataValue::Boolean(*b)),
            ("string", Value::String(s)) => Some(DataValue::String(s.clone())),
            _ => None,
        }
        .ok_or_else(|| {
            TransactionError::InvalidDataEntry(format!(
                "key '{}' has {} value {}",
                raw.key, raw.kind, raw.value
            ))
        })?;

        Ok(DataEntry {
            key: raw.key,
            value,
        })
    }
}

impl From<DataEntry> for RawDataEntry {
    fn from(entry: DataEntry) -> Self {
        let kind = entry.value.type_name().to_string();
        let value = match entry.value {
            DataValue::Integer(value) => Value::from(value),
            DataValue::Boolean(value) => Value::from(value),
            DataValue::String(value) => Value::from(value),
        };
        RawDataEntry {
            key: entry.key,
            kind,
            value,
        }
    }
}
