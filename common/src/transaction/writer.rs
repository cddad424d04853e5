use super::TransactionError;

/// Big-endian byte writer for the signed transaction layout
#[derive(Debug, Default)]
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, value: &[u8]) {
        self.bytes.extend_from_slice(value);
    }

    /// Write a u16 length prefix followed by the bytes
    pub fn write_sized_bytes(
        &mut self,
        field: &'static str,
        value: &[u8],
    ) -> Result<(), TransactionError> {
        let len = u16::try_from(value.len()).map_err(|_| TransactionError::FieldTooLong {
            field,
            len: value.len(),
        })?;
        self.write_u16(len);
        self.write_bytes(value);
        Ok(())
    }

    /// Write a u16 item count
    pub fn write_count(&mut self, field: &'static str, count: usize) -> Result<(), TransactionError> {
        let count =
            u16::try_from(count).map_err(|_| TransactionError::FieldTooLong { field, len: count })?;
        self.write_u16(count);
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
