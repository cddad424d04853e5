use thiserror::Error;

use crate::crypto::CryptoError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("{kind} transaction does not support version {version}")]
    UnsupportedVersion { kind: &'static str, version: u8 },
    #[error("Transaction must be signed by its sender first")]
    NotSigned,
    #[error("Sponsor cannot be the sender of the transaction")]
    SponsorIsSender,
    #[error("A mass transfer needs at least one transfer")]
    NoTransfers,
    #[error("Too many transfers: {count}, maximum: {max}")]
    TooManyTransfers { count: usize, max: usize },
    #[error("Too many anchors: {count}, maximum: {max}")]
    TooManyAnchors { count: usize, max: usize },
    #[error("Attachment too large: {size} bytes, maximum: {max} bytes")]
    AttachmentTooLarge { size: usize, max: usize },
    #[error("Field '{field}' is too long: {len} bytes")]
    FieldTooLong { field: &'static str, len: usize },
    #[error("Association data requires version 4, got version {0}")]
    DataRequiresVersion4(u8),
    #[error("Invalid lease id '{0}'")]
    InvalidLeaseId(String),
    #[error("Invalid data entry: {0}")]
    InvalidDataEntry(String),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
