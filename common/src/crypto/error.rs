use thiserror::Error;

/// Errors that can occur while decoding keys and addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input is not valid base58
    #[error("Invalid base58 string: {0}")]
    InvalidBase58(String),

    /// Address has the wrong number of bytes
    #[error("Invalid address length: {len} bytes, expected: {expected} bytes")]
    InvalidAddressLength { len: usize, expected: usize },

    /// Address version byte is not supported
    #[error("Unsupported address version: {0}")]
    UnsupportedAddressVersion(u8),

    /// Invalid checksum in address
    #[error("Invalid checksum")]
    InvalidChecksum,

    /// Public key bytes do not form a valid ed25519 point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature has the wrong number of bytes
    #[error("Invalid signature length: {0}")]
    InvalidSignatureLength(usize),
}
