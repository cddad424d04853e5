mod account;
mod address;
mod error;

pub use account::{Account, KeyType};
pub use address::Address;
pub use error::CryptoError;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

pub const HASH_SIZE: usize = 32;
pub const PUBLIC_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 64;

pub fn sha256(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

pub fn blake2b256(data: &[u8]) -> [u8; HASH_SIZE] {
    let hash = blake2b_simd::Params::new().hash_length(HASH_SIZE).hash(data);
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(hash.as_bytes());
    out
}

/// sha256(blake2b256(data)), used for key hashes and address checksums
pub fn secure_hash(data: &[u8]) -> [u8; HASH_SIZE] {
    sha256(&blake2b256(data))
}

pub fn base58_encode(data: impl AsRef<[u8]>) -> String {
    bs58::encode(data).into_string()
}

pub fn base58_decode(value: &str) -> Result<Vec<u8>, CryptoError> {
    bs58::decode(value)
        .into_vec()
        .map_err(|e| CryptoError::InvalidBase58(e.to_string()))
}

/// Verify an ed25519 signature made over `message`
pub fn verify_signature(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool, CryptoError> {
    let key_bytes: [u8; PUBLIC_KEY_SIZE] = public_key
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    let key = VerifyingKey::from_bytes(&key_bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
    let signature_bytes: [u8; SIGNATURE_SIZE] = signature
        .try_into()
        .map_err(|_| CryptoError::InvalidSignatureLength(signature.len()))?;
    let signature = Signature::from_bytes(&signature_bytes);

    Ok(key.verify(message, &signature).is_ok())
}
