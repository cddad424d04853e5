use std::{fmt, str::FromStr};

use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

use super::{base58_decode, base58_encode, secure_hash, CryptoError};
use crate::config::{
    ADDRESS_CHECKSUM_LENGTH, ADDRESS_HASH_LENGTH, ADDRESS_LENGTH, ADDRESS_VERSION,
};

/// A 26-byte account address, displayed in base58
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub fn from_public_key(public_key: &[u8], chain_id: u8) -> Self {
        let key_hash = secure_hash(public_key);

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = ADDRESS_VERSION;
        bytes[1] = chain_id;
        bytes[2..2 + ADDRESS_HASH_LENGTH].copy_from_slice(&key_hash[..ADDRESS_HASH_LENGTH]);

        let body_length = ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH;
        let checksum = secure_hash(&bytes[..body_length]);
        bytes[body_length..].copy_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);

        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; ADDRESS_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidAddressLength {
                    len: bytes.len(),
                    expected: ADDRESS_LENGTH,
                })?;

        if bytes[0] != ADDRESS_VERSION {
            return Err(CryptoError::UnsupportedAddressVersion(bytes[0]));
        }

        let body_length = ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH;
        let checksum = secure_hash(&bytes[..body_length]);
        if bytes[body_length..] != checksum[..ADDRESS_CHECKSUM_LENGTH] {
            return Err(CryptoError::InvalidChecksum);
        }

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn chain_id(&self) -> u8 {
        self.0[1]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base58_encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&base58_decode(s)?)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Address::from_str(&value).map_err(DeError::custom)
    }
}
