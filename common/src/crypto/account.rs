use std::fmt;

use ed25519_dalek::{Signer, SigningKey};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use super::{base58_encode, secure_hash, Address, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// Length of the random seeds generated for throwaway test accounts
const RANDOM_SEED_LENGTH: usize = 48;

/// Signing key algorithm of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ed25519,
}

impl KeyType {
    /// Byte used for the key type in the binary transaction layout
    pub fn id(&self) -> u8 {
        match self {
            KeyType::Ed25519 => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "ed25519",
        }
    }
}

/// A keypair-backed account on a given chain
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
    address: Address,
    chain_id: u8,
}

impl Account {
    /// Derive an account from a seed phrase.
    ///
    /// The private key is `secure_hash(nonce || seed)` with a zero nonce,
    /// which is how the wallet derives the first account of a seed.
    pub fn from_seed(seed: &str, chain_id: u8) -> Self {
        let nonce = 0u32.to_be_bytes();
        let mut material = Vec::with_capacity(nonce.len() + seed.len());
        material.extend_from_slice(&nonce);
        material.extend_from_slice(seed.as_bytes());

        let signing_key = SigningKey::from_bytes(&secure_hash(&material));
        let address = Address::from_public_key(signing_key.verifying_key().as_bytes(), chain_id);

        Self {
            signing_key,
            address,
            chain_id,
        }
    }

    /// Create an account from a random seed
    pub fn random(chain_id: u8) -> Self {
        let seed: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SEED_LENGTH)
            .map(char::from)
            .collect();

        Self::from_seed(&seed, chain_id)
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn chain_id(&self) -> u8 {
        self.chain_id
    }

    pub fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn public_key_base58(&self) -> String {
        base58_encode(self.public_key())
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        self.signing_key.sign(message).to_bytes()
    }
}

// Never print key material
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("chain_id", &(self.chain_id as char))
            .finish()
    }
}
