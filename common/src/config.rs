// Number of decimals of the LTO token
pub const COIN_DECIMALS: u8 = 8;
// 1 LTO in its smallest unit
pub const COIN_VALUE: u64 = 100_000_000;

// Chain ids
pub const MAINNET_CHAIN_ID: u8 = b'L';
pub const TESTNET_CHAIN_ID: u8 = b'T';

// Address layout: version (1) + chain id (1) + key hash (20) + checksum (4)
pub const ADDRESS_VERSION: u8 = 1;
pub const ADDRESS_HASH_LENGTH: usize = 20;
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;
pub const ADDRESS_LENGTH: usize = 2 + ADDRESS_HASH_LENGTH + ADDRESS_CHECKSUM_LENGTH;

// Maximum number of recipients in a mass transfer
pub const MAX_MASS_TRANSFER_COUNT: usize = 100;
// Maximum number of anchors in a single transaction
pub const MAX_ANCHOR_COUNT: usize = 100;
// Maximum size of an attachment in bytes
pub const MAX_ATTACHMENT_SIZE: usize = 140;
