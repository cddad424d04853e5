use core::fmt;

use crate::config::COIN_VALUE;

/// Transaction types exercised by the suite, with their protocol constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Transfer,
    Lease,
    CancelLease,
    MassTransfer,
    Anchor,
    Association,
    RevokeAssociation,
}

impl TxKind {
    pub const ALL: [TxKind; 7] = [
        TxKind::Transfer,
        TxKind::Lease,
        TxKind::CancelLease,
        TxKind::MassTransfer,
        TxKind::Anchor,
        TxKind::Association,
        TxKind::RevokeAssociation,
    ];

    pub fn type_id(&self) -> u8 {
        match self {
            TxKind::Transfer => 4,
            TxKind::Lease => 8,
            TxKind::CancelLease => 9,
            TxKind::MassTransfer => 11,
            TxKind::Anchor => 15,
            TxKind::Association => 16,
            TxKind::RevokeAssociation => 17,
        }
    }

    pub fn from_type_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TxKind::Transfer => "transfer",
            TxKind::Lease => "lease",
            TxKind::CancelLease => "cancel lease",
            TxKind::MassTransfer => "mass transfer",
            TxKind::Anchor => "anchor",
            TxKind::Association => "association",
            TxKind::RevokeAssociation => "revoke association",
        }
    }

    pub fn base_fee(&self) -> u64 {
        match self {
            TxKind::Transfer => COIN_VALUE,
            TxKind::Lease => COIN_VALUE,
            TxKind::CancelLease => COIN_VALUE,
            TxKind::MassTransfer => COIN_VALUE,
            TxKind::Anchor => 25_000_000,
            TxKind::Association => 50_000_000,
            TxKind::RevokeAssociation => 50_000_000,
        }
    }

    /// Extra fee per transfer, anchor or data entry
    pub fn var_fee(&self) -> u64 {
        match self {
            TxKind::MassTransfer | TxKind::Anchor | TxKind::Association => 10_000_000,
            _ => 0,
        }
    }

    pub fn default_version(&self) -> u8 {
        3
    }

    pub fn supported_versions(&self) -> &'static [u8] {
        match self {
            TxKind::Transfer => &[2, 3],
            TxKind::Lease => &[2, 3],
            TxKind::CancelLease => &[2, 3],
            TxKind::MassTransfer => &[1, 3],
            TxKind::Anchor => &[1, 3],
            TxKind::Association => &[1, 3, 4],
            TxKind::RevokeAssociation => &[1, 3],
        }
    }

    pub fn supports_version(&self, version: u8) -> bool {
        self.supported_versions().contains(&version)
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_lookup() {
        for kind in TxKind::ALL {
            assert_eq!(TxKind::from_type_id(kind.type_id()), Some(kind));
        }
        assert_eq!(TxKind::from_type_id(1), None);
    }

    #[test]
    fn test_default_version_is_supported() {
        for kind in TxKind::ALL {
            assert!(kind.supports_version(kind.default_version()), "{kind}");
        }
    }
}
