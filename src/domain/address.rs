//! Opaque on-ledger identity for assets and holders.

use core::fmt;

/// A chain-agnostic 32-byte identity.
///
/// `Address` names both fungible assets and balance holders: every asset
/// has an address, every account has an address, and every pool is
/// assigned its own address under which it holds paired-asset balances.
///
/// The all-zero value is the reserved sentinel meaning "no asset" and is
/// rejected wherever a real asset identity is required.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::Address;
///
/// let addr = Address::from_bytes([7u8; 32]);
/// assert!(!addr.is_zero());
/// assert!(Address::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// The reserved "no asset" sentinel.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes. All byte patterns are valid
    /// addresses; only the zero sentinel carries special meaning.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if this is the reserved zero sentinel.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
