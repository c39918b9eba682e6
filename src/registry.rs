//! Pool registry: at most one pool per paired asset.
//!
//! The registry is the only constructor of pools. It derives each
//! pool's address deterministically from the asset it trades, stamps
//! the pool's share issue with metadata derived from the asset's own,
//! and hands out [`PoolHandle`]s for all further interaction.

use std::collections::BTreeMap;

use tracing::info;

use crate::asset::{FungibleAsset, SharedAsset};
use crate::domain::Address;
use crate::error::{AmmError, Result};
use crate::pool::{Pool, PoolHandle};

/// Mask folded into an asset's identity to derive its pool's address.
/// XOR keeps the derivation injective, so distinct assets always get
/// distinct pool addresses, and a nonzero mask keeps any pool address
/// distinct from its own asset's.
const POOL_ADDRESS_MASK: [u8; 32] = [0xB5; 32];

fn derive_pool_address(asset_id: Address) -> Address {
    let mut bytes = asset_id.as_bytes();
    for (byte, mask) in bytes.iter_mut().zip(POOL_ADDRESS_MASK) {
        *byte ^= mask;
    }
    Address::from_bytes(bytes)
}

/// Directory of live pools, keyed by paired-asset identity.
///
/// # Examples
///
/// ```
/// use basin_amm::asset::{share_asset, TokenLedger};
/// use basin_amm::domain::{Address, Amount};
/// use basin_amm::registry::Registry;
///
/// let owner = Address::from_bytes([7u8; 32]);
/// let token = TokenLedger::new(
///     Address::from_bytes([1u8; 32]),
///     "Token",
///     "TKN",
///     Amount::new(1_000),
///     owner,
/// )
/// .expect("valid asset");
///
/// let mut registry = Registry::new();
/// let pool = registry.create_pool(share_asset(token)).expect("fresh asset");
/// assert_eq!(pool.name(), "Token-Base");
/// assert_eq!(pool.symbol(), "TKN_LP");
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    pools: BTreeMap<Address, PoolHandle>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool for `asset` and registers it.
    ///
    /// The pool's share issue is named after the asset: a token called
    /// `Token` with symbol `TKN` yields shares named `Token-Base` with
    /// symbol `TKN_LP`.
    ///
    /// # Errors
    ///
    /// * [`AmmError::InvalidAsset`] if the asset reports the zero
    ///   sentinel as its address.
    /// * [`AmmError::PoolAlreadyExists`] if a pool for the asset is
    ///   already registered.
    pub fn create_pool(&mut self, asset: SharedAsset) -> Result<PoolHandle> {
        let (asset_id, name, symbol) = {
            let asset = asset.lock();
            (
                asset.address(),
                format!("{}-Base", asset.name()),
                format!("{}_LP", asset.symbol()),
            )
        };
        if asset_id.is_zero() {
            return Err(AmmError::InvalidAsset);
        }
        if self.pools.contains_key(&asset_id) {
            return Err(AmmError::PoolAlreadyExists);
        }

        let address = derive_pool_address(asset_id);
        let handle = PoolHandle::new(Pool::new(asset, asset_id, address, name, symbol));
        self.pools.insert(asset_id, handle.clone());
        info!(%asset_id, pool = %address, "pool created");
        Ok(handle)
    }

    /// Looks up the pool trading `asset`, if one is registered.
    #[must_use]
    pub fn get_pool(&self, asset: Address) -> Option<PoolHandle> {
        self.pools.get(&asset).cloned()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no pools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Pool resolution seam used by routed swaps.
///
/// Routed swaps only need to turn an asset identity into a pool, so
/// they take this trait rather than the whole [`Registry`]. Hosts with
/// their own pool directories can implement it directly.
pub trait PoolLookup {
    /// The pool trading `asset`, if any.
    fn pool_for(&self, asset: Address) -> Option<PoolHandle>;
}

impl PoolLookup for Registry {
    fn pool_for(&self, asset: Address) -> Option<PoolHandle> {
        self.get_pool(asset)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::asset::{share_asset, TokenLedger};
    use crate::domain::Amount;

    fn addr(tag: u8) -> Address {
        Address::from_bytes([tag; 32])
    }

    fn token(id: u8, name: &str, symbol: &str) -> SharedAsset {
        let Ok(ledger) = TokenLedger::new(addr(id), name, symbol, Amount::new(1_000), addr(10))
        else {
            panic!("valid ledger");
        };
        share_asset(ledger)
    }

    #[test]
    fn registers_pool_and_finds_it_again() {
        let mut registry = Registry::new();
        let Ok(pool) = registry.create_pool(token(1, "Token", "TKN")) else {
            panic!("expected Ok");
        };

        let Some(found) = registry.get_pool(addr(1)) else {
            panic!("expected pool");
        };
        assert_eq!(found.address(), pool.address());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn duplicate_asset_rejected() {
        let mut registry = Registry::new();
        let Ok(_) = registry.create_pool(token(1, "Token", "TKN")) else {
            panic!("expected Ok");
        };
        let result = registry.create_pool(token(1, "Token", "TKN"));
        assert!(matches!(result, Err(AmmError::PoolAlreadyExists)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn zero_sentinel_asset_rejected() {
        use crate::asset::FungibleAsset;
        use crate::error::Result as AmmResult;

        // Hand-rolled asset reporting the zero sentinel as its address,
        // something TokenLedger itself refuses to construct.
        #[derive(Debug)]
        struct ZeroAsset;

        impl FungibleAsset for ZeroAsset {
            fn address(&self) -> Address {
                Address::ZERO
            }
            fn name(&self) -> &str {
                "Zero"
            }
            fn symbol(&self) -> &str {
                "ZERO"
            }
            fn total_supply(&self) -> Amount {
                Amount::ZERO
            }
            fn balance_of(&self, _owner: Address) -> Amount {
                Amount::ZERO
            }
            fn allowance(&self, _owner: Address, _spender: Address) -> Amount {
                Amount::ZERO
            }
            fn approve(&mut self, _owner: Address, _spender: Address, _amount: Amount) {}
            fn transfer(&mut self, _from: Address, _to: Address, _amount: Amount) -> AmmResult<()> {
                Ok(())
            }
            fn transfer_from(
                &mut self,
                _spender: Address,
                _owner: Address,
                _to: Address,
                _amount: Amount,
            ) -> AmmResult<()> {
                Ok(())
            }
        }

        let mut registry = Registry::new();
        let result = registry.create_pool(share_asset(ZeroAsset));
        assert!(matches!(result, Err(AmmError::InvalidAsset)));
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_asset_has_no_pool() {
        let registry = Registry::new();
        assert!(registry.get_pool(addr(9)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn share_metadata_derived_from_asset() {
        let mut registry = Registry::new();
        let Ok(pool) = registry.create_pool(token(1, "Toastken", "TST")) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.name(), "Toastken-Base");
        assert_eq!(pool.symbol(), "TST_LP");
    }

    #[test]
    fn distinct_assets_get_distinct_pool_addresses() {
        let mut registry = Registry::new();
        let Ok(a) = registry.create_pool(token(1, "A", "A")) else {
            panic!("expected Ok");
        };
        let Ok(b) = registry.create_pool(token(2, "B", "B")) else {
            panic!("expected Ok");
        };
        assert_ne!(a.address(), b.address());
        assert_ne!(a.address(), a.asset_id());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_trait_resolves_through_registry() {
        let mut registry = Registry::new();
        let Ok(pool) = registry.create_pool(token(1, "Token", "TKN")) else {
            panic!("expected Ok");
        };
        let lookup: &dyn PoolLookup = &registry;
        let Some(found) = lookup.pool_for(addr(1)) else {
            panic!("expected pool");
        };
        assert_eq!(found.address(), pool.address());
    }
}
