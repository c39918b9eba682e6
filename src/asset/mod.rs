//! The fungible-asset collaborator contract.
//!
//! Pools never hold paired-asset balances themselves: every paired
//! reserve is an entry in the asset's own balance table, keyed by the
//! pool's address, and is read live at the start of each operation. The
//! [`FungibleAsset`] trait is the seam through which pools move value;
//! the crate ships [`TokenLedger`] as its standard implementation, but
//! any collaborator honoring the transfer/approve/balance-of contract
//! can be injected.

mod ledger;

use std::sync::Arc;

use parking_lot::Mutex;

pub use ledger::TokenLedger;

use crate::domain::{Address, Amount};
use crate::error::Result;

/// The standard fungible-asset contract consumed by pools.
///
/// Authorization is the host environment's concern: callers identify
/// themselves by address and the ledger enforces only balance and
/// allowance arithmetic. Failed movements surface as
/// [`AmmError::TransferRejected`](crate::error::AmmError::TransferRejected)
/// and are never partially applied.
pub trait FungibleAsset: Send + std::fmt::Debug {
    /// The asset's own identity.
    fn address(&self) -> Address;

    /// Human-readable display name.
    fn name(&self) -> &str;

    /// Short ticker symbol.
    fn symbol(&self) -> &str;

    /// Total units in circulation.
    fn total_supply(&self) -> Amount;

    /// Balance held by `owner`. Unknown owners hold zero.
    fn balance_of(&self, owner: Address) -> Amount;

    /// Remaining amount `spender` may pull from `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> Amount;

    /// Sets the amount `spender` may pull from `owner`, replacing any
    /// prior allowance.
    fn approve(&mut self, owner: Address, spender: Address, amount: Amount);

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Rejects the whole transfer if `from` holds less than `amount`.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()>;

    /// Moves `amount` from `owner` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// Rejects the whole transfer if the allowance or the owner's
    /// balance is less than `amount`.
    fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;
}

/// Shared handle to a fungible asset, lockable for the duration of a
/// balance movement. Ledger locks are always leaves: a pool takes its
/// asset's lock only while already holding its own, and never two
/// ledger locks at once.
pub type SharedAsset = Arc<Mutex<dyn FungibleAsset>>;

/// Wraps a concrete asset implementation into a [`SharedAsset`] handle.
pub fn share_asset<A: FungibleAsset + 'static>(asset: A) -> SharedAsset {
    Arc::new(Mutex::new(asset))
}
