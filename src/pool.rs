//! A single constant-product pool pairing the base asset with one
//! fungible asset.
//!
//! Each pool owns its base reserve as a ledger field and holds its
//! paired reserve as a balance on the paired asset itself, keyed by the
//! pool's own address. The paired reserve is re-read from the asset at
//! the start of every operation, so value sent to the pool outside any
//! operation is absorbed into pricing rather than lost.
//!
//! Pools are shared through [`PoolHandle`], a cheaply clonable locked
//! reference. All pricing and liquidity operations run under the pool's
//! lock; the paired asset's lock is only ever taken while the pool's
//! lock is already held, and never alongside a second asset's lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::asset::{FungibleAsset, SharedAsset};
use crate::curve;
use crate::domain::{Address, Amount, Shares};
use crate::error::{AmmError, Result, MSG_OUTPUT_AMOUNT, MSG_OUTPUT_TOTAL};
use crate::registry::PoolLookup;
use crate::routing;

/// Reserve and share ledger for one base/paired trading pair.
///
/// Constructed by [`Registry::create_pool`](crate::registry::Registry::create_pool);
/// callers interact through [`PoolHandle`].
#[derive(Debug)]
pub struct Pool {
    asset_id: Address,
    address: Address,
    asset: SharedAsset,
    base_reserve: Amount,
    share_supply: Shares,
    share_balances: BTreeMap<Address, Shares>,
    name: String,
    symbol: String,
}

impl Pool {
    pub(crate) fn new(
        asset: SharedAsset,
        asset_id: Address,
        address: Address,
        name: String,
        symbol: String,
    ) -> Self {
        Self {
            asset_id,
            address,
            asset,
            base_reserve: Amount::ZERO,
            share_supply: Shares::ZERO,
            share_balances: BTreeMap::new(),
            name,
            symbol,
        }
    }

    /// Live paired reserve: the pool's balance on the paired asset.
    pub(crate) fn paired_reserve(&self) -> Amount {
        self.asset.lock().balance_of(self.address)
    }

    pub(crate) fn base_reserve(&self) -> Amount {
        self.base_reserve
    }

    pub(crate) fn set_base_reserve(&mut self, reserve: Amount) {
        self.base_reserve = reserve;
    }

    pub(crate) fn address(&self) -> Address {
        self.address
    }

    /// Pulls `amount` of the paired asset from `owner` into the pool,
    /// consuming the allowance `owner` granted to the pool's address.
    pub(crate) fn pull_paired(&self, owner: Address, amount: Amount) -> Result<()> {
        self.asset
            .lock()
            .transfer_from(self.address, owner, self.address, amount)
    }

    /// Pays `amount` of the paired asset out of the pool to `to`.
    pub(crate) fn pay_paired(&self, to: Address, amount: Amount) -> Result<()> {
        self.asset.lock().transfer(self.address, to, amount)
    }

    fn quote_base_to_paired(&self, base_in: Amount) -> Result<Amount> {
        curve::quote(base_in, self.base_reserve, self.paired_reserve())
    }

    fn quote_paired_to_base(&self, paired_in: Amount) -> Result<Amount> {
        curve::quote(paired_in, self.paired_reserve(), self.base_reserve)
    }

    fn add_liquidity(
        &mut self,
        caller: Address,
        paired_amount: Amount,
        base_in: Amount,
    ) -> Result<Shares> {
        let (pulled, minted, new_base) = if self.share_supply.is_zero() {
            // Bootstrap deposit: the caller sets the initial price and
            // receives one share per base unit.
            (paired_amount, Shares::new(base_in.get()), base_in)
        } else {
            let paired_reserve = self.paired_reserve();
            let required = paired_reserve
                .mul_div_floor(base_in, self.base_reserve)
                .ok_or(AmmError::DivisionByZero)?;
            if required > paired_amount {
                return Err(AmmError::PairedAmountExceeded);
            }
            let minted_raw = Amount::new(self.share_supply.get())
                .mul_div_floor(base_in, self.base_reserve)
                .ok_or(AmmError::DivisionByZero)?;
            let new_base = self
                .base_reserve
                .checked_add(base_in)
                .ok_or(AmmError::Overflow("base reserve"))?;
            (required, Shares::new(minted_raw.get()), new_base)
        };

        let new_supply = self
            .share_supply
            .checked_add(minted)
            .ok_or(AmmError::Overflow("share supply"))?;
        let new_balance = self
            .shares_of(caller)
            .checked_add(minted)
            .ok_or(AmmError::Overflow("share balance"))?;

        self.pull_paired(caller, pulled)?;

        self.base_reserve = new_base;
        self.share_supply = new_supply;
        // A zero-mint deposit must not seed a zero-share ledger entry.
        if !new_balance.is_zero() {
            self.share_balances.insert(caller, new_balance);
        }
        debug!(pool = %self.address, %caller, %pulled, base = %base_in, %minted, "liquidity added");
        Ok(minted)
    }

    fn remove_liquidity(&mut self, caller: Address, shares: Shares) -> Result<(Amount, Amount)> {
        if shares.is_zero() {
            return Ok((Amount::ZERO, Amount::ZERO));
        }
        if self.share_supply.is_zero() {
            return Err(AmmError::EmptyPool);
        }
        let balance = self.shares_of(caller);
        let remaining = balance
            .checked_sub(shares)
            .ok_or(AmmError::InsufficientShares)?;

        let base_out = shares
            .pro_rata(self.base_reserve, self.share_supply)
            .ok_or(AmmError::DivisionByZero)?;
        let paired_out = shares
            .pro_rata(self.paired_reserve(), self.share_supply)
            .ok_or(AmmError::DivisionByZero)?;

        // Payouts are pro-rata floors, so neither subtraction can fail
        // once the share balance check above has passed.
        let new_base = self
            .base_reserve
            .checked_sub(base_out)
            .ok_or(AmmError::Overflow("base reserve"))?;
        let new_supply = self
            .share_supply
            .checked_sub(shares)
            .ok_or(AmmError::Overflow("share supply"))?;

        self.pay_paired(caller, paired_out)?;

        self.base_reserve = new_base;
        self.share_supply = new_supply;
        if remaining.is_zero() {
            self.share_balances.remove(&caller);
        } else {
            self.share_balances.insert(caller, remaining);
        }
        debug!(pool = %self.address, %caller, %shares, %base_out, %paired_out, "liquidity removed");
        Ok((base_out, paired_out))
    }

    fn swap_base_for_paired(
        &mut self,
        caller: Address,
        base_in: Amount,
        min_paired: Amount,
    ) -> Result<Amount> {
        if base_in.is_zero() && min_paired.is_zero() {
            return Ok(Amount::ZERO);
        }
        let paired_out = self.quote_base_to_paired(base_in)?;
        if paired_out < min_paired {
            return Err(AmmError::SlippageExceeded(MSG_OUTPUT_TOTAL));
        }
        let new_base = self
            .base_reserve
            .checked_add(base_in)
            .ok_or(AmmError::Overflow("base reserve"))?;

        self.pay_paired(caller, paired_out)?;

        self.base_reserve = new_base;
        debug!(pool = %self.address, %caller, %base_in, %paired_out, "swap base for paired");
        Ok(paired_out)
    }

    fn swap_paired_for_base(
        &mut self,
        caller: Address,
        paired_in: Amount,
        min_base: Amount,
    ) -> Result<Amount> {
        if paired_in.is_zero() && min_base.is_zero() {
            return Ok(Amount::ZERO);
        }
        let base_out = self.quote_paired_to_base(paired_in)?;
        if base_out < min_base {
            return Err(AmmError::SlippageExceeded(MSG_OUTPUT_AMOUNT));
        }
        // The curve's output is strictly below the output reserve, so
        // this subtraction holds whenever the quote succeeded.
        let new_base = self
            .base_reserve
            .checked_sub(base_out)
            .ok_or(AmmError::Overflow("base reserve"))?;

        self.pull_paired(caller, paired_in)?;

        self.base_reserve = new_base;
        debug!(pool = %self.address, %caller, %paired_in, %base_out, "swap paired for base");
        Ok(base_out)
    }

    fn shares_of(&self, holder: Address) -> Shares {
        self.share_balances
            .get(&holder)
            .copied()
            .unwrap_or(Shares::ZERO)
    }
}

/// Shared, lockable reference to a [`Pool`].
///
/// Handles are cheap to clone and safe to hold across threads; every
/// method takes the pool's lock for the duration of the call. The
/// paired asset's identity is cached on the handle so routed swaps can
/// order their locks without touching either pool.
///
/// # Examples
///
/// ```
/// use basin_amm::asset::{share_asset, FungibleAsset, TokenLedger};
/// use basin_amm::domain::{Address, Amount};
/// use basin_amm::registry::Registry;
///
/// let trader = Address::from_bytes([7u8; 32]);
/// let token = TokenLedger::new(
///     Address::from_bytes([1u8; 32]),
///     "Token",
///     "TKN",
///     Amount::new(10_000),
///     trader,
/// )
/// .expect("valid asset");
/// let token = share_asset(token);
///
/// let mut registry = Registry::new();
/// let pool = registry.create_pool(token.clone()).expect("fresh asset");
///
/// token.lock().approve(trader, pool.address(), Amount::new(2_000));
/// let shares = pool
///     .add_liquidity(trader, Amount::new(2_000), Amount::new(1_000))
///     .expect("bootstrap deposit");
/// assert_eq!(shares.get(), 1_000);
/// assert_eq!(pool.reserve(), Amount::new(2_000));
/// ```
#[derive(Debug, Clone)]
pub struct PoolHandle {
    asset_id: Address,
    inner: Arc<Mutex<Pool>>,
}

impl PoolHandle {
    pub(crate) fn new(pool: Pool) -> Self {
        Self {
            asset_id: pool.asset_id,
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Identity of the paired asset this pool trades.
    #[must_use]
    pub fn asset_id(&self) -> Address {
        self.asset_id
    }

    /// The pool's own address, which holds the paired reserve and acts
    /// as the spender for allowance pulls.
    #[must_use]
    pub fn address(&self) -> Address {
        self.inner.lock().address()
    }

    /// Display name of the pool's share issue.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.lock().name.clone()
    }

    /// Ticker symbol of the pool's share issue.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.inner.lock().symbol.clone()
    }

    /// Live paired reserve, read from the asset's balance table.
    #[must_use]
    pub fn reserve(&self) -> Amount {
        self.inner.lock().paired_reserve()
    }

    /// Current base reserve.
    #[must_use]
    pub fn base_reserve(&self) -> Amount {
        self.inner.lock().base_reserve()
    }

    /// Total shares outstanding.
    #[must_use]
    pub fn share_supply(&self) -> Shares {
        self.inner.lock().share_supply
    }

    /// Shares held by `holder`. Unknown holders hold zero.
    #[must_use]
    pub fn shares_of(&self, holder: Address) -> Shares {
        self.inner.lock().shares_of(holder)
    }

    /// Prices a base-for-paired swap against current reserves without
    /// moving value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::EmptyPool`] if either reserve is zero.
    pub fn quote_base_to_paired(&self, base_in: Amount) -> Result<Amount> {
        self.inner.lock().quote_base_to_paired(base_in)
    }

    /// Prices a paired-for-base swap against current reserves without
    /// moving value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::EmptyPool`] if either reserve is zero.
    pub fn quote_paired_to_base(&self, paired_in: Amount) -> Result<Amount> {
        self.inner.lock().quote_paired_to_base(paired_in)
    }

    /// Deposits liquidity and mints shares to `caller`.
    ///
    /// On an empty pool the caller sets the initial price: exactly
    /// `paired_amount` is pulled, the base reserve becomes `base_in`,
    /// and one share is minted per base unit. On a funded pool the
    /// paired side is derived from `base_in` at the current reserve
    /// ratio and `paired_amount` acts as a cap on what may be pulled.
    ///
    /// The caller must have approved the pool's address for the paired
    /// side beforehand.
    ///
    /// # Errors
    ///
    /// * [`AmmError::PairedAmountExceeded`] if the ratio-derived paired
    ///   deposit exceeds `paired_amount`.
    /// * [`AmmError::TransferRejected`] if the allowance pull fails;
    ///   nothing is applied.
    pub fn add_liquidity(
        &self,
        caller: Address,
        paired_amount: Amount,
        base_in: Amount,
    ) -> Result<Shares> {
        self.inner.lock().add_liquidity(caller, paired_amount, base_in)
    }

    /// Burns `shares` and pays out both sides pro rata, rounding each
    /// payout down.
    ///
    /// Burning zero shares is a no-op returning zero payouts, even on
    /// an empty pool.
    ///
    /// # Errors
    ///
    /// * [`AmmError::EmptyPool`] if no shares are outstanding.
    /// * [`AmmError::InsufficientShares`] if `caller` holds fewer than
    ///   `shares`.
    pub fn remove_liquidity(&self, caller: Address, shares: Shares) -> Result<(Amount, Amount)> {
        self.inner.lock().remove_liquidity(caller, shares)
    }

    /// Sells `base_in` base units for the paired asset, paying the
    /// output to `caller`.
    ///
    /// A call with zero input and a zero minimum is a no-op returning
    /// zero, even on an empty pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SlippageExceeded`] if the output would fall
    /// below `min_paired`; no value moves.
    pub fn swap_base_for_paired(
        &self,
        caller: Address,
        base_in: Amount,
        min_paired: Amount,
    ) -> Result<Amount> {
        self.inner
            .lock()
            .swap_base_for_paired(caller, base_in, min_paired)
    }

    /// Sells `paired_in` paired units for the base asset. The input is
    /// pulled from `caller` via allowance.
    ///
    /// A call with zero input and a zero minimum is a no-op returning
    /// zero, even on an empty pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SlippageExceeded`] if the output would fall
    /// below `min_base`; no value moves.
    pub fn swap_paired_for_base(
        &self,
        caller: Address,
        paired_in: Amount,
        min_base: Amount,
    ) -> Result<Amount> {
        self.inner
            .lock()
            .swap_paired_for_base(caller, paired_in, min_base)
    }

    /// Sells `paired_in` of this pool's asset for the asset traded by
    /// another registered pool, routing through the base asset.
    ///
    /// See [`routing::swap_paired_to_paired`] for the full contract.
    ///
    /// # Errors
    ///
    /// * [`AmmError::SelfRouting`] if `target_asset` is this pool's own
    ///   asset.
    /// * [`AmmError::NoPoolForAsset`] if no pool trades `target_asset`.
    pub fn swap_paired_for_paired(
        &self,
        lookup: &dyn PoolLookup,
        caller: Address,
        paired_in: Amount,
        min_out: Amount,
        target_asset: Address,
    ) -> Result<Amount> {
        routing::swap_paired_to_paired(self, lookup, caller, paired_in, min_out, target_asset)
    }

    /// Prices a routed two-pool swap without moving value.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PoolHandle::swap_paired_for_paired`], minus
    /// the slippage and transfer failures.
    pub fn quote_paired_for_paired(
        &self,
        lookup: &dyn PoolLookup,
        paired_in: Amount,
        target_asset: Address,
    ) -> Result<Amount> {
        routing::quote_paired_to_paired(self, lookup, paired_in, target_asset)
    }

    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, Pool> {
        self.inner.lock()
    }
}
