//! In-memory fungible asset ledger.

use std::collections::BTreeMap;

use tracing::trace;

use super::FungibleAsset;
use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result};

/// An in-memory balance and allowance book for one fungible asset.
///
/// The full initial supply is minted to the creator on construction;
/// there is no further issuance. Transfers are all-or-nothing: a
/// rejected movement leaves both balance tables untouched.
///
/// # Examples
///
/// ```
/// use basin_amm::asset::{FungibleAsset, TokenLedger};
/// use basin_amm::domain::{Address, Amount};
///
/// let asset = Address::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([10u8; 32]);
/// let bob = Address::from_bytes([11u8; 32]);
///
/// let mut token = TokenLedger::new(asset, "My Test Token", "TSTTKN", Amount::new(31_337), alice)
///     .expect("valid asset address");
/// assert_eq!(token.balance_of(alice), Amount::new(31_337));
///
/// token.transfer(alice, bob, Amount::new(7)).expect("funded");
/// assert_eq!(token.balance_of(bob), Amount::new(7));
/// ```
#[derive(Debug, Clone)]
pub struct TokenLedger {
    address: Address,
    name: String,
    symbol: String,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl TokenLedger {
    /// Creates a ledger and mints `initial_supply` to `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `address` is the zero
    /// sentinel.
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: Amount,
        owner: Address,
    ) -> Result<Self> {
        if address.is_zero() {
            return Err(AmmError::InvalidAsset);
        }
        let mut balances = BTreeMap::new();
        if !initial_supply.is_zero() {
            balances.insert(owner, initial_supply);
        }
        Ok(Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            total_supply: initial_supply,
            balances,
            allowances: BTreeMap::new(),
        })
    }

    fn debit(&mut self, from: Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(AmmError::TransferRejected("insufficient balance"))?;
        if remaining.is_zero() {
            self.balances.remove(&from);
        } else {
            self.balances.insert(from, remaining);
        }
        Ok(())
    }

    fn credit(&mut self, to: Address, amount: Amount) -> Result<()> {
        let updated = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(AmmError::Overflow("balance credit"))?;
        if !updated.is_zero() {
            self.balances.insert(to, updated);
        }
        Ok(())
    }
}

impl FungibleAsset for TokenLedger {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balance_of(&self, owner: Address) -> Amount {
        self.balances.get(&owner).copied().unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        self.debit(from, amount)?;
        self.credit(to, amount)?;
        trace!(asset = %self.address, %from, %to, %amount, "transfer");
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let approved = self.allowance(owner, spender);
        let remaining = approved
            .checked_sub(amount)
            .ok_or(AmmError::TransferRejected("insufficient allowance"))?;

        self.debit(owner, amount)?;
        self.credit(to, amount)?;
        self.approve(owner, spender, remaining);
        trace!(asset = %self.address, %owner, %spender, %to, %amount, "transfer_from");
        Ok(())
    }
}
