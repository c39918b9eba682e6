//! Pool ownership share units.

use core::fmt;

use super::Amount;

/// Units of proportional ownership of a pool's reserves.
///
/// This is distinct from [`Amount`] because shares measure a claim on
/// both reserves at once, not a quantity of any single asset. Shares are
/// minted atomically with deposits and burned atomically with
/// withdrawals; the outstanding supply equals the sum of all holder
/// balances at all times.
///
/// By convention the first deposit into an empty pool mints one share
/// per base-asset unit supplied, establishing the unit of account.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::Shares;
///
/// let a = Shares::new(1_000);
/// let b = Shares::new(2_000);
/// assert_eq!(a.checked_add(b), Some(Shares::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(self) -> u128 {
        self.0
    }

    /// Returns `true` if zero shares.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes this holding's pro-rata portion of `reserve` given the
    /// outstanding `supply`: `reserve × self / supply`, rounding down.
    ///
    /// Returns `None` if `supply` is zero or the result does not fit.
    #[must_use]
    pub fn pro_rata(self, reserve: Amount, supply: Self) -> Option<Amount> {
        reserve.mul_div_floor(Amount::new(self.0), Amount::new(supply.0))
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
