//! Raw asset amount with checked, floor-rounded arithmetic.

use core::fmt;

use primitive_types::U256;

/// A raw asset quantity in the smallest unit (wei-scale fixed point).
///
/// `Amount` never interprets decimals; all `u128` values are valid.
/// Arithmetic is checked — methods return `None` on overflow, underflow,
/// or division by zero instead of panicking — and every division rounds
/// toward zero, matching the pricing-curve semantics of the whole crate.
///
/// [`Amount::mul_div_floor`] widens through 256 bits internally so that
/// reserve-scaled products of 18-decimal quantities never overflow.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(b), Some(Amount::new(300)));
/// assert_eq!(b.mul_div_floor(a, Amount::new(3)), Some(Amount::new(6_666)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Computes `self × mul / div` with a 256-bit intermediate product,
    /// rounding toward zero.
    ///
    /// Returns `None` if `div` is zero or the quotient does not fit in
    /// `u128`. The intermediate product itself cannot overflow.
    #[must_use]
    pub fn mul_div_floor(self, mul: Self, div: Self) -> Option<Self> {
        if div.0 == 0 {
            return None;
        }
        let wide = U256::from(self.0) * U256::from(mul.0) / U256::from(div.0);
        u128::try_from(wide).ok().map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
