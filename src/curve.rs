//! The fee-adjusted constant-product pricing curve.
//!
//! One function, [`quote`], underlies every price preview and swap
//! execution in the crate:
//!
//! ```text
//! effective_input = input × 99                  // 1% fee retained in reserves
//! output          = effective_input × output_reserve
//!                   ─────────────────────────────────
//!                   input_reserve × 100 + effective_input
//! ```
//!
//! All arithmetic is exact unsigned integer math — no floating point
//! anywhere in the pricing path — widened through 256 bits so that
//! wei-scale (18-decimal) reserves never overflow an intermediate.
//! Division rounds toward zero.
//!
//! The fee is never withdrawn separately: it stays inside the reserves
//! and accrues to liquidity providers by inflating the redemption value
//! of their shares over time. Consequently the product of the two
//! reserves never decreases across a swap, and strictly increases for
//! any nonzero trade.

use primitive_types::U256;

use crate::domain::Amount;
use crate::error::{AmmError, Result};

/// Fee-retaining input multiplier: `100 − fee%`.
const FEE_NUMERATOR: u64 = 99;

/// Fee scale denominator.
const FEE_DENOMINATOR: u64 = 100;

/// Quotes the output amount for selling `input` against a pool holding
/// `input_reserve` of the sold asset and `output_reserve` of the bought
/// asset.
///
/// A zero `input` quotes a zero output. The output is always strictly
/// less than `output_reserve`, so a swap can never drain a reserve
/// completely.
///
/// # Errors
///
/// Returns [`AmmError::EmptyPool`] if either reserve is zero. Pool
/// invariants make this unreachable through the public swap surface
/// (reserves are only ever zero together, and an empty pool has no swap
/// path), but the guard stands in for a division by zero.
pub fn quote(input: Amount, input_reserve: Amount, output_reserve: Amount) -> Result<Amount> {
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(AmmError::EmptyPool);
    }

    let effective_input = U256::from(input.get()) * U256::from(FEE_NUMERATOR);
    let numerator = effective_input * U256::from(output_reserve.get());
    let denominator =
        U256::from(input_reserve.get()) * U256::from(FEE_DENOMINATOR) + effective_input;

    // denominator > 0 because input_reserve > 0.
    let output = numerator / denominator;
    u128::try_from(output)
        .map(Amount::new)
        .map_err(|_| AmmError::Overflow("curve output exceeds u128"))
}
