//! Unified error types for the Basin AMM library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for
//! consumers.
//!
//! Two failure messages exist for the same logical slippage condition,
//! depending on swap direction: a base→paired swap reports
//! `"insufficient output total"` while a paired→base swap reports
//! `"insufficient output amount"`. Callers should match on the
//! [`AmmError::SlippageExceeded`] kind and treat the wording as a
//! presentation detail.

use thiserror::Error;

/// Slippage message for base→paired swaps (and the final leg of a routed
/// paired→paired swap).
pub(crate) const MSG_OUTPUT_TOTAL: &str = "insufficient output total";

/// Slippage message for paired→base swaps.
pub(crate) const MSG_OUTPUT_AMOUNT: &str = "insufficient output amount";

/// Unified error enum for all AMM operations.
///
/// Every failure is synchronous and recoverable: the caller may adjust
/// parameters and retry, re-reading current reserves first since prices
/// move with every successful swap. No operation retries internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// The reserved zero sentinel was used where a real asset identity
    /// is required.
    #[error("invalid token address")]
    InvalidAsset,

    /// A pool is already registered for this asset.
    #[error("exchange already exists")]
    PoolAlreadyExists,

    /// No pool is registered for the requested asset (routing lookup miss).
    #[error("no exchange registered for asset")]
    NoPoolForAsset,

    /// A routed swap named the source pool's own asset as its target.
    #[error("invalid exchange address")]
    SelfRouting,

    /// An underlying asset transfer failed (insufficient balance or
    /// allowance). The payload names the rejected precondition.
    #[error("transfer rejected: {0}")]
    TransferRejected(&'static str),

    /// The computed swap output fell below the caller's stated minimum.
    /// The payload carries the direction-specific wording.
    #[error("{0}")]
    SlippageExceeded(&'static str),

    /// The derived paired-asset requirement for a deposit exceeded the
    /// amount the caller offered.
    #[error("insufficient token amount")]
    PairedAmountExceeded,

    /// The caller tried to burn more shares than they hold.
    #[error("insufficient share balance")]
    InsufficientShares,

    /// A pricing or withdrawal operation was attempted on a pool with
    /// zero reserves.
    #[error("pool has no reserves")]
    EmptyPool,

    /// Arithmetic overflow or underflow. The payload names the failing
    /// computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in a reserve-scaled computation. Unreachable when
    /// pool invariants hold; kept as a guard instead of a panic path.
    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
