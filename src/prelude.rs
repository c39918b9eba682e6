//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use basin_amm::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{Address, Amount, Shares};

// Re-export the asset seam
pub use crate::asset::{share_asset, FungibleAsset, SharedAsset, TokenLedger};

// Re-export pool and registry surfaces
pub use crate::pool::PoolHandle;
pub use crate::registry::{PoolLookup, Registry};

// Re-export routed swaps
pub use crate::routing::{quote_paired_to_paired, swap_paired_to_paired};

// Re-export error types
pub use crate::error::{AmmError, Result};
