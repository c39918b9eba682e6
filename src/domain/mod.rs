//! Fundamental domain value types used throughout the AMM library.
//!
//! This module contains the core value types that model the exchange
//! domain: identities, asset amounts, and pool ownership shares. All
//! types are newtypes with checked arithmetic; no operation panics on
//! out-of-range input.

mod address;
mod amount;
mod shares;

pub use address::Address;
pub use amount::Amount;
pub use shares::Shares;
