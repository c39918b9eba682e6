//! # Basin AMM
//!
//! Constant-product market maker engine: one pool per fungible asset,
//! each pairing that asset against a shared base asset, with routed
//! swaps between any two registered assets.
//!
//! Every pool prices trades on the invariant-product curve with a 1%
//! fee taken from the input side. Liquidity providers hold pool shares
//! that entitle them to a pro-rata slice of both reserves; the paired
//! reserve lives as a balance on the asset's own ledger and is read
//! live, so value donated to a pool folds into its pricing.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! basin-amm = "0.1"
//! ```
//!
//! ## Create a pool, provide liquidity, and swap
//!
//! ```rust
//! use basin_amm::prelude::*;
//!
//! // 1. A fungible asset, fully minted to its creator
//! let trader = Address::from_bytes([7u8; 32]);
//! let token = TokenLedger::new(
//!     Address::from_bytes([1u8; 32]),
//!     "Token",
//!     "TKN",
//!     Amount::new(10_000),
//!     trader,
//! )
//! .expect("valid asset");
//! let token = share_asset(token);
//!
//! // 2. Register a pool for it
//! let mut registry = Registry::new();
//! let pool = registry.create_pool(token.clone()).expect("fresh asset");
//!
//! // 3. Seed liquidity (the pool pulls the paired side via allowance)
//! token.lock().approve(trader, pool.address(), Amount::new(2_000));
//! let shares = pool
//!     .add_liquidity(trader, Amount::new(2_000), Amount::new(1_000))
//!     .expect("bootstrap deposit");
//! assert_eq!(shares.get(), 1_000);
//!
//! // 4. Sell base for the paired asset
//! let out = pool
//!     .swap_base_for_paired(trader, Amount::new(10), Amount::new(1))
//!     .expect("swap succeeded");
//! assert!(out.get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  uses Registry to create and resolve pools
//! └──────┬──────┘
//!        │ create_pool(asset) / get_pool(asset)
//!        ▼
//! ┌─────────────┐
//! │   Registry   │  one pool per asset, PoolLookup seam for routing
//! └──────┬──────┘
//!        │ PoolHandle (Arc<Mutex<Pool>>)
//!        ▼
//! ┌─────────────┐
//! │    Pools     │  reserves, share accounting, direct + routed swaps
//! └──────┬──────┘
//!        │ FungibleAsset trait
//!        ▼
//! ┌─────────────┐
//! │    Assets    │  TokenLedger balances and allowances
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares) |
//! | [`asset`] | [`FungibleAsset`](asset::FungibleAsset) seam and the [`TokenLedger`](asset::TokenLedger) implementation |
//! | [`curve`] | The fee-inclusive invariant-product pricing function |
//! | [`pool`] | [`Pool`](pool::Pool) state and the shared [`PoolHandle`](pool::PoolHandle) |
//! | [`registry`] | [`Registry`](registry::Registry) directory and the [`PoolLookup`](registry::PoolLookup) seam |
//! | [`routing`] | Atomic two-pool swaps through the base asset |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod asset;
pub mod curve;
pub mod domain;
pub mod error;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod routing;

#[cfg(test)]
mod proptest_properties;
