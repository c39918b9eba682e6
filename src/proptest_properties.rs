//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers the load-bearing properties of the engine:
//!
//! 1. **Invariant preservation** — the reserve product never decreases
//!    across a priced swap.
//! 2. **Output bound** — a quote never reaches the output reserve.
//! 3. **Input monotonicity** — a larger input never buys less.
//! 4. **Round-trip value loss** — swapping out and back returns at most
//!    the original amount.
//! 5. **Liquidity conservation** — deposit then full withdrawal returns
//!    at most the deposited amounts, and ratios survive a second
//!    deposit.

use primitive_types::U256;
use proptest::prelude::*;

use crate::asset::{share_asset, FungibleAsset, SharedAsset, TokenLedger};
use crate::curve;
use crate::domain::{Address, Amount, Shares};
use crate::pool::PoolHandle;
use crate::registry::Registry;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(tag: u8) -> Address {
    Address::from_bytes([tag; 32])
}

fn seeded_pool(paired: u128, base: u128) -> (SharedAsset, PoolHandle, Address) {
    let owner = addr(10);
    let Ok(ledger) = TokenLedger::new(addr(1), "Token", "TKN", Amount::MAX, owner) else {
        panic!("valid ledger");
    };
    let token = share_asset(ledger);
    let mut registry = Registry::new();
    let Ok(pool) = registry.create_pool(token.clone()) else {
        panic!("fresh asset");
    };
    token.lock().approve(owner, pool.address(), Amount::new(paired));
    let Ok(_) = pool.add_liquidity(owner, Amount::new(paired), Amount::new(base)) else {
        panic!("seed deposit");
    };
    (token, pool, owner)
}

fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves from dust up to token-scale (1e24) magnitudes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// Swap inputs small enough to leave room for the matching reserve.
fn input_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000_000_000_000u128
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_preservation(
        input_reserve in reserve_strategy(),
        output_reserve in reserve_strategy(),
        input in input_strategy(),
    ) {
        let Ok(out) = curve::quote(
            Amount::new(input),
            Amount::new(input_reserve),
            Amount::new(output_reserve),
        ) else {
            return Ok(());
        };

        let before = product(input_reserve, output_reserve);
        let after = product(input_reserve + input, output_reserve - out.get());
        prop_assert!(
            after >= before,
            "reserve product shrank: {} -> {}",
            before, after
        );
    }

    #[test]
    fn prop_output_below_reserve(
        input_reserve in reserve_strategy(),
        output_reserve in reserve_strategy(),
        input in input_strategy(),
    ) {
        let Ok(out) = curve::quote(
            Amount::new(input),
            Amount::new(input_reserve),
            Amount::new(output_reserve),
        ) else {
            return Ok(());
        };
        prop_assert!(
            out.get() < output_reserve,
            "output {} reached reserve {}",
            out.get(), output_reserve
        );
    }

    #[test]
    fn prop_input_monotonicity(
        input_reserve in reserve_strategy(),
        output_reserve in reserve_strategy(),
        input in input_strategy(),
        extra in 1u128..=1_000_000_000u128,
    ) {
        let Ok(small) = curve::quote(
            Amount::new(input),
            Amount::new(input_reserve),
            Amount::new(output_reserve),
        ) else {
            return Ok(());
        };
        let Ok(large) = curve::quote(
            Amount::new(input + extra),
            Amount::new(input_reserve),
            Amount::new(output_reserve),
        ) else {
            return Ok(());
        };
        prop_assert!(
            large >= small,
            "larger input bought less: {} < {}",
            large.get(), small.get()
        );
    }

    #[test]
    fn prop_round_trip_loses_value(
        paired in reserve_strategy(),
        base in reserve_strategy(),
        base_in in input_strategy(),
    ) {
        let (token, pool, _owner) = seeded_pool(paired, base);
        let trader = addr(20);

        // base -> paired
        let Ok(got_paired) = pool.swap_base_for_paired(trader, Amount::new(base_in), Amount::ZERO)
        else {
            return Ok(());
        };
        if got_paired.is_zero() {
            return Ok(());
        }

        // paired -> base
        token.lock().approve(trader, pool.address(), got_paired);
        let Ok(got_base) = pool.swap_paired_for_base(trader, got_paired, Amount::ZERO) else {
            return Ok(());
        };

        prop_assert!(
            got_base.get() <= base_in,
            "round-trip gained value: {} > {}",
            got_base.get(), base_in
        );
    }

    #[test]
    fn prop_liquidity_conservation(
        paired in reserve_strategy(),
        base in reserve_strategy(),
    ) {
        let (token, pool, owner) = seeded_pool(paired, base);
        let depositor = addr(20);

        // Fund a second depositor and let them mirror the pool ratio.
        let deposit_base = (base / 10).max(1);
        let Some(deposit_paired) = Amount::new(paired)
            .mul_div_floor(Amount::new(deposit_base), Amount::new(base))
            .map(|a| a.get().saturating_add(1))
        else {
            return Ok(());
        };
        let Ok(()) = token
            .lock()
            .transfer(owner, depositor, Amount::new(deposit_paired))
        else {
            return Ok(());
        };
        token
            .lock()
            .approve(depositor, pool.address(), Amount::new(deposit_paired));

        let Ok(minted) = pool.add_liquidity(
            depositor,
            Amount::new(deposit_paired),
            Amount::new(deposit_base),
        ) else {
            return Ok(());
        };
        prop_assert_eq!(pool.shares_of(depositor), minted);

        let Ok((base_out, paired_out)) = pool.remove_liquidity(depositor, minted) else {
            return Ok(());
        };

        prop_assert!(
            base_out.get() <= deposit_base,
            "withdrew more base than deposited: {} > {}",
            base_out.get(), deposit_base
        );
        prop_assert!(
            paired_out.get() <= deposit_paired,
            "withdrew more paired than deposited: {} > {}",
            paired_out.get(), deposit_paired
        );
        prop_assert_eq!(pool.shares_of(depositor), Shares::ZERO);
    }
}
