//! Routed swaps between two paired assets, crossing through the base
//! asset.
//!
//! A routed swap is one atomic trade over two pools: the source pool
//! buys base with the caller's paired input, and the target pool spends
//! that base on its own paired asset. Both pool locks are held for the
//! whole trade, acquired in ascending asset-identity order so that two
//! concurrent routes over the same pair can never deadlock.

use tracing::{debug, error};

use crate::curve;
use crate::domain::{Address, Amount};
use crate::error::{AmmError, Result, MSG_OUTPUT_TOTAL};
use crate::pool::PoolHandle;
use crate::registry::PoolLookup;

fn resolve_target(
    source: &PoolHandle,
    lookup: &dyn PoolLookup,
    target_asset: Address,
) -> Result<PoolHandle> {
    if target_asset == source.asset_id() {
        return Err(AmmError::SelfRouting);
    }
    lookup
        .pool_for(target_asset)
        .ok_or(AmmError::NoPoolForAsset)
}

/// Sells `paired_in` of the source pool's asset for the target pool's
/// asset, paying the output to `caller`.
///
/// The input is pulled from `caller` via the source pool's allowance.
/// `min_out` bounds the target-asset output; the intermediate base leg
/// is not separately bounded. A call with zero input and a zero minimum
/// moves nothing and returns zero.
///
/// # Errors
///
/// * [`AmmError::SelfRouting`] if `target_asset` is the source pool's
///   own asset.
/// * [`AmmError::NoPoolForAsset`] if `lookup` knows no pool trading
///   `target_asset`.
/// * [`AmmError::EmptyPool`] if either pool has a zero reserve.
/// * [`AmmError::SlippageExceeded`] if the output would fall below
///   `min_out`; no value moves.
pub fn swap_paired_to_paired(
    source: &PoolHandle,
    lookup: &dyn PoolLookup,
    caller: Address,
    paired_in: Amount,
    min_out: Amount,
    target_asset: Address,
) -> Result<Amount> {
    let target = resolve_target(source, lookup, target_asset)?;
    if paired_in.is_zero() && min_out.is_zero() {
        return Ok(Amount::ZERO);
    }

    // Asset identities are distinct past the self-routing check, so
    // the ascending order is strict and globally consistent.
    let (mut src, mut dst);
    if source.asset_id() < target.asset_id() {
        src = source.lock();
        dst = target.lock();
    } else {
        dst = target.lock();
        src = source.lock();
    }

    let base_mid = curve::quote(paired_in, src.paired_reserve(), src.base_reserve())?;
    let paired_out = curve::quote(base_mid, dst.base_reserve(), dst.paired_reserve())?;
    if paired_out < min_out {
        return Err(AmmError::SlippageExceeded(MSG_OUTPUT_TOTAL));
    }

    let new_src_base = src
        .base_reserve()
        .checked_sub(base_mid)
        .ok_or(AmmError::Overflow("source base reserve"))?;
    let new_dst_base = dst
        .base_reserve()
        .checked_add(base_mid)
        .ok_or(AmmError::Overflow("target base reserve"))?;

    src.pull_paired(caller, paired_in)?;
    if let Err(err) = dst.pay_paired(caller, paired_out) {
        // Unwind the first leg so the caller keeps their input.
        if let Err(refund_err) = src.pay_paired(caller, paired_in) {
            error!(
                source = %src.address(),
                %caller,
                ?refund_err,
                "routed swap unwind failed; paired input stranded in source pool"
            );
        }
        return Err(err);
    }

    src.set_base_reserve(new_src_base);
    dst.set_base_reserve(new_dst_base);
    debug!(
        source = %src.address(),
        target = %dst.address(),
        %caller,
        %paired_in,
        %base_mid,
        %paired_out,
        "routed swap"
    );
    Ok(paired_out)
}

/// Prices a routed swap against both pools' current reserves without
/// moving value.
///
/// # Errors
///
/// Same resolution and reserve conditions as
/// [`swap_paired_to_paired`].
pub fn quote_paired_to_paired(
    source: &PoolHandle,
    lookup: &dyn PoolLookup,
    paired_in: Amount,
    target_asset: Address,
) -> Result<Amount> {
    let target = resolve_target(source, lookup, target_asset)?;

    let (src, dst);
    if source.asset_id() < target.asset_id() {
        src = source.lock();
        dst = target.lock();
    } else {
        dst = target.lock();
        src = source.lock();
    }

    let base_mid = curve::quote(paired_in, src.paired_reserve(), src.base_reserve())?;
    curve::quote(base_mid, dst.base_reserve(), dst.paired_reserve())
}
