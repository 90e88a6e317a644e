//! Basis-point arithmetic for stake shares and quorum checks.
//!
//! All ratios are integer basis points (10_000 = 100%). Intermediate products
//! are computed in u128 without overflow for any u128 numerator below
//! `u128::MAX / 10_000`; larger values fall back to dividing first.

/// 100% in basis points.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// `part / whole` in basis points, rounded down. `whole == 0` yields 0.
pub fn share_bps(part: u128, whole: u128) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = match part.checked_mul(u128::from(BPS_DENOMINATOR)) {
        Some(p) => p / whole,
        None => part / (whole / u128::from(BPS_DENOMINATOR)).max(1),
    };
    scaled.min(u128::from(BPS_DENOMINATOR)) as u32
}

/// Whether `part / whole >= threshold_bps`, evaluated without rounding.
///
/// `whole == 0` never meets a non-zero threshold.
pub fn meets_bps(part: u128, whole: u128, threshold_bps: u32) -> bool {
    if threshold_bps == 0 {
        return true;
    }
    if whole == 0 {
        return false;
    }
    // part * 10_000 >= whole * threshold, widened by splitting on overflow.
    match (
        part.checked_mul(u128::from(BPS_DENOMINATOR)),
        whole.checked_mul(u128::from(threshold_bps)),
    ) {
        (Some(lhs), Some(rhs)) => lhs >= rhs,
        _ => share_bps(part, whole) >= threshold_bps,
    }
}
