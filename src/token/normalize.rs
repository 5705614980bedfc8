use alloy::primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, ToPrimitive};

/// Convert a raw balance (smallest token unit) to a human-readable amount.
///
/// The scaling is exact; only the final conversion to `f64` rounds, so the
/// integer part survives for any realistic supply and low-order fractional
/// digits may be lost. `None` when the amount has no `f64` representation.
pub fn normalize(raw: U256, decimals: u8) -> Option<f64> {
    let int_val = BigInt::from_bytes_be(Sign::Plus, &raw.to_be_bytes::<32>());
    let scaled = BigDecimal::new(int_val, decimals as i64).normalized();
    scaled.to_f64().filter(|v| v.is_finite())
}
