use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Stats are kept in fixed-point so that two builds of the same spec
/// produce bit-identical tags on every platform.
pub type Fixed64 = I32F32;

/// Convert an f64 to Fixed64. Use only when reading data files.
///
/// Out-of-range values saturate; NaN becomes zero.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    if v.is_nan() {
        return Fixed64::ZERO;
    }
    Fixed64::saturating_from_num(v)
}

/// Convert Fixed64 to f64. Use only for display.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Multiply two stats, saturating instead of wrapping on overflow.
#[inline]
pub fn saturating_mul_64(a: Fixed64, b: Fixed64) -> Fixed64 {
    a.saturating_mul(b)
}
