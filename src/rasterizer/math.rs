//! Fixed-point grid math
//! Integer helpers shared by the bounding box, culling and sample tests

/// Smaller of two fixed-point values
#[inline]
pub fn min(a: i32, b: i32) -> i32 {
    if a < b { a } else { b }
}

/// Larger of two fixed-point values
#[inline]
pub fn max(a: i32, b: i32) -> i32 {
    if a > b { a } else { b }
}

/// Round a fixed-point value down to the subsample grid.
///
/// Clears the lowest `r_shift - ss_w_lg2` bits. The mask is built from an
/// unsigned all-ones word, so negative values round toward negative infinity
/// the same way two's-complement masking does.
///
/// Panics if `r_shift <= ss_w_lg2`: that configuration has no subsample grid.
#[inline]
pub fn floor_ss(value: i32, r_shift: u32, ss_w_lg2: u32) -> i32 {
    assert!(
        r_shift > ss_w_lg2,
        "floor_ss: r_shift ({}) must be greater than ss_w_lg2 ({})",
        r_shift,
        ss_w_lg2
    );

    let mask = u32::MAX.checked_shl(r_shift - ss_w_lg2).unwrap_or(0);
    value & mask as i32
}

/// `a - b` taken in 64 bits, so any two `i32` coordinates have an exact difference
#[inline]
pub fn delta(a: i32, b: i32) -> i64 {
    i64::from(a) - i64::from(b)
}

/// 2D cross product `a.x * b.y - b.x * a.y` of two [`delta`]s.
///
/// Deltas span up to 33 bits, so the products are taken in 128 bits.
#[inline]
pub fn cross(ax: i64, ay: i64, bx: i64, by: i64) -> i128 {
    i128::from(ax) * i128::from(by) - i128::from(bx) * i128::from(ay)
}
