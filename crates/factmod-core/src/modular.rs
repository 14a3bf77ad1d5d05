//! Overflow-free modular multiplication.
//!
//! `mul_mod` multiplies by repeated doubling ("Russian peasant"
//! multiplication) entirely in modular space. Every intermediate value stays
//! below `m`, and additions go through [`add_mod`], so no step can exceed
//! `u64::MAX` for any modulus `m >= 1`.

/// Compute `(a + b) mod m` for `a, b < m` without overflow.
#[inline]
#[must_use]
pub fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    debug_assert!(a < m && b < m);
    // a + b >= m  <=>  a >= m - b
    if a >= m - b {
        a - (m - b)
    } else {
        a + b
    }
}

/// Compute `(a * b) mod m` without 64-bit overflow.
///
/// # Panics
///
/// Panics if `m == 0`.
///
/// # Example
/// ```
/// use factmod_core::modular::mul_mod;
///
/// assert_eq!(mul_mod(7, 8, 5), 1);
/// assert_eq!(mul_mod(u64::MAX, u64::MAX, u64::MAX - 1), 1);
/// ```
#[must_use]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    assert!(m > 0, "modulus must be greater than zero");
    let mut result = 0;
    let mut a = a % m;
    let mut b = b;

    while b > 0 {
        if b & 1 == 1 {
            result = add_mod(result, a, m);
        }
        a = add_mod(a, a, m);
        b >>= 1;
    }

    result
}
