//! # Modular Arithmetic
//!
//! Integer helpers behind the asymmetric scheme.
//!
//! Moduli are products of two primes below 2^63, so they need up to 126
//! bits. Products of two residues would overflow `u128`, so
//! multiplication falls back to double-and-add once the modulus no longer
//! fits in 64 bits.

use crate::error::{Error, Result};

/// `(a + b) mod m` for `a, b < m`, without overflowing
fn add_mod(a: u128, b: u128, modulus: u128) -> u128 {
    let (sum, overflowed) = a.overflowing_add(b);
    if overflowed || sum >= modulus {
        sum.wrapping_sub(modulus)
    } else {
        sum
    }
}

/// `(a · b) mod m` for any `m > 0`
pub fn mul_mod(a: u128, b: u128, modulus: u128) -> u128 {
    debug_assert!(modulus > 0, "modulus must be positive");

    let mut a = a % modulus;
    let mut b = b % modulus;

    if modulus <= u64::MAX as u128 {
        return a * b % modulus;
    }

    let mut result = 0;
    while b > 0 {
        if b & 1 == 1 {
            result = add_mod(result, a, modulus);
        }
        a = add_mod(a, a, modulus);
        b >>= 1;
    }
    result
}

/// `base^exponent mod modulus` by square-and-multiply
///
/// ```text
/// result = 1
/// base   = base mod m
/// while exponent > 0:
///     if exponent is odd: result = result · base mod m
///     exponent = exponent >> 1
///     base     = base · base mod m
/// ```
pub fn mod_exp(base: u128, exponent: u128, modulus: u128) -> u128 {
    debug_assert!(modulus > 0, "modulus must be positive");

    let mut result = 1 % modulus;
    let mut base = base % modulus;
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        exponent >>= 1;
        base = mul_mod(base, base, modulus);
    }
    result
}

/// Greatest common divisor
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Inverse of `value` modulo `modulus` via the extended Euclidean algorithm
///
/// The result lies in `[0, modulus)`. A modulus of 1 yields 0. Fails with
/// `NoModularInverse` when `value` and `modulus` share a factor.
pub fn mod_inverse(value: u128, modulus: u128) -> Result<u128> {
    if modulus == 0 {
        return Err(Error::InvalidKey("modulus must be positive".into()));
    }
    if modulus == 1 {
        return Ok(0);
    }

    let m = i128::try_from(modulus)
        .map_err(|_| Error::InvalidKey(format!("modulus {} is too large", modulus)))?;
    let a = i128::try_from(value % modulus)
        .map_err(|_| Error::InvalidKey(format!("value {} is too large", value)))?;

    // Invariant: old_s · a ≡ old_r (mod m)
    let (mut old_r, mut r) = (a, m);
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    if old_r != 1 {
        return Err(Error::NoModularInverse { value, modulus });
    }

    // rem_euclid keeps the result non-negative and below m
    Ok(old_s.rem_euclid(m) as u128)
}

// ============================================================================
// TESTS
// ============================================================================
