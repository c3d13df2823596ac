//! Modular Arithmetic
//!
//! Congruence, the extended Euclidean algorithm and modular inverses over
//! arbitrary-precision integers. Everything the curve layer divides by goes
//! through [`mod_inverse`].
//!
//! ## Extended Euclid
//!
//! Keeps the invariants
//! ```text
//! old_r = a·old_s + b·old_t
//!     r = a·s     + b·t
//! ```
//! while `(old_r, r)` walks the remainder sequence of `(a, b)`. The loop runs
//! O(log min(a, b)) times and never recurses.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Bézout decomposition `a·x + b·y = gcd`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedGcd {
    /// gcd(a, b)
    pub gcd: BigUint,
    /// Coefficient of a
    pub x: BigInt,
    /// Coefficient of b
    pub y: BigInt,
}

/// True iff `(a - b) mod m == 0`
pub fn congruent(a: &BigInt, b: &BigInt, m: &BigUint) -> bool {
    if m.is_zero() {
        return a == b;
    }
    let m = BigInt::from(m.clone());
    (a - b).mod_floor(&m).is_zero()
}

/// Extended Euclidean algorithm.
///
/// `extended_gcd(a, 0) = (a, 1, 0)`.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> ExtendedGcd {
    let mut old_r = BigInt::from(a.clone());
    let mut r = BigInt::from(b.clone());
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();
    let mut old_t = BigInt::zero();
    let mut t = BigInt::one();

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        old_r = std::mem::replace(&mut r, rem);

        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    ExtendedGcd {
        // Remainders of non-negative inputs stay non-negative
        gcd: old_r.to_biguint().unwrap_or_default(),
        x: old_s,
        y: old_t,
    }
}

/// Reduce a signed integer into `[0, m)`
pub fn reduce(value: &BigInt, m: &BigUint) -> BigUint {
    let m = BigInt::from(m.clone());
    let (_, magnitude) = value.mod_floor(&m).into_parts();
    magnitude
}

/// Modular inverse: `x` in `[0, m)` with `a·x ≡ 1 (mod m)`.
///
/// `a` may be negative; it is reduced into `[0, m)` first.
pub fn mod_inverse(a: &BigInt, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::NoInverse {
            value: a.clone(),
            modulus: m.clone(),
        });
    }

    let reduced = reduce(a, m);
    let egcd = extended_gcd(&reduced, m);
    if !egcd.gcd.is_one() {
        return Err(Error::NoInverse {
            value: a.clone(),
            modulus: m.clone(),
        });
    }

    Ok(reduce(&egcd.x, m))
}

/// Inverse of an unsigned value
pub fn mod_inverse_unsigned(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    mod_inverse(&BigInt::from_biguint(Sign::Plus, a.clone()), m)
}

/// `(a · b) mod m`
pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `(a + b) mod m`
pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`, for `a, b < m`
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}
