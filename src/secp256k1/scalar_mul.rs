//! Scalar Multiplication
//!
//! Iterative double-and-add: O(log k) group operations, constant stack depth.

use std::ops::Mul;

use num_bigint::BigUint;

use super::params::DomainParameters;
use super::point::Point;
use crate::error::Result;

/// Scalar multiplication: k · P
///
/// Scans k from the least significant bit, adding the running double of P
/// into an accumulator that starts at infinity. `0 · P = O`.
pub fn scalar_mul(point: &Point, k: &BigUint) -> Result<Point> {
    let mut result = Point::infinity(point.domain());
    let mut base = point.clone();
    let bits = k.bits();

    for i in 0..bits {
        if k.bit(i) {
            result = result.add(&base)?;
        }
        if i + 1 < bits {
            base = base.double()?;
        }
    }

    Ok(result)
}

/// Fixed-base scalar multiplication: k · G
pub fn mul_generator(domain: &'static DomainParameters, k: &BigUint) -> Result<Point> {
    scalar_mul(&Point::generator(domain), k)
}

/// Double scalar multiplication: a·G + b·Q
///
/// Used in ECDSA verification: u1·G + u2·Q. One MSB-first pass over both
/// scalars with G, Q and G+Q as the addends (Shamir's trick).
pub fn double_scalar_mul(a: &BigUint, b: &BigUint, q: &Point) -> Result<Point> {
    let g = Point::generator(q.domain());
    let gq = g.add(q)?;

    let mut result = Point::infinity(q.domain());
    let bits = a.bits().max(b.bits());

    for i in (0..bits).rev() {
        result = result.double()?;

        match (a.bit(i), b.bit(i)) {
            (true, true) => result = result.add(&gq)?,
            (true, false) => result = result.add(&g)?,
            (false, true) => result = result.add(q)?,
            (false, false) => {}
        }
    }

    Ok(result)
}

impl Mul<&BigUint> for &Point {
    type Output = Result<Point>;

    fn mul(self, k: &BigUint) -> Result<Point> {
        scalar_mul(self, k)
    }
}

impl Mul<&Point> for &BigUint {
    type Output = Result<Point>;

    fn mul(self, point: &Point) -> Result<Point> {
        scalar_mul(point, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::params::secp256k1;
    use crate::secp256k1::point::tests::TOY;
    use num_traits::{One, Zero};

    fn k(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_scalar_mul_zero() {
        let g = Point::generator(secp256k1());
        assert!(scalar_mul(&g, &BigUint::zero()).unwrap().is_infinity());
        let inf = Point::infinity(secp256k1());
        assert!(scalar_mul(&inf, &k(12345)).unwrap().is_infinity());
    }

    #[test]
    fn test_scalar_mul_one() {
        let g = Point::generator(secp256k1());
        assert_eq!(scalar_mul(&g, &BigUint::one()).unwrap(), g);
    }

    #[test]
    fn test_add_matches_mul() {
        let g = Point::generator(secp256k1());
        let g2 = g.add(&g).unwrap();
        let g3 = g2.add(&g).unwrap();

        assert_eq!(scalar_mul(&g, &k(2)).unwrap(), g2);
        assert_eq!(scalar_mul(&g, &k(3)).unwrap(), g3);
        assert_eq!(
            g3.x_hex().unwrap(),
            "f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"
        );
    }

    #[test]
    fn test_commutes_with_scalar_placement() {
        let g = Point::generator(secp256k1());
        let scalar = k(0xdead_beef);
        assert_eq!((&g * &scalar).unwrap(), (&scalar * &g).unwrap());
    }

    #[test]
    fn test_order_annihilates() {
        let domain = secp256k1();
        let g = Point::generator(domain);
        assert!(scalar_mul(&g, domain.n()).unwrap().is_infinity());

        let n_minus_1 = domain.n() - 1u32;
        assert_eq!(scalar_mul(&g, &n_minus_1).unwrap(), g.negate());
    }

    #[test]
    fn test_toy_scalar_mul() {
        let g = Point::generator(&TOY);
        let mut acc = Point::infinity(&TOY);
        for i in 0..40u64 {
            assert_eq!(scalar_mul(&g, &k(i)).unwrap(), acc);
            acc = acc.add(&g).unwrap();
        }
    }

    #[test]
    fn test_distributes() {
        let g = Point::generator(secp256k1());
        let a = k(5);
        let b = k(7);
        let lhs = scalar_mul(&g, &(&a + &b)).unwrap();
        let rhs = scalar_mul(&g, &a).unwrap().add(&scalar_mul(&g, &b).unwrap()).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_double_scalar_mul() {
        let domain = secp256k1();
        let g = Point::generator(domain);
        let q = mul_generator(domain, &k(42)).unwrap();
        let a = k(5);
        let b = k(7);

        // 5·G + 7·(42·G) = 299·G
        let result = double_scalar_mul(&a, &b, &q).unwrap();
        let expected = scalar_mul(&g, &a).unwrap().add(&scalar_mul(&q, &b).unwrap()).unwrap();
        assert_eq!(result, expected);
        assert_eq!(result, mul_generator(domain, &k(299)).unwrap());
    }

    #[test]
    fn test_double_scalar_mul_cancels() {
        // Q = -G makes G + Q the identity; a·G + a·Q = O
        let domain = secp256k1();
        let q = Point::generator(domain).negate();
        let a = k(9);
        assert!(double_scalar_mul(&a, &a, &q).unwrap().is_infinity());
    }

    #[test]
    fn test_large_scalar_terminates() {
        // A 512-bit scalar: iteration count follows the bit length
        let domain = secp256k1();
        let big = (BigUint::one() << 511u32) + 3u32;
        let reduced = &big % domain.n();
        assert_eq!(
            mul_generator(domain, &big).unwrap(),
            mul_generator(domain, &reduced).unwrap()
        );
    }
}
