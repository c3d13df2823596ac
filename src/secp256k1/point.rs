//! Point Group
//!
//! Affine points (x, y) plus the point at infinity, each tagged with the
//! domain it belongs to.
//!
//! ## Addition law
//!
//! ```text
//! P + O = P,  O + Q = Q
//! P + (-P) = O
//! P == Q:  λ = (3·x₁² + a) / (2·y₁)
//! P != Q:  λ = (y₂ - y₁) / (x₂ - x₁)
//! x₃ = λ² - x₁ - x₂
//! y₃ = λ·(x₁ - x₃) - y₁
//! ```
//!
//! All divisions are modular inverses mod p.

use std::ops::{Add, Neg};

use num_bigint::BigUint;
use num_traits::Zero;

use super::params::DomainParameters;
use crate::error::{Error, Result};
use crate::modular::{add_mod, mod_inverse_unsigned, mul_mod, sub_mod};

/// SEC1 tag: point at infinity
pub const TAG_INFINITY: u8 = 0x00;
/// SEC1 tag: compressed, even y
pub const TAG_COMPRESSED_EVEN: u8 = 0x02;
/// SEC1 tag: compressed, odd y
pub const TAG_COMPRESSED_ODD: u8 = 0x03;
/// SEC1 tag: uncompressed
pub const TAG_UNCOMPRESSED: u8 = 0x04;

/// Affine coordinates or the group identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coordinates {
    /// Point at infinity
    Infinity,
    /// (x, y) with 0 <= x, y < p
    Affine {
        /// x-coordinate
        x: BigUint,
        /// y-coordinate
        y: BigUint,
    },
}

/// Decoded SEC1 bytes, before any curve check
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Sec1 {
    Infinity,
    Affine(BigUint, BigUint),
}

/// Parse SEC1 point bytes for a field of `field_len` bytes.
///
/// Compressed forms are refused: recovering y needs a modular square root
/// (Tonelli-Shanks), which this crate does not provide.
pub(crate) fn decode_sec1(bytes: &[u8], field_len: usize) -> Result<Sec1> {
    let (&tag, body) = bytes
        .split_first()
        .ok_or_else(|| Error::InvalidPointEncoding("empty input".into()))?;

    match tag {
        TAG_INFINITY if body.is_empty() => Ok(Sec1::Infinity),
        TAG_COMPRESSED_EVEN | TAG_COMPRESSED_ODD => Err(Error::UnsupportedEncoding { tag }),
        TAG_UNCOMPRESSED => {
            if body.len() != 2 * field_len {
                return Err(Error::InvalidPointEncoding(format!(
                    "expected {} bytes, got {}",
                    1 + 2 * field_len,
                    bytes.len()
                )));
            }
            let (x, y) = body.split_at(field_len);
            Ok(Sec1::Affine(
                BigUint::from_bytes_be(x),
                BigUint::from_bytes_be(y),
            ))
        }
        _ => Err(Error::InvalidPointEncoding(format!(
            "unknown tag 0x{tag:02x}"
        ))),
    }
}

/// Left-pad a big-endian integer to `len` bytes
pub(crate) fn to_fixed_be(value: &BigUint, len: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// Point on a curve, tagged with its domain
#[derive(Clone, Debug)]
pub struct Point {
    domain: &'static DomainParameters,
    coords: Coordinates,
}

impl Point {
    /// Point at infinity (identity)
    pub fn infinity(domain: &'static DomainParameters) -> Self {
        Point {
            domain,
            coords: Coordinates::Infinity,
        }
    }

    /// Generator point G
    pub fn generator(domain: &'static DomainParameters) -> Self {
        Point {
            domain,
            coords: Coordinates::Affine {
                x: domain.gx().clone(),
                y: domain.gy().clone(),
            },
        }
    }

    /// Affine point, checked against the field and the curve equation
    pub fn new(domain: &'static DomainParameters, x: BigUint, y: BigUint) -> Result<Self> {
        if &x >= domain.p() || &y >= domain.p() {
            return Err(Error::InvalidCoordinate);
        }
        if !domain.contains(&x, &y) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(Point {
            domain,
            coords: Coordinates::Affine { x, y },
        })
    }

    /// Result of the group law; coordinates are already reduced
    fn affine_unchecked(domain: &'static DomainParameters, x: BigUint, y: BigUint) -> Self {
        Point {
            domain,
            coords: Coordinates::Affine { x, y },
        }
    }

    /// Owning domain
    pub fn domain(&self) -> &'static DomainParameters {
        self.domain
    }

    /// Coordinates
    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    /// `(x, y)`, or `None` at infinity
    pub fn coords(&self) -> Option<(&BigUint, &BigUint)> {
        match &self.coords {
            Coordinates::Infinity => None,
            Coordinates::Affine { x, y } => Some((x, y)),
        }
    }

    /// x-coordinate
    pub fn x(&self) -> Option<&BigUint> {
        self.coords().map(|(x, _)| x)
    }

    /// y-coordinate
    pub fn y(&self) -> Option<&BigUint> {
        self.coords().map(|(_, y)| y)
    }

    /// Check if point at infinity
    pub fn is_infinity(&self) -> bool {
        matches!(self.coords, Coordinates::Infinity)
    }

    /// Check if point is on curve: y² = x³ + a·x + b (mod p)
    pub fn is_on_curve(&self) -> bool {
        match &self.coords {
            Coordinates::Infinity => true,
            Coordinates::Affine { x, y } => {
                x < self.domain.p() && y < self.domain.p() && self.domain.contains(x, y)
            }
        }
    }

    /// Point negation: -(x, y) = (x, -y)
    pub fn negate(&self) -> Self {
        match &self.coords {
            Coordinates::Infinity => self.clone(),
            Coordinates::Affine { x, y } => {
                let p = self.domain.p();
                let neg_y = if y.is_zero() { y.clone() } else { p - y };
                Self::affine_unchecked(self.domain, x.clone(), neg_y)
            }
        }
    }

    fn check_domain(&self, other: &Point) -> Result<()> {
        if std::ptr::eq(self.domain, other.domain) || self.domain == other.domain {
            Ok(())
        } else {
            Err(Error::CurveMismatch {
                left: self.domain.name(),
                right: other.domain.name(),
            })
        }
    }

    /// Point addition
    pub fn add(&self, other: &Point) -> Result<Point> {
        self.check_domain(other)?;

        let (x1, y1) = match &self.coords {
            Coordinates::Infinity => return Ok(other.clone()),
            Coordinates::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match &other.coords {
            Coordinates::Infinity => return Ok(self.clone()),
            Coordinates::Affine { x, y } => (x, y),
        };

        let domain = self.domain;
        let p = domain.p();

        if x1 == x2 && add_mod(y1, y2, p).is_zero() {
            return Ok(Point::infinity(domain));
        }

        let lambda = if x1 == x2 && y1 == y2 {
            let num = add_mod(&mul_mod(&BigUint::from(3u8), &mul_mod(x1, x1, p), p), domain.a(), p);
            let den = add_mod(y1, y1, p);
            mul_mod(&num, &mod_inverse_unsigned(&den, p)?, p)
        } else {
            let num = sub_mod(y2, y1, p);
            let den = sub_mod(x2, x1, p);
            mul_mod(&num, &mod_inverse_unsigned(&den, p)?, p)
        };

        let x3 = sub_mod(&sub_mod(&mul_mod(&lambda, &lambda, p), x1, p), x2, p);
        let y3 = sub_mod(&mul_mod(&lambda, &sub_mod(x1, &x3, p), p), y1, p);

        Ok(Self::affine_unchecked(domain, x3, y3))
    }

    /// Point doubling
    pub fn double(&self) -> Result<Point> {
        self.add(self)
    }

    /// SEC1 encoding: `00` at infinity, otherwise `04 || X || Y`
    pub fn to_sec1(&self) -> Vec<u8> {
        match &self.coords {
            Coordinates::Infinity => vec![TAG_INFINITY],
            Coordinates::Affine { x, y } => {
                let len = self.domain.field_len();
                let mut out = Vec::with_capacity(1 + 2 * len);
                out.push(TAG_UNCOMPRESSED);
                out.extend_from_slice(&to_fixed_be(x, len));
                out.extend_from_slice(&to_fixed_be(y, len));
                out
            }
        }
    }

    /// Parse SEC1 bytes from untrusted input; the point must lie on the curve
    pub fn from_sec1(domain: &'static DomainParameters, bytes: &[u8]) -> Result<Self> {
        match decode_sec1(bytes, domain.field_len())? {
            Sec1::Infinity => Ok(Point::infinity(domain)),
            Sec1::Affine(x, y) => Point::new(domain, x, y),
        }
    }

    /// Hex of the SEC1 encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_sec1())
    }

    /// Parse hex SEC1 from untrusted input
    pub fn from_hex(domain: &'static DomainParameters, s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        Self::from_sec1(domain, &bytes)
    }

    /// x-coordinate as stripped lower-case hex
    pub fn x_hex(&self) -> Option<String> {
        self.x().map(|x| format!("{x:x}"))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.check_domain(other).is_ok() && self.coords == other.coords
    }
}

impl Eq for Point {}

impl Add for &Point {
    type Output = Result<Point>;

    fn add(self, rhs: &Point) -> Result<Point> {
        Point::add(self, rhs)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        self.negate()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::secp256k1::params::secp256k1;
    use once_cell::sync::Lazy;

    /// y² = x³ + 2x + 2 over F₁₇, G = (5, 1), n = 19
    pub(crate) static TOY: Lazy<DomainParameters> = Lazy::new(|| {
        DomainParameters::new(
            "toy17",
            17u32.into(),
            2u32.into(),
            2u32.into(),
            5u32.into(),
            1u32.into(),
            19u32.into(),
            1u32.into(),
        )
        .unwrap()
    });

    fn toy(x: u32, y: u32) -> Point {
        Point::new(&TOY, x.into(), y.into()).unwrap()
    }

    #[test]
    fn test_generator_on_curve() {
        let g = Point::generator(secp256k1());
        assert!(g.is_on_curve());
        assert!(!g.is_infinity());
    }

    #[test]
    fn test_infinity_identity() {
        let g = Point::generator(secp256k1());
        let inf = Point::infinity(secp256k1());
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
        assert_eq!(g.add(&inf).unwrap(), g);
        assert_eq!(inf.add(&g).unwrap(), g);
        assert!(inf.add(&inf).unwrap().is_infinity());
    }

    #[test]
    fn test_neg() {
        let g = Point::generator(secp256k1());
        let neg_g = -&g;
        assert!(neg_g.is_on_curve());
        assert!(g.add(&neg_g).unwrap().is_infinity());
    }

    #[test]
    fn test_double_matches_known_2g() {
        let g = Point::generator(secp256k1());
        let g2 = g.double().unwrap();
        assert_eq!(
            g2.x_hex().unwrap(),
            "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
        assert_eq!(
            format!("{:x}", g2.y().unwrap()),
            "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"
        );
        assert!(g2.is_on_curve());
    }

    #[test]
    fn test_addition_commutes() {
        let g = Point::generator(secp256k1());
        let g2 = g.double().unwrap();
        let a = (&g + &g2).unwrap();
        let b = (&g2 + &g).unwrap();
        assert_eq!(a, b);
        assert!(a.is_on_curve());
    }

    #[test]
    fn test_toy_curve_group() {
        // Textbook values for G = (5, 1)
        let g = toy(5, 1);
        assert_eq!(g.double().unwrap(), toy(6, 3));
        assert_eq!(g.add(&toy(6, 3)).unwrap(), toy(10, 6));

        // 19·G = O, so 18·G = -G
        let mut acc = g.clone();
        for _ in 1..18 {
            acc = acc.add(&g).unwrap();
        }
        assert_eq!(acc, g.negate());
        assert!(acc.add(&g).unwrap().is_infinity());
    }

    #[test]
    fn test_curve_mismatch() {
        let g = Point::generator(secp256k1());
        let t = Point::generator(&TOY);
        assert_eq!(
            g.add(&t).unwrap_err(),
            Error::CurveMismatch {
                left: "secp256k1",
                right: "toy17"
            }
        );
        assert_ne!(g, t);

        // Infinity is still tagged with its domain
        let inf = Point::infinity(&TOY);
        assert!(g.add(&inf).is_err());
    }

    #[test]
    fn test_new_rejects_off_curve() {
        assert_eq!(
            Point::new(&TOY, 5u32.into(), 2u32.into()).unwrap_err(),
            Error::PointNotOnCurve
        );
        assert_eq!(
            Point::new(&TOY, 22u32.into(), 1u32.into()).unwrap_err(),
            Error::InvalidCoordinate
        );
    }

    #[test]
    fn test_sec1_roundtrip_generator() {
        let domain = secp256k1();
        let g = Point::generator(domain);
        let encoded = g.to_sec1();
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded[0], TAG_UNCOMPRESSED);
        assert_eq!(Point::from_sec1(domain, &encoded).unwrap(), g);

        let inf = Point::infinity(domain);
        assert_eq!(inf.to_sec1(), vec![TAG_INFINITY]);
        assert!(Point::from_sec1(domain, &[TAG_INFINITY]).unwrap().is_infinity());
    }

    #[test]
    fn test_sec1_rejects_bad_input() {
        let domain = secp256k1();
        let mut encoded = Point::generator(domain).to_sec1();

        assert!(matches!(
            Point::from_sec1(domain, &encoded[..64]),
            Err(Error::InvalidPointEncoding(_))
        ));
        assert!(matches!(
            Point::from_sec1(domain, &[]),
            Err(Error::InvalidPointEncoding(_))
        ));

        let mut compressed = vec![TAG_COMPRESSED_ODD];
        compressed.extend_from_slice(&encoded[1..33]);
        assert_eq!(
            Point::from_sec1(domain, &compressed).unwrap_err(),
            Error::UnsupportedEncoding { tag: 0x03 }
        );

        encoded[64] ^= 1;
        assert_eq!(
            Point::from_sec1(domain, &encoded).unwrap_err(),
            Error::PointNotOnCurve
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let domain = secp256k1();
        let g = Point::generator(domain);
        let s = g.to_hex();
        assert!(s.starts_with("0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"));
        assert_eq!(Point::from_hex(domain, &s).unwrap(), g);
        assert!(matches!(
            Point::from_hex(domain, "04zz"),
            Err(Error::InvalidHex(_))
        ));
    }
}
