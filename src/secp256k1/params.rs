//! secp256k1 Curve Parameters
//!
//! All constants as defined in SEC 2: Recommended Elliptic Curve Domain Parameters.
//!
//! A domain is described by the sextuple `T = (p, a, b, G, n, h)`. It is
//! parsed once from a hex table into [`DomainParameters`], validated, and
//! then only ever read.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use super::point::{decode_sec1, Sec1};
use crate::error::{Error, Result};

/// Raw hex table for a curve. `g` is the SEC1 encoding of the generator.
#[derive(Clone, Copy, Debug)]
pub struct RawDomain {
    /// Curve name
    pub name: &'static str,
    /// Field modulus
    pub p: &'static str,
    /// Coefficient of x
    pub a: &'static str,
    /// Constant term
    pub b: &'static str,
    /// Generator, SEC1-encoded
    pub g: &'static str,
    /// Order of G
    pub n: &'static str,
    /// Cofactor
    pub h: &'static str,
}

/// secp256k1: y² = x³ + 7 over p = 2^256 - 2^32 - 977
pub const SECP256K1_RAW: RawDomain = RawDomain {
    name: "secp256k1",
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
    a: "0000000000000000000000000000000000000000000000000000000000000000",
    b: "0000000000000000000000000000000000000000000000000000000000000007",
    g: concat!(
        "04",
        "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
    ),
    n: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
    h: "01",
};

static SECP256K1: Lazy<DomainParameters> = Lazy::new(|| {
    let domain = DomainParameters::from_raw(&SECP256K1_RAW)
        .expect("secp256k1 domain parameters must be valid");
    log::debug!("initialized {} domain parameters", domain.name());
    domain
});

/// Process-wide secp256k1 domain
pub fn secp256k1() -> &'static DomainParameters {
    &SECP256K1
}

/// Immutable curve description `(p, a, b, G, n, h)`.
///
/// Construction checks `Gy² ≡ Gx³ + a·Gx + b (mod p)`; an instance that
/// exists is always valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    name: &'static str,
    p: BigUint,
    a: BigUint,
    b: BigUint,
    gx: BigUint,
    gy: BigUint,
    n: BigUint,
    h: BigUint,
}

impl DomainParameters {
    /// Build and validate a domain from integer parameters
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &'static str,
        p: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
        n: BigUint,
        h: BigUint,
    ) -> Result<Self> {
        if p < BigUint::from(3u8) {
            return Err(Error::InvalidDomain(format!("{name}: modulus too small")));
        }
        if n <= BigUint::one() {
            return Err(Error::InvalidDomain(format!("{name}: order too small")));
        }
        if h.is_zero() {
            return Err(Error::InvalidDomain(format!("{name}: zero cofactor")));
        }
        if a >= p || b >= p || gx >= p || gy >= p {
            return Err(Error::InvalidDomain(format!(
                "{name}: parameters must be reduced modulo p"
            )));
        }

        let domain = DomainParameters {
            name,
            p,
            a,
            b,
            gx,
            gy,
            n,
            h,
        };
        if !domain.valid() {
            return Err(Error::InvalidDomain(format!(
                "{name}: generator is not on the curve"
            )));
        }
        Ok(domain)
    }

    /// Parse a hex table. Only the uncompressed generator form is accepted.
    pub fn from_raw(raw: &RawDomain) -> Result<Self> {
        let p = parse_hex(raw.p)?;
        let g_bytes = hex::decode(raw.g)?;
        let field_len = byte_len(&p);

        let (gx, gy) = match decode_sec1(&g_bytes, field_len)? {
            Sec1::Affine(x, y) => (x, y),
            Sec1::Infinity => {
                return Err(Error::InvalidDomain(format!(
                    "{}: generator is the point at infinity",
                    raw.name
                )))
            }
        };

        Self::new(
            raw.name,
            p,
            parse_hex(raw.a)?,
            parse_hex(raw.b)?,
            gx,
            gy,
            parse_hex(raw.n)?,
            parse_hex(raw.h)?,
        )
    }

    /// Check that G lies on the curve
    pub fn valid(&self) -> bool {
        self.contains(&self.gx, &self.gy)
    }

    /// y² ≡ x³ + a·x + b (mod p)
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        let lhs = (y * y) % &self.p;
        let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
        lhs == rhs
    }

    /// Curve name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field modulus p
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Coefficient a
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient b
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Generator x-coordinate
    pub fn gx(&self) -> &BigUint {
        &self.gx
    }

    /// Generator y-coordinate
    pub fn gy(&self) -> &BigUint {
        &self.gy
    }

    /// Order of G
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Cofactor
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Bytes needed for one field element
    pub fn field_len(&self) -> usize {
        byte_len(&self.p)
    }

    /// True iff `k` is in `[1, n-1]`
    pub fn is_valid_scalar(&self, k: &BigUint) -> bool {
        !k.is_zero() && k < &self.n
    }
}

fn byte_len(value: &BigUint) -> usize {
    ((value.bits() + 7) / 8) as usize
}

/// Parse a hex integer, with or without a `0x` prefix
pub fn parse_hex(s: &str) -> Result<BigUint> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(s.to_string()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| Error::InvalidHex(s.to_string()))
}
