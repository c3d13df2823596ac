//! Error types shared by the arithmetic, curve and signature layers.

use num_bigint::{BigInt, BigUint};
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by modular arithmetic, point operations and ECDSA
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `gcd(value, modulus) != 1`, so no modular inverse exists
    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: BigInt, modulus: BigUint },

    /// Scalar outside `[1, n-1]`
    #[error("scalar {0:#x} is outside [1, n-1]")]
    OutOfRange(BigUint),

    /// Points from two different curves were combined
    #[error("cannot combine a point on {left} with a point on {right}")]
    CurveMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// Compressed SEC1 point; recovering y needs a modular square root
    #[error("compressed point encoding (tag 0x{tag:02x}) is not supported")]
    UnsupportedEncoding { tag: u8 },

    /// Unknown SEC1 tag or wrong encoded length
    #[error("invalid point encoding: {0}")]
    InvalidPointEncoding(String),

    /// Coordinates do not satisfy the curve equation
    #[error("point is not on the curve")]
    PointNotOnCurve,

    /// Coordinate outside `[0, p)`
    #[error("coordinate is not a field element")]
    InvalidCoordinate,

    /// DER signature bytes could not be parsed
    #[error("malformed signature: {0}")]
    MalformedSignature(&'static str),

    /// Signing never found a usable nonce
    #[error("no usable nonce after {attempts} attempts")]
    NonceExhaustion { attempts: u32 },

    /// Input expected to be hexadecimal was not
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Domain parameter table failed validation
    #[error("invalid domain parameters: {0}")]
    InvalidDomain(String),
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidHex(err.to_string())
    }
}
