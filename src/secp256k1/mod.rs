//! secp256k1 Elliptic Curve and ECDSA Signatures
//!
//! Implements secp256k1 curve operations, key generation, signing and
//! verification over arbitrary-precision affine coordinates.
//!
//! ## Curve Parameters
//!
//! secp256k1: y² = x³ + 7 (mod p)
//! - p = 2^256 - 2^32 - 977
//! - n = group order
//! - G = generator point
//! - h = 1
//!
//! ## ECDSA Verification
//!
//! Given signature (r, s), public key Q, and message hash e:
//! 1. w = s⁻¹ mod n
//! 2. u1 = e·w mod n
//! 3. u2 = r·w mod n
//! 4. P = u1·G + u2·Q
//! 5. Accept iff P.x mod n = r
//!
//! Compressed SEC1 points (tags 0x02/0x03) are rejected with
//! [`Error::UnsupportedEncoding`](crate::Error::UnsupportedEncoding):
//! recovering y needs a modular square root, which is not implemented.
//! Arithmetic is not constant time.

pub mod params;
pub mod point;
pub mod scalar_mul;
pub mod der;
pub mod ecdsa;

pub use params::{parse_hex, secp256k1, DomainParameters, RawDomain, SECP256K1_RAW};
pub use point::{Coordinates, Point};
pub use scalar_mul::{double_scalar_mul, mul_generator, scalar_mul};
pub use ecdsa::{private_key_to_hex, Ecdsa, EcdsaConfig, KeyPair, Signature};
