//! k1sig: secp256k1 ECDSA and SHA-256 from first principles
//!
//! This library implements the arithmetic and protocol logic to generate
//! key pairs, sign messages and verify signatures under ECDSA over
//! secp256k1, together with the SHA-256 digest it hashes messages with:
//!
//! ```text
//! e = SHA-256(m) mod n
//! (r, s) = Sign(d, e)
//! Verify(Q, e, r, s) -> bool
//! ```
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! 1. **Modular arithmetic**: congruence, extended Euclid, inverses
//! 2. **Curve domain**: immutable, validated `(p, a, b, G, n, h)`
//! 3. **Point group**: affine addition law, double-and-add
//! 4. **Digest engine**: SHA-256 as a pipeline of pure stages
//! 5. **ECDSA**: keys, signing, verification, DER
//!
//! ## Usage
//!
//! ```no_run
//! use k1sig::Ecdsa;
//!
//! let ecdsa = Ecdsa::secp256k1();
//! let pair = ecdsa.generate_key_pair()?;
//!
//! let sig = ecdsa.sign(pair.private_key(), b"my message")?;
//! assert!(ecdsa.verify(pair.public_key(), b"my message", &sig));
//!
//! // Wire form
//! let der = sig.to_der();
//! assert!(ecdsa.verify_der(pair.public_key(), b"my message", &der));
//! # Ok::<(), k1sig::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod modular;
pub mod sha256;
pub mod secp256k1;

pub use error::{Error, Result};
pub use secp256k1::{
    DomainParameters, Ecdsa, EcdsaConfig, KeyPair, Point, Signature,
};
pub use sha256::digest;
