//! ECDSA Signing and Verification
//!
//! Implements key generation, signing and verification over a fixed domain.
//!
//! ## Signing
//!
//! ```text
//! e = SHA-256(m) mod n
//! k <- [1, n-1]
//! R = k·G, r = R.x mod n            (retry if r = 0)
//! s = k⁻¹·(e + d·r) mod n           (retry if s = 0)
//! ```
//!
//! ## Verification
//!
//! ```text
//! w = s⁻¹ mod n
//! u1 = e·w mod n, u2 = r·w mod n
//! P = u1·G + u2·Q
//! accept iff P != O and P.x mod n = r
//! ```

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::der;
use super::params::{parse_hex, secp256k1, DomainParameters};
use super::point::Point;
use super::scalar_mul::{double_scalar_mul, mul_generator};
use crate::error::{Error, Result};
use crate::modular::{add_mod, mod_inverse_unsigned, mul_mod};
use crate::sha256;

/// Signer policy
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EcdsaConfig {
    /// Nonces drawn before signing gives up
    pub max_nonce_attempts: u32,
    /// Emit `s <= n/2`
    pub low_s: bool,
}

impl Default for EcdsaConfig {
    fn default() -> Self {
        EcdsaConfig {
            max_nonce_attempts: 64,
            low_s: false,
        }
    }
}

/// ECDSA signature (r, s)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    /// r component (x-coordinate of R mod n)
    pub r: BigUint,
    /// s component
    pub s: BigUint,
}

impl Signature {
    /// Create from r and s
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    /// DER encoding
    pub fn to_der(&self) -> Vec<u8> {
        der::encode_signature(&self.r, &self.s)
    }

    /// Parse DER. Range checks against n happen at verification.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (r, s) = der::decode_signature(bytes)?;
        Ok(Signature { r, s })
    }

    /// True iff `s <= n/2`
    pub fn is_low_s(&self, domain: &DomainParameters) -> bool {
        self.s <= domain.n() >> 1u32
    }

    /// Normalize signature to low S form; `(r, n - s)` verifies the same
    pub fn normalize_s(&self, domain: &DomainParameters) -> Self {
        if self.is_low_s(domain) {
            self.clone()
        } else {
            Signature {
                r: self.r.clone(),
                s: domain.n() - &self.s,
            }
        }
    }
}

/// Private scalar with its public point
#[derive(Clone, Debug)]
pub struct KeyPair {
    private: BigUint,
    public: Point,
}

impl KeyPair {
    /// Private scalar d
    pub fn private_key(&self) -> &BigUint {
        &self.private
    }

    /// Public point Q = d·G
    pub fn public_key(&self) -> &Point {
        &self.public
    }

    /// Private key as stripped hex
    pub fn private_key_hex(&self) -> String {
        private_key_to_hex(&self.private)
    }
}

/// Lower-case hex, no leading zeros, no prefix
pub fn private_key_to_hex(d: &BigUint) -> String {
    format!("{d:x}")
}

/// ECDSA over one domain
#[derive(Clone, Debug)]
pub struct Ecdsa {
    domain: &'static DomainParameters,
    generator: Point,
    config: EcdsaConfig,
}

impl Default for Ecdsa {
    fn default() -> Self {
        Self::secp256k1()
    }
}

impl Ecdsa {
    /// secp256k1 with the default signer policy
    pub fn secp256k1() -> Self {
        Self::new(secp256k1(), EcdsaConfig::default())
    }

    /// Create for a domain
    pub fn new(domain: &'static DomainParameters, config: EcdsaConfig) -> Self {
        Ecdsa {
            domain,
            generator: Point::generator(domain),
            config,
        }
    }

    /// Domain parameters
    pub fn domain(&self) -> &'static DomainParameters {
        self.domain
    }

    /// Generator point G
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Signer policy
    pub fn config(&self) -> &EcdsaConfig {
        &self.config
    }

    fn check_scalar(&self, k: &BigUint) -> Result<()> {
        if self.domain.is_valid_scalar(k) {
            Ok(())
        } else {
            Err(Error::OutOfRange(k.clone()))
        }
    }

    /// Uniform draw from `[1, n-1]`
    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_range(&BigUint::one(), self.domain.n())
    }

    /// Private key from the OS random source
    pub fn generate_private_key(&self) -> BigUint {
        self.generate_private_key_with_rng(&mut OsRng)
    }

    /// Private key from a caller-supplied CSPRNG
    pub fn generate_private_key_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        self.random_scalar(rng)
    }

    /// Q = d·G
    pub fn derive_public_key(&self, d: &BigUint) -> Result<Point> {
        self.check_scalar(d)?;
        mul_generator(self.domain, d)
    }

    /// Fresh key pair from the OS random source
    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        self.generate_key_pair_with_rng(&mut OsRng)
    }

    /// Fresh key pair from a caller-supplied CSPRNG
    pub fn generate_key_pair_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<KeyPair> {
        let private = self.generate_private_key_with_rng(rng);
        let public = self.derive_public_key(&private)?;
        Ok(KeyPair { private, public })
    }

    /// Parse a hex private key (optional `0x`) and range-check it
    pub fn parse_private_key_hex(&self, s: &str) -> Result<BigUint> {
        let d = parse_hex(s)?;
        self.check_scalar(&d)?;
        Ok(d)
    }

    /// e = SHA-256(message) as a big-endian integer, mod n
    pub fn hash_to_scalar(&self, message: &[u8]) -> BigUint {
        BigUint::from_bytes_be(&sha256::digest(message)) % self.domain.n()
    }

    /// Sign with a nonce from the OS random source
    pub fn sign(&self, d: &BigUint, message: &[u8]) -> Result<Signature> {
        self.sign_with_rng(d, message, &mut OsRng)
    }

    /// Sign with nonces from a caller-supplied CSPRNG
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        d: &BigUint,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        self.check_scalar(d)?;

        let n = self.domain.n();
        let e = self.hash_to_scalar(message);

        for attempt in 1..=self.config.max_nonce_attempts {
            let k = self.random_scalar(rng);

            let r = match mul_generator(self.domain, &k)?.x() {
                Some(x) => x % n,
                None => BigUint::zero(),
            };
            if r.is_zero() {
                log::trace!("nonce attempt {attempt}: r = 0, retrying");
                continue;
            }

            let k_inv = mod_inverse_unsigned(&k, n)?;
            let s = mul_mod(&k_inv, &add_mod(&e, &mul_mod(d, &r, n), n), n);
            if s.is_zero() {
                log::trace!("nonce attempt {attempt}: s = 0, retrying");
                continue;
            }

            let signature = Signature { r, s };
            return Ok(if self.config.low_s {
                signature.normalize_s(self.domain)
            } else {
                signature
            });
        }

        log::warn!(
            "signing gave up after {} nonce attempts",
            self.config.max_nonce_attempts
        );
        Err(Error::NonceExhaustion {
            attempts: self.config.max_nonce_attempts,
        })
    }

    /// Verify a signature. Never errors: any invalid input is `false`.
    pub fn verify(&self, public_key: &Point, message: &[u8], signature: &Signature) -> bool {
        let n = self.domain.n();

        if !self.domain.is_valid_scalar(&signature.r) || !self.domain.is_valid_scalar(&signature.s) {
            log::trace!("rejecting signature: r or s outside [1, n-1]");
            return false;
        }
        if public_key.domain() != self.domain {
            log::trace!("rejecting signature: public key on {}", public_key.domain().name());
            return false;
        }
        if public_key.is_infinity() || !public_key.is_on_curve() {
            log::trace!("rejecting signature: invalid public key");
            return false;
        }

        let e = self.hash_to_scalar(message);

        // s in [1, n-1] and n prime, so the inverse exists
        let w = match mod_inverse_unsigned(&signature.s, n) {
            Ok(w) => w,
            Err(_) => return false,
        };
        let u1 = mul_mod(&e, &w, n);
        let u2 = mul_mod(&signature.r, &w, n);

        let p = match double_scalar_mul(&u1, &u2, public_key) {
            Ok(p) => p,
            Err(err) => {
                log::trace!("rejecting signature: {err}");
                return false;
            }
        };

        match p.x() {
            Some(x) => (x % n) == signature.r,
            None => {
                log::trace!("rejecting signature: u1·G + u2·Q is the point at infinity");
                false
            }
        }
    }

    /// Verify a DER signature from untrusted input; malformed bytes are `false`
    pub fn verify_der(&self, public_key: &Point, message: &[u8], der_bytes: &[u8]) -> bool {
        match Signature::from_der(der_bytes) {
            Ok(signature) => self.verify(public_key, message, &signature),
            Err(err) => {
                log::trace!("rejecting signature: {err}");
                false
            }
        }
    }
}
