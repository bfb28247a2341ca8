//! RSA key model: generation and validation of (p, q, n, e, d) tuples

use crate::error::{Error, Result};
use crate::math::mod_inverse;
use crate::primality::{is_probable_prime, random_prime};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::Rng;
use serde::Serialize;

const GENERATION_ROUNDS: u32 = 20;
/// Prime pairs regenerated before giving up on a bit length.
const MAX_GENERATION_ATTEMPTS: u32 = 64;
/// Odd steps tried above 65537 before regenerating the primes.
const EXPONENT_SEARCH_WINDOW: u32 = 500;

/// An RSA key with both public and private halves exposed.
///
/// This is a teaching tool: the point is to hand the factorization
/// attacks a modulus whose factors are known, so nothing is hidden.
/// Keys are immutable once constructed and always satisfy
/// `e * d = 1 (mod lambda(n))` with `lambda(n) = lcm(p - 1, q - 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsaKey {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
}

impl RsaKey {
    /// Generates a fresh key with a modulus of roughly `bit_length`
    /// bits. The public exponent starts at 65537 and steps upward in
    /// odd increments to the first value coprime with lambda(n).
    pub fn generate(bit_length: u64, rng: &mut impl Rng) -> Result<RsaKey> {
        if bit_length < 8 {
            return Err(Error::InvalidParameters(format!(
                "bit length must be at least 8, got {bit_length}"
            )));
        }
        let prime_bits = bit_length / 2;

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let p = random_prime(prime_bits, GENERATION_ROUNDS, rng);
            let q = random_prime(prime_bits, GENERATION_ROUNDS, rng);
            if p == q {
                continue;
            }
            if let Some(key) = Self::derive(p, q) {
                return Ok(key);
            }
        }
        Err(Error::InvalidParameters(format!(
            "could not generate a valid key at {bit_length} bits"
        )))
    }

    /// Validates caller-supplied parameters and returns the full key.
    pub fn from_parts(p: BigUint, q: BigUint, e: BigUint, d: BigUint) -> Result<RsaKey> {
        if p == q {
            return Err(Error::InvalidParameters("p and q must differ".into()));
        }
        if !is_probable_prime(&p, GENERATION_ROUNDS) {
            return Err(Error::InvalidParameters(format!("p = {p} is not prime")));
        }
        if !is_probable_prime(&q, GENERATION_ROUNDS) {
            return Err(Error::InvalidParameters(format!("q = {q} is not prime")));
        }
        let lambda = carmichael(&p, &q);
        if (&e * &d) % &lambda != BigUint::one() {
            return Err(Error::InvalidParameters(format!(
                "e * d != 1 (mod {lambda})"
            )));
        }
        let n = &p * &q;
        Ok(RsaKey { p, q, n, e, d })
    }

    /// Derives the exponent pair for a distinct prime pair, or `None`
    /// when no public exponent in the search window is coprime with
    /// lambda(n).
    fn derive(p: BigUint, q: BigUint) -> Option<RsaKey> {
        let lambda = carmichael(&p, &q);
        let mut e = BigUint::from(65_537u32);
        for _ in 0..EXPONENT_SEARCH_WINDOW {
            if e.gcd(&lambda).is_one() {
                let d = mod_inverse(&e, &lambda)?;
                let n = &p * &q;
                return Some(RsaKey { p, q, n, e, d });
            }
            e += 2u32;
        }
        None
    }
}

/// Carmichael totient for a semiprime: lcm(p - 1, q - 1).
pub fn carmichael(p: &BigUint, q: &BigUint) -> BigUint {
    let p1 = p - BigUint::one();
    let q1 = q - BigUint::one();
    p1.lcm(&q1)
}
