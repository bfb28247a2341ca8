//! Integer factorization strategies for semiprime moduli

use crate::error::{Error, Result};
use crate::primality::is_probable_prime;
use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

pub mod fermat;
pub mod pollard;
pub mod trial;

pub use fermat::Fermat;
pub use pollard::PollardRho;
pub use trial::TrialDivision;

/// Miller-Rabin rounds used when verifying recovered factors.
const VERIFY_ROUNDS: u32 = 20;

/// A factorization attack on a semiprime modulus.
///
/// Strategies hold their own configuration (budget, restart counts)
/// and share no mutable state between calls, so a caller comparing
/// them may run the same modulus through several strategies from
/// parallel tasks.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Recovers the two prime factors of `n`, or fails with
    /// [`Error::NotFound`] / [`Error::ResourceExceeded`] when the
    /// search bound is exhausted. A prime `n` has no nontrivial
    /// divisor and always ends in `NotFound`.
    fn factor(&self, n: &BigUint) -> Result<Factorization>;
}

/// Recovered prime factors, `p <= q` and `p * q == n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factorization {
    pub p: BigUint,
    pub q: BigUint,
    /// Search iterations spent, for instrumentation by the caller.
    pub iterations: u64,
}

/// Rejects moduli no strategy can meaningfully factor.
pub(crate) fn check_modulus(n: &BigUint) -> Result<()> {
    if *n < BigUint::from(2u32) {
        return Err(Error::InvalidParameters(format!(
            "modulus must be at least 2, got {n}"
        )));
    }
    Ok(())
}

/// Builds the verified result from a nontrivial divisor of `n`.
///
/// Claimed success is never unverified: the product is re-checked
/// exactly, and both halves must be probable primes. A divisor split
/// with a composite half means the input was not a semiprime, which is
/// a caller bug rather than a search failure.
pub(crate) fn split_from_divisor(
    n: &BigUint,
    divisor: &BigUint,
    iterations: u64,
) -> Result<Factorization> {
    debug_assert!(divisor > &BigUint::one() && divisor < n);
    let cofactor = n / divisor;
    let (p, q) = if divisor <= &cofactor {
        (divisor.clone(), cofactor)
    } else {
        (cofactor, divisor.clone())
    };
    if &p * &q != *n {
        return Err(Error::InvalidParameters(format!(
            "{divisor} does not divide {n}"
        )));
    }
    if !is_probable_prime(&p, VERIFY_ROUNDS) || !is_probable_prime(&q, VERIFY_ROUNDS) {
        return Err(Error::InvalidParameters(format!(
            "{n} is not a semiprime: split {p} * {q} has a composite factor"
        )));
    }
    Ok(Factorization { p, q, iterations })
}
