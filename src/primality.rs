//! Miller-Rabin primality testing and random prime generation

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

/// Primes below 100, used as a deterministic short-circuit and as a
/// cheap divisibility pre-check before the witness rounds.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Probabilistic primality test.
///
/// Never rejects a prime; accepts a composite with probability at most
/// `4^-rounds`. Candidates below `SMALL_PRIMES.last()^2` are classified
/// deterministically by the divisibility pre-check alone.
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }

    for &p in &SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }
    // Largest table prime is 97: anything below 97^2 that survived the
    // divisibility check is prime.
    if *n < BigUint::from(97u32 * 97) {
        return true;
    }

    // n - 1 = 2^s * d with d odd
    let n_minus_one = n - BigUint::one();
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let mut rng = rand::thread_rng();
    'witness: for _ in 0..rounds.max(1) {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 0..s.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Generates a random probable prime with exactly `bits` bits.
///
/// The top bit is forced so the result has the requested width, and the
/// candidate is made odd before testing. `bits` must be at least 2.
pub fn random_prime(bits: u64, rounds: u32, rng: &mut impl Rng) -> BigUint {
    assert!(bits >= 2, "a prime needs at least 2 bits");
    loop {
        let mut candidate = rng.gen_biguint(bits);
        candidate.set_bit(bits - 1, true);
        if candidate.is_even() {
            candidate |= BigUint::one();
        }
        if is_probable_prime(&candidate, rounds) {
            return candidate;
        }
    }
}
