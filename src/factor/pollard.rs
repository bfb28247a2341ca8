//! Pollard's rho factorization with Floyd cycle detection

use super::{check_modulus, split_from_divisor, Factorization, Strategy};
use crate::budget::Budget;
use crate::error::{Error, Result};
use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Pollard's rho: iterate `x -> x^2 + c (mod n)` with tortoise and
/// hare pointers, taking `gcd(|x - y|, n)` each step. When the walk
/// degenerates (gcd == n) the constant `c` and the starting point are
/// rerandomized; the whole run fails only after `restarts` degenerate
/// walks or an exhausted budget.
#[derive(Debug, Clone)]
pub struct PollardRho {
    pub budget: Budget,
    pub restarts: u32,
    /// Fixed seed for reproducible walks; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PollardRho {
    fn default() -> Self {
        Self {
            budget: Budget::new(5_000_000),
            restarts: 8,
            seed: None,
        }
    }
}

impl PollardRho {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn step(x: &BigUint, c: &BigUint, n: &BigUint) -> BigUint {
    (x * x + c) % n
}

fn abs_diff(a: &BigUint, b: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

impl Strategy for PollardRho {
    fn name(&self) -> &'static str {
        "pollard-rho"
    }

    fn factor(&self, n: &BigUint) -> Result<Factorization> {
        check_modulus(n)?;
        let mut meter = self.budget.start();

        meter.tick()?;
        // 2 and 3 are prime, and the x^2 + c walk cannot escape moduli
        // this small anyway; checked before the evenness shortcut so
        // n = 2 is not split as 2 * 1.
        if *n < BigUint::from(4u32) {
            return Err(Error::NotFound);
        }
        if n.is_even() {
            return split_from_divisor(n, &BigUint::from(2u32), meter.iterations());
        }

        let mut rng = self.rng();
        let one = BigUint::one();

        for attempt in 0..self.restarts.max(1) {
            let c = rng.gen_biguint_range(&one, n);
            let seed = rng.gen_biguint_range(&BigUint::from(2u32), n);
            debug!("pollard-rho attempt {attempt}: c = {c}, x0 = {seed}");

            let mut tortoise = seed.clone();
            let mut hare = seed;
            loop {
                meter.tick()?;
                tortoise = step(&tortoise, &c, n);
                hare = step(&step(&hare, &c, n), &c, n);

                let g = abs_diff(&tortoise, &hare).gcd(n);
                if g == *n {
                    // Full cycle collapsed onto n itself; restart with
                    // fresh randomization.
                    debug!("pollard-rho attempt {attempt} degenerated");
                    break;
                }
                if !g.is_one() {
                    return split_from_divisor(n, &g, meter.iterations());
                }
            }
        }
        Err(Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> PollardRho {
        PollardRho {
            seed: Some(42),
            ..PollardRho::default()
        }
    }

    #[test]
    fn test_factors_8051() {
        let f = strategy().factor(&BigUint::from(8051u32)).unwrap();
        assert_eq!(f.p, BigUint::from(83u32));
        assert_eq!(f.q, BigUint::from(97u32));
    }

    #[test]
    fn test_factors_even_modulus() {
        let f = strategy().factor(&BigUint::from(1994u32)).unwrap();
        assert_eq!(f.p, BigUint::from(2u32));
        assert_eq!(f.q, BigUint::from(997u32));
    }

    #[test]
    fn test_factors_sixty_bit_semiprime() {
        let n: BigUint = "1470626929934143021".parse().unwrap();
        let f = strategy().factor(&n).unwrap();
        assert_eq!(f.p, BigUint::from(1_206_429_347u64));
        assert_eq!(f.q, BigUint::from(1_218_991_343u64));
        assert_eq!(&f.p * &f.q, n);
    }

    #[test]
    fn test_tiny_moduli() {
        assert_eq!(strategy().factor(&BigUint::from(2u32)), Err(Error::NotFound));
        assert_eq!(strategy().factor(&BigUint::from(3u32)), Err(Error::NotFound));
        let f = strategy().factor(&BigUint::from(4u32)).unwrap();
        assert_eq!((f.p, f.q), (BigUint::from(2u32), BigUint::from(2u32)));
    }

    #[test]
    fn test_budget_exceeded_on_large_prime() {
        // A prime modulus never yields a factor; the budget must stop
        // the walk.
        let strategy = PollardRho {
            budget: Budget::new(2_000),
            restarts: 2,
            seed: Some(1),
        };
        let p: BigUint = "170141183460469231731687303715884105727".parse().unwrap();
        let err = strategy.factor(&p).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let n = BigUint::from(999_979u64 * 999_983);
        let a = strategy().factor(&n).unwrap();
        let b = strategy().factor(&n).unwrap();
        assert_eq!(a, b);
    }
}
