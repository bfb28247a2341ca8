//! Fermat's difference-of-squares method

use super::{check_modulus, split_from_divisor, Factorization, Strategy};
use crate::budget::Budget;
use crate::error::{Error, Result};
use crate::math::{isqrt, perfect_sqrt};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

/// Factors `n = a^2 - b^2 = (a - b)(a + b)` by walking `a` upward from
/// the square root ceiling until `a^2 - n` is a perfect square.
///
/// Effective when the two prime factors are close together; degrades
/// badly as `|p - q|` grows, hence the iteration cap.
#[derive(Debug, Clone)]
pub struct Fermat {
    pub budget: Budget,
}

impl Default for Fermat {
    fn default() -> Self {
        Self {
            budget: Budget::new(1_000_000),
        }
    }
}

impl Strategy for Fermat {
    fn name(&self) -> &'static str {
        "fermat"
    }

    fn factor(&self, n: &BigUint) -> Result<Factorization> {
        check_modulus(n)?;
        // 2 is the one even prime: no nontrivial divisor, not a
        // parameter error.
        if *n == BigUint::from(2u32) {
            return Err(Error::NotFound);
        }
        if n.is_even() {
            return Err(Error::InvalidParameters(format!(
                "Fermat's method requires an odd modulus, got {n}"
            )));
        }

        let mut meter = self.budget.start();

        // a = ceil(sqrt(n))
        let mut a = isqrt(n);
        if &a * &a < *n {
            a += BigUint::one();
        }

        loop {
            meter.tick()?;
            let b_squared = &a * &a - n;
            if let Some(b) = perfect_sqrt(&b_squared) {
                let p = &a - &b;
                if p.is_one() {
                    // a = (n + 1) / 2 yields the trivial split 1 * n,
                    // meaning n is prime.
                    return Err(Error::NotFound);
                }
                return split_from_divisor(n, &p, meter.iterations());
            }
            a += BigUint::one();
        }
    }
}
