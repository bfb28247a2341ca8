//! Trial division: exact and exhaustive, for small moduli only

use super::{check_modulus, split_from_divisor, Factorization, Strategy};
use crate::budget::Budget;
use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

/// Deterministic factorization by testing 2 and then every odd
/// candidate up to the integer square root of the modulus. Exponential
/// in bit length; only sensible for small demonstrations.
#[derive(Debug, Clone)]
pub struct TrialDivision {
    pub budget: Budget,
}

impl Default for TrialDivision {
    fn default() -> Self {
        Self {
            budget: Budget::new(10_000_000),
        }
    }
}

impl Strategy for TrialDivision {
    fn name(&self) -> &'static str {
        "trial-division"
    }

    fn factor(&self, n: &BigUint) -> Result<Factorization> {
        check_modulus(n)?;
        let mut meter = self.budget.start();

        meter.tick()?;
        let two = BigUint::from(2u32);
        // 2 is prime; the evenness shortcut below would split it as
        // 2 * 1.
        if *n == two {
            return Err(Error::NotFound);
        }
        if n.is_even() {
            return split_from_divisor(n, &two, meter.iterations());
        }

        let mut candidate = BigUint::from(3u32);
        while &candidate * &candidate <= *n {
            meter.tick()?;
            if (n % &candidate).is_zero() {
                return split_from_divisor(n, &candidate, meter.iterations());
            }
            candidate += 2u32;
        }

        // Every candidate up to sqrt(n) failed: n is prime.
        Err(Error::NotFound)
    }
}
