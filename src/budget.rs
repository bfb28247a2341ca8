//! Iteration and wall-clock budgets for long-running searches

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// How often the wall clock is consulted, in iterations. Checking
/// `Instant::now()` on every tick would dominate cheap inner loops.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Resource bound for a single search run.
///
/// Every search in the crate (trial division, Fermat, both Pollard rho
/// variants) charges one tick per loop iteration against a `Budget`.
/// Hitting either limit aborts the run with
/// [`Error::ResourceExceeded`], so pathological inputs terminate
/// promptly instead of running unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub max_iterations: u64,
    pub time_limit: Option<Duration>,
}

impl Budget {
    pub fn new(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub(crate) fn start(&self) -> Meter {
        Meter {
            budget: *self,
            started: Instant::now(),
            iterations: 0,
        }
    }
}

/// Running consumption against a [`Budget`].
#[derive(Debug)]
pub(crate) struct Meter {
    budget: Budget,
    started: Instant,
    iterations: u64,
}

impl Meter {
    /// Charges one iteration. Errors once the budget is spent.
    pub(crate) fn tick(&mut self) -> Result<()> {
        self.iterations += 1;
        if self.iterations > self.budget.max_iterations {
            return Err(Error::ResourceExceeded);
        }
        if let Some(limit) = self.budget.time_limit {
            if self.iterations % CLOCK_CHECK_INTERVAL == 0 && self.started.elapsed() > limit {
                return Err(Error::ResourceExceeded);
            }
        }
        Ok(())
    }

    pub(crate) fn iterations(&self) -> u64 {
        self.iterations
    }
}
