//! Educational attack engine for weak cryptographic parameters
//!
//! This library implements the numeric core of a teaching tool for
//! cryptographic weaknesses: integer factorization of RSA moduli
//! (trial division, Fermat, Pollard's rho), Miller-Rabin primality
//! testing, elliptic-curve group arithmetic, and Pollard's rho for the
//! discrete logarithm on intentionally weak curves. Presentation
//! (menus, tables, plots, reports) is left to consumers.

pub mod budget;
pub mod curve;
pub mod ec;
pub mod ecdlp;
pub mod error;
pub mod factor;
pub mod math;
pub mod primality;
pub mod rsa;

pub use budget::Budget;
pub use curve::Curve;
pub use ec::Point;
pub use ecdlp::{DiscreteLog, RhoSolver};
pub use error::{Error, Result};
pub use factor::{Factorization, Fermat, PollardRho, Strategy, TrialDivision};
pub use rsa::RsaKey;
