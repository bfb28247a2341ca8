//! Error kinds shared by every attack in the crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome classification for attack runs.
///
/// `InvalidParameters` is a caller bug and should be surfaced
/// immediately. `NotFound` and `ResourceExceeded` are expected,
/// recoverable outcomes: the caller may retry with different
/// randomization or a larger budget, or report the attack as failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("search exhausted its bound without a result")]
    NotFound,

    #[error("iteration or time budget exceeded")]
    ResourceExceeded,
}

impl Error {
    /// True for the outcomes a caller may retry with fresh
    /// randomization or a larger budget.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::NotFound | Error::ResourceExceeded)
    }
}
