//! Error types and result alias for the crate.
//!
//! Construction is the only fallible surface: simulators assume validated
//! inputs and fail fast on violations instead of clamping. A `NaN` estimate
//! before the first sample is a defined value, not an error.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
