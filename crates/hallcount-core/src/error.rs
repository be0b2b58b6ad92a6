use crate::constants::EINVAL;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A reset request that is not a decimal integer, or not the confirmation value.
    #[error("Invalid argument '{input}': {reason}")]
    InvalidArgument { input: String, reason: String },
}

impl Error {
    /// Create a new invalid argument error.
    pub fn invalid_argument(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Negative errno reported to attribute writers.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => -EINVAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
