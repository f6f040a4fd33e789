//! Validation error types

use std::fmt;

/// Validation error for request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Parameter was supplied but is not a base-10 integer
    InvalidInteger { field: &'static str },
}

impl ValidationError {
    /// Name of the offending parameter.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInteger { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInteger { field } => write!(f, "Invalid {} parameter", field),
        }
    }
}

impl std::error::Error for ValidationError {}
