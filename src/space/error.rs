//! Error types for building a configuration space.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while constructing model elements or populating a space.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpaceError {
    /// A local invariant of a model element does not hold (bad range,
    /// default outside its domain, empty choice list, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A hyperparameter with this name is already part of the space.
    #[error("duplicate hyperparameter name: '{0}'")]
    DuplicateName(SmolStr),

    /// No hyperparameter with this name exists in the space.
    #[error("unknown hyperparameter: '{0}'")]
    UnknownName(SmolStr),
}

impl SpaceError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a duplicate-name error.
    pub fn duplicate(name: impl Into<SmolStr>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Create an unknown-name error.
    pub fn unknown(name: impl Into<SmolStr>) -> Self {
        Self::UnknownName(name.into())
    }
}
