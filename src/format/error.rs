//! Error types for reading and writing the text formats.

use thiserror::Error;

use crate::space::SpaceError;

/// Errors raised while converting between text and a configuration space.
/// Parse variants carry the 1-based line number of the offending line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A line classified as a parameter declaration matched no declaration
    /// grammar.
    #[error("line {line}: could not parse parameter: '{text}'")]
    UnparsableParameter { line: usize, text: String },

    /// A line containing the condition separator did not match the condition
    /// grammar.
    #[error("line {line}: could not parse condition: '{text}'")]
    UnparsableCondition { line: usize, text: String },

    /// A forbidden-clause literal was malformed.
    #[error("line {line}: could not parse forbidden clause: '{text}'")]
    UnparsableForbidden { line: usize, text: String },

    /// A forbidden-clause literal used an operator other than `=`.
    #[error("line {line}: forbidden clauses support only '=', found '{operator}'")]
    UnsupportedForbiddenOperator { line: usize, operator: String },

    /// A hyperparameter name the space accepted is not a legal identifier
    /// for the target format.
    #[error("illegal hyperparameter name for {format}: '{name}'")]
    IllegalName { format: &'static str, name: String },

    /// The target format cannot express the construct it was asked to write.
    #[error("{format} cannot express {construct}")]
    UnsupportedConstruct {
        format: &'static str,
        construct: String,
    },

    /// A model-level failure while populating the space.
    #[error(transparent)]
    Space(#[from] SpaceError),
}

impl FormatError {
    pub fn unparsable_parameter(line: usize, text: impl Into<String>) -> Self {
        Self::UnparsableParameter {
            line,
            text: text.into(),
        }
    }

    pub fn unparsable_condition(line: usize, text: impl Into<String>) -> Self {
        Self::UnparsableCondition {
            line,
            text: text.into(),
        }
    }

    pub fn unparsable_forbidden(line: usize, text: impl Into<String>) -> Self {
        Self::UnparsableForbidden {
            line,
            text: text.into(),
        }
    }

    pub fn forbidden_operator(line: usize, operator: impl Into<String>) -> Self {
        Self::UnsupportedForbiddenOperator {
            line,
            operator: operator.into(),
        }
    }

    pub fn illegal_name(format: &'static str, name: impl Into<String>) -> Self {
        Self::IllegalName {
            format,
            name: name.into(),
        }
    }

    pub fn unsupported(format: &'static str, construct: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            format,
            construct: construct.into(),
        }
    }
}
