//! # paramspace
//!
//! Typed hyperparameter configuration spaces and converters for the flat
//! text formats used by algorithm-configuration tools.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! format    → pcs / irace readers and writers
//!   ↓
//! parser    → Logos lexer, line classifier, cursor matchers
//!   ↓
//! space     → ConfigurationSpace, hyperparameters, conditions, forbidden
//! ```
//!
//! A [`space::ConfigurationSpace`] owns named hyperparameters (continuous,
//! categorical, constant), activation conditions gating child parameters on
//! parent values, and forbidden value combinations. The [`format`] module
//! round-trips spaces through two line-oriented dialects:
//!
//! ```
//! use paramspace::format::pcs;
//!
//! let space = pcs::read("kernel categorical {rbf, poly} [rbf]\ngamma real [0.001, 8.0] [1.0]log\ngamma | kernel == rbf\n")?;
//! assert_eq!(space.len(), 2);
//! let text = pcs::write(&space)?;
//! assert_eq!(pcs::read(&text)?, space);
//! # Ok::<(), paramspace::format::FormatError>(())
//! ```

// ============================================================================
// MODULES (dependency order: space → parser → format)
// ============================================================================

/// The model: configuration spaces, hyperparameters, conditions, forbidden
/// clauses
pub mod space;

/// Line-level parsing machinery: Logos lexer, classifier, token cursor
pub mod parser;

/// Format front ends: pcs and irace readers/writers
pub mod format;

// Re-export the model types most callers touch
pub use format::FormatError;
pub use space::{
    Categorical, Condition, ConfigurationSpace, Constant, Continuous, ForbiddenClause,
    Hyperparameter, SpaceError,
};
