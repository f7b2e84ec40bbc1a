//! Domain model: hyperparameters, conditions, forbidden clauses, and the
//! configuration space that owns them.

mod condition;
mod error;
mod forbidden;
mod hyperparameter;
#[allow(clippy::module_inception)]
mod space;

pub use condition::Condition;
pub use error::SpaceError;
pub use forbidden::{ForbiddenClause, ForbiddenLeaf};
pub use hyperparameter::{Categorical, Constant, Continuous, Hyperparameter};
pub use space::ConfigurationSpace;
