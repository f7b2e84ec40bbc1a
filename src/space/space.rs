//! The configuration-space container.
//!
//! Owns all hyperparameters, conditions, and forbidden clauses. Parameters
//! live in an insertion-ordered map; conditions and forbidden clauses refer
//! to them by name and are only accepted once every referenced parameter
//! exists. The container is append-only: nothing is removed or mutated after
//! insertion.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::condition::Condition;
use super::error::SpaceError;
use super::forbidden::ForbiddenClause;
use super::hyperparameter::Hyperparameter;

/// A set of hyperparameters plus the rules relating them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSpace {
    hyperparameters: IndexMap<SmolStr, Hyperparameter>,
    conditions: Vec<Condition>,
    forbidden: Vec<ForbiddenClause>,
}

impl ConfigurationSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hyperparameter. Fails if the name is already taken; never
    /// overwrites.
    pub fn add_hyperparameter(
        &mut self,
        hyperparameter: impl Into<Hyperparameter>,
    ) -> Result<(), SpaceError> {
        let hyperparameter = hyperparameter.into();
        let name = SmolStr::new(hyperparameter.name());
        if self.hyperparameters.contains_key(&name) {
            return Err(SpaceError::duplicate(name));
        }
        tracing::trace!(name = %name, "adding hyperparameter");
        self.hyperparameters.insert(name, hyperparameter);
        Ok(())
    }

    /// Look up a hyperparameter by name.
    pub fn hyperparameter(&self, name: &str) -> Result<&Hyperparameter, SpaceError> {
        self.hyperparameters
            .get(name)
            .ok_or_else(|| SpaceError::unknown(name))
    }

    /// Whether a hyperparameter with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.hyperparameters.contains_key(name)
    }

    /// All hyperparameters in insertion order.
    pub fn hyperparameters(&self) -> impl Iterator<Item = &Hyperparameter> {
        self.hyperparameters.values()
    }

    /// Number of hyperparameters.
    pub fn len(&self) -> usize {
        self.hyperparameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hyperparameters.is_empty()
    }

    /// Attach a top-level condition. The child and every parent must already
    /// exist, and the child must not be gated by an earlier condition.
    pub fn add_condition(&mut self, condition: Condition) -> Result<(), SpaceError> {
        let child = condition.child();
        self.hyperparameter(child)?;
        for parent in condition.parents() {
            self.hyperparameter(parent)?;
        }
        if self.condition_for(child).is_some() {
            return Err(SpaceError::validation(format!(
                "'{child}' already has a condition attached"
            )));
        }
        self.conditions.push(condition);
        Ok(())
    }

    /// Top-level conditions in attachment order, one per gated child.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The condition gating `child`, if any.
    pub fn condition_for(&self, child: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.child() == child)
    }

    /// Attach a forbidden clause. Every referenced parameter must exist.
    pub fn add_forbidden_clause(&mut self, clause: ForbiddenClause) -> Result<(), SpaceError> {
        for name in clause.names() {
            self.hyperparameter(name)?;
        }
        self.forbidden.push(clause);
        Ok(())
    }

    /// Top-level forbidden clauses in attachment order.
    pub fn forbidden_clauses(&self) -> &[ForbiddenClause] {
        &self.forbidden
    }
}
