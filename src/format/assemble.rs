//! Condition assembler: turns per-line condition facts into one top-level
//! condition per child.
//!
//! Lines are grouped by child in first-appearance order. A group with a
//! single leaf attaches as-is. A larger group combines every collected leaf
//! with one connective: `||` if that was the last connective parsed anywhere
//! in the group, otherwise `&&`. Keeping only the last-seen connective is
//! inherited behavior; see DESIGN.md.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::space::{Condition, ConfigurationSpace};

use super::error::FormatError;

/// How two condition clauses on one line were joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Connective {
    And,
    Or,
}

/// The facts parsed from one condition line.
#[derive(Debug)]
pub(crate) struct ConditionLine {
    pub child: SmolStr,
    pub leaves: Vec<Condition>,
    pub connective: Option<Connective>,
}

/// Group the parsed lines by child and attach one condition per child.
pub(crate) fn attach_conditions(
    space: &mut ConfigurationSpace,
    lines: Vec<ConditionLine>,
) -> Result<(), FormatError> {
    let mut groups: IndexMap<SmolStr, (Vec<Condition>, Option<Connective>)> = IndexMap::new();
    for line in lines {
        let entry = groups.entry(line.child).or_default();
        entry.0.extend(line.leaves);
        if line.connective.is_some() {
            entry.1 = line.connective;
        }
    }
    for (child, (mut leaves, connective)) in groups {
        tracing::trace!(child = %child, leaves = leaves.len(), "assembling condition");
        let condition = if leaves.len() == 1 {
            leaves.remove(0)
        } else if connective == Some(Connective::Or) {
            Condition::or(leaves)?
        } else {
            Condition::and(leaves)?
        };
        space.add_condition(condition)?;
    }
    Ok(())
}
