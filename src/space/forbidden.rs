//! Forbidden value combinations.
//!
//! A forbidden clause names a combination of parameter values that no valid
//! configuration may take. The text formats only express conjunctions of
//! equalities; the `In` variant is an in-memory convenience that writers
//! expand into one equality conjunction per member value.

use smol_str::SmolStr;

use super::error::SpaceError;

/// A constraint that must never hold in a valid configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ForbiddenClause {
    /// The named parameter must not equal `value`.
    Equals { name: SmolStr, value: SmolStr },
    /// The named parameter must not take any of `values`. Never written to
    /// text directly; expanded on write.
    In { name: SmolStr, values: Vec<SmolStr> },
    /// All member constraints hold simultaneously.
    And(Vec<ForbiddenClause>),
}

/// Borrowed view of an atomic clause, as yielded by [`ForbiddenClause::leaves`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForbiddenLeaf<'a> {
    Equals { name: &'a str, value: &'a str },
    In { name: &'a str, values: &'a [SmolStr] },
}

impl ForbiddenClause {
    /// Single equality atomic.
    pub fn equals(name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        Self::Equals {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Membership atomic over a non-empty value set.
    pub fn in_set<I, S>(name: impl Into<SmolStr>, values: I) -> Result<Self, SpaceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let name = name.into();
        let values: Vec<SmolStr> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(SpaceError::validation(format!(
                "forbidden membership clause on '{name}' needs at least one value"
            )));
        }
        Ok(Self::In { name, values })
    }

    /// Conjunction of one or more clauses.
    pub fn and(members: Vec<ForbiddenClause>) -> Result<Self, SpaceError> {
        if members.is_empty() {
            return Err(SpaceError::validation(
                "a forbidden conjunction needs at least one member clause",
            ));
        }
        Ok(Self::And(members))
    }

    /// Descendant atomic clauses in visit order.
    pub fn leaves(&self) -> Vec<ForbiddenLeaf<'_>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<ForbiddenLeaf<'a>>) {
        match self {
            Self::Equals { name, value } => out.push(ForbiddenLeaf::Equals { name, value }),
            Self::In { name, values } => out.push(ForbiddenLeaf::In { name, values }),
            Self::And(members) => {
                for member in members {
                    member.collect_leaves(out);
                }
            }
        }
    }

    /// Names of all parameters referenced by this clause, in visit order.
    pub fn names(&self) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .map(|leaf| match leaf {
                ForbiddenLeaf::Equals { name, .. } | ForbiddenLeaf::In { name, .. } => name,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_rejects_empty() {
        assert!(ForbiddenClause::and(vec![]).is_err());
    }

    #[test]
    fn in_set_rejects_empty() {
        assert!(ForbiddenClause::in_set("a", Vec::<&str>::new()).is_err());
    }

    #[test]
    fn leaves_flatten_nested_conjunctions() {
        let clause = ForbiddenClause::and(vec![
            ForbiddenClause::equals("a", "1"),
            ForbiddenClause::and(vec![
                ForbiddenClause::equals("b", "2"),
                ForbiddenClause::in_set("c", ["3", "4"]).unwrap(),
            ])
            .unwrap(),
        ])
        .unwrap();
        assert_eq!(clause.names(), ["a", "b", "c"]);
        assert_eq!(clause.leaves().len(), 3);
    }
}
