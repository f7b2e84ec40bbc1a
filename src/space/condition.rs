//! Activation conditions between hyperparameters.
//!
//! A condition gates a *child* parameter on the value of a *parent*
//! parameter. Leaves test equality, inequality, or set membership; `And` and
//! `Or` combine several leaves constraining the same child. Conditions refer
//! to parameters by name only; the owning space resolves the names.

use smol_str::SmolStr;

use super::error::SpaceError;

/// A rule making a child hyperparameter active only for certain parent values.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Active iff the parent equals `value`.
    Equals {
        child: SmolStr,
        parent: SmolStr,
        value: SmolStr,
    },
    /// Active iff the parent differs from `value`.
    NotEquals {
        child: SmolStr,
        parent: SmolStr,
        value: SmolStr,
    },
    /// Active iff the parent takes one of `values`.
    In {
        child: SmolStr,
        parent: SmolStr,
        values: Vec<SmolStr>,
    },
    /// All member conditions must hold.
    And(Vec<Condition>),
    /// At least one member condition must hold.
    Or(Vec<Condition>),
}

impl Condition {
    /// Equality leaf. Fails when child and parent are the same parameter.
    pub fn equals(
        child: impl Into<SmolStr>,
        parent: impl Into<SmolStr>,
        value: impl Into<SmolStr>,
    ) -> Result<Self, SpaceError> {
        let (child, parent) = distinct(child.into(), parent.into())?;
        Ok(Self::Equals {
            child,
            parent,
            value: value.into(),
        })
    }

    /// Inequality leaf. Fails when child and parent are the same parameter.
    pub fn not_equals(
        child: impl Into<SmolStr>,
        parent: impl Into<SmolStr>,
        value: impl Into<SmolStr>,
    ) -> Result<Self, SpaceError> {
        let (child, parent) = distinct(child.into(), parent.into())?;
        Ok(Self::NotEquals {
            child,
            parent,
            value: value.into(),
        })
    }

    /// Membership leaf over a non-empty value set.
    pub fn in_set<I, S>(
        child: impl Into<SmolStr>,
        parent: impl Into<SmolStr>,
        values: I,
    ) -> Result<Self, SpaceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let (child, parent) = distinct(child.into(), parent.into())?;
        let values: Vec<SmolStr> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(SpaceError::validation(format!(
                "membership condition on '{child}' needs at least one value"
            )));
        }
        Ok(Self::In {
            child,
            parent,
            values,
        })
    }

    /// Conjunction of at least two leaves constraining the same child.
    pub fn and(members: Vec<Condition>) -> Result<Self, SpaceError> {
        validate_members(&members, "AND")?;
        Ok(Self::And(members))
    }

    /// Disjunction of at least two leaves constraining the same child.
    pub fn or(members: Vec<Condition>) -> Result<Self, SpaceError> {
        validate_members(&members, "OR")?;
        Ok(Self::Or(members))
    }

    /// The gated child parameter.
    pub fn child(&self) -> &str {
        match self {
            Self::Equals { child, .. } | Self::NotEquals { child, .. } | Self::In { child, .. } => {
                child
            }
            Self::And(members) | Self::Or(members) => {
                members.first().map_or("", Condition::child)
            }
        }
    }

    /// Parent names referenced by this condition, in order.
    pub fn parents(&self) -> Vec<&str> {
        match self {
            Self::Equals { parent, .. }
            | Self::NotEquals { parent, .. }
            | Self::In { parent, .. } => vec![parent],
            Self::And(members) | Self::Or(members) => {
                members.iter().flat_map(Condition::parents).collect()
            }
        }
    }

    /// Whether this is a leaf (non-composite) condition.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::And(_) | Self::Or(_))
    }
}

fn distinct(child: SmolStr, parent: SmolStr) -> Result<(SmolStr, SmolStr), SpaceError> {
    if child == parent {
        return Err(SpaceError::validation(format!(
            "'{child}' cannot be conditioned on itself"
        )));
    }
    Ok((child, parent))
}

fn validate_members(members: &[Condition], label: &str) -> Result<(), SpaceError> {
    if members.len() < 2 {
        return Err(SpaceError::validation(format!(
            "an {label} conjunction needs at least two member conditions"
        )));
    }
    let mut child = None;
    for member in members {
        if !member.is_leaf() {
            return Err(SpaceError::validation(format!(
                "an {label} conjunction may only contain leaf conditions"
            )));
        }
        match child {
            None => child = Some(member.child()),
            Some(c) if c != member.child() => {
                return Err(SpaceError::validation(format!(
                    "an {label} conjunction must constrain a single child, found '{c}' and '{}'",
                    member.child()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}
