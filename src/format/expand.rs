//! Forbidden-clause engine: parsing the `{name=value, ...}` literals both
//! formats share, and expanding membership atomics on write.
//!
//! The formats express forbidden combinations only as conjunctions of
//! equalities, so a clause containing `In` atomics is written as the
//! Cartesian product over their value sets, one equality conjunction per
//! combination.

use smol_str::SmolStr;

use crate::parser::{Cursor, TokenKind, tokenize};
use crate::space::{ConfigurationSpace, ForbiddenClause, ForbiddenLeaf};

use super::error::FormatError;

/// Parse one brace-wrapped forbidden literal against an already populated
/// space. Every referenced parameter must exist; the only supported operator
/// is `=`.
pub(crate) fn parse_literal(
    space: &ConfigurationSpace,
    line: usize,
    text: &str,
) -> Result<ForbiddenClause, FormatError> {
    let tokens = tokenize(text);
    let mut cursor = Cursor::new(&tokens);
    if !cursor.eat(TokenKind::LBrace) {
        return Err(FormatError::unparsable_forbidden(line, text));
    }
    let mut members = Vec::new();
    loop {
        let Some(name) = cursor.word() else {
            return Err(FormatError::unparsable_forbidden(line, text));
        };
        if !cursor.eat(TokenKind::Eq) {
            // Distinguish a wrong operator from general garbage.
            return match cursor.peek() {
                Some(token) if matches!(token.kind, TokenKind::EqEq | TokenKind::BangEq) => {
                    Err(FormatError::forbidden_operator(line, token.text))
                }
                Some(token) if token.kind == TokenKind::Word && token.text == "in" => {
                    Err(FormatError::forbidden_operator(line, token.text))
                }
                _ => Err(FormatError::unparsable_forbidden(line, text)),
            };
        }
        let Some(value) = cursor.word() else {
            return Err(FormatError::unparsable_forbidden(line, text));
        };
        space.hyperparameter(name)?;
        members.push(ForbiddenClause::equals(name, value));
        if !cursor.eat(TokenKind::Comma) {
            break;
        }
    }
    if !cursor.eat(TokenKind::RBrace) || !cursor.done() {
        return Err(FormatError::unparsable_forbidden(line, text));
    }
    Ok(ForbiddenClause::and(members)?)
}

/// Render a clause as the textual lines the formats understand, expanding
/// membership atomics into the product of single-equality conjunctions.
pub(crate) fn clause_lines(clause: &ForbiddenClause) -> Vec<String> {
    let mut memberships: Vec<(&str, &[SmolStr])> = Vec::new();
    let mut plain: Vec<(&str, &str)> = Vec::new();
    for leaf in clause.leaves() {
        match leaf {
            ForbiddenLeaf::Equals { name, value } => plain.push((name, value)),
            ForbiddenLeaf::In { name, values } => memberships.push((name, values)),
        }
    }
    if memberships.is_empty() {
        return vec![render(&plain)];
    }
    let sets: Vec<&[SmolStr]> = memberships.iter().map(|(_, values)| *values).collect();
    cartesian(&sets)
        .into_iter()
        .map(|combination| {
            let mut pairs: Vec<(&str, &str)> = memberships
                .iter()
                .zip(&combination)
                .map(|((name, _), value)| (*name, value.as_str()))
                .collect();
            pairs.extend_from_slice(&plain);
            render(&pairs)
        })
        .collect()
}

fn render(pairs: &[(&str, &str)]) -> String {
    let body: Vec<String> = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("{{{}}}", body.join(", "))
}

/// All combinations picking one element per set, varying the last set
/// fastest. Sets are non-empty by construction.
fn cartesian<'a>(sets: &[&'a [SmolStr]]) -> Vec<Vec<&'a SmolStr>> {
    let mut rows: Vec<Vec<&SmolStr>> = vec![Vec::new()];
    for set in sets {
        let mut next = Vec::with_capacity(rows.len() * set.len());
        for row in &rows {
            for value in *set {
                let mut extended = row.clone();
                extended.push(value);
                next.push(extended);
            }
        }
        rows = next;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{Categorical, ConfigurationSpace, Continuous};

    fn sample_space() -> ConfigurationSpace {
        let mut space = ConfigurationSpace::new();
        space
            .add_hyperparameter(Categorical::new("a", ["1", "2"], "1").unwrap())
            .unwrap();
        space
            .add_hyperparameter(Continuous::new("b", 0.0, 10.0, 3.0).unwrap())
            .unwrap();
        space
    }

    #[test]
    fn literal_parses_into_an_equality_conjunction() {
        let space = sample_space();
        let clause = parse_literal(&space, 1, "{a=1, b=3}").unwrap();
        assert_eq!(clause.names(), ["a", "b"]);
        assert_eq!(clause_lines(&clause), ["{a=1, b=3}"]);
    }

    #[test]
    fn literal_rejects_unknown_parameters() {
        let space = sample_space();
        let err = parse_literal(&space, 4, "{missing=1}").unwrap_err();
        assert!(matches!(err, FormatError::Space(_)));
    }

    #[test]
    fn literal_rejects_non_equality_operators() {
        let space = sample_space();
        assert_eq!(
            parse_literal(&space, 2, "{a != 1}").unwrap_err(),
            FormatError::forbidden_operator(2, "!="),
        );
        assert_eq!(
            parse_literal(&space, 3, "{a in 1}").unwrap_err(),
            FormatError::forbidden_operator(3, "in"),
        );
    }

    #[test]
    fn literal_rejects_trailing_garbage() {
        let space = sample_space();
        assert!(matches!(
            parse_literal(&space, 1, "{a=1} {b=3}").unwrap_err(),
            FormatError::UnparsableForbidden { .. }
        ));
    }

    #[test]
    fn membership_expands_into_the_product() {
        let clause = ForbiddenClause::and(vec![
            ForbiddenClause::in_set("a", ["1", "2"]).unwrap(),
            ForbiddenClause::equals("b", "3"),
        ])
        .unwrap();
        assert_eq!(clause_lines(&clause), ["{a=1, b=3}", "{a=2, b=3}"]);
    }

    #[test]
    fn two_memberships_expand_into_four_lines() {
        let clause = ForbiddenClause::and(vec![
            ForbiddenClause::in_set("a", ["1", "2"]).unwrap(),
            ForbiddenClause::in_set("b", ["x", "y"]).unwrap(),
        ])
        .unwrap();
        assert_eq!(
            clause_lines(&clause),
            ["{a=1, b=x}", "{a=1, b=y}", "{a=2, b=x}", "{a=2, b=y}"]
        );
    }
}
