//! Reader and writer for the explicit pcs format.
//!
//! Parameter declarations carry an explicit type keyword:
//!
//! ```text
//! lr      real [0.001, 1.0] [0.1]log
//! depth   integer [1, 16] [4]
//! kernel  categorical {rbf, poly, linear} [rbf]
//! seed    {42} [42]
//! ```
//!
//! Conditions are separate lines (`child | parent == v`, `!=`, or
//! `in {v1, v2}`, clauses joined by `&&` or `||`), and forbidden clauses are
//! brace literals emitted as a lexicographically sorted trailing block.

use crate::parser::{Cursor, LineClass, TokenKind, classify, pattern, preprocess, tokenize};
use crate::space::{
    Categorical, Condition, ConfigurationSpace, Constant, Continuous, Hyperparameter,
};

use super::assemble::{ConditionLine, Connective, attach_conditions};
use super::error::FormatError;
use super::expand;

const FORMAT: &str = "pcs";

// =============================================================================
// Reading
// =============================================================================

/// Parse pcs text into a configuration space.
pub fn read(input: &str) -> Result<ConfigurationSpace, FormatError> {
    let mut space = ConfigurationSpace::new();
    let mut condition_lines: Vec<ConditionLine> = Vec::new();
    let mut forbidden_literals: Vec<(usize, String)> = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let number = index + 1;
        let line = preprocess(raw);
        match classify(&line) {
            LineClass::Blank => {}
            LineClass::Skipped => {
                tracing::trace!(line = number, "no recognized construct, skipping");
            }
            LineClass::Condition => {
                condition_lines.push(parse_condition_line(&line, number)?);
            }
            LineClass::Forbidden => forbidden_literals.push((number, line)),
            LineClass::Parameter => {
                let hyperparameter = parse_parameter(&line, number)?;
                space.add_hyperparameter(hyperparameter)?;
            }
        }
    }

    for (number, literal) in &forbidden_literals {
        let clause = expand::parse_literal(&space, *number, literal)?;
        space.add_forbidden_clause(clause)?;
    }
    attach_conditions(&mut space, condition_lines)?;

    tracing::debug!(
        parameters = space.len(),
        conditions = space.conditions().len(),
        forbidden = space.forbidden_clauses().len(),
        "read pcs input"
    );
    Ok(space)
}

/// The fields of a matched parameter declaration, before validation.
enum ParamFragment<'a> {
    Continuous {
        name: &'a str,
        integer: bool,
        lower: f64,
        upper: f64,
        default: f64,
        log: bool,
    },
    Categorical {
        name: &'a str,
        choices: Vec<&'a str>,
        default: &'a str,
    },
    Constant {
        name: &'a str,
        value: &'a str,
    },
}

fn parse_parameter(line: &str, number: usize) -> Result<Hyperparameter, FormatError> {
    let tokens = tokenize(line);
    let cursor = Cursor::new(&tokens);
    let fragment = match_continuous(cursor)
        .or_else(|| match_categorical(cursor))
        .or_else(|| match_constant(cursor))
        .ok_or_else(|| FormatError::unparsable_parameter(number, line))?;

    let hyperparameter = match fragment {
        ParamFragment::Continuous {
            name,
            integer,
            lower,
            upper,
            default,
            log,
        } => {
            let mut parameter = Continuous::new(name, lower, upper, default)?;
            if integer {
                parameter = parameter.integer();
            }
            if log {
                parameter = parameter.logscale();
            }
            Hyperparameter::from(parameter)
        }
        ParamFragment::Categorical {
            name,
            choices,
            default,
        } => Categorical::new(name, choices, default)?.into(),
        ParamFragment::Constant { name, value } => Constant::new(name, value)?.into(),
    };
    Ok(hyperparameter)
}

/// `name (integer|real) [lower, upper] [default] log?`
fn match_continuous(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    let integer = if c.keyword("integer") {
        true
    } else if c.keyword("real") {
        false
    } else {
        return None;
    };
    c.eat(TokenKind::LBracket).then_some(())?;
    let lower = c.number()?;
    c.eat(TokenKind::Comma).then_some(())?;
    let upper = c.number()?;
    c.eat(TokenKind::RBracket).then_some(())?;
    c.eat(TokenKind::LBracket).then_some(())?;
    let default = c.number()?;
    c.eat(TokenKind::RBracket).then_some(())?;
    let log = c.keyword("log");
    c.done().then_some(())?;
    Some(ParamFragment::Continuous {
        name,
        integer,
        lower,
        upper,
        default,
        log,
    })
}

/// `name categorical {c1, c2, ...} [default]`
fn match_categorical(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    c.keyword("categorical").then_some(())?;
    c.eat(TokenKind::LBrace).then_some(())?;
    let choices = match_choice_list(&mut c)?;
    c.eat(TokenKind::RBrace).then_some(())?;
    c.eat(TokenKind::LBracket).then_some(())?;
    let default = c.word()?;
    c.eat(TokenKind::RBracket).then_some(())?;
    c.done().then_some(())?;
    Some(ParamFragment::Categorical {
        name,
        choices,
        default,
    })
}

/// `name {value} [value]` — the shape the writer uses for constants. Both
/// occurrences must agree.
fn match_constant(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    c.eat(TokenKind::LBrace).then_some(())?;
    let value = c.word()?;
    c.eat(TokenKind::RBrace).then_some(())?;
    c.eat(TokenKind::LBracket).then_some(())?;
    let default = c.word()?;
    c.eat(TokenKind::RBracket).then_some(())?;
    c.done().then_some(())?;
    (value == default).then_some(())?;
    Some(ParamFragment::Constant { name, value })
}

fn match_choice_list<'a>(c: &mut Cursor<'a>) -> Option<Vec<&'a str>> {
    let mut choices = vec![c.word()?];
    while c.eat(TokenKind::Comma) {
        choices.push(c.word()?);
    }
    Some(choices)
}

/// `child | clause (&& clause | || clause)*`
fn parse_condition_line(line: &str, number: usize) -> Result<ConditionLine, FormatError> {
    let unparsable = || FormatError::unparsable_condition(number, line);
    let tokens = tokenize(line);
    let mut c = Cursor::new(&tokens);
    let child = c.word().ok_or_else(unparsable)?;
    if !c.eat(TokenKind::Pipe) {
        return Err(unparsable());
    }
    let mut leaves = Vec::new();
    let mut connective = None;
    loop {
        leaves.push(parse_clause(&mut c, child).ok_or_else(unparsable)??);
        if c.eat(TokenKind::AmpAmp) {
            connective = Some(Connective::And);
        } else if c.eat(TokenKind::PipePipe) {
            connective = Some(Connective::Or);
        } else {
            break;
        }
    }
    if !c.done() {
        return Err(unparsable());
    }
    Ok(ConditionLine {
        child: child.into(),
        leaves,
        connective,
    })
}

/// One clause: `parent == value`, `parent != value`, or `parent in {v1, ...}`.
/// Outer `Option` is the grammar match, inner `Result` the model validation.
fn parse_clause(
    c: &mut Cursor<'_>,
    child: &str,
) -> Option<Result<Condition, crate::space::SpaceError>> {
    let parent = c.word()?;
    if c.eat(TokenKind::EqEq) {
        let value = c.word()?;
        Some(Condition::equals(child, parent, value))
    } else if c.eat(TokenKind::BangEq) {
        let value = c.word()?;
        Some(Condition::not_equals(child, parent, value))
    } else if c.keyword("in") {
        // The braces around the value set are optional for a single value.
        if c.eat(TokenKind::LBrace) {
            let values = match_value_list(c)?;
            c.eat(TokenKind::RBrace).then_some(())?;
            Some(Condition::in_set(child, parent, values))
        } else {
            let value = c.word()?;
            Some(Condition::in_set(child, parent, [value]))
        }
    } else {
        None
    }
}

fn match_value_list<'a>(c: &mut Cursor<'a>) -> Option<Vec<&'a str>> {
    let mut values = vec![c.word()?];
    while c.eat(TokenKind::Comma) {
        values.push(c.word()?);
    }
    Some(values)
}

// =============================================================================
// Writing
// =============================================================================

/// Render a configuration space as pcs text.
pub fn write(space: &ConfigurationSpace) -> Result<String, FormatError> {
    let mut parameter_lines = Vec::new();
    for hyperparameter in space.hyperparameters() {
        if !pattern::is_name(hyperparameter.name()) {
            return Err(FormatError::illegal_name(FORMAT, hyperparameter.name()));
        }
        parameter_lines.push(render_parameter(hyperparameter));
    }

    let mut condition_lines = Vec::new();
    for condition in space.conditions() {
        condition_lines.push(render_condition(condition)?);
    }

    let mut forbidden_lines = Vec::new();
    for clause in space.forbidden_clauses() {
        forbidden_lines.extend(expand::clause_lines(clause));
    }
    forbidden_lines.sort();

    tracing::debug!(
        parameters = parameter_lines.len(),
        conditions = condition_lines.len(),
        forbidden = forbidden_lines.len(),
        "writing pcs output"
    );

    let blocks: Vec<String> = [parameter_lines, condition_lines, forbidden_lines]
        .into_iter()
        .filter(|block| !block.is_empty())
        .map(|block| block.join("\n"))
        .collect();
    Ok(blocks.join("\n\n"))
}

fn render_parameter(hyperparameter: &Hyperparameter) -> String {
    match hyperparameter {
        Hyperparameter::Continuous(p) => {
            let prefix = match p.quantization() {
                Some(q) => format!("Q{}_", q as i64),
                None => String::new(),
            };
            let log = if p.is_log() { "log" } else { "" };
            if p.is_integer() {
                format!(
                    "{prefix}{} integer [{}, {}] [{}]{log}",
                    p.name(),
                    p.lower() as i64,
                    p.upper() as i64,
                    p.default() as i64,
                )
            } else {
                format!(
                    "{prefix}{} real [{}, {}] [{}]{log}",
                    p.name(),
                    p.lower(),
                    p.upper(),
                    p.default(),
                )
            }
        }
        Hyperparameter::Categorical(p) => {
            let choices: Vec<&str> = p.choices().iter().map(|c| c.as_str()).collect();
            format!(
                "{} categorical {{{}}} [{}]",
                p.name(),
                choices.join(", "),
                p.default(),
            )
        }
        Hyperparameter::Constant(p) => {
            format!("{} {{{}}} [{}]", p.name(), p.value(), p.value())
        }
    }
}

fn render_condition(condition: &Condition) -> Result<String, FormatError> {
    let clauses = match condition {
        Condition::And(members) => {
            let rendered: Result<Vec<_>, _> = members.iter().map(render_clause).collect();
            rendered?.join(" && ")
        }
        Condition::Or(members) => {
            let rendered: Result<Vec<_>, _> = members.iter().map(render_clause).collect();
            rendered?.join(" || ")
        }
        leaf => render_clause(leaf)?,
    };
    Ok(format!("{} | {clauses}", condition.child()))
}

fn render_clause(condition: &Condition) -> Result<String, FormatError> {
    match condition {
        Condition::Equals { parent, value, .. } => Ok(format!("{parent} == {value}")),
        Condition::NotEquals { parent, value, .. } => Ok(format!("{parent} != {value}")),
        Condition::In {
            parent, values, ..
        } => {
            let values: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
            Ok(format!("{parent} in {{{}}}", values.join(", ")))
        }
        Condition::And(_) | Condition::Or(_) => Err(FormatError::unsupported(
            FORMAT,
            "a nested condition conjunction",
        )),
    }
}
