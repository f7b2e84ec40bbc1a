//! Reader and writer for the compact irace format.
//!
//! The writer emits switch-style declarations:
//!
//! ```text
//! kernel 'kernel ' c (rbf,poly,linear)
//! depth 'depth ' i (1, 16)
//! lr 'lr ' r (0.001, 1.0)
//! ```
//!
//! (with the switch spelled `'--name '`), splicing a parameter's activation
//! condition onto its own declaration line: `<decl> | parent in c(v1, v2)`.
//! The reader additionally understands the older bracket shapes
//! (`name [lo, up] [default] il?`, `name {c1, c2} [default]`,
//! `child | parent in {v1, v2}`) so legacy files keep parsing. Defaults are
//! not representable in the switch shapes: a switch continuous falls back to
//! its lower bound, a switch categorical to its first choice.
//!
//! This format is AND-only: `||` and `!=` conditions cannot be read, and
//! writing them fails with an unsupported-construct error.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::parser::{Cursor, LineClass, TokenKind, classify, pattern, preprocess, tokenize};
use crate::space::{Categorical, Condition, ConfigurationSpace, Continuous, Hyperparameter};

use super::assemble::{ConditionLine, attach_conditions};
use super::error::FormatError;
use super::expand;

const FORMAT: &str = "irace";

// =============================================================================
// Reading
// =============================================================================

/// Parse irace text into a configuration space.
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
                // Switch declarations carry parens but no closing bracket, so
                // the shared classifier cannot see them. Any line matching a
                // declaration grammar is a parameter; the rest skip as usual.
                match parse_parameter(&line, number) {
                    Ok(hyperparameter) => space.add_hyperparameter(hyperparameter)?,
                    Err(FormatError::UnparsableParameter { .. }) => {
                        tracing::trace!(line = number, "no recognized construct, skipping");
                    }
                    Err(other) => return Err(other),
                }
            }
            LineClass::Condition => {
                let (parameter, condition) = parse_condition_entry(&line, number)?;
                if let Some(parameter) = parameter {
                    space.add_hyperparameter(parameter)?;
                }
                condition_lines.push(condition);
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
        "read irace input"
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
}

fn parse_parameter(line: &str, number: usize) -> Result<Hyperparameter, FormatError> {
    let tokens = tokenize(line);
    let cursor = Cursor::new(&tokens);
    let fragment = match_bracket_continuous(cursor)
        .or_else(|| match_bracket_categorical(cursor))
        .or_else(|| match_switch_continuous(cursor))
        .or_else(|| match_switch_categorical(cursor))
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
    };
    Ok(hyperparameter)
}

/// `name [lower, upper] [default] flags?` with flags drawn from `i` (integer)
/// and `l` (log).
fn match_bracket_continuous(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    c.eat(TokenKind::LBracket).then_some(())?;
    let lower = c.number()?;
    c.eat(TokenKind::Comma).then_some(())?;
    let upper = c.number()?;
    c.eat(TokenKind::RBracket).then_some(())?;
    c.eat(TokenKind::LBracket).then_some(())?;
    let default = c.number()?;
    c.eat(TokenKind::RBracket).then_some(())?;
    let (integer, log) = match c.word() {
        Some(flags) if !flags.is_empty() && flags.chars().all(|ch| matches!(ch, 'i' | 'l')) => {
            (flags.contains('i'), flags.contains('l'))
        }
        Some(_) => return None,
        None => (false, false),
    };
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

/// `name {c1, c2, ...} [default]`
fn match_bracket_categorical(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    c.eat(TokenKind::LBrace).then_some(())?;
    let choices = match_list(&mut c)?;
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

/// `name --switch (i|r) (lower, upper)` — the writer's own output shape
/// (quotes are stripped before parsing). No default in the text; the lower
/// bound stands in.
fn match_switch_continuous(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    let _switch = c.word()?;
    let integer = if c.keyword("i") {
        true
    } else if c.keyword("r") {
        false
    } else {
        return None;
    };
    c.eat(TokenKind::LParen).then_some(())?;
    let lower = c.number()?;
    c.eat(TokenKind::Comma).then_some(())?;
    let upper = c.number()?;
    c.eat(TokenKind::RParen).then_some(())?;
    c.done().then_some(())?;
    Some(ParamFragment::Continuous {
        name,
        integer,
        lower,
        upper,
        default: lower,
        log: false,
    })
}

/// `name --switch c (c1,c2,...)` — defaults to the first choice.
fn match_switch_categorical(mut c: Cursor<'_>) -> Option<ParamFragment<'_>> {
    let name = c.word()?;
    let _switch = c.word()?;
    c.keyword("c").then_some(())?;
    c.eat(TokenKind::LParen).then_some(())?;
    let choices = match_list(&mut c)?;
    c.eat(TokenKind::RParen).then_some(())?;
    c.done().then_some(())?;
    Some(ParamFragment::Categorical {
        name,
        default: choices[0],
        choices,
    })
}

fn match_list<'a>(c: &mut Cursor<'a>) -> Option<Vec<&'a str>> {
    let mut items = vec![c.word()?];
    while c.eat(TokenKind::Comma) {
        items.push(c.word()?);
    }
    Some(items)
}

/// A line containing the condition separator: either a plain condition
/// (`child | facts`) or a declaration with its condition spliced on
/// (`<decl> | facts`), which is what the writer emits.
fn parse_condition_entry(
    line: &str,
    number: usize,
) -> Result<(Option<Hyperparameter>, ConditionLine), FormatError> {
    let unparsable = || FormatError::unparsable_condition(number, line);
    let Some((left, right)) = line.split_once('|') else {
        return Err(unparsable());
    };
    let (left, right) = (left.trim(), right.trim());

    let left_tokens = tokenize(left);
    let bare_child = {
        let mut probe = Cursor::new(&left_tokens);
        probe.word().filter(|_| probe.done())
    };
    let (parameter, child): (Option<Hyperparameter>, SmolStr) = match bare_child {
        Some(child) => (None, child.into()),
        None => match parse_parameter(left, number) {
            Ok(parameter) => {
                let child = SmolStr::new(parameter.name());
                (Some(parameter), child)
            }
            Err(FormatError::UnparsableParameter { .. }) => return Err(unparsable()),
            Err(other) => return Err(other),
        },
    };

    let leaves = parse_facts(right, &child).ok_or_else(unparsable)??;
    Ok((
        parameter,
        ConditionLine {
            child,
            leaves,
            connective: None,
        },
    ))
}

/// `fact (&& fact)*` where fact is `parent in (c|i|r)?(v1, v2)` or
/// `parent in {v1, v2}`. A single value reads as an equality.
/// Outer `Option` is the grammar match, inner `Result` the model validation.
fn parse_facts(
    text: &str,
    child: &str,
) -> Option<Result<Vec<Condition>, crate::space::SpaceError>> {
    let tokens = tokenize(text);
    let mut c = Cursor::new(&tokens);
    let mut leaves = Vec::new();
    loop {
        let parent = c.word()?;
        // `%in%` is how the R side spells the operator.
        if !c.keyword("in") && !c.keyword("%in%") {
            return None;
        }
        let values = if c.eat(TokenKind::LBrace) {
            let values = match_list(&mut c)?;
            c.eat(TokenKind::RBrace).then_some(())?;
            values
        } else {
            let mut probe = c;
            if let Some(tag) = probe.word() {
                if matches!(tag, "c" | "i" | "r") && probe.at(TokenKind::LParen) {
                    c = probe;
                }
            }
            c.eat(TokenKind::LParen).then_some(())?;
            let values = match_list(&mut c)?;
            c.eat(TokenKind::RParen).then_some(())?;
            values
        };
        let leaf = if values.len() == 1 {
            Condition::equals(child, parent, values[0])
        } else {
            Condition::in_set(child, parent, values)
        };
        match leaf {
            Ok(leaf) => leaves.push(leaf),
            Err(err) => return Some(Err(err)),
        }
        if !c.eat(TokenKind::AmpAmp) {
            break;
        }
    }
    c.done().then_some(())?;
    Some(Ok(leaves))
}

// =============================================================================
// Writing
// =============================================================================

/// Render a configuration space as irace text.
pub fn write(space: &ConfigurationSpace) -> Result<String, FormatError> {
    // Conditions are rendered first so each can be spliced onto the line of
    // the parameter it gates.
    let mut spliced: IndexMap<&str, String> = IndexMap::new();
    for condition in space.conditions() {
        spliced.insert(condition.child(), render_condition(space, condition)?);
    }

    let mut parameter_lines = Vec::new();
    for hyperparameter in space.hyperparameters() {
        if !pattern::is_name(hyperparameter.name()) {
            return Err(FormatError::illegal_name(FORMAT, hyperparameter.name()));
        }
        let mut line = render_parameter(hyperparameter);
        if let Some(condition) = spliced.get(hyperparameter.name()) {
            line.push_str(" | ");
            line.push_str(condition);
        }
        parameter_lines.push(line);
    }

    let mut forbidden_lines = Vec::new();
    for clause in space.forbidden_clauses() {
        forbidden_lines.extend(expand::clause_lines(clause));
    }

    tracing::debug!(
        parameters = parameter_lines.len(),
        conditions = spliced.len(),
        forbidden = forbidden_lines.len(),
        "writing irace output"
    );

    let blocks: Vec<String> = [parameter_lines, forbidden_lines]
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
            if p.is_integer() {
                format!(
                    "{prefix}{} '--{} ' i ({}, {})",
                    p.name(),
                    p.name(),
                    p.lower() as i64,
                    p.upper() as i64,
                )
            } else {
                format!(
                    "{prefix}{} '--{} ' r ({}, {})",
                    p.name(),
                    p.name(),
                    p.lower(),
                    p.upper(),
                )
            }
        }
        Hyperparameter::Categorical(p) => {
            let choices: Vec<&str> = p.choices().iter().map(|c| c.as_str()).collect();
            format!("{} '--{} ' c ({})", p.name(), p.name(), choices.join(","))
        }
        Hyperparameter::Constant(p) => {
            format!("{} '--{} ' c ({})", p.name(), p.name(), p.value())
        }
    }
}

fn render_condition(
    space: &ConfigurationSpace,
    condition: &Condition,
) -> Result<String, FormatError> {
    match condition {
        Condition::Or(_) => Err(FormatError::unsupported(FORMAT, "OR conditions")),
        Condition::And(members) => {
            let rendered: Result<Vec<_>, _> =
                members.iter().map(|m| render_fact(space, m)).collect();
            Ok(rendered?.join(" && "))
        }
        leaf => render_fact(space, leaf),
    }
}

fn render_fact(space: &ConfigurationSpace, condition: &Condition) -> Result<String, FormatError> {
    match condition {
        Condition::Equals { parent, value, .. } => {
            let tag = parent_tag(space, parent)?;
            Ok(format!("{parent} in {tag}({value})"))
        }
        Condition::In {
            parent, values, ..
        } => {
            let tag = parent_tag(space, parent)?;
            let values: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
            Ok(format!("{parent} in {tag}({})", values.join(", ")))
        }
        Condition::NotEquals { .. } => Err(FormatError::unsupported(FORMAT, "'!=' conditions")),
        Condition::And(_) | Condition::Or(_) => Err(FormatError::unsupported(
            FORMAT,
            "a nested condition conjunction",
        )),
    }
}

/// The value-type tag irace expects on condition value lists.
fn parent_tag(space: &ConfigurationSpace, parent: &str) -> Result<char, FormatError> {
    let tag = match space.hyperparameter(parent)? {
        Hyperparameter::Categorical(_) | Hyperparameter::Constant(_) => 'c',
        Hyperparameter::Continuous(p) if p.is_integer() => 'i',
        Hyperparameter::Continuous(_) => 'r',
    };
    Ok(tag)
}
