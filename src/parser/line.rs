//! Physical-line preprocessing and classification, shared by both formats.

/// Strip an inline comment (`#` to end of line), drop all quote characters,
/// and trim surrounding whitespace.
pub fn preprocess(raw: &str) -> String {
    let text = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let text: String = text.chars().filter(|c| !matches!(c, '\'' | '"')).collect();
    text.trim().to_string()
}

/// What a preprocessed line encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Empty after preprocessing.
    Blank,
    /// Contains the condition separator `|`.
    Condition,
    /// Contains neither `}` nor `]`: not a recognized construct.
    Skipped,
    /// Fully wrapped in `{`..`}`: a forbidden-clause literal.
    Forbidden,
    /// Anything else: a parameter declaration.
    Parameter,
}

/// Classify a preprocessed line. The order of the tests is part of the
/// contract: the separator test runs before anything else, and lines without
/// any closing bracket are skipped rather than rejected.
pub fn classify(line: &str) -> LineClass {
    if line.is_empty() {
        LineClass::Blank
    } else if line.contains('|') {
        LineClass::Condition
    } else if !line.contains('}') && !line.contains(']') {
        LineClass::Skipped
    } else if line.starts_with('{') && line.ends_with('}') {
        LineClass::Forbidden
    } else {
        LineClass::Parameter
    }
}
