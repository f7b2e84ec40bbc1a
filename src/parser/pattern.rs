//! Shape predicates for `Word` tokens.
//!
//! Names and numeric literals draw from the same character set, so the lexer
//! cannot tell them apart. Grammars narrow a `Word` to the shape they need
//! with these predicates at match time.

/// Punctuation allowed in hyperparameter names alongside alphanumerics.
pub const NAME_PUNCTUATION: &[char] = &[
    '_', '-', '@', '.', ':', ';', '\\', '/', '?', '!', '$', '%', '&', '*', '+', '<', '>',
];

pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || NAME_PUNCTUATION.contains(&c)
}

/// Whether the text is a legal hyperparameter name.
pub fn is_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_name_char)
}

/// `[+-]? digits`
pub fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]? digits? '.' digits` — the fraction carries no sign of its own.
pub fn is_float(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let Some((int_part, fraction)) = unsigned.split_once('.') else {
        return false;
    };
    int_part.bytes().all(|b| b.is_ascii_digit())
        && !fraction.is_empty()
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// `mantissa (e|E) [+-]? digits` with an integer or float mantissa.
pub fn is_e_notation(text: &str) -> bool {
    let Some((mantissa, exponent)) = text
        .split_once('e')
        .or_else(|| text.split_once('E'))
    else {
        return false;
    };
    (is_integer(mantissa) || is_float(mantissa)) && is_integer(exponent)
}

/// Whether the text has any numeric shape.
pub fn is_number(text: &str) -> bool {
    is_integer(text) || is_float(text) || is_e_notation(text)
}

/// Parse a numeric-shaped word. Returns `None` for anything `is_number`
/// rejects, even if `f64::from_str` would accept it (`inf`, `nan`, `1.`).
pub fn parse_number(text: &str) -> Option<f64> {
    if !is_number(text) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_the_documented_punctuation() {
        assert!(is_name("x"));
        assert!(is_name("solver.max-depth"));
        assert!(is_name("p@host:0/q?"));
        assert!(is_name("100"));
        assert!(!is_name(""));
        assert!(!is_name("a b"));
        assert!(!is_name("a,b"));
        assert!(!is_name("a{b"));
    }

    #[test]
    fn integer_shapes() {
        assert!(is_integer("0"));
        assert!(is_integer("-17"));
        assert!(is_integer("+4"));
        assert!(!is_integer("1.5"));
        assert!(!is_integer("-"));
        assert!(!is_integer(""));
    }

    #[test]
    fn float_shapes() {
        assert!(is_float("0.5"));
        assert!(is_float("-.5"));
        assert!(is_float("+3.25"));
        assert!(!is_float("1."));
        assert!(!is_float("1"));
        assert!(!is_float("1.-5"));
    }

    #[test]
    fn e_notation_shapes() {
        assert!(is_e_notation("1e3"));
        assert!(is_e_notation("-2.5E-4"));
        assert!(!is_e_notation("e3"));
        assert!(!is_e_notation("1e"));
        assert!(!is_e_notation("1e3.5"));
    }

    #[test]
    fn parse_number_follows_the_shape_predicates() {
        assert_eq!(parse_number("0.03125"), Some(0.03125));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("x"), None);
    }
}
