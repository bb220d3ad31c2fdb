use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interpreter::RuntimeError;

/// A syntax tree as handed over by the parser.
///
/// Token atoms keep their raw text: `"\"hi\""` is a string literal, `"x"` or `"+"` a name.
/// The JSON form is the nested-array shape of the language itself: `["+", 1, ["*", 2, 3]]`.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Integer(i64),
    Float(f64),
    Atom(String),
    List(Vec<Expr>),
}

impl Expr {
    pub fn atom(s: &str) -> Expr { Expr::Atom(s.to_string()) }

    pub fn from_json(src: &str) -> Result<Expr, serde_json::Error> { serde_json::from_str(src) }

    pub fn to_json(&self) -> Result<String, serde_json::Error> { serde_json::to_string(self) }

    /// The tag of a compound form: `begin` for `(begin ...)`.
    pub fn head_tag(&self) -> Option<&str> {
        match self {
            Expr::List(items) => match items.first() {
                Some(Expr::Atom(tag)) => Some(tag.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    /// A name token, for forms that require one (`var`, `set`, parameters).
    pub fn as_name(&self, context: &str) -> Result<&str, RuntimeError> {
        match self {
            Expr::Atom(s) if is_identifier(s) => Ok(s.as_str()),
            _ => Err(RuntimeError::MalformedForm(format!("{} expects a name, got {}", context, self))),
        }
    }

    pub fn as_list(&self, context: &str) -> Result<&[Expr], RuntimeError> {
        match self {
            Expr::List(items) => Ok(items.as_slice()),
            _ => Err(RuntimeError::MalformedForm(format!("{} expects a list, got {}", context, self))),
        }
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self { Expr::Integer(n) }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self { Expr::Float(n) }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self { Expr::atom(s) }
}

impl From<Vec<Expr>> for Expr {
    fn from(items: Vec<Expr>) -> Self { Expr::List(items) }
}

/// Builds a list expression: `sexpr!["+", "x", 1i64]`.
#[macro_export]
macro_rules! sexpr {
    [$($item:expr),* $(,)?] => {
        $crate::interpreter::Expr::List(vec![$($crate::interpreter::Expr::from($item)),*])
    };
}

/// `[+\-*/<>=a-zA-Z][+\-*/<>=a-zA-Z0-9_]*`
pub fn is_identifier(token: &str) -> bool {
    fn operator_char(c: char) -> bool { matches!(c, '+' | '-' | '*' | '/' | '<' | '>' | '=') }

    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || operator_char(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || operator_char(c))
}

/// The content of a `"..."` token without its delimiters.
pub fn string_literal(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Integer(n) => write!(f, "{}", n),
            Expr::Float(n) => write!(f, "{:?}", n),
            Expr::Atom(s) => write!(f, "{}", s),
            Expr::List(items) => {
                let strs: Vec<String> = items.iter().map(|e| e.to_string()).collect();
                write!(f, "({})", strs.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod test_expr {
    use super::*;

    #[test]
    fn test_identifier_pattern() {
        for ok in ["x", "foo_bar", "x1", "+", "-", "<=", "VERSION", "set"] {
            assert!(is_identifier(ok), "{} should be a name", ok);
        }
        for bad in ["", "1x", "_x", "\"s\"", "a.b", "@", "x!"] {
            assert!(!is_identifier(bad), "{} should not be a name", bad);
        }
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("\"Hello\""), Some("Hello"));
        assert_eq!(string_literal("\"\""), Some(""));
        assert_eq!(string_literal("\""), None);
        assert_eq!(string_literal("Hello"), None);
    }

    #[test]
    fn test_json_shape() {
        let expr = Expr::from_json(r#"["begin", ["var", "x", 10], ["print", "\"hi\"", 1.5]]"#).unwrap();
        assert_eq!(
            expr,
            sexpr!["begin", sexpr!["var", "x", 10i64], sexpr!["print", "\"hi\"", 1.5f64]]
        );
        assert_eq!(expr.to_string(), "(begin (var x 10) (print \"hi\" 1.5))");
        assert_eq!(expr.head_tag(), Some("begin"));
        assert_eq!(Expr::from_json(&expr.to_json().unwrap()).unwrap(), expr);
    }
}
