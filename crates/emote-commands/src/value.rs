//! Typed literals parsed out of command arguments.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid integer regex pattern"));

static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("Invalid float regex pattern"));

/// Matches a bracketed span anywhere in the token, not only a whole-token list.
static LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]").expect("Invalid list regex pattern"));

/// A command argument after literal parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// `True` or `False`.
    Boolean(bool),
    /// Unsigned decimal digits that fit in an `i64`.
    Integer(i64),
    /// `digits.digits`.
    Float(f64),
    /// Comma separated values inside brackets.
    List(Vec<TypedValue>),
    /// Anything else.
    String(String),
}

impl TypedValue {
    /// Short type name used in argument errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "bool",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::List(_) => "list",
            Self::String(_) => "str",
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(true) => write!(f, "True"),
            Self::Boolean(false) => write!(f, "False"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Converts a raw token into the most specific value it spells.
///
/// Never fails: shapes that do not parse fall through to [`TypedValue::String`].
pub fn parse_value(token: &str) -> TypedValue {
    match token {
        "True" => return TypedValue::Boolean(true),
        "False" => return TypedValue::Boolean(false),
        _ => {}
    }

    if INTEGER.is_match(token) {
        if let Ok(value) = token.parse::<i64>() {
            return TypedValue::Integer(value);
        }
    }

    if FLOAT.is_match(token) {
        if let Ok(value) = token.parse::<f64>() {
            return TypedValue::Float(value);
        }
    }

    if LIST.is_match(token) {
        let inner = token.trim_start_matches('[').trim_end_matches(']');
        let items = inner
            .split(',')
            .map(str::trim)
            .map(|piece| {
                if piece == token {
                    TypedValue::String(strip_quotes(piece).to_string())
                } else {
                    parse_value(piece)
                }
            })
            .collect();
        return TypedValue::List(items);
    }

    TypedValue::String(strip_quotes(token).to_string())
}

/// Removes at most one leading and one trailing `"`.
fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}
