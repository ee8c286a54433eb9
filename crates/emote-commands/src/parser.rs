//! Turns a raw chat message into a command invocation.
//!
//! Grammar, loosely: `<prefix><name> [positional...] [--key value...]`, where
//! a value is a bare word, a double-quoted span, or a bracketed list. Parsing
//! is tolerant: text that fits none of the shapes is dropped, never rejected.

use crate::value::{parse_value, TypedValue};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `--name value`, `--name "quoted value"` or `--name [list]`.
static KEYWORD_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"--\w+ \w+|--\w+ ".*?"|--\w+ \[.*\]"#).expect("Invalid keyword flag regex pattern")
});

/// A parsed command, ready for lookup and argument binding.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    /// Lowercase command name without the prefix.
    pub name: String,
    /// Positional arguments in order of appearance.
    pub positional: Vec<TypedValue>,
    /// Keyword arguments; a repeated key keeps its last value.
    pub keyword: HashMap<String, TypedValue>,
}

/// Parses `raw` as a command for `prefix`.
///
/// Returns `None` when the text does not start with the prefix immediately
/// followed by at least one word character.
pub fn parse_command(prefix: &str, raw: &str) -> Option<CommandInvocation> {
    let rest = raw.strip_prefix(prefix)?;
    let name_len: usize = rest
        .chars()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    if name_len == 0 {
        return None;
    }

    let name = rest[..name_len].to_lowercase();
    let mut arguments = rest[name_len..].trim().to_string();

    let flags: Vec<String> = KEYWORD_FLAG
        .find_iter(&arguments)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut keyword = HashMap::new();
    for flag in flags {
        arguments = arguments.replace(&flag, "");
        let flag = flag.trim_start_matches('-');
        if let Some((key, value)) = flag.split_once(' ') {
            keyword.insert(key.to_string(), parse_value(value));
        }
    }

    let positional = tokenize(&arguments)
        .into_iter()
        .map(|token| parse_value(&token))
        .collect();

    Some(CommandInvocation {
        name,
        positional,
        keyword,
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_token_char(c: char) -> bool {
    is_word_char(c) || c == '.'
}

/// Splits positional text into bare words and double-quoted spans.
///
/// A bare word is a run of word or `.` characters that starts and ends on a
/// word boundary and touches no `"` on either side; when the full run does
/// not qualify, the longest qualifying prefix is taken. A quoted span is
/// `"` followed by one or more characters and the next `"` on the same line;
/// the token is the text between the quotes.
fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let is_word_at = |i: usize| i < len && is_word_char(chars[i]);
    let is_boundary = |i: usize| (i > 0 && is_word_char(chars[i - 1])) != is_word_at(i);

    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < len {
        if let Some(end) = bare_word_end(&chars, pos, &is_boundary) {
            tokens.push(chars[pos..end].iter().collect());
            pos = end;
            continue;
        }

        if let Some(end) = quoted_span_end(&chars, pos) {
            tokens.push(chars[pos + 1..end - 1].iter().collect());
            pos = end;
            continue;
        }

        pos += 1;
    }

    tokens
}

fn bare_word_end(chars: &[char], start: usize, is_boundary: &impl Fn(usize) -> bool) -> Option<usize> {
    if !is_boundary(start) || (start > 0 && chars[start - 1] == '"') {
        return None;
    }

    let run_end = chars[start..]
        .iter()
        .position(|&c| !is_token_char(c))
        .map_or(chars.len(), |offset| start + offset);

    (start + 1..=run_end)
        .rev()
        .find(|&end| is_boundary(end) && chars.get(end) != Some(&'"'))
}

fn quoted_span_end(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&'"') {
        return None;
    }

    match chars.get(start + 1) {
        None | Some('\n') => return None,
        Some(_) => {}
    }

    for (i, &c) in chars.iter().enumerate().skip(start + 2) {
        match c {
            '"' => return Some(i + 1),
            '\n' => return None,
            _ => {}
        }
    }
    None
}
