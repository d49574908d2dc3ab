//! `{token}` placeholder detection and substitution.
//!
//! A token is `{` followed by one or more of `[A-Za-z0-9_-]` and a closing
//! `}`. Anything else containing braces (code, JSON, `{}`) is left alone.
//!
//! Resolution never fails: a token whose value is missing or blank stays in
//! the text verbatim and its name is reported in
//! [`VariableResolution::unfilled`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of resolving a text against a value map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableResolution {
    /// Text with every filled token replaced by its trimmed value.
    pub resolved_text: String,
    /// Unique token names in first-seen order.
    pub detected: Vec<String>,
    /// Detected names that had no non-blank value, in first-seen order.
    pub unfilled: Vec<String>,
}

/// A token occurrence: byte range of `{name}` in the source and the name.
struct Token<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Scan `text` for well-formed tokens, left to right, non-overlapping.
fn scan(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('{') {
        let open = pos + offset;
        let name_start = open + 1;
        let name_len = text[name_start..]
            .chars()
            .take_while(|c| is_token_char(*c))
            .count();
        let close = name_start + name_len;

        if name_len > 0 && bytes.get(close) == Some(&b'}') {
            tokens.push(Token {
                start: open,
                end: close + 1,
                name: &text[name_start..close],
            });
            pos = close + 1;
        } else {
            // Not a token; a later `{` may still open one.
            pos = name_start;
        }
    }

    tokens
}

/// Detect unique token names in first-seen order.
///
/// ```
/// use promptforge::variables::detect;
///
/// let names = detect("Hello {name}. Order {order_id}. Thanks {name}.");
/// assert_eq!(names, vec!["name", "order_id"]);
/// ```
pub fn detect(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in scan(text) {
        if !names.iter().any(|n| n == token.name) {
            names.push(token.name.to_string());
        }
    }
    names
}

/// Substitute tokens with their trimmed, non-blank values.
///
/// ```
/// use std::collections::BTreeMap;
/// use promptforge::variables::resolve;
///
/// let mut values = BTreeMap::new();
/// values.insert("name".to_string(), "Ada".to_string());
///
/// let result = resolve("Hello {name}. Order {order_id}. Thanks {name}.", &values);
/// assert_eq!(result.resolved_text, "Hello Ada. Order {order_id}. Thanks Ada.");
/// assert_eq!(result.unfilled, vec!["order_id"]);
/// ```
pub fn resolve(text: &str, values: &BTreeMap<String, String>) -> VariableResolution {
    let mut resolved_text = String::with_capacity(text.len());
    let mut detected: Vec<String> = Vec::new();
    let mut unfilled: Vec<String> = Vec::new();
    let mut copied_to = 0;

    for token in scan(text) {
        resolved_text.push_str(&text[copied_to..token.start]);
        copied_to = token.end;

        if !detected.iter().any(|n| n == token.name) {
            detected.push(token.name.to_string());
        }

        match values.get(token.name).map(|v| v.trim()) {
            Some(value) if !value.is_empty() => resolved_text.push_str(value),
            _ => {
                resolved_text.push_str(&text[token.start..token.end]);
                if !unfilled.iter().any(|n| n == token.name) {
                    unfilled.push(token.name.to_string());
                }
            }
        }
    }
    resolved_text.push_str(&text[copied_to..]);

    VariableResolution {
        resolved_text,
        detected,
        unfilled,
    }
}

/// Parse `key=value` pairs (as given on the command line) into a value map.
///
/// Later pairs override earlier ones. Pairs without `=` are returned as errors.
pub fn parse_assignments<I, S>(pairs: I) -> Result<BTreeMap<String, String>, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = BTreeMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("empty variable name in '{}'", pair));
        }
        values.insert(key.to_string(), value.to_string());
    }
    Ok(values)
}
