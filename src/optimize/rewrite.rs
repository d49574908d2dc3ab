//! Sentence-level prose rewriting.
//!
//! Lines are split into a prefix (indentation and list marker) and
//! sentences. Rewrites replace or remove sentences; a line is rebuilt only
//! when one of its sentences changed, so untouched lines keep their exact
//! spacing.

use regex::Regex;
use std::sync::LazyLock;

static LINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*+]\s+|\d+[.)]\s+|#{1,6}\s+)?").expect("static regex")
});

static PLEASANTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:hi|hello|hey)(?: there)?|thanks?(?: you)?(?: (?:so much|a lot|in advance))?|cheers|much appreciated)[\s,.!]*$",
    )
    .expect("static regex")
});

static HEDGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:hi|hello|hey)(?: there)?[,!.]?\s+)?(?:(?:could|can|would|will) you(?: please)?|please|kindly|i (?:would like|want|need) you to|i was wondering if you could)\s+",
    )
    .expect("static regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    Prose(String),
    Removed,
}

/// A line split for rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub prefix: String,
    pub sentences: Vec<Sentence>,
    original: String,
}

/// Split a line's body into sentences at `.`, `!` or `?` followed by
/// whitespace. Trailing whitespace is dropped.
fn split_sentences(body: &str) -> Vec<Sentence> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|next| next.is_whitespace());
        if boundary {
            out.push(Sentence::Prose(current.trim().to_string()));
            current.clear();
        }
    }
    if !current.trim().is_empty() {
        out.push(Sentence::Prose(current.trim().to_string()));
    }
    out
}

pub fn split_line(line: &str) -> Line {
    let prefix_len = LINE_PREFIX.find(line).map_or(0, |m| m.end());
    Line {
        prefix: line[..prefix_len].to_string(),
        sentences: split_sentences(&line[prefix_len..]),
        original: line.to_string(),
    }
}

impl Line {
    fn changed(&self) -> bool {
        let (_, body) = self.original.split_at(self.prefix.len());
        split_sentences(body) != self.sentences
    }

    /// The rebuilt line, or `None` when every sentence was removed.
    pub fn render(&self) -> Option<String> {
        if !self.changed() {
            return Some(self.original.clone());
        }
        let kept: Vec<&str> = self
            .sentences
            .iter()
            .filter_map(|s| match s {
                Sentence::Prose(text) => Some(text.as_str()),
                Sentence::Removed => None,
            })
            .collect();
        if kept.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.prefix, kept.join(" ")))
    }
}

/// Split every line of a masked text.
pub fn split_text(masked: &str) -> Vec<Line> {
    masked.split('\n').map(split_line).collect()
}

/// Rebuild text from split lines, dropping lines emptied by rewriting.
pub fn join_text(lines: &[Line]) -> String {
    lines
        .iter()
        .filter_map(Line::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrite one sentence without filler, or `None` if nothing applies.
fn strip_sentence(sentence: &str) -> Option<Sentence> {
    if PLEASANTRY.is_match(sentence) {
        return Some(Sentence::Removed);
    }
    let hedge = HEDGE.find(sentence)?;
    let rest = &sentence[hedge.end()..];
    if rest.trim().is_empty() {
        return None;
    }
    let mut rewritten = capitalize(rest);
    if rewritten.ends_with('?') {
        rewritten.pop();
        rewritten.push('.');
    }
    Some(Sentence::Prose(rewritten))
}

/// Remove greetings and pleasantries, and turn hedged requests into direct
/// instructions. Returns the text and whether anything changed.
pub fn strip_filler(masked: &str) -> (String, bool) {
    let mut lines = split_text(masked);
    let mut changed = false;

    for line in &mut lines {
        for sentence in &mut line.sentences {
            if let Sentence::Prose(text) = sentence
                && let Some(rewritten) = strip_sentence(text)
            {
                *sentence = rewritten;
                changed = true;
            }
        }
    }

    if !changed {
        return (masked.to_string(), false);
    }
    (join_text(&lines), true)
}
