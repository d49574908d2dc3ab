//! Protected spans: fenced code blocks, URLs, filesystem paths and
//! `{variable}` tokens.
//!
//! Rewrites run on a masked copy of the text where every protected span is
//! replaced by a private-use sentinel. Restoring swaps the sentinels back,
//! so rewriting can never alter a protected span; it can only drop one,
//! which [`Protected::all_present`] detects.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'`)\]]+"#).expect("static regex"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[A-Za-z0-9_-]+\}").expect("static regex"));

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:~|\.{1,2})?(?:/[A-Za-z0-9_.\-]+)+/?|[A-Za-z]:\\[A-Za-z0-9_.\\\-]+|[A-Za-z0-9_.\-]+(?:/[A-Za-z0-9_.\-]+)+/?",
    )
    .expect("static regex")
});

/// A text with its protected spans masked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protected {
    masked: String,
    spans: Vec<String>,
}

fn sentinel(index: usize) -> String {
    format!("{}{}{}", OPEN, index, CLOSE)
}

/// Byte ranges of fenced code blocks, including the fence lines.
///
/// An unclosed fence runs to the end of the text.
fn fenced_blocks(text: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut open: Option<(usize, &str)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let trimmed = body.trim_start();
        let fence = if trimmed.starts_with("```") {
            Some("```")
        } else if trimmed.starts_with("~~~") {
            Some("~~~")
        } else {
            None
        };

        match (open, fence) {
            (None, Some(f)) => open = Some((offset, f)),
            (Some((start, f)), Some(g)) if f == g && trimmed.trim_end() == f => {
                blocks.push(start..offset + body.len());
                open = None;
            }
            _ => {}
        }
        offset += line.len();
    }

    if let Some((start, _)) = open {
        blocks.push(start..text.trim_end_matches(['\n', '\r']).len().max(start));
    }
    blocks
}

fn overlaps(ranges: &[Range<usize>], candidate: &Range<usize>) -> bool {
    ranges
        .iter()
        .any(|r| candidate.start < r.end && r.start < candidate.end)
}

/// Trailing punctuation that ends a sentence rather than a URL or path.
fn trim_trailing_punctuation(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let kept = slice.trim_end_matches(['.', ',', ';', ':', '!', '?']);
    range.start..range.start + kept.len()
}

/// Find every protected span, non-overlapping, in text order.
fn find_spans(text: &str) -> Vec<Range<usize>> {
    let mut ranges = fenced_blocks(text);

    for m in URL.find_iter(text) {
        let range = trim_trailing_punctuation(text, m.range());
        if !range.is_empty() && !overlaps(&ranges, &range) {
            ranges.push(range);
        }
    }
    for m in PLACEHOLDER.find_iter(text) {
        if !overlaps(&ranges, &m.range()) {
            ranges.push(m.range());
        }
    }
    for m in PATH.find_iter(text) {
        let range = trim_trailing_punctuation(text, m.range());
        if range.len() > 1 && !overlaps(&ranges, &range) {
            ranges.push(range);
        }
    }

    ranges.sort_by_key(|r| r.start);
    ranges
}

impl Protected {
    pub fn new(text: &str) -> Self {
        let mut masked = String::with_capacity(text.len());
        let mut spans = Vec::new();
        let mut cursor = 0;

        for range in find_spans(text) {
            masked.push_str(&text[cursor..range.start]);
            masked.push_str(&sentinel(spans.len()));
            spans.push(text[range.clone()].to_string());
            cursor = range.end;
        }
        masked.push_str(&text[cursor..]);

        Self { masked, spans }
    }

    pub fn masked(&self) -> &str {
        &self.masked
    }

    pub fn spans(&self) -> &[String] {
        &self.spans
    }

    /// Swap sentinels in `masked` back to their original spans.
    pub fn restore(&self, masked: &str) -> String {
        let mut out = masked.to_string();
        for (index, span) in self.spans.iter().enumerate() {
            out = out.replace(&sentinel(index), span);
        }
        out
    }

    /// Whether every protected span appears verbatim in `text`.
    pub fn all_present(&self, text: &str) -> bool {
        self.spans.iter().all(|span| text.contains(span.as_str()))
    }

    /// Spans missing from `text`.
    pub fn missing<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.spans
            .iter()
            .filter(|span| !text.contains(span.as_str()))
            .map(String::as_str)
            .collect()
    }
}
