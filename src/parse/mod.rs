//! Input parser: splits rough free text into semantic buckets.
//!
//! Lines are scanned once. A line that names a known section (see
//! [`headings`]) switches the active bucket; every other line is appended
//! to the active bucket. Text before the first heading is kept aside and
//! prepended to the context.
//!
//! Lines inside a fenced code block are never headings; they go to the
//! active bucket as written.
//!
//! When no core heading (goal, context, constraints, deliverables) is seen,
//! or section-aware parsing is switched off, the parser falls back to:
//! first non-empty line is the goal, the normalized remainder is the context.

pub mod headings;


use crate::prompt::{ParsedPromptInput, Section};
use headings::{detect_heading, is_closing_tag, is_tag_line};

/// Parse raw text into buckets.
///
/// Never fails; an empty input yields an empty [`ParsedPromptInput`].
pub fn parse(text: &str, prefer_section_aware: bool) -> ParsedPromptInput {
    if prefer_section_aware && let Some(parsed) = parse_sections(text) {
        return parsed;
    }

    tracing::debug!("no core section headings found; using line fallback");
    parse_fallback(text)
}

#[derive(Default)]
struct Buckets {
    preamble: Vec<String>,
    goal: Vec<String>,
    context: Vec<String>,
    parsed: ParsedPromptInput,
    context_seen: bool,
    core_seen: bool,
}

impl Buckets {
    fn push(&mut self, section: Section, line: &str) {
        match section {
            Section::Goal => self.goal.push(line.to_string()),
            Section::Context => self.context.push(line.to_string()),
            list => {
                if let Some(item) = list_item(line)
                    && let Some(bucket) = self.parsed.list_mut(list)
                {
                    bucket.push(item);
                }
            }
        }
    }

    /// Append a line inside a code fence without list marker handling.
    fn push_verbatim(&mut self, section: Option<Section>, line: &str) {
        match section {
            None => self.preamble.push(line.to_string()),
            Some(Section::Goal) => self.goal.push(line.to_string()),
            Some(Section::Context) => self.context.push(line.to_string()),
            Some(list) => {
                if !line.trim().is_empty()
                    && let Some(bucket) = self.parsed.list_mut(list)
                {
                    bucket.push(line.trim_end().to_string());
                }
            }
        }
    }

    fn finish(mut self) -> ParsedPromptInput {
        self.parsed.goal = normalize_block(&self.goal);

        let context = normalize_block(&self.context);
        let preamble = normalize_block(&self.preamble);
        self.parsed.context = match (preamble.is_empty(), self.context_seen && !context.is_empty()) {
            (true, _) => context,
            (false, true) => format!("{}\n\n{}", preamble, context),
            (false, false) => preamble,
        };

        self.parsed
    }
}

fn parse_sections(text: &str) -> Option<ParsedPromptInput> {
    let mut buckets = Buckets::default();
    let mut active: Option<Section> = None;
    let mut fence: Option<&str> = None;

    for line in text.lines() {
        let marker = fence_marker(line);
        match (fence, marker) {
            (None, Some(f)) => {
                fence = Some(f);
                buckets.push_verbatim(active, line);
                continue;
            }
            (Some(f), _) => {
                if marker == Some(f) && line.trim() == f {
                    fence = None;
                }
                buckets.push_verbatim(active, line);
                continue;
            }
            (None, None) => {}
        }

        if is_closing_tag(line) {
            continue;
        }

        if let Some(heading) = detect_heading(line) {
            active = Some(heading.section);
            buckets.core_seen |= heading.section.is_core();
            buckets.context_seen |= heading.section == Section::Context;
            if let Some(value) = heading.value {
                buckets.push(heading.section, &value);
            }
            continue;
        }

        match active {
            Some(section) => buckets.push(section, line),
            None => buckets.preamble.push(line.to_string()),
        }
    }

    if !buckets.core_seen {
        return None;
    }
    Some(buckets.finish())
}

/// `` ``` `` or `~~~` when the line opens or closes a code fence.
fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

fn parse_fallback(text: &str) -> ParsedPromptInput {
    let lines: Vec<&str> = text.lines().filter(|l| !is_tag_line(l)).collect();
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return ParsedPromptInput::default();
    };

    let rest: Vec<String> = lines[first + 1..].iter().map(|l| l.to_string()).collect();
    ParsedPromptInput {
        goal: lines[first].trim().to_string(),
        context: normalize_block(&rest),
        ..Default::default()
    }
}

/// Strip a leading `- `, `* `, `+ `, `N. ` or `N) ` marker (and a `[ ]` /
/// `[x]` checkbox). Blank lines yield `None`.
pub fn list_item(line: &str) -> Option<String> {
    let mut item = line.trim();
    if item.is_empty() {
        return None;
    }

    if let Some(rest) = item
        .strip_prefix("- ")
        .or_else(|| item.strip_prefix("* "))
        .or_else(|| item.strip_prefix("+ "))
    {
        item = rest.trim_start();
    } else {
        let digits = item.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            let after = &item[digits..];
            if let Some(rest) = after.strip_prefix(". ").or_else(|| after.strip_prefix(") ")) {
                item = rest.trim_start();
            }
        }
    }

    for checkbox in ["[ ] ", "[x] ", "[X] "] {
        if let Some(rest) = item.strip_prefix(checkbox) {
            item = rest.trim_start();
            break;
        }
    }

    let item = item.trim();
    (!item.is_empty()).then(|| item.to_string())
}

/// Trim line ends, drop leading and trailing blank lines, and collapse runs
/// of blank lines to one.
pub fn normalize_block<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in lines {
        let line = line.as_ref().trim_end();
        let blank = line.trim().is_empty();
        if blank && out.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        out.push(if blank { "" } else { line });
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n").trim_start().to_string()
}
