//! Line-level text diff.
//!
//! Lines are aligned by longest common subsequence rather than position,
//! so one inserted or deleted line shows as exactly one added or removed
//! entry with everything around it unchanged. Empty lines are entries too,
//! including the one after a trailing newline, so adding or dropping a
//! final newline shows up as a change.

mod lcs;

#[cfg(test)]
mod tests;

use lcs::{Step, align};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

impl DiffKind {
    /// Prefix used in rendered output.
    pub fn marker(self) -> char {
        match self {
            DiffKind::Unchanged => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub text: String,
    pub kind: DiffKind,
}

impl DiffLine {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DiffKind::Unchanged,
        }
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DiffKind::Added,
        }
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DiffKind::Removed,
        }
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.text)
    }
}

/// Counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn of(lines: &[DiffLine]) -> Self {
        let mut summary = Self::default();
        for line in lines {
            match line.kind {
                DiffKind::Added => summary.added += 1,
                DiffKind::Removed => summary.removed += 1,
                DiffKind::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} removed, {} unchanged",
            self.added, self.removed, self.unchanged
        )
    }
}

/// Split on `\n`, dropping a `\r` before it. Empty text has no lines.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Diff two texts line by line.
pub fn diff(old: &str, new: &str) -> Vec<DiffLine> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let (mut i, mut j) = (0, 0);
    align(&old_lines, &new_lines)
        .into_iter()
        .map(|step| match step {
            Step::Keep => {
                let line = DiffLine::unchanged(old_lines[i]);
                i += 1;
                j += 1;
                line
            }
            Step::Remove => {
                let line = DiffLine::removed(old_lines[i]);
                i += 1;
                line
            }
            Step::Add => {
                let line = DiffLine::added(new_lines[j]);
                j += 1;
                line
            }
        })
        .collect()
}

/// Render a diff with `+`, `-` and space prefixes, one line each.
pub fn render(lines: &[DiffLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}
