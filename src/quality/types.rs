//! Core types for quality check results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a failed check is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A single structural or content check on a generated prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub title: String,
    pub passed: bool,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl QualityCheck {
    /// A passing check. Passing checks carry info severity.
    pub fn pass(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            passed: true,
            severity: Severity::Info,
            detail: None,
        }
    }

    /// A failing check with the severity it fails at.
    pub fn fail(title: impl Into<String>, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            passed: false,
            severity,
            detail: Some(detail.into()),
        }
    }

    /// Pass, or fail with `severity` and `detail`, depending on `ok`.
    pub fn check(
        title: impl Into<String>,
        ok: bool,
        severity: Severity,
        detail: impl FnOnce() -> String,
    ) -> Self {
        if ok {
            Self::pass(title)
        } else {
            Self::fail(title, severity, detail())
        }
    }

    pub fn is_blocking(&self) -> bool {
        !self.passed && self.severity == Severity::Error
    }
}

/// Whether no failed check carries error severity.
pub fn all_clear(checks: &[QualityCheck]) -> bool {
    !checks.iter().any(QualityCheck::is_blocking)
}

/// Format a checklist for terminal display.
///
/// ```text
/// [ok]    Goal present
/// [warn]  Context present: no context was found in the input
/// [FAIL]  Variables filled: unfilled: order_id
/// ```
pub fn format_checklist(checks: &[QualityCheck]) -> String {
    let mut out = String::new();
    for check in checks {
        let mark = match (check.passed, check.severity) {
            (true, _) => "[ok]  ",
            (false, Severity::Info) => "[info]",
            (false, Severity::Warning) => "[warn]",
            (false, Severity::Error) => "[FAIL]",
        };
        out.push_str(mark);
        out.push_str("  ");
        out.push_str(&check.title);
        if let Some(detail) = &check.detail {
            out.push_str(": ");
            out.push_str(detail);
        }
        out.push('\n');
    }
    out
}
