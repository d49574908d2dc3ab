//! Required heading/tag order validation.
//!
//! Each marker is searched for as a whole line, starting at a cursor that
//! only moves forward. A marker that is absent fails as missing; one that
//! exists only before the cursor fails as out of order.

use std::fmt;

/// A line that must appear in the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `<name>` wrapper; must occur exactly once.
    Tag(&'static str),
    /// `### Heading` line.
    Heading(&'static str),
}

impl Marker {
    pub fn line(&self) -> String {
        match self {
            Marker::Tag(name) => format!("<{}>", name),
            Marker::Heading(title) => format!("### {}", title),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderViolationKind {
    Missing,
    OutOfOrder,
    Duplicated,
}

/// The first marker that broke the required order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderViolation {
    pub marker: String,
    pub kind: OrderViolationKind,
}

impl fmt::Display for OrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OrderViolationKind::Missing => write!(f, "'{}' is missing", self.marker),
            OrderViolationKind::OutOfOrder => write!(f, "'{}' is out of order", self.marker),
            OrderViolationKind::Duplicated => {
                write!(f, "'{}' appears more than once", self.marker)
            }
        }
    }
}

/// Byte offset of each line start paired with the line (without newline).
fn lines_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        out.push((offset, line.trim_end_matches('\r')));
        offset += line.len() + 1;
    }
    out
}

/// Check that every marker appears, in order, under an advancing cursor.
pub fn validate_order(text: &str, markers: &[Marker]) -> Result<(), OrderViolation> {
    let lines = lines_with_offsets(text);
    let mut cursor = 0;

    for marker in markers {
        let wanted = marker.line();
        let matches = |line: &str| line.trim_end() == wanted;

        let found = lines
            .iter()
            .find(|(start, line)| *start >= cursor && matches(line));

        match found {
            Some((start, line)) => cursor = start + line.len(),
            None => {
                let kind = if lines.iter().any(|(_, line)| matches(line)) {
                    OrderViolationKind::OutOfOrder
                } else {
                    OrderViolationKind::Missing
                };
                return Err(OrderViolation {
                    marker: wanted,
                    kind,
                });
            }
        }

        if let Marker::Tag(_) = marker
            && lines.iter().filter(|(_, line)| matches(line)).count() > 1
        {
            return Err(OrderViolation {
                marker: wanted,
                kind: OrderViolationKind::Duplicated,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: [Marker; 3] = [
        Marker::Heading("Goal"),
        Marker::Heading("Context"),
        Marker::Heading("Constraints"),
    ];

    #[test]
    fn in_order_passes() {
        let text = "### Goal\ng\n\n### Context\nc\n\n### Constraints\n- x\n";
        assert_eq!(validate_order(text, &MARKERS), Ok(()));
    }

    #[test]
    fn out_of_order_fails() {
        let text = "### Context\nc\n### Goal\ng\n### Constraints\n";
        let err = validate_order(text, &MARKERS).unwrap_err();
        assert_eq!(err.marker, "### Context");
        assert_eq!(err.kind, OrderViolationKind::OutOfOrder);
    }

    #[test]
    fn missing_fails() {
        let text = "### Goal\n### Constraints\n";
        let err = validate_order(text, &MARKERS).unwrap_err();
        assert_eq!(err.marker, "### Context");
        assert_eq!(err.kind, OrderViolationKind::Missing);
        assert_eq!(err.to_string(), "'### Context' is missing");
    }

    #[test]
    fn inline_mentions_do_not_count() {
        let text = "See ### Goal below\n### Context\n### Constraints\n";
        let err = validate_order(text, &MARKERS).unwrap_err();
        assert_eq!(err.kind, OrderViolationKind::Missing);
    }

    #[test]
    fn duplicated_tag_fails() {
        let markers = [Marker::Tag("objective"), Marker::Tag("context")];
        let text = "<objective>\na\n</objective>\n<context>\nb\n</context>\n<objective>\n";
        let err = validate_order(text, &markers).unwrap_err();
        assert_eq!(err.kind, OrderViolationKind::Duplicated);
        assert_eq!(err.marker, "<objective>");
    }
}
