//! Known-conflicting directive pairs and their canonical resolutions.
//!
//! When a prompt carries both sides of a pair, every sentence expressing
//! either side is removed and the resolution sentence takes the place of
//! the first one. Sentences are matched on masked prose only.

use super::rewrite::{Line, Sentence, join_text, split_text};
use regex::Regex;
use std::sync::LazyLock;

/// One conflicting pair. A sentence matching `restrictive` is never also
/// counted as `permissive`.
struct Contradiction {
    label: &'static str,
    restrictive: &'static str,
    permissive: &'static str,
    resolution: &'static str,
}

const TABLE: [Contradiction; 4] = [
    Contradiction {
        label: "browsing",
        restrictive: r"(?i)\b(?:no|without|don't|do not|never)\s+(?:web\s+)?(?:brows(?:e|ing)|search(?:ing)?\s+the\s+(?:web|internet))\b",
        permissive: r"(?i)\b(?:browse|search)\s+(?:the\s+)?(?:web|internet|online)\b",
        resolution: "Use only the information provided here; do not browse the web.",
    },
    Contradiction {
        label: "code",
        restrictive: r"(?i)\b(?:no code|without (?:writing )?(?:any )?code|(?:don't|do not|never) write (?:any )?code)\b",
        permissive: r"(?i)\b(?:implement|write|apply|provide)\s+(?:the\s+)?(?:patch|code|fix|implementation)\b",
        resolution: "Explain the change in prose first, then give the patch as a single code block.",
    },
    Contradiction {
        label: "length",
        restrictive: r"(?i)\b(?:be brief|keep it (?:short|brief)|be concise|as short as possible)\b",
        permissive: r"(?i)\b(?:be (?:very )?(?:detailed|thorough)|exhaustive(?:ly)?|in great detail|as detailed as possible)\b",
        resolution: "Keep prose concise and make code, commands and data complete.",
    },
    Contradiction {
        label: "tools",
        restrictive: r"(?i)\b(?:no tools|without (?:any )?tools|(?:don't|do not|never) (?:use|call) (?:any )?tools?)\b",
        permissive: r"(?i)\b(?:use|call)\s+(?:the\s+)?(?:available\s+)?tools?\b",
        resolution: "Use tools only for steps that cannot be completed from the information provided.",
    },
];

struct Compiled {
    label: &'static str,
    restrictive: Regex,
    permissive: Regex,
    resolution: &'static str,
}

static COMPILED: LazyLock<Vec<Compiled>> = LazyLock::new(|| {
    TABLE
        .iter()
        .map(|c| Compiled {
            label: c.label,
            restrictive: Regex::new(c.restrictive).expect("static regex"),
            permissive: Regex::new(c.permissive).expect("static regex"),
            resolution: c.resolution,
        })
        .collect()
});

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Restrictive,
    Permissive,
}

fn side(rule: &Compiled, sentence: &str) -> Option<Side> {
    if rule.restrictive.is_match(sentence) {
        Some(Side::Restrictive)
    } else if rule.permissive.is_match(sentence) {
        Some(Side::Permissive)
    } else {
        None
    }
}

/// Apply one rule to split lines. Returns true if it fired.
fn apply(rule: &Compiled, lines: &mut [Line]) -> bool {
    let mut hits: Vec<(usize, usize, Side)> = Vec::new();
    for (li, line) in lines.iter().enumerate() {
        for (si, sentence) in line.sentences.iter().enumerate() {
            if let Sentence::Prose(text) = sentence
                && let Some(found) = side(rule, text)
            {
                hits.push((li, si, found));
            }
        }
    }

    let both = hits.iter().any(|h| h.2 == Side::Restrictive)
        && hits.iter().any(|h| h.2 == Side::Permissive);
    if !both {
        return false;
    }

    for (index, (li, si, _)) in hits.iter().enumerate() {
        lines[*li].sentences[*si] = if index == 0 {
            Sentence::Prose(rule.resolution.to_string())
        } else {
            Sentence::Removed
        };
    }
    true
}

/// Resolve every known contradiction in masked text.
///
/// Returns the rewritten text and a label per repaired pair, in table order.
pub fn repair(masked: &str) -> (String, Vec<String>) {
    let mut lines = split_text(masked);
    let mut labels = Vec::new();

    for rule in COMPILED.iter() {
        if apply(rule, &mut lines) {
            labels.push(format!("repair-contradiction:{}", rule.label));
        }
    }

    if labels.is_empty() {
        return (masked.to_string(), labels);
    }

    (join_text(&lines), labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browsing_pair_resolves_to_one_line() {
        let (text, labels) =
            repair("Summarize the outage. Do not browse the web.\nBrowse the web for recent reports.");
        assert_eq!(
            text,
            "Summarize the outage. Use only the information provided here; do not browse the web."
        );
        assert_eq!(labels, vec!["repair-contradiction:browsing"]);
    }

    #[test]
    fn code_pair_resolves() {
        let (text, labels) = repair("No code please.\nImplement the patch for the parser.");
        assert_eq!(
            text,
            "Explain the change in prose first, then give the patch as a single code block."
        );
        assert_eq!(labels, vec!["repair-contradiction:code"]);
    }

    #[test]
    fn one_side_alone_is_untouched() {
        let input = "Do not use tools.\nBe brief.";
        let (text, labels) = repair(input);
        assert_eq!(text, input);
        assert!(labels.is_empty());
    }

    #[test]
    fn restrictive_wins_within_a_sentence() {
        let input = "Do not use tools here.";
        assert_eq!(repair(input).0, input);
    }

    #[test]
    fn repair_is_stable() {
        let input = "Be brief.  Be very detailed.";
        let (once, _) = repair(input);
        let (twice, labels) = repair(&once);
        assert_eq!(once, twice);
        assert!(labels.is_empty());
    }
}
