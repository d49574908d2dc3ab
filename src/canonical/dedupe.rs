//! Whitespace- and case-insensitive list deduplication.

/// Comparison key: whitespace collapsed, lowercased, trimmed.
pub fn dedupe_key(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drop blank entries and later duplicates, keeping first-seen order.
///
/// Kept entries are trimmed but otherwise unchanged.
pub fn dedupe<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        let key = dedupe_key(item);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(item.to_string());
    }
    out
}

/// Entries whose key repeats an earlier entry, in order of the repeat.
pub fn duplicates<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut repeated = Vec::new();
    for item in items {
        let key = dedupe_key(item.as_ref());
        if key.is_empty() {
            continue;
        }
        if seen.contains(&key) {
            repeated.push(item.as_ref().trim().to_string());
        } else {
            seen.push(key);
        }
    }
    repeated
}
