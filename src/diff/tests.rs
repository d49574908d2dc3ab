//! Tests for the line diff.

use super::*;

#[test]
fn test_single_insertion() {
    assert_eq!(
        diff("a\nc", "a\nb\nc"),
        vec![
            DiffLine::unchanged("a"),
            DiffLine::added("b"),
            DiffLine::unchanged("c"),
        ]
    );
}

#[test]
fn test_single_deletion_mid_sequence() {
    let old = "one\ntwo\nthree\nfour\nfive";
    let new = "one\ntwo\nfour\nfive";
    let lines = diff(old, new);
    assert_eq!(
        DiffSummary::of(&lines),
        DiffSummary {
            added: 0,
            removed: 1,
            unchanged: 4
        }
    );
    assert_eq!(lines[2], DiffLine::removed("three"));
}

#[test]
fn test_not_positional() {
    // A positional comparison would mark every line after the insert as changed.
    let old = "h\ni\nj\nk";
    let new = "new\nh\ni\nj\nk";
    let summary = DiffSummary::of(&diff(old, new));
    assert_eq!(summary.added, 1);
    assert_eq!(summary.removed, 0);
    assert_eq!(summary.unchanged, 4);
}

#[test]
fn test_empty_lines_are_entries() {
    let lines = diff("a\n\nb", "a\nb");
    assert_eq!(
        lines,
        vec![
            DiffLine::unchanged("a"),
            DiffLine::removed(""),
            DiffLine::unchanged("b"),
        ]
    );
}

#[test]
fn test_empty_texts() {
    assert!(diff("", "").is_empty());
    assert_eq!(diff("", "x"), vec![DiffLine::added("x")]);
    assert_eq!(diff("x", ""), vec![DiffLine::removed("x")]);
}

#[test]
fn test_replacement() {
    assert_eq!(
        diff("keep\nold\nkeep2", "keep\nnew\nkeep2"),
        vec![
            DiffLine::unchanged("keep"),
            DiffLine::removed("old"),
            DiffLine::added("new"),
            DiffLine::unchanged("keep2"),
        ]
    );
}

#[test]
fn test_render_and_summary() {
    let lines = diff("a\nc", "a\nb\nc");
    assert_eq!(render(&lines), " a\n+b\n c\n");
    let summary = DiffSummary::of(&lines);
    assert_eq!(summary.to_string(), "1 added, 0 removed, 2 unchanged");
    assert!(!summary.is_identical());
    assert!(DiffSummary::of(&diff("x", "x")).is_identical());
}

#[test]
fn test_trailing_newline_change_is_visible() {
    assert_eq!(
        diff("a\n", "a"),
        vec![DiffLine::unchanged("a"), DiffLine::removed("")]
    );
    assert_eq!(
        diff("a", "a\n"),
        vec![DiffLine::unchanged("a"), DiffLine::added("")]
    );
    assert!(DiffSummary::of(&diff("a\nb\n", "a\nb\n")).is_identical());
}

#[test]
fn test_crlf_matches_lf() {
    assert!(DiffSummary::of(&diff("a\r\nb", "a\nb")).is_identical());
}
