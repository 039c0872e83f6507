//! Integration tests for location tracking.

use thicket_common::Location;

#[test]
fn test_start_location() {
    assert_eq!(Location::START.line, 1);
    assert_eq!(Location::START.col, 1);
    assert_eq!(Location::START.offset, 0);
    assert_eq!(Location::START.to_string(), "1:1");
}

#[test]
fn test_step_rules() {
    let loc = Location::START.step(b'a');
    assert_eq!(loc, Location { line: 1, col: 2, offset: 1 });

    // newline advances the line and resets the column
    let loc = loc.step(b'\n');
    assert_eq!(loc, Location { line: 2, col: 1, offset: 2 });

    // carriage return only advances the offset
    let loc = loc.step(b'\r');
    assert_eq!(loc, Location { line: 2, col: 1, offset: 3 });
}

#[test]
fn test_advance_stops_at_predicate() {
    let data = b"ab\ncd<ef";
    let loc = Location::START.advance(data, |rest| rest[0] == b'<');
    assert_eq!(loc.offset, 5);
    assert_eq!(loc.line, 2);
    assert_eq!(loc.col, 3);
    assert!(loc.is_within(data));
}

#[test]
fn test_advance_runs_to_end_without_match() {
    let data = b"abc";
    let loc = Location::START.advance_to(data, b"-->");
    assert_eq!(loc.offset, 3);
    assert_eq!(loc.col, 4);
    assert!(!loc.is_within(data));
}

#[test]
fn test_advance_from_middle() {
    let data = b"<!-- x -->";
    let start = Location::START.advance_by(data, 4);
    assert_eq!(start.col, 5);
    let end = start.advance_to(data, b"-->");
    assert_eq!(&data[start.offset..end.offset], b" x ");
}

#[test]
fn test_advance_by_clamps_to_end() {
    let loc = Location::START.advance_by(b"ab", 10);
    assert_eq!(loc.offset, 2);
    assert_eq!(loc.col, 3);
}

#[test]
fn test_rebase() {
    let rel = Location { line: 3, col: 7, offset: 2 };
    assert_eq!(rel.rebase(40), Location { line: 3, col: 7, offset: 42 });
}

#[test]
fn test_crlf_counts_one_line() {
    let data = b"a\r\nb";
    let loc = Location::START.advance_by(data, data.len());
    assert_eq!(loc, Location { line: 2, col: 2, offset: 4 });
}
