use super::*;
use proptest::prelude::*;

// === Single-line ranges ===

#[test]
fn test_same_line_contains_bounds() {
    let range = Range::from_coords(3, 4, 3, 9);

    assert!(range.contains(Position::new(3, 4)));
    assert!(range.contains(Position::new(3, 9)));
    assert!(range.contains(Position::new(3, 6)));
    assert!(!range.contains(Position::new(3, 3)));
    assert!(!range.contains(Position::new(3, 10)));
    assert!(!range.contains(Position::new(2, 6)));
    assert!(!range.contains(Position::new(4, 6)));
}

#[test]
fn test_point_range() {
    let pos = Position::new(7, 2);
    let range = Range::point(pos);

    assert!(range.is_empty());
    assert!(range.contains(pos));
    assert!(!range.contains(Position::new(7, 3)));
}

// === Multi-line ranges ===

#[test]
fn test_multi_line_contains() {
    let range = Range::from_coords(2, 10, 5, 1);

    assert!(range.contains(Position::new(3, 0)));
    assert!(range.contains(Position::new(4, 200)));
    assert!(range.contains(Position::new(2, 10)));
    assert!(range.contains(Position::new(5, 1)));
    assert!(!range.contains(Position::new(2, 9)));
    assert!(!range.contains(Position::new(5, 2)));
    assert!(!range.contains(Position::new(6, 0)));
}

#[test]
fn test_contains_range_and_cover() {
    let outer = Range::from_coords(0, 0, 10, 0);
    let inner = Range::from_coords(2, 3, 2, 8);

    assert!(outer.contains_range(inner));
    assert!(!inner.contains_range(outer));
    assert_eq!(inner.cover(Range::from_coords(4, 0, 4, 1)), Range::from_coords(2, 3, 4, 1));
}

#[test]
fn test_display() {
    assert_eq!(Range::from_coords(1, 2, 3, 4).to_string(), "1:2-3:4");
}

// === Properties ===

fn position() -> impl Strategy<Value = Position> {
    (0u32..50, 0u32..80).prop_map(|(line, column)| Position::new(line, column))
}

proptest! {
    #[test]
    fn prop_bounds_are_contained(a in position(), b in position()) {
        let range = Range::new(a.min(b), a.max(b));
        prop_assert!(range.contains(range.start));
        prop_assert!(range.contains(range.end));
    }

    #[test]
    fn prop_lines_outside_are_not_contained(a in position(), b in position(), column in 0u32..80) {
        let range = Range::new(a.min(b), a.max(b));
        if range.start.line > 0 {
            prop_assert!(!range.contains(Position::new(range.start.line - 1, column)));
        }
        prop_assert!(!range.contains(Position::new(range.end.line + 1, column)));
    }

    #[test]
    fn prop_inner_lines_ignore_column(a in position(), b in position(), column in 0u32..500) {
        let range = Range::new(a.min(b), a.max(b));
        if range.end.line > range.start.line + 1 {
            prop_assert!(range.contains(Position::new(range.start.line + 1, column)));
        }
    }
}
