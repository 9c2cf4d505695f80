use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_positions() {
    let text = "module foo;\nint x;\n\nfn void main() {}";
    let index = LineIndex::new(text);

    assert_eq!(index.line_count(), 4);
    assert_eq!(index.position(0), Position::new(0, 0));
    assert_eq!(index.position(11), Position::new(0, 11));
    assert_eq!(index.position(12), Position::new(1, 0));
    assert_eq!(index.position(16), Position::new(1, 4));
    assert_eq!(index.position(19), Position::new(2, 0));
    assert_eq!(index.end_position(), Position::new(3, 17));
}

#[test]
fn test_offsets_clamp_columns() {
    let text = "ab\ncdef\n";
    let index = LineIndex::new(text);

    assert_eq!(index.offset(Position::new(1, 2)), Some(5));
    assert_eq!(index.offset(Position::new(0, 50)), Some(2));
    assert_eq!(index.offset(Position::new(2, 0)), Some(8));
    assert_eq!(index.offset(Position::new(3, 0)), None);
}

#[test]
fn test_utf16_conversion() {
    let text = "let é = \"😀x\";";
    let index = LineIndex::new(text);
    let x_byte = text.find('x').map(|i| u32::try_from(i).unwrap_or_default());
    let x_byte = x_byte.unwrap_or_default();

    let utf16 = index.to_utf16(text, Position::new(0, x_byte));
    assert_eq!(utf16, Position::new(0, 11));
    assert_eq!(index.from_utf16(text, utf16), Position::new(0, x_byte));
}

proptest! {
    #[test]
    fn prop_offset_round_trips(text in "[a-z \n]{0,120}", pick in 0usize..120) {
        let index = LineIndex::new(&text);
        let offset = pick.min(text.len());
        let pos = index.position(offset);
        prop_assert_eq!(index.offset(pos), Some(offset));
    }
}
