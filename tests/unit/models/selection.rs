use super::*;

#[test]
fn range_orders_backwards_selection() {
    let sel = Selection::new(TextPosition::new(3, 1), TextPosition::new(1, 4));

    assert_eq!(
        sel.range(),
        (TextPosition::new(1, 4), TextPosition::new(3, 1))
    );
    assert_eq!(sel.anchor(), TextPosition::new(3, 1));
    assert_eq!(sel.normalized().anchor(), TextPosition::new(1, 4));
}

#[test]
fn caret_is_collapsed_and_contains_nothing() {
    let sel = Selection::caret(TextPosition::new(0, 2));

    assert!(sel.is_collapsed());
    assert!(!sel.contains(TextPosition::new(0, 2)));
}

#[test]
fn contains_is_half_open() {
    let sel = Selection::within(0, 2, 5);

    assert!(!sel.contains(TextPosition::new(0, 1)));
    assert!(sel.contains(TextPosition::new(0, 2)));
    assert!(sel.contains(TextPosition::new(0, 4)));
    assert!(!sel.contains(TextPosition::new(0, 5)));
}

#[test]
fn touches_block_spans_every_block_between_bounds() {
    let sel = Selection::new(TextPosition::new(1, 3), TextPosition::new(3, 0));

    assert!(!sel.touches_block(0));
    assert!(sel.touches_block(1));
    assert!(sel.touches_block(2));
    assert!(sel.touches_block(3));
    assert!(!sel.touches_block(4));
}
