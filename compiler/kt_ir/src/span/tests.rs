use super::*;

#[test]
fn point_is_empty() {
    let p = Span::point(7);
    assert!(p.is_empty());
    assert_eq!(p.len(), 0);
    assert!(!p.contains(7));
}

#[test]
fn contains_is_half_open() {
    let span = Span::new(3, 6);
    assert!(span.contains(3));
    assert!(span.contains(5));
    assert!(!span.contains(6));
    assert!(!span.contains(2));
}

#[test]
fn cover_is_order_independent() {
    let a = Span::new(10, 12);
    let b = Span::new(4, 11);
    assert_eq!(a.cover(b), Span::new(4, 12));
    assert_eq!(b.cover(a), Span::new(4, 12));
}

#[test]
fn slice_reads_source() {
    let src = "val x = 1";
    assert_eq!(Span::new(4, 5).slice(src), "x");
    assert_eq!(Span::new(4, 99).slice(src), "");
}

#[test]
fn try_from_range_rejects_huge_offsets() {
    let big = u32::MAX as usize + 1;
    assert!(matches!(
        Span::try_from_range(big..big),
        Err(SpanError::StartTooLarge(_))
    ));
    assert!(matches!(
        Span::try_from_range(0..big),
        Err(SpanError::EndTooLarge(_))
    ));
    assert_eq!(Span::try_from_range(1..2), Ok(Span::new(1, 2)));
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", Span::new(1, 9)), "1..9");
    assert_eq!(Span::default(), Span::EMPTY);
}
