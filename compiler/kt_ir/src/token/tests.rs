use super::*;

#[test]
fn all_is_sorted_and_complete() {
    for pair in TokenKind::ALL.windows(2) {
        assert!(pair[0] < pair[1], "{:?} before {:?}", pair[0], pair[1]);
    }
    assert_eq!(TokenKind::ALL.last(), Some(&TokenKind::Eof));
    assert_eq!(TokenKind::Eof.discriminant(), TokenKind::MAX_DISCRIMINANT);
}

#[test]
fn hard_and_soft_keywords_are_disjoint() {
    for &kind in TokenKind::ALL {
        assert!(
            !(kind.is_hard_keyword() && kind.is_soft_keyword()),
            "{kind:?} is both hard and soft"
        );
    }
}

#[test]
fn soft_keyword_spelling_round_trips() {
    let mut count = 0;
    for &kind in TokenKind::ALL.iter().filter(|k| k.is_soft_keyword()) {
        let Some(text) = kind.text() else {
            panic!("{kind:?} has no spelling");
        };
        assert_eq!(TokenKind::soft_keyword(text), Some(kind));
        assert_eq!(TokenKind::hard_keyword(text), None);
        count += 1;
    }
    assert_eq!(count, 47);
}

#[test]
fn hard_keyword_lookup() {
    assert_eq!(TokenKind::hard_keyword("when"), Some(TokenKind::KwWhen));
    assert_eq!(TokenKind::hard_keyword("!is"), Some(TokenKind::KwNotIs));
    assert_eq!(TokenKind::hard_keyword("import"), None);
    assert_eq!(TokenKind::soft_keyword("when"), None);
}

#[test]
fn trivia_classification() {
    assert!(TokenKind::Whitespace.is_trivia());
    assert!(TokenKind::DocComment.is_trivia());
    assert!(TokenKind::DocComment.is_comment());
    assert!(!TokenKind::Whitespace.is_comment());
    assert!(!TokenKind::Ident.is_trivia());
    assert!(!TokenKind::DanglingNewline.is_trivia());
}

#[test]
fn names() {
    assert_eq!(TokenKind::Ident.name(), "IDENTIFIER");
    assert_eq!(TokenKind::SafeAccess.name(), "?.");
    assert_eq!(TokenKind::KwData.to_string(), "data");
}

#[test]
fn token_list_kind_past_end_is_eof() {
    let mut list = TokenList::new();
    list.push(Token::new(TokenKind::Ident, Span::new(0, 1)));
    assert_eq!(list.kind(0), TokenKind::Ident);
    assert_eq!(list.kind(5), TokenKind::Eof);
    assert_eq!(list.len(), 1);
}
