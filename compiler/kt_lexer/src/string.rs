//! String literal scanner.
//!
//! A string literal is split into template parts so the parser can build
//! `$name` and `${expr}` entries:
//!
//! ```text
//! "a\n$b${c}"  =>  OPEN_QUOTE  REGULAR_STRING_PART  ESCAPE_SEQUENCE
//!                  SHORT_TEMPLATE_ENTRY_START  IDENTIFIER
//!                  LONG_TEMPLATE_ENTRY_START  IDENTIFIER  LONG_TEMPLATE_ENTRY_END
//!                  CLOSING_QUOTE
//! ```
//!
//! Raw (`"""`) strings take no escapes and may span lines. A line break in
//! a regular string ends it with a zero-width `DanglingNewline`; the line
//! break itself is then lexed as whitespace.

use kt_ir::TokenKind;

use crate::Lexer;

impl Lexer<'_> {
    /// Scan a string body starting right after its opening quote.
    /// Returns the offset just past the closing quote, or where scanning
    /// stopped without one.
    pub(crate) fn lex_string(&mut self, mut pos: usize, raw: bool) -> usize {
        let source = self.source;
        let bytes = source.as_bytes();
        let mut part = pos;

        while pos < bytes.len() {
            match bytes[pos] {
                b'"' if raw => {
                    let run = bytes[pos..].iter().take_while(|&&b| b == b'"').count();
                    if run >= 3 {
                        // Extra leading quotes of a run belong to the content
                        let close = pos + run - 3;
                        self.flush_part(part, close);
                        self.push(TokenKind::ClosingQuote, close, close + 3);
                        return close + 3;
                    }
                    pos += run;
                }
                b'"' => {
                    self.flush_part(part, pos);
                    self.push(TokenKind::ClosingQuote, pos, pos + 1);
                    return pos + 1;
                }
                b'\n' if !raw => {
                    self.flush_part(part, pos);
                    self.push(TokenKind::DanglingNewline, pos, pos);
                    return pos;
                }
                b'\\' if !raw => {
                    let len = escape_len(&source[pos..]);
                    if len > 1 {
                        self.flush_part(part, pos);
                        self.push(TokenKind::EscapeSequence, pos, pos + len);
                        part = pos + len;
                    }
                    pos += len;
                }
                b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                    self.flush_part(part, pos);
                    self.push(TokenKind::LongTemplateEntryStart, pos, pos + 2);
                    pos = self.lex_code(pos + 2, true);
                    part = pos;
                }
                b'$' => match identifier_len(&source[pos + 1..]) {
                    0 => pos += 1,
                    len => {
                        self.flush_part(part, pos);
                        self.push(TokenKind::ShortTemplateEntryStart, pos, pos + 1);
                        let (start, end) = (pos + 1, pos + 1 + len);
                        let kind = TokenKind::hard_keyword(&source[start..end])
                            .unwrap_or(TokenKind::Ident);
                        self.push(kind, start, end);
                        pos = end;
                        part = pos;
                    }
                },
                _ => pos += 1,
            }
        }
        self.flush_part(part, pos);
        pos
    }

    fn flush_part(&mut self, start: usize, end: usize) {
        if end > start {
            self.push(TokenKind::RegularStringPart, start, end);
        }
    }
}

/// Length of the escape sequence at the start of `text`, which begins
/// with a backslash. A lone backslash before a line break or end of input
/// has length 1 and is kept as ordinary string content.
fn escape_len(text: &str) -> usize {
    let mut chars = text.chars().skip(1);
    match chars.next() {
        None | Some('\n') => 1,
        Some('u') => {
            let hex = text[2..].bytes().take(4).take_while(u8::is_ascii_hexdigit).count();
            if hex == 4 {
                6
            } else {
                2
            }
        }
        Some(c) => 1 + c.len_utf8(),
    }
}

/// Byte length of the identifier at the start of `text`, 0 if none.
fn identifier_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(text.len(), |(i, _)| i)
}
