//! Helper macros for the lexer.
//!
//! - `MK_TOKEN!` builds a `Token` from a kind, lexeme and span.
//! - `MK_DEFAULT_HANDLER!` builds a lexer handler for fixed-text tokens
//!   (operators and punctuation), which reduces boilerplate in the
//!   pattern table.

/// Creates a Token instance.
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $span:expr) => {
        Token {
            kind: $kind,
            text: $text,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a token whose lexeme is a fixed literal.
///
/// The generated handler pushes a token of the given kind and advances the
/// lexer position by the literal's length.
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $text:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            lexer.push(MK_TOKEN!(
                $kind,
                String::from($text),
                Span {
                    start: Position(lexer.pos, Rc::clone(&lexer.file)),
                    end: Position(lexer.pos + $text.len() as u32, Rc::clone(&lexer.file)),
                }
            ));
            lexer.advance_n($text.len() as u32);
        }
    };
}
