use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("signed", TokenKind::Signed);
        map.insert("unsigned", TokenKind::Unsigned);
        map.insert("char", TokenKind::Char);
        map.insert("short", TokenKind::Short);
        map.insert("int", TokenKind::Int);
        map.insert("long", TokenKind::Long);
        map.insert("void", TokenKind::Void);
        map.insert("return", TokenKind::Return);
        map
    };

    /// Short names for token kinds, used by the structural dump when an
    /// operator is rendered as `<symbol>(<name>)`.
    pub static ref TOKEN_NAMES: HashMap<TokenKind, &'static str> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Plus, "plus");
        map.insert(TokenKind::PlusPlus, "increment");
        map.insert(TokenKind::PlusAssign, "plus_assign");
        map.insert(TokenKind::Minus, "minus");
        map.insert(TokenKind::MinusMinus, "decrement");
        map.insert(TokenKind::MinusAssign, "minus_assign");
        map.insert(TokenKind::Star, "star");
        map.insert(TokenKind::StarAssign, "star_assign");
        map.insert(TokenKind::Slash, "slash");
        map.insert(TokenKind::SlashAssign, "slash_assign");
        map.insert(TokenKind::Percent, "percent");
        map.insert(TokenKind::PercentAssign, "percent_assign");
        map.insert(TokenKind::Assign, "assign");
        map.insert(TokenKind::Equals, "equals");
        map.insert(TokenKind::NotEquals, "not_equals");
        map.insert(TokenKind::Greater, "greater");
        map.insert(TokenKind::GreaterEquals, "greater_equals");
        map.insert(TokenKind::Less, "less");
        map.insert(TokenKind::LessEquals, "less_equals");
        map.insert(TokenKind::AndAnd, "logic_and");
        map.insert(TokenKind::OrOr, "logic_or");
        map.insert(TokenKind::Tilde, "bit_not");
        map.insert(TokenKind::Ampersand, "bit_and");
        map.insert(TokenKind::AmpAssign, "bit_and_assign");
        map.insert(TokenKind::Pipe, "bit_or");
        map.insert(TokenKind::PipeAssign, "bit_or_assign");
        map.insert(TokenKind::Caret, "bit_xor");
        map.insert(TokenKind::CaretAssign, "bit_xor_assign");
        map.insert(TokenKind::Shl, "shift_left");
        map.insert(TokenKind::ShlAssign, "shift_left_assign");
        map.insert(TokenKind::Shr, "shift_right");
        map.insert(TokenKind::ShrAssign, "shift_right_assign");
        map.insert(TokenKind::Dot, "dot");
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Semicolon,
    Dot,

    Assign,        // =
    Equals,        // ==
    NotEquals,     // !=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    AndAnd,
    OrOr,

    Plus,
    PlusPlus,
    PlusAssign,
    Minus,
    MinusMinus,
    MinusAssign,
    Star,
    StarAssign,
    Slash,
    SlashAssign,
    Percent,
    PercentAssign,

    Tilde,
    Ampersand,
    AmpAssign,
    Pipe,
    PipeAssign,
    Caret,
    CaretAssign,
    Shl,
    ShlAssign,
    Shr,
    ShrAssign,

    // Reserved
    Signed,
    Unsigned,
    Char,
    Short,
    Int,
    Long,
    Void,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.kind, self.text)
    }
}
