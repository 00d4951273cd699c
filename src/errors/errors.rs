use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::Token;

/// A parse-time diagnostic: the offending token plus a message.
///
/// Diagnostics accumulate in order inside a single parser instance; the
/// parse as a whole is successful only if none were recorded.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub token: Token,
    pub message: String,
}

impl Diagnostic {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Diagnostic {
            token,
            message: message.into(),
        }
    }

    /// Builds the standard syntax-error message for a missing token or
    /// production: `Expected <expected>, but got "<lexeme>"`.
    pub fn expected(expected: &str, got: &Token) -> Self {
        Diagnostic {
            message: format!("Expected {}, but got \"{}\"", expected, got.text),
            token: got.clone(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A tokenizer failure. Unlike parse diagnostics these abort immediately,
/// since the parser cannot run without a complete token sequence.
#[derive(Error, Debug, Clone)]
pub enum LexError {
    #[error("unrecognised character {character:?} at offset {position}")]
    UnrecognisedCharacter { character: char, position: u32 },
}

/// A generation-time (semantic) failure.
///
/// Carries the origin token of the node that could not be lowered. The
/// first semantic error aborts generation of the current subtree and
/// propagates to the driver.
#[derive(Debug, Clone)]
pub struct CodegenError {
    kind: CodegenErrorKind,
    token: Token,
}

impl CodegenError {
    pub fn new(kind: CodegenErrorKind, token: Token) -> Self {
        CodegenError { kind, token }
    }

    pub fn kind(&self) -> &CodegenErrorKind {
        &self.kind
    }

    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for CodegenError {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenErrorKind {
    #[error("Expected callable function expression")]
    NotCallable,
    #[error("unsupported operator \"{operator}\"")]
    UnsupportedOperator { operator: String },
    #[error("undeclared identifier \"{identifier}\"")]
    UndeclaredIdentifier { identifier: String },
    #[error("assignment target must be a variable")]
    InvalidAssignmentTarget,
    #[error("operator \"{operator}\" requires integer operands")]
    InvalidOperands { operator: String },
    #[error("array length must be a constant integer expression")]
    NonConstantArrayLength,
    #[error("unknown type \"{identifier}\"")]
    UnknownType { identifier: String },
    #[error("type \"void\" is only valid as a function return type or an empty parameter list")]
    VoidType,
}
