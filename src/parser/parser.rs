//! Parser state and entry point.
//!
//! The parser is a predictive recursive-descent engine over a pre-lexed
//! token sequence. Each grammar rule lives in `stmt.rs`, `expr.rs` or
//! `types.rs` as a function that either returns the node it recognised
//! (paired with its start token) or `None`. A rule that fails after
//! consuming input records a diagnostic first; a rule that fails without
//! consuming records nothing, which is the signal for its caller to try
//! the next alternative or stop a repetition.
//!
//! Diagnostics accumulate in order and are never cleared; the parse as a
//! whole succeeds only if none were recorded by the time the top-level
//! production completes.

use std::rc::Rc;

use crate::{
    ast::{ast::StatementPtr, statements::Block},
    errors::errors::Diagnostic,
    lexer::tokens::{Token, TokenKind},
};

use super::stmt::parse_scope_stmt;

pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Syntax errors recorded so far, in order
    errors: Vec<Diagnostic>,
    /// Warnings recorded so far. Reserved: no rule currently produces one.
    warnings: Vec<Diagnostic>,
}

impl Parser {
    /// Creates a new Parser over `tokens`.
    ///
    /// The sequence is expected to end with an `EOF` token, as produced
    /// by `lexer::tokenize`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            errors: vec![],
            warnings: vec![],
        }
    }

    /// Returns the token at the cursor without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream is never empty"))
    }

    /// Returns the most recently consumed token.
    pub fn previous_token(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    /// Returns the token one past the cursor without advancing.
    pub fn peek_token(&self) -> &Token {
        self.tokens
            .get(self.pos + 1)
            .unwrap_or_else(|| self.tokens.last().expect("token stream is never empty"))
    }

    /// Consumes the current token iff it matches `kind`.
    ///
    /// On success the consumed token is available through
    /// [`Parser::previous_token`]. On failure the cursor is untouched.
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.current_token().kind == kind {
            self.pos += 1;
            return true;
        }

        false
    }

    /// Checks whether any unconsumed input remains.
    pub fn has_tokens(&self) -> bool {
        self.current_token().kind != TokenKind::EOF
    }

    pub fn add_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Records the standard `Expected <expected>, but got "<lexeme>"`
    /// diagnostic against the current token.
    pub fn expected(&mut self, expected: &str) {
        let diagnostic = Diagnostic::expected(expected, self.current_token());
        self.add_error(diagnostic);
    }

    pub fn add_warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Parses a token sequence into an abstract syntax tree.
///
/// Recognises scope items until no more match, collecting them into the
/// root [`Block`]. Returns the parser (for its diagnostics) and the root
/// statement; the root is `Some` only if no error was recorded — an
/// apparently complete tree with recorded errors is still a failure.
pub fn parse(tokens: Vec<Token>) -> (Parser, Option<StatementPtr>) {
    let mut parser = Parser::new(tokens);

    let block_start = parser.current_token().clone();
    let mut statements = Vec::new();

    while parser.has_tokens() {
        let Some((statement, _)) = parse_scope_stmt(&mut parser) else {
            break;
        };
        statements.push(statement);
    }

    if parser.errors().is_empty() {
        let root: StatementPtr = Rc::new(Block::new(block_start, statements));
        (parser, Some(root))
    } else {
        (parser, None)
    }
}
