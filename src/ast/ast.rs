use std::{any::Any, fmt::Debug, rc::Rc};

use inkwell::types::AnyTypeEnum;

use crate::{
    codegen::codegen::{Codegen, Value},
    errors::errors::CodegenError,
    lexer::tokens::{Token, TokenKind, TOKEN_NAMES},
};

/// Shared ownership of statement nodes. The tree is immutable once built.
pub type StatementPtr = Rc<dyn Statement>;
/// Shared ownership of expression nodes. Assignment folding may reference
/// one operand from more than one parent; the grammar never forms cycles.
pub type ExpressionPtr = Rc<dyn Expression>;
/// Shared ownership of type nodes.
pub type TypePtr = Rc<dyn TypeNode>;

/// Statement Trait
///
/// Every statement node retains the token that introduced it, renders a
/// deterministic structural dump and lowers itself to a backend value.
pub trait Statement: Debug {
    /// Returns the token this node was built from, for diagnostics.
    fn token(&self) -> &Token;
    /// Renders the subtree rooted at this node, indented to `depth`.
    fn tree_gen(&self, depth: usize) -> String;
    /// Lowers the subtree to a backend value, children first.
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError>;
    /// Type conversion purposes - used with `.downcast_ref::<T>()`
    fn as_any(&self) -> &dyn Any;
}

/// Expression Trait
///
/// Same contract as [`Statement`]; kept separate so the grammar's three
/// node families stay distinct at the type level.
pub trait Expression: Debug {
    fn token(&self) -> &Token;
    fn tree_gen(&self, depth: usize) -> String;
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError>;
    fn as_any(&self) -> &dyn Any;
}

/// Type Trait
///
/// Type nodes lower to a backend type descriptor rather than a value.
pub trait TypeNode: Debug {
    fn token(&self) -> &Token;
    fn tree_gen(&self, depth: usize) -> String;
    /// Produces the backend type descriptor for this type. Array lengths
    /// are evaluated here, at generation time, not at parse time.
    fn llvm_type<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<AnyTypeEnum<'ctx>, CodegenError>;
    fn as_any(&self) -> &dyn Any;
}

/// Indentation prefix for one dump line at `depth`.
pub fn tree_prefix(depth: usize) -> String {
    "    ".repeat(depth)
}

/// The printable symbol for an operator token kind. Covers every operator
/// the lexer can produce, including the ones with no generation behavior.
pub fn operator_string(operator: TokenKind) -> &'static str {
    match operator {
        TokenKind::Plus => "+",
        TokenKind::PlusPlus => "++",
        TokenKind::PlusAssign => "+=",

        TokenKind::Minus => "-",
        TokenKind::MinusMinus => "--",
        TokenKind::MinusAssign => "-=",

        TokenKind::Star => "*",
        TokenKind::StarAssign => "*=",

        TokenKind::Slash => "/",
        TokenKind::SlashAssign => "/=",

        TokenKind::Percent => "%",
        TokenKind::PercentAssign => "%=",

        TokenKind::Assign => "=",
        TokenKind::Equals => "==",
        TokenKind::NotEquals => "!=",
        TokenKind::Greater => ">",
        TokenKind::GreaterEquals => ">=",
        TokenKind::Less => "<",
        TokenKind::LessEquals => "<=",

        TokenKind::AndAnd => "&&",
        TokenKind::OrOr => "||",

        TokenKind::Tilde => "~",
        TokenKind::Ampersand => "&",
        TokenKind::AmpAssign => "&=",
        TokenKind::Pipe => "|",
        TokenKind::PipeAssign => "|=",
        TokenKind::Caret => "^",
        TokenKind::CaretAssign => "^=",
        TokenKind::Shl => "<<",
        TokenKind::ShlAssign => "<<=",
        TokenKind::Shr => ">>",
        TokenKind::ShrAssign => ">>=",

        TokenKind::Dot => ".",

        _ => "",
    }
}

/// The `<symbol>(<name>)` rendering used for operator lines in dumps.
pub fn operator_line(operator: TokenKind) -> String {
    format!(
        "{}({})",
        operator_string(operator),
        TOKEN_NAMES.get(&operator).copied().unwrap_or("unknown")
    )
}
