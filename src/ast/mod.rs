/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core AST traits, pointer aliases and dump helpers
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - types: Definitions for the type nodes
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
