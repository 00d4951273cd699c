use std::rc::Rc;

use crate::{
    ast::{
        ast::{StatementPtr, TypeNode, TypePtr},
        statements::{
            ExpressionStatement, FunctionDeclaration, ReturnStatement, Scope, VariableDeclaration,
        },
    },
    errors::errors::Diagnostic,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, parser::Parser, types::parse_type};

/// Scope item: a braced `Scope` of declaration-or-statements, or a single
/// declaration-or-statement.
pub fn parse_scope_stmt(parser: &mut Parser) -> Option<(StatementPtr, Token)> {
    if parser.accept(TokenKind::OpenCurly) {
        let scope_start = parser.previous_token().clone();

        let mut statements = Vec::new();
        while let Some((statement, _)) = parse_decl_stmt(parser) {
            statements.push(statement);
        }

        if parser.accept(TokenKind::CloseCurly) {
            let scope: StatementPtr = Rc::new(Scope::new(scope_start.clone(), statements));
            Some((scope, scope_start))
        } else {
            parser.expected("'}'");
            None
        }
    } else {
        parse_decl_stmt(parser)
    }
}

/// Declaration or statement. Tries a type-led declaration first, then
/// chains to the `return` statement and expression statement rules. Fails
/// silently only when no alternative consumed any input.
pub fn parse_decl_stmt(parser: &mut Parser) -> Option<(StatementPtr, Token)> {
    let Some((var_type, decl_start)) = parse_type(parser) else {
        return parse_return_stmt(parser);
    };

    if parser.accept(TokenKind::Identifier) {
        let identifier = parser.previous_token().text.clone();

        if parser.accept(TokenKind::Assign) {
            let Some((initializer, _)) = parse_expr(parser) else {
                parser.expected("expression");
                return None;
            };

            if parser.accept(TokenKind::Semicolon) {
                let declaration: StatementPtr = Rc::new(VariableDeclaration::with_initializer(
                    decl_start.clone(),
                    var_type,
                    identifier,
                    initializer,
                ));
                return Some((declaration, decl_start));
            }

            parser.expected("';'");
            return None;
        } else if parser.accept(TokenKind::Semicolon) {
            let declaration: StatementPtr = Rc::new(VariableDeclaration::new(
                decl_start.clone(),
                var_type,
                identifier,
            ));
            return Some((declaration, decl_start));
        } else if parser.accept(TokenKind::OpenParen) {
            return parse_fn_decl_stmt(parser, decl_start, var_type, identifier);
        }
    }

    parser.expected("identifier");
    None
}

/// Function declaration, entered after `type identifier (` has already
/// been consumed. A `void` parameter type must be the sole parameter and
/// is immediately followed by `)`.
pub fn parse_fn_decl_stmt(
    parser: &mut Parser,
    decl_start: Token,
    return_type: TypePtr,
    identifier: String,
) -> Option<(StatementPtr, Token)> {
    let mut parameters = Vec::new();

    loop {
        if let Some((param_type, _)) = parse_type(parser) {
            if param_type.token().kind == TokenKind::Void {
                if parser.accept(TokenKind::CloseParen) {
                    break;
                }

                parser.add_error(Diagnostic::new(
                    parser.current_token().clone(),
                    "Unexpected additional parameter in void parameter function",
                ));
                return None;
            }

            // Parameter names are optional.
            let param_name = if parser.accept(TokenKind::Identifier) {
                parser.previous_token().text.clone()
            } else {
                String::new()
            };
            parameters.push(VariableDeclaration::new(
                decl_start.clone(),
                param_type,
                param_name,
            ));

            if parser.accept(TokenKind::Comma) {
                continue;
            }
            if parser.accept(TokenKind::CloseParen) {
                break;
            }

            parser.expected("',' or ')'");
            return None;
        } else if parser.accept(TokenKind::CloseParen) {
            break;
        } else {
            parser.add_error(Diagnostic::new(
                parser.current_token().clone(),
                format!("Unexpected \"{}\"", parser.current_token().text),
            ));
            return None;
        }
    }

    let Some((body, _)) = parse_scope_stmt(parser) else {
        parser.add_error(Diagnostic::new(
            parser.current_token().clone(),
            format!("Unexpected \"{}\"", parser.current_token().text),
        ));
        return None;
    };

    let declaration: StatementPtr = Rc::new(FunctionDeclaration::new(
        decl_start.clone(),
        return_type,
        identifier,
        parameters,
        body,
    ));
    Some((declaration, decl_start))
}

/// `return [expr] ;`
pub fn parse_return_stmt(parser: &mut Parser) -> Option<(StatementPtr, Token)> {
    if parser.accept(TokenKind::Return) {
        let return_start = parser.previous_token().clone();

        let expression = parse_expr(parser).map(|(expression, _)| expression);

        if parser.accept(TokenKind::Semicolon) {
            let statement: StatementPtr =
                Rc::new(ReturnStatement::new(return_start.clone(), expression));
            Some((statement, return_start))
        } else {
            parser.expected("';'");
            None
        }
    } else {
        parse_expression_stmt(parser)
    }
}

/// `expr ;`
pub fn parse_expression_stmt(parser: &mut Parser) -> Option<(StatementPtr, Token)> {
    let (expression, stmt_start) = parse_expr(parser)?;

    if parser.accept(TokenKind::Semicolon) {
        let statement: StatementPtr =
            Rc::new(ExpressionStatement::new(stmt_start.clone(), expression));
        Some((statement, stmt_start))
    } else {
        parser.expected("';'");
        None
    }
}
