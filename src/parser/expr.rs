use std::rc::Rc;

use crate::{
    ast::{
        ast::ExpressionPtr,
        expressions::{
            BinaryOperation, FunctionCallOperation, Identifier, Integer32, UnaryOperation,
        },
    },
    errors::errors::Diagnostic,
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

pub fn parse_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    parse_assignment_expr(parser)
}

/// Right-associative `=`. The full operand chain is collected left to
/// right, then folded from the end so `a = b = c = d` becomes
/// `a = (b = (c = d))`.
pub fn parse_assignment_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    let (first, assign_start) = parse_additive_expr(parser)?;

    let mut operands = vec![first];

    while parser.accept(TokenKind::Assign) {
        let Some((rhs, _)) = parse_additive_expr(parser) else {
            parser.expected("expression");
            return None;
        };
        operands.push(rhs);
    }

    let mut result = operands.pop()?;
    for operand in operands.into_iter().rev() {
        result = Rc::new(BinaryOperation::new(
            assign_start.clone(),
            TokenKind::Assign,
            operand,
            result,
        ));
    }

    Some((result, assign_start))
}

/// Left-associative `+` and `-`.
pub fn parse_additive_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    let (mut lhs, addsub_start) = parse_multiplicative_expr(parser)?;

    while parser.accept(TokenKind::Plus) || parser.accept(TokenKind::Minus) {
        let operator = parser.previous_token().kind;

        let Some((rhs, _)) = parse_multiplicative_expr(parser) else {
            parser.expected("expression");
            return None;
        };

        lhs = Rc::new(BinaryOperation::new(
            addsub_start.clone(),
            operator,
            lhs,
            rhs,
        ));
    }

    Some((lhs, addsub_start))
}

/// Left-associative `*` and `/`.
pub fn parse_multiplicative_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    let (mut lhs, muldiv_start) = parse_prefix_expr(parser)?;

    while parser.accept(TokenKind::Star) || parser.accept(TokenKind::Slash) {
        let operator = parser.previous_token().kind;

        let Some((rhs, _)) = parse_prefix_expr(parser) else {
            parser.expected("expression");
            return None;
        };

        lhs = Rc::new(BinaryOperation::new(
            muldiv_start.clone(),
            operator,
            lhs,
            rhs,
        ));
    }

    Some((lhs, muldiv_start))
}

/// Prefix `+` and `-`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    if parser.accept(TokenKind::Plus) || parser.accept(TokenKind::Minus) {
        let operator_token = parser.previous_token().clone();

        let Some((rhs, _)) = parse_call_expr(parser) else {
            parser.expected("expression");
            return None;
        };

        let operation: ExpressionPtr = Rc::new(UnaryOperation::new(
            operator_token.clone(),
            operator_token.kind,
            rhs,
        ));
        Some((operation, operator_token))
    } else {
        parse_call_expr(parser)
    }
}

/// Postfix call: zero or more parenthesized argument lists, each wrapping
/// the accumulated expression as the callee. An empty argument list is
/// accepted.
pub fn parse_call_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    let (mut callee, call_start) = parse_grouping_expr(parser)?;

    while parser.accept(TokenKind::OpenParen) {
        let mut arguments = Vec::new();

        loop {
            if let Some((argument, _)) = parse_expr(parser) {
                arguments.push(argument);

                if parser.accept(TokenKind::CloseParen) {
                    break;
                }
                if parser.accept(TokenKind::Comma) {
                    continue;
                }

                parser.expected("',' or ')'");
                return None;
            } else if parser.accept(TokenKind::CloseParen) {
                break;
            } else {
                parser.expected("expression");
                return None;
            }
        }

        callee = Rc::new(FunctionCallOperation::new(
            call_start.clone(),
            callee,
            arguments,
        ));
    }

    Some((callee, call_start))
}

/// `( expr )` or an atom. Parentheses produce no node of their own.
pub fn parse_grouping_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    if parser.accept(TokenKind::OpenParen) {
        let paren_start = parser.previous_token().clone();

        let Some((expression, _)) = parse_expr(parser) else {
            parser.expected("expression");
            return None;
        };

        if parser.accept(TokenKind::CloseParen) {
            Some((expression, paren_start))
        } else {
            parser.expected("')'");
            None
        }
    } else {
        parse_primary_expr(parser)
    }
}

/// Integer literal or identifier.
pub fn parse_primary_expr(parser: &mut Parser) -> Option<(ExpressionPtr, Token)> {
    if parser.accept(TokenKind::Integer) {
        let token = parser.previous_token().clone();

        match token.text.parse::<i32>() {
            Ok(value) => {
                let literal: ExpressionPtr = Rc::new(Integer32::new(token.clone(), value));
                Some((literal, token))
            }
            Err(_) => {
                parser.add_error(Diagnostic::new(
                    token.clone(),
                    format!("Invalid integer literal \"{}\"", token.text),
                ));
                None
            }
        }
    } else if parser.accept(TokenKind::Identifier) {
        let token = parser.previous_token().clone();

        let identifier: ExpressionPtr =
            Rc::new(Identifier::new(token.clone(), token.text.clone()));
        Some((identifier, token))
    } else {
        None
    }
}
