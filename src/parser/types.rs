use std::rc::Rc;

use crate::{
    ast::{
        ast::TypePtr,
        types::{LValueReference, SimpleType, StaticArray},
    },
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, parser::Parser};

pub fn parse_type(parser: &mut Parser) -> Option<(TypePtr, Token)> {
    parse_array_type(parser)
}

/// Zero or more `[ expr ]` suffixes, wrapping left to right so `T[a][b]`
/// is an array of `T[a]`.
pub fn parse_array_type(parser: &mut Parser) -> Option<(TypePtr, Token)> {
    let (mut array_type, array_start) = parse_reference_type(parser)?;

    while parser.accept(TokenKind::OpenBracket) {
        let Some((length, _)) = parse_expr(parser) else {
            parser.expected("expression");
            return None;
        };

        if !parser.accept(TokenKind::CloseBracket) {
            parser.expected("']'");
            return None;
        }

        array_type = Rc::new(StaticArray::new(array_start.clone(), array_type, length));
    }

    Some((array_type, array_start))
}

/// Optional trailing `&`.
pub fn parse_reference_type(parser: &mut Parser) -> Option<(TypePtr, Token)> {
    let (referenced, reference_start) = parse_simple_type(parser)?;

    if parser.accept(TokenKind::Ampersand) {
        let reference: TypePtr = Rc::new(LValueReference::new(reference_start.clone(), referenced));
        Some((reference, reference_start))
    } else {
        Some((referenced, reference_start))
    }
}

/// `signed`/`unsigned` qualifiers crossed with the width keywords, plus
/// standalone `void`. Only `int` is implemented; the other widths are
/// reserved and fail the rule. A bare qualifier means `int`.
pub fn parse_simple_type(parser: &mut Parser) -> Option<(TypePtr, Token)> {
    if parser.accept(TokenKind::Unsigned) {
        let type_start = parser.previous_token().clone();

        if parser.accept(TokenKind::Char)
            || parser.accept(TokenKind::Short)
            || parser.accept(TokenKind::Long)
        {
            return None;
        }

        parser.accept(TokenKind::Int);
        let simple: TypePtr = Rc::new(SimpleType::new_unsigned(type_start.clone(), "int"));
        return Some((simple, type_start));
    }

    if parser.accept(TokenKind::Signed) {
        let type_start = parser.previous_token().clone();

        if parser.accept(TokenKind::Char)
            || parser.accept(TokenKind::Short)
            || parser.accept(TokenKind::Long)
        {
            return None;
        }

        parser.accept(TokenKind::Int);
        let simple: TypePtr = Rc::new(SimpleType::new(type_start.clone(), "int"));
        return Some((simple, type_start));
    }

    if parser.accept(TokenKind::Char)
        || parser.accept(TokenKind::Short)
        || parser.accept(TokenKind::Long)
    {
        return None;
    }

    if parser.accept(TokenKind::Int) {
        let type_start = parser.previous_token().clone();
        let simple: TypePtr = Rc::new(SimpleType::new(type_start.clone(), "int"));
        return Some((simple, type_start));
    }

    if parser.accept(TokenKind::Void) {
        let type_start = parser.previous_token().clone();
        let simple: TypePtr = Rc::new(SimpleType::new(type_start.clone(), "void"));
        return Some((simple, type_start));
    }

    None
}
