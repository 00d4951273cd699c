use std::any::Any;

use inkwell::{
    types::{AnyTypeEnum, BasicType},
    AddressSpace,
};

use crate::{
    codegen::codegen::{basic_type, Codegen},
    errors::errors::{CodegenError, CodegenErrorKind},
    lexer::tokens::Token,
};

use super::ast::{tree_prefix, Expression, ExpressionPtr, TypeNode, TypePtr};

/// A primitive named type with no further structure.
#[derive(Debug)]
pub struct SimpleType {
    pub token: Token,
    pub identifier: String,
    /// True for `unsigned` types; false for signed types and for types
    /// where the distinction does not apply.
    pub is_unsigned: bool,
}

impl SimpleType {
    pub fn new(token: Token, identifier: &str) -> Self {
        SimpleType {
            token,
            identifier: String::from(identifier),
            is_unsigned: false,
        }
    }

    pub fn new_unsigned(token: Token, identifier: &str) -> Self {
        SimpleType {
            token,
            identifier: String::from(identifier),
            is_unsigned: true,
        }
    }
}

impl TypeNode for SimpleType {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        if self.is_unsigned {
            format!("{}SimpleType(unsigned {})", tree_prefix(depth), self.identifier)
        } else {
            format!("{}SimpleType({})", tree_prefix(depth), self.identifier)
        }
    }
    fn llvm_type<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<AnyTypeEnum<'ctx>, CodegenError> {
        // Signedness does not change the storage type; it only matters to
        // the operations applied later.
        match self.identifier.as_str() {
            "int" => Ok(AnyTypeEnum::IntType(gen.context.i32_type())),
            "void" => Ok(AnyTypeEnum::VoidType(gen.context.void_type())),
            _ => Err(CodegenError::new(
                CodegenErrorKind::UnknownType {
                    identifier: self.identifier.clone(),
                },
                self.token.clone(),
            )),
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A fixed-size array. The length expression is evaluated when the type
/// descriptor is built, not at parse time, and must fold to a constant.
#[derive(Debug)]
pub struct StaticArray {
    pub token: Token,
    pub element_type: TypePtr,
    pub length: ExpressionPtr,
}

impl StaticArray {
    pub fn new(token: Token, element_type: TypePtr, length: ExpressionPtr) -> Self {
        StaticArray {
            token,
            element_type,
            length,
        }
    }
}

impl TypeNode for StaticArray {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}StaticArray:\n", tree_prefix(depth));
        let depth = depth + 1;
        tree += &format!("{}type:\n", tree_prefix(depth));
        tree += &self.element_type.tree_gen(depth + 1);
        tree += &format!("\n{}length:\n", tree_prefix(depth));
        tree += &self.length.tree_gen(depth + 1);

        tree
    }
    fn llvm_type<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<AnyTypeEnum<'ctx>, CodegenError> {
        let element = self.element_type.llvm_type(gen)?;
        let element = basic_type(element)
            .ok_or_else(|| CodegenError::new(CodegenErrorKind::VoidType, self.token.clone()))?;

        let length = self.length.generate(gen)?;
        let length = length
            .int()
            .and_then(|value| value.get_zero_extended_constant())
            .ok_or_else(|| {
                CodegenError::new(
                    CodegenErrorKind::NonConstantArrayLength,
                    self.length.token().clone(),
                )
            })?;

        Ok(AnyTypeEnum::ArrayType(element.array_type(length as u32)))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A reference to an lvalue of the referenced type.
#[derive(Debug)]
pub struct LValueReference {
    pub token: Token,
    pub referenced_type: TypePtr,
}

impl LValueReference {
    pub fn new(token: Token, referenced_type: TypePtr) -> Self {
        LValueReference {
            token,
            referenced_type,
        }
    }
}

impl TypeNode for LValueReference {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        format!(
            "{}LValueReference:\n{}",
            tree_prefix(depth),
            self.referenced_type.tree_gen(depth + 1)
        )
    }
    fn llvm_type<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<AnyTypeEnum<'ctx>, CodegenError> {
        let referenced = self.referenced_type.llvm_type(gen)?;
        let referenced = basic_type(referenced)
            .ok_or_else(|| CodegenError::new(CodegenErrorKind::VoidType, self.token.clone()))?;

        Ok(AnyTypeEnum::PointerType(
            referenced.ptr_type(AddressSpace::default()),
        ))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
