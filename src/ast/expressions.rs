use std::any::Any;

use inkwell::{
    values::{AnyValueEnum, BasicMetadataValueEnum},
    IntPredicate,
};

use crate::{
    codegen::codegen::{Codegen, Value},
    errors::errors::{CodegenError, CodegenErrorKind},
    lexer::tokens::{Token, TokenKind},
};

use super::ast::{operator_line, operator_string, tree_prefix, Expression, ExpressionPtr};

/// A signed 32-bit integer literal.
#[derive(Debug, Clone)]
pub struct Integer32 {
    pub token: Token,
    pub value: i32,
}

impl Integer32 {
    pub fn new(token: Token, value: i32) -> Self {
        Integer32 { token, value }
    }
}

impl Expression for Integer32 {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        format!("{}Integer32({})", tree_prefix(depth), self.value)
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        Ok(Value::new(AnyValueEnum::IntValue(
            gen.context.i32_type().const_int(self.value as u64, true),
        )))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A name reference. Resolution happens entirely at generation time,
/// against the backend's symbol state.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn new(token: Token, name: String) -> Self {
        Identifier { token, name }
    }
}

impl Expression for Identifier {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        format!("{}Identifier({})", tree_prefix(depth), self.name)
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        gen.resolve(&self.name).ok_or_else(|| {
            CodegenError::new(
                CodegenErrorKind::UndeclaredIdentifier {
                    identifier: self.name.clone(),
                },
                self.token.clone(),
            )
        })
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct BinaryOperation {
    pub token: Token,
    pub operator: TokenKind,
    pub lhs: ExpressionPtr,
    pub rhs: ExpressionPtr,
}

impl BinaryOperation {
    pub fn new(token: Token, operator: TokenKind, lhs: ExpressionPtr, rhs: ExpressionPtr) -> Self {
        BinaryOperation {
            token,
            operator,
            lhs,
            rhs,
        }
    }

    fn integer_operands<'ctx>(
        &self,
        gen: &mut Codegen<'ctx>,
    ) -> Result<(inkwell::values::IntValue<'ctx>, inkwell::values::IntValue<'ctx>), CodegenError>
    {
        let lhs = self.lhs.generate(gen)?;
        let rhs = self.rhs.generate(gen)?;

        match (lhs.int(), rhs.int()) {
            (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
            _ => Err(CodegenError::new(
                CodegenErrorKind::InvalidOperands {
                    operator: operator_string(self.operator).to_string(),
                },
                self.token.clone(),
            )),
        }
    }
}

impl Expression for BinaryOperation {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}BinaryOperation:\n", tree_prefix(depth));
        let depth = depth + 1;
        tree += &format!("{}lhs:\n", tree_prefix(depth));
        tree += &self.lhs.tree_gen(depth + 1);
        tree += &format!("\n{}rhs:\n", tree_prefix(depth));
        tree += &self.rhs.tree_gen(depth + 1);
        tree += &format!("\n{}op:\n", tree_prefix(depth));
        tree += &format!("{}{}", tree_prefix(depth + 1), operator_line(self.operator));

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        match self.operator {
            TokenKind::Assign => {
                let value = self.rhs.generate(gen)?;

                let target = self.lhs.as_any().downcast_ref::<Identifier>().ok_or_else(|| {
                    CodegenError::new(CodegenErrorKind::InvalidAssignmentTarget, self.token.clone())
                })?;
                let alloca = *gen.named_allocas.get(&target.name).ok_or_else(|| {
                    CodegenError::new(
                        CodegenErrorKind::UndeclaredIdentifier {
                            identifier: target.name.clone(),
                        },
                        target.token.clone(),
                    )
                })?;

                let basic = value.basic().ok_or_else(|| {
                    CodegenError::new(
                        CodegenErrorKind::InvalidOperands {
                            operator: String::from("="),
                        },
                        self.token.clone(),
                    )
                })?;
                gen.builder.build_store(alloca, basic).unwrap();

                Ok(value)
            }
            TokenKind::Plus => {
                let (lhs, rhs) = self.integer_operands(gen)?;
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_add(lhs, rhs, "").unwrap(),
                )))
            }
            TokenKind::Minus => {
                let (lhs, rhs) = self.integer_operands(gen)?;
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_sub(lhs, rhs, "").unwrap(),
                )))
            }
            TokenKind::Star => {
                let (lhs, rhs) = self.integer_operands(gen)?;
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_mul(lhs, rhs, "").unwrap(),
                )))
            }
            TokenKind::Slash => {
                let (lhs, rhs) = self.integer_operands(gen)?;
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_signed_div(lhs, rhs, "").unwrap(),
                )))
            }
            TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals => {
                let predicate = match self.operator {
                    TokenKind::Equals => IntPredicate::EQ,
                    TokenKind::NotEquals => IntPredicate::NE,
                    TokenKind::Less => IntPredicate::SLT,
                    TokenKind::LessEquals => IntPredicate::SLE,
                    TokenKind::Greater => IntPredicate::SGT,
                    _ => IntPredicate::SGE,
                };
                let (lhs, rhs) = self.integer_operands(gen)?;
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_compare(predicate, lhs, rhs, "").unwrap(),
                )))
            }
            operator => Err(CodegenError::new(
                CodegenErrorKind::UnsupportedOperator {
                    operator: operator_string(operator).to_string(),
                },
                self.token.clone(),
            )),
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct UnaryOperation {
    pub token: Token,
    pub operator: TokenKind,
    pub rhs: ExpressionPtr,
}

impl UnaryOperation {
    pub fn new(token: Token, operator: TokenKind, rhs: ExpressionPtr) -> Self {
        UnaryOperation {
            token,
            operator,
            rhs,
        }
    }
}

impl Expression for UnaryOperation {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}UnaryOperation:\n", tree_prefix(depth));
        let depth = depth + 1;
        tree += &format!("{}rhs:\n", tree_prefix(depth));
        tree += &self.rhs.tree_gen(depth + 1);
        tree += &format!("\n{}op:\n", tree_prefix(depth));
        tree += &format!("{}{}", tree_prefix(depth + 1), operator_line(self.operator));

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let value = self.rhs.generate(gen)?;
        let operand = value.int().ok_or_else(|| {
            CodegenError::new(
                CodegenErrorKind::InvalidOperands {
                    operator: operator_string(self.operator).to_string(),
                },
                self.token.clone(),
            )
        })?;

        // Identity and negation are both expressed as multiplications so
        // the two prefix operators lower through one backend primitive.
        match self.operator {
            TokenKind::Plus => {
                let one = gen.context.i32_type().const_int(1, true);
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_mul(one, operand, "").unwrap(),
                )))
            }
            TokenKind::Minus => {
                let minus_one = gen.context.i32_type().const_int((-1i32) as u64, true);
                Ok(Value::new(AnyValueEnum::IntValue(
                    gen.builder.build_int_mul(minus_one, operand, "").unwrap(),
                )))
            }
            operator => Err(CodegenError::new(
                CodegenErrorKind::UnsupportedOperator {
                    operator: operator_string(operator).to_string(),
                },
                self.token.clone(),
            )),
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct FunctionCallOperation {
    pub token: Token,
    pub callee: ExpressionPtr,
    pub arguments: Vec<ExpressionPtr>,
}

impl FunctionCallOperation {
    pub fn new(token: Token, callee: ExpressionPtr, arguments: Vec<ExpressionPtr>) -> Self {
        FunctionCallOperation {
            token,
            callee,
            arguments,
        }
    }
}

impl Expression for FunctionCallOperation {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}FunctionCallOperation:\n", tree_prefix(depth));
        let depth = depth + 1;
        tree += &format!("{}func_expr:\n", tree_prefix(depth));
        tree += &self.callee.tree_gen(depth + 1);
        tree += &format!("\n{}argument:", tree_prefix(depth));
        for argument in self.arguments.iter() {
            tree += "\n";
            tree += &argument.tree_gen(depth + 1);
        }

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let callee = self.callee.generate(gen)?;

        let function = callee.callable().ok_or_else(|| {
            CodegenError::new(CodegenErrorKind::NotCallable, self.token.clone())
        })?;

        let mut arguments: Vec<BasicMetadataValueEnum<'ctx>> = Vec::new();
        for argument in self.arguments.iter() {
            let value = argument.generate(gen)?;
            let basic = value.basic().ok_or_else(|| {
                CodegenError::new(
                    CodegenErrorKind::InvalidOperands {
                        operator: String::from("call"),
                    },
                    argument.token().clone(),
                )
            })?;
            arguments.push(basic.into());
        }

        let call = gen.builder.build_call(function, &arguments, "").unwrap();

        // Void-returning calls have no usable result; follow the backend
        // convention of substituting a zero constant.
        Ok(match call.try_as_basic_value().left() {
            Some(value) => Value::from_basic(value),
            None => Value::new(AnyValueEnum::IntValue(
                gen.context.i32_type().const_zero(),
            )),
        })
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
