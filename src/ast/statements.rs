use std::any::Any;

use inkwell::{
    types::{BasicMetadataTypeEnum, BasicType},
    values::AnyValueEnum,
};

use crate::{
    codegen::codegen::{basic_type, Codegen, Value},
    errors::errors::{CodegenError, CodegenErrorKind},
    lexer::tokens::Token,
};

use super::ast::{tree_prefix, Expression, ExpressionPtr, Statement, StatementPtr, TypeNode, TypePtr};

/// A variable declaration, also used for function parameters (where the
/// identifier may be empty and the initializer is always absent).
#[derive(Debug)]
pub struct VariableDeclaration {
    pub token: Token,
    pub var_type: TypePtr,
    pub identifier: String,
    pub initializer: Option<ExpressionPtr>,
}

impl VariableDeclaration {
    pub fn new(token: Token, var_type: TypePtr, identifier: String) -> Self {
        VariableDeclaration {
            token,
            var_type,
            identifier,
            initializer: None,
        }
    }

    pub fn with_initializer(
        token: Token,
        var_type: TypePtr,
        identifier: String,
        initializer: ExpressionPtr,
    ) -> Self {
        VariableDeclaration {
            token,
            var_type,
            identifier,
            initializer: Some(initializer),
        }
    }
}

impl Statement for VariableDeclaration {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}VariableDeclaration:\n", tree_prefix(depth));
        let depth = depth + 1;
        tree += &format!("{}type:\n", tree_prefix(depth));
        tree += &self.var_type.tree_gen(depth + 1);
        tree += &format!("\n{}identifier:\n", tree_prefix(depth));
        tree += &format!("{}{}", tree_prefix(depth + 1), self.identifier);
        if let Some(initializer) = &self.initializer {
            tree += &format!("\n{}initializer:\n", tree_prefix(depth));
            tree += &initializer.tree_gen(depth + 1);
        }

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let var_type = self.var_type.llvm_type(gen)?;
        let basic = basic_type(var_type)
            .ok_or_else(|| CodegenError::new(CodegenErrorKind::VoidType, self.token.clone()))?;

        let alloca = gen.builder.build_alloca(basic, &self.identifier).unwrap();

        if let Some(initializer) = &self.initializer {
            let value = initializer.generate(gen)?;
            let value = value.basic().ok_or_else(|| {
                CodegenError::new(
                    CodegenErrorKind::InvalidOperands {
                        operator: String::from("="),
                    },
                    initializer.token().clone(),
                )
            })?;
            gen.builder.build_store(alloca, value).unwrap();
        }

        gen.named_allocas.insert(self.identifier.clone(), alloca);

        Ok(Value::new(AnyValueEnum::PointerValue(alloca)))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct FunctionDeclaration {
    pub token: Token,
    pub return_type: TypePtr,
    pub identifier: String,
    pub parameters: Vec<VariableDeclaration>,
    pub body: StatementPtr,
}

impl FunctionDeclaration {
    pub fn new(
        token: Token,
        return_type: TypePtr,
        identifier: String,
        parameters: Vec<VariableDeclaration>,
        body: StatementPtr,
    ) -> Self {
        FunctionDeclaration {
            token,
            return_type,
            identifier,
            parameters,
            body,
        }
    }
}

impl Statement for FunctionDeclaration {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}FunctionDeclaration:\n", tree_prefix(depth));
        let depth = depth + 1;
        tree += &format!("{}return_type:\n", tree_prefix(depth));
        tree += &self.return_type.tree_gen(depth + 1);
        tree += &format!("\n{}identifier:\n", tree_prefix(depth));
        tree += &format!("{}{}", tree_prefix(depth + 1), self.identifier);
        tree += &format!("\n{}parameter:", tree_prefix(depth));
        for parameter in self.parameters.iter() {
            tree += "\n";
            tree += &parameter.tree_gen(depth + 1);
        }
        tree += &format!("\n{}body:\n", tree_prefix(depth));
        tree += &self.body.tree_gen(depth + 1);

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let previous_block = gen.builder.get_insert_block();

        let mut param_types: Vec<BasicMetadataTypeEnum<'ctx>> = Vec::new();
        for parameter in self.parameters.iter() {
            let param_type = parameter.var_type.llvm_type(gen)?;
            let basic = basic_type(param_type).ok_or_else(|| {
                CodegenError::new(CodegenErrorKind::VoidType, parameter.token.clone())
            })?;
            param_types.push(basic.into());
        }

        let return_type = self.return_type.llvm_type(gen)?;
        let return_basic = basic_type(return_type);
        let function_type = match return_basic {
            Some(basic) => basic.fn_type(param_types.as_slice(), false),
            None => gen.context.void_type().fn_type(param_types.as_slice(), false),
        };

        let function = gen.create_function(&self.identifier, function_type);

        for (parameter, value) in self.parameters.iter().zip(function.get_params()) {
            if parameter.identifier.is_empty() {
                continue;
            }

            let param_type = basic_type(parameter.var_type.llvm_type(gen)?)
                .ok_or_else(|| CodegenError::new(CodegenErrorKind::VoidType, parameter.token.clone()))?;
            let alloca = gen
                .builder
                .build_alloca(param_type, &parameter.identifier)
                .unwrap();
            gen.builder.build_store(alloca, value).unwrap();
            gen.named_allocas
                .insert(parameter.identifier.clone(), alloca);
        }

        self.body.generate(gen)?;

        if return_basic.is_none() {
            gen.builder.build_return(None).unwrap();
        }

        match previous_block {
            Some(block) => gen.builder.position_at_end(block),
            None => gen.builder.clear_insertion_position(),
        }

        Ok(Value::new(AnyValueEnum::FunctionValue(function)))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct ReturnStatement {
    pub token: Token,
    pub expression: Option<ExpressionPtr>,
}

impl ReturnStatement {
    pub fn new(token: Token, expression: Option<ExpressionPtr>) -> Self {
        ReturnStatement { token, expression }
    }
}

impl Statement for ReturnStatement {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        match &self.expression {
            Some(expression) => format!(
                "{}ReturnStatement:\n{}",
                tree_prefix(depth),
                expression.tree_gen(depth + 1)
            ),
            None => format!("{}ReturnStatement:", tree_prefix(depth)),
        }
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let instruction = match &self.expression {
            Some(expression) => {
                let value = expression.generate(gen)?;
                let basic = value.basic().ok_or_else(|| {
                    CodegenError::new(
                        CodegenErrorKind::InvalidOperands {
                            operator: String::from("return"),
                        },
                        expression.token().clone(),
                    )
                })?;
                gen.builder.build_return(Some(&basic)).unwrap()
            }
            None => gen.builder.build_return(None).unwrap(),
        };

        Ok(Value::new(AnyValueEnum::InstructionValue(instruction)))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: ExpressionPtr,
}

impl ExpressionStatement {
    pub fn new(token: Token, expression: ExpressionPtr) -> Self {
        ExpressionStatement { token, expression }
    }
}

impl Statement for ExpressionStatement {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        format!(
            "{}ExpressionStatement:\n{}",
            tree_prefix(depth),
            self.expression.tree_gen(depth + 1)
        )
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        self.expression.generate(gen)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The root node and the `{ ... }` statement sequence share their shape;
/// `Block` is only ever produced as the root of a parse.
#[derive(Debug)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<StatementPtr>,
}

impl Block {
    pub fn new(token: Token, statements: Vec<StatementPtr>) -> Self {
        Block { token, statements }
    }
}

impl Statement for Block {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}Block:", tree_prefix(depth));
        for statement in self.statements.iter() {
            tree += "\n";
            tree += &statement.tree_gen(depth + 1);
        }

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let mut last = Value::new(AnyValueEnum::IntValue(gen.context.i32_type().const_zero()));
        for statement in self.statements.iter() {
            last = statement.generate(gen)?;
        }

        Ok(last)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct Scope {
    pub token: Token,
    pub statements: Vec<StatementPtr>,
    /// Slot for a trailing scope value. No grammar rule populates it and
    /// generation ignores it.
    pub result: Option<ExpressionPtr>,
}

impl Scope {
    pub fn new(token: Token, statements: Vec<StatementPtr>) -> Self {
        Scope {
            token,
            statements,
            result: None,
        }
    }
}

impl Statement for Scope {
    fn token(&self) -> &Token {
        &self.token
    }
    fn tree_gen(&self, depth: usize) -> String {
        let mut tree = format!("{}Scope:", tree_prefix(depth));
        for statement in self.statements.iter() {
            tree += "\n";
            tree += &statement.tree_gen(depth + 1);
        }
        if let Some(result) = &self.result {
            tree += &format!("\n{}result:\n", tree_prefix(depth + 1));
            tree += &result.tree_gen(depth + 2);
        }

        tree
    }
    fn generate<'ctx>(&self, gen: &mut Codegen<'ctx>) -> Result<Value<'ctx>, CodegenError> {
        let mut last = Value::new(AnyValueEnum::IntValue(gen.context.i32_type().const_zero()));
        for statement in self.statements.iter() {
            last = statement.generate(gen)?;
        }

        Ok(last)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
