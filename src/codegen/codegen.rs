//! Backend wrapper around the LLVM context, module and builder.
//!
//! This module is the seam between the AST and LLVM: it owns the module
//! being built, carries the named-alloca table used for identifier
//! resolution, and defines the [`Value`] handle that generation returns.
//! The AST nodes themselves drive IR construction through the builder.

use std::collections::HashMap;

use inkwell::{
    builder::Builder,
    context::Context,
    module::{Linkage, Module},
    types::{AnyTypeEnum, BasicTypeEnum, FunctionType},
    values::{AnyValue, AnyValueEnum, BasicValueEnum, FunctionValue, IntValue, PointerValue},
};

use crate::{ast::ast::Statement, errors::errors::CodegenError};

/// A handle to one backend value.
///
/// Wraps any LLVM value a node can produce, and answers the one question
/// generation needs beyond pass-through: whether the value resolves to a
/// callable entity.
#[derive(Debug, Clone, Copy)]
pub struct Value<'ctx>(AnyValueEnum<'ctx>);

impl<'ctx> Value<'ctx> {
    pub fn new(value: AnyValueEnum<'ctx>) -> Self {
        Value(value)
    }

    pub fn from_basic(value: BasicValueEnum<'ctx>) -> Self {
        Value(value.as_any_value_enum())
    }

    pub fn raw(&self) -> AnyValueEnum<'ctx> {
        self.0
    }

    /// The value as an operand, if it can be one.
    pub fn basic(&self) -> Option<BasicValueEnum<'ctx>> {
        match self.0 {
            AnyValueEnum::ArrayValue(value) => Some(BasicValueEnum::ArrayValue(value)),
            AnyValueEnum::IntValue(value) => Some(BasicValueEnum::IntValue(value)),
            AnyValueEnum::FloatValue(value) => Some(BasicValueEnum::FloatValue(value)),
            AnyValueEnum::PointerValue(value) => Some(BasicValueEnum::PointerValue(value)),
            AnyValueEnum::StructValue(value) => Some(BasicValueEnum::StructValue(value)),
            AnyValueEnum::VectorValue(value) => Some(BasicValueEnum::VectorValue(value)),
            _ => None,
        }
    }

    pub fn int(&self) -> Option<IntValue<'ctx>> {
        match self.0 {
            AnyValueEnum::IntValue(value) => Some(value),
            _ => None,
        }
    }

    /// The callable entity behind this value, if there is one.
    pub fn callable(&self) -> Option<FunctionValue<'ctx>> {
        match self.0 {
            AnyValueEnum::FunctionValue(value) => Some(value),
            _ => None,
        }
    }
}

/// Narrows a type descriptor to one usable for variables, parameters and
/// array elements. `void` and function types have no such form.
pub fn basic_type(any: AnyTypeEnum<'_>) -> Option<BasicTypeEnum<'_>> {
    match any {
        AnyTypeEnum::ArrayType(ty) => Some(BasicTypeEnum::ArrayType(ty)),
        AnyTypeEnum::FloatType(ty) => Some(BasicTypeEnum::FloatType(ty)),
        AnyTypeEnum::IntType(ty) => Some(BasicTypeEnum::IntType(ty)),
        AnyTypeEnum::PointerType(ty) => Some(BasicTypeEnum::PointerType(ty)),
        AnyTypeEnum::StructType(ty) => Some(BasicTypeEnum::StructType(ty)),
        AnyTypeEnum::VectorType(ty) => Some(BasicTypeEnum::VectorType(ty)),
        _ => None,
    }
}

/// The state of one code generation pass.
#[derive(Debug)]
pub struct Codegen<'ctx> {
    /// Reference to the LLVM context
    pub context: &'ctx Context,
    /// The LLVM module being built
    pub module: Module<'ctx>,
    /// The LLVM IR builder
    pub builder: Builder<'ctx>,
    /// Map of variable names to their stack allocations
    pub named_allocas: HashMap<String, PointerValue<'ctx>>,
}

impl<'ctx> Codegen<'ctx> {
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        Codegen {
            context,
            module: context.create_module(module_name),
            builder: context.create_builder(),
            named_allocas: HashMap::new(),
        }
    }

    /// Creates (or reuses) a function, appends its entry block and leaves
    /// the builder positioned at its end.
    pub fn create_function(
        &self,
        name: &str,
        function_type: FunctionType<'ctx>,
    ) -> FunctionValue<'ctx> {
        let function = match self.module.get_function(name) {
            Some(function) => function,
            None => self
                .module
                .add_function(name, function_type, Some(Linkage::External)),
        };

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        function
    }

    /// Resolves a name to a backend value.
    ///
    /// Functions in the module win over variables; a variable resolves to
    /// a load of its stack slot.
    pub fn resolve(&self, name: &str) -> Option<Value<'ctx>> {
        if let Some(function) = self.module.get_function(name) {
            return Some(Value::new(AnyValueEnum::FunctionValue(function)));
        }

        if let Some(alloca) = self.named_allocas.get(name) {
            let loaded = self.builder.build_load(*alloca, name).unwrap();
            return Some(Value::from_basic(loaded));
        }

        None
    }
}

/// Lowers a parsed program into a fresh module.
///
/// Top-level statements execute inside an implicit `main` returning `0`;
/// function declarations create their own functions and restore the
/// builder position afterwards.
pub fn generate<'ctx>(
    root: &dyn Statement,
    context: &'ctx Context,
    module_name: &str,
) -> Result<Codegen<'ctx>, CodegenError> {
    let mut gen = Codegen::new(context, module_name);

    gen.create_function("main", context.i32_type().fn_type(&[], false));

    root.generate(&mut gen)?;

    gen.builder
        .build_return(Some(&context.i32_type().const_zero()))
        .unwrap();

    Ok(gen)
}
