//! C++ backend for cgen.
//!
//! Builds C++ declarations and definitions from an in-memory model of
//! functions, classes and their members. Every element renders in two
//! phases: [`CppElement::render_declaration`] for the header and
//! [`CppElement::render_definition`] for the source file. Both validate the
//! modifier grammar first and write nothing when it is violated.
//!
//! Models can be built programmatically with the builder methods, or loaded
//! from a TOML [`Model`] file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod array;
mod class;
mod config;
mod constructor;
mod element;
mod enums;
mod error;
mod function;
mod grammar;
mod method;
mod model;
mod scope;
mod unit;
mod variable;

pub use array::Array;
pub use class::Class;
pub use config::{
    ArrayConfig, ClassConfig, ConstructorConfig, EnumConfig, FromTable, FunctionConfig,
    MethodConfig, VariableConfig,
};
pub use constructor::{Constructor, Initializers};
pub use element::{Body, CppElement, SCOPE_SEPARATOR};
pub use enums::Enum;
pub use error::{Error, Result};
pub use function::Function;
pub use grammar::{Modifier, Modifiers, Violation};
pub use method::Method;
pub use model::Model;
pub use scope::{ClassMethod, Scope};
pub use unit::TranslationUnit;
pub use variable::Variable;
