//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Append-only sink with indentation, labels and scoped blocks
//! - [`Indent`] - Indentation configuration
//! - [`BraceStyle`] - Where opening braces go

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::{BraceStyle, Indent};
