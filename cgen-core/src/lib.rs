//! Language-agnostic building blocks for the cgen source generator.
//!
//! # Module Organization
//!
//! - [`builder`] - The text sink ([`CodeBuilder`]) and its formatting knobs
//! - [`scope`] - Weak parent links used for lazy qualified-name resolution
//! - [`element`] - The [`Element`] trait shared by every generated construct

pub mod builder;
pub mod element;
pub mod scope;

pub use builder::{BraceStyle, CodeBuilder, Indent};
pub use element::Element;
pub use scope::{ParentRef, ScopeHandle};
