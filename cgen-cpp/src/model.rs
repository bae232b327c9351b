//! Model files: a TOML description of the functions and classes to generate.

use std::{path::Path, str::FromStr};

use log::info;
use serde::Deserialize;

use crate::{
    Class, Error, Function, Result,
    config::{ClassConfig, FunctionConfig},
    unit::TranslationUnit,
};

/// Root of a model file.
///
/// ```toml
/// [[functions]]
/// name = "Version"
/// ret_type = "int"
/// implementation = ["return 3;"]
///
/// [[classes]]
/// name = "Counter"
///
/// [[classes.methods]]
/// name = "Get"
/// ret_type = "int"
/// is_const = true
/// implementation = ["return m_n;"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    /// Free functions
    #[serde(default)]
    pub functions: Vec<FunctionConfig>,

    /// Top-level classes and structs
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
}

impl FromStr for Model {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "model.toml")
    }
}

impl Model {
    /// Parse a model file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a model from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let model: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        info!(
            file = filename,
            functions = model.functions.len(),
            classes = model.classes.len();
            "Loaded model"
        );
        Ok(model)
    }

    /// Create the elements described by the model, in file order.
    pub fn build(&self) -> TranslationUnit {
        let mut unit = TranslationUnit::new();
        for function in &self.functions {
            unit.add_function(Function::from(function.clone()));
        }
        for class in &self.classes {
            unit.add_class(Class::from(class.clone()));
        }
        unit
    }
}
