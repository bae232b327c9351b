//! Typed configuration for every element kind.
//!
//! Each struct is the allow-list of options its element recognizes: unknown
//! keys are rejected when the table is deserialized, before any element is
//! created.

use serde::{Deserialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Deserialize a configuration from a TOML table, naming the element kind on failure.
pub trait FromTable: DeserializeOwned {
    /// Element kind used in error messages.
    const ELEMENT: &'static str;

    fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|source| Error::config(Self::ELEMENT, source))
    }
}

/// Options of a free function.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionConfig {
    pub name: String,
    pub ret_type: Option<String>,
    #[serde(default)]
    pub is_constexpr: bool,
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Body lines, written verbatim.
    pub implementation: Option<Vec<String>>,
    pub documentation: Option<String>,
}

impl FromTable for FunctionConfig {
    const ELEMENT: &'static str = "function";
}

/// Options of a member function.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodConfig {
    pub name: String,
    pub ret_type: Option<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_constexpr: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_pure_virtual: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_inline: bool,
    #[serde(default)]
    pub arguments: Vec<String>,
    pub implementation: Option<Vec<String>>,
    pub documentation: Option<String>,
}

impl FromTable for MethodConfig {
    const ELEMENT: &'static str = "method";
}

/// Options of a constructor.
///
/// The method-only keys are accepted so that explicit `false` values pass,
/// but constructor validation rejects any of them being set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorConfig {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub initializers: Vec<String>,
    pub implementation: Option<Vec<String>>,
    pub documentation: Option<String>,
    pub ret_type: Option<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_constexpr: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_pure_virtual: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_inline: bool,
}

impl FromTable for ConstructorConfig {
    const ELEMENT: &'static str = "constructor";
}

/// Options of a variable or data member.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_constexpr: bool,
    #[serde(default)]
    pub is_extern: bool,
    pub value: Option<String>,
    pub documentation: Option<String>,
}

impl FromTable for VariableConfig {
    const ELEMENT: &'static str = "variable";
}

/// Options of an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    pub size: Option<usize>,
    #[serde(default)]
    pub items: Vec<String>,
    pub documentation: Option<String>,
}

impl FromTable for ArrayConfig {
    const ELEMENT: &'static str = "array";
}

/// Options of an enum.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumConfig {
    pub name: String,
    pub prefix: Option<String>,
    #[serde(default)]
    pub enum_class: bool,
    #[serde(default)]
    pub items: Vec<String>,
    pub documentation: Option<String>,
}

impl FromTable for EnumConfig {
    const ELEMENT: &'static str = "enum";
}

/// Options of a class or struct, including its members.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassConfig {
    pub name: String,
    #[serde(default)]
    pub is_struct: bool,
    pub parent_class: Option<String>,
    pub documentation: Option<String>,
    #[serde(default)]
    pub enums: Vec<EnumConfig>,
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
    #[serde(default)]
    pub constructors: Vec<ConstructorConfig>,
    #[serde(default)]
    pub methods: Vec<MethodConfig>,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
    #[serde(default)]
    pub arrays: Vec<ArrayConfig>,
}

impl FromTable for ClassConfig {
    const ELEMENT: &'static str = "class";
}
