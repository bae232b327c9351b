//! Enumerations with a trailing item counter.

use cgen_core::{CodeBuilder, Element, ParentRef};

use crate::{
    Result,
    config::{EnumConfig, FromTable},
    element::CppElement,
};

const DEFAULT_PREFIX: &str = "e";

/// A plain `enum` or an `enum class`.
///
/// Items are numbered from zero in insertion order and followed by a
/// `<prefix><Name>Count` entry holding the number of items.
///
/// ```
/// use cgen_core::CodeBuilder;
/// use cgen_cpp::Enum;
///
/// let mut e = Enum::new("Color");
/// e.add_items(["Red", "Green"]);
///
/// let mut out = CodeBuilder::cpp();
/// e.render(&mut out);
/// assert_eq!(
///     out.build(),
///     "enum Color\n{\n    eRed = 0,\n    eGreen = 1,\n    eColorCount = 2\n};\n"
/// );
/// ```
#[derive(Debug)]
pub struct Enum {
    name: String,
    parent: ParentRef,
    prefix: String,
    enum_class: bool,
    items: Vec<String>,
    documentation: Option<String>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: ParentRef::detached(),
            prefix: DEFAULT_PREFIX.to_string(),
            enum_class: false,
            items: Vec::new(),
            documentation: None,
        }
    }

    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(EnumConfig::from_table(table)?.into())
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn enum_class(mut self) -> Self {
        self.enum_class = true;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn add_item(&mut self, item: impl Into<String>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    pub fn add_items<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Render the full enum. An enum cannot be malformed, so this never fails.
    pub fn render(&self, out: &mut CodeBuilder) {
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        let header = if self.enum_class {
            format!("enum class {}", self.name)
        } else {
            format!("enum {}", self.name)
        };
        out.push_block(&header, ";", |b| {
            for (index, item) in self.items.iter().enumerate() {
                b.push_line(&format!("{}{item} = {index},", self.prefix));
            }
            b.push_line(&format!(
                "{}{}Count = {}",
                self.prefix,
                self.name,
                self.items.len()
            ));
        });
    }
}

impl From<EnumConfig> for Enum {
    fn from(config: EnumConfig) -> Self {
        Self {
            name: config.name,
            parent: ParentRef::detached(),
            prefix: config.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            enum_class: config.enum_class,
            items: config.items,
            documentation: config.documentation,
        }
    }
}

impl Element for Enum {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> ParentRef {
        self.parent.clone()
    }

    fn attach(&mut self, parent: ParentRef) {
        self.parent = parent;
    }
}

impl CppElement for Enum {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        self.render(out);
        Ok(())
    }

    /// Enums are complete at their declaration.
    fn render_definition(&self, _out: &mut CodeBuilder) -> Result<()> {
        Ok(())
    }
}
