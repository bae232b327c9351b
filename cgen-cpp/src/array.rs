//! Arrays and array members.

use cgen_core::{CodeBuilder, Element, ParentRef};

use crate::{
    Error, Result,
    config::{ArrayConfig, FromTable},
    element::{CppElement, join_parts, keyword},
    grammar::Violation,
};

/// A C-style array with an optional list of initial items.
#[derive(Debug)]
pub struct Array {
    name: String,
    parent: ParentRef,
    ty: String,
    is_static: bool,
    is_const: bool,
    size: Option<usize>,
    items: Vec<String>,
    documentation: Option<String>,
}

impl Array {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: ParentRef::detached(),
            ty: ty.into(),
            is_static: false,
            is_const: false,
            size: None,
            items: Vec::new(),
            documentation: None,
        }
    }

    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(ArrayConfig::from_table(table)?.into())
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
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

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether a class member needs an out-of-class definition.
    pub fn needs_definition(&self) -> bool {
        self.is_static
    }

    /// Render as a free array: `[static] [const] type name[] = {a, b};`.
    pub fn render(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        let head = join_parts([
            keyword(self.is_static, "static"),
            keyword(self.is_const, "const"),
            self.ty.as_str(),
        ]);
        self.write_initialized(out, &head, &self.name);
        Ok(())
    }

    /// `head name[size] = {items};`, leaving out whatever is unknown.
    fn write_initialized(&self, out: &mut CodeBuilder, head: &str, name: &str) {
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        let size = self.size.map(|n| n.to_string()).unwrap_or_default();
        if self.items.is_empty() {
            out.push_line(&format!("{head} {name}[{size}];"));
        } else {
            out.push_line(&format!(
                "{head} {name}[{size}] = {{{}}};",
                self.items.join(", ")
            ));
        }
    }
}

impl From<ArrayConfig> for Array {
    fn from(config: ArrayConfig) -> Self {
        Self {
            name: config.name,
            parent: ParentRef::detached(),
            ty: config.ty,
            is_static: config.is_static,
            is_const: config.is_const,
            size: config.size,
            items: config.items,
            documentation: config.documentation,
        }
    }
}

impl Element for Array {
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

impl CppElement for Array {
    fn validate(&self) -> Result<()> {
        if self.size.is_none() && self.items.is_empty() {
            return Err(Error::grammar("array", &self.name, Violation::UnsizedArray));
        }
        Ok(())
    }

    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        if !self.parent.is_attached() {
            return self.render(out);
        }
        self.validate()?;
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        let line = if self.is_static {
            let head = join_parts([
                "static",
                keyword(self.is_const, "const"),
                self.ty.as_str(),
            ]);
            format!("{head} {}[];", self.name)
        } else {
            let head = join_parts([keyword(self.is_const, "const"), self.ty.as_str()]);
            let size = self.size.unwrap_or(self.items.len());
            format!("{head} {}[{size}];", self.name)
        };
        out.push_line(&line);
        Ok(())
    }

    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        if !self.parent.is_attached() || !self.needs_definition() {
            return Ok(());
        }
        let head = join_parts([keyword(self.is_const, "const"), self.ty.as_str()]);
        self.write_initialized(out, &head, &self.full_name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cgen_core::ScopeHandle;

    use super::*;

    #[test]
    fn test_static_member_array() {
        let scope = ScopeHandle::new("MyClass");
        let mut array = Array::new("Array", "char*").static_().const_();
        array.add_items(["Item1", "Item2", "Item3"]);
        array.attach(scope.as_parent());

        let mut decl = CodeBuilder::cpp();
        array.render_declaration(&mut decl).unwrap();
        assert_eq!(decl.build(), "static const char* Array[];\n");

        let mut def = CodeBuilder::cpp();
        array.render_definition(&mut def).unwrap();
        assert_eq!(
            def.build(),
            "const char* MyClass::Array[] = {Item1, Item2, Item3};\n"
        );
    }

    #[test]
    fn test_non_static_member_uses_size() {
        let scope = ScopeHandle::new("Buffer");
        let mut array = Array::new("m_data", "uint8_t").size(64);
        array.attach(scope.as_parent());

        let mut decl = CodeBuilder::cpp();
        array.render_declaration(&mut decl).unwrap();
        assert_eq!(decl.build(), "uint8_t m_data[64];\n");

        let mut def = CodeBuilder::cpp();
        array.render_definition(&mut def).unwrap();
        assert!(def.is_empty());
    }

    #[test]
    fn test_non_static_member_counts_items() {
        let scope = ScopeHandle::new("A");
        let mut array = Array::new("m_ids", "int");
        array.add_item("1").add_item("2");
        array.attach(scope.as_parent());

        let mut decl = CodeBuilder::cpp();
        array.render_declaration(&mut decl).unwrap();
        assert_eq!(decl.build(), "int m_ids[2];\n");
    }

    #[test]
    fn test_free_array() {
        let mut array = Array::new("kPrimes", "int").const_();
        array.add_items(["2", "3", "5"]);
        let mut out = CodeBuilder::cpp();
        array.render(&mut out).unwrap();
        assert_eq!(out.build(), "const int kPrimes[] = {2, 3, 5};\n");

        let array = Array::new("buffer", "char").static_().size(16);
        let mut out = CodeBuilder::cpp();
        array.render(&mut out).unwrap();
        assert_eq!(out.build(), "static char buffer[16];\n");
    }

    #[test]
    fn test_unsized_array_is_rejected() {
        let array = Array::new("a", "int");
        let mut out = CodeBuilder::cpp();
        let err = array.render(&mut out).unwrap_err();
        assert_eq!(err.violation(), Some(Violation::UnsizedArray));
        assert!(out.is_empty());
    }
}
