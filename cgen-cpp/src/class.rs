//! Classes and structs: the two-phase render of a whole member tree.

use cgen_core::{CodeBuilder, Element, ParentRef};
use log::debug;

use crate::{
    Array, Constructor, Enum, Method, Result, Variable,
    config::{ClassConfig, FromTable},
    element::CppElement,
    scope::{ClassMethod, Scope},
};

/// A `class` or `struct` declaration together with its out-of-class
/// definitions.
///
/// [`render_declaration`](CppElement::render_declaration) writes the class
/// body for a header; [`render_definition`](CppElement::render_definition)
/// writes static data initializers, method bodies and the definitions of
/// nested classes, separated by blank lines. Both validate the whole tree
/// first and write nothing on failure, so a class can be rendered any number
/// of times.
///
/// # Example
///
/// ```
/// use cgen_core::CodeBuilder;
/// use cgen_cpp::{Class, CppElement, Method, Variable};
///
/// let mut point = Class::new("Point");
/// point
///     .add_method(Method::new("X").returns("int").implementation(|out| {
///         out.push_line("return m_x;");
///     }))
///     .add_variable(Variable::new("m_x", "int"));
///
/// let mut header = CodeBuilder::cpp();
/// point.render_declaration(&mut header).unwrap();
/// assert_eq!(
///     header.build(),
///     "class Point\n{\npublic:\n    int X();\nprivate:\n    int m_x;\n};\n"
/// );
/// ```
#[derive(Debug)]
pub struct Class {
    scope: Scope,
    is_struct: bool,
    parent_class: Option<String>,
    documentation: Option<String>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scope: Scope::new(name),
            is_struct: false,
            parent_class: None,
            documentation: None,
        }
    }

    /// Build a class and all of its members from a configuration table.
    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(ClassConfig::from_table(table)?.into())
    }

    /// Declare with `struct` instead of `class`; no access labels are written.
    pub fn struct_(mut self) -> Self {
        self.is_struct = true;
        self
    }

    /// Publicly inherit from `parent`.
    pub fn inherits(mut self, parent: impl Into<String>) -> Self {
        self.parent_class = Some(parent.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn add_method(&mut self, method: impl Into<ClassMethod>) -> &mut Self {
        self.scope.add_method(method);
        self
    }

    pub fn add_variable(&mut self, variable: Variable) -> &mut Self {
        self.scope.add_variable(variable);
        self
    }

    pub fn add_array(&mut self, array: Array) -> &mut Self {
        self.scope.add_array(array);
        self
    }

    pub fn add_enum(&mut self, e: Enum) -> &mut Self {
        self.scope.add_enum(e);
        self
    }

    pub fn add_internal_class(&mut self, class: Class) -> &mut Self {
        self.scope.add_internal_class(class);
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_struct(&self) -> bool {
        self.is_struct
    }

    pub fn parent_class(&self) -> Option<&str> {
        self.parent_class.as_deref()
    }

    /// Declaration followed by a blank line and the definitions, if any.
    pub fn render(&self, out: &mut CodeBuilder) -> Result<()> {
        let mut rendered = out.fork();
        self.render_declaration(&mut rendered)?;

        let mut definitions = out.fork();
        self.render_definition(&mut definitions)?;
        if !definitions.is_empty() {
            rendered.push_blank();
            rendered.append(definitions);
        }

        out.append(rendered);
        Ok(())
    }

    pub(crate) fn collect_definitions(
        &self,
        template: &CodeBuilder,
        chunks: &mut Vec<CodeBuilder>,
    ) -> Result<()> {
        self.scope.collect_definitions(template, chunks)
    }

    fn header(&self) -> String {
        let keyword = if self.is_struct { "struct" } else { "class" };
        match &self.parent_class {
            Some(parent) => format!("{keyword} {} : public {parent}", self.name()),
            None => format!("{keyword} {}", self.name()),
        }
    }

    /// Public members under a `public:` label, then private members under
    /// `private:`. Structs get no labels, and `private:` is only written
    /// after a public section since it is the default for a class.
    fn render_members(&self, out: &mut CodeBuilder) -> Result<()> {
        let labels = !self.is_struct;
        let has_public = self.scope.has_public();

        if has_public {
            if labels {
                out.push_label("public");
            }
            self.scope.render_public(out)?;
        }
        if self.scope.has_private() {
            if labels && has_public {
                out.push_label("private");
            }
            self.scope.render_private(out)?;
        }
        Ok(())
    }
}

impl From<ClassConfig> for Class {
    fn from(config: ClassConfig) -> Self {
        let mut class = Class::new(config.name);
        class.is_struct = config.is_struct;
        class.parent_class = config.parent_class;
        class.documentation = config.documentation;

        for e in config.enums {
            class.add_enum(e.into());
        }
        for nested in config.classes {
            class.add_internal_class(nested.into());
        }
        for ctor in config.constructors {
            class.add_method(Constructor::from(ctor));
        }
        for method in config.methods {
            class.add_method(Method::from(method));
        }
        for variable in config.variables {
            class.add_variable(variable.into());
        }
        for array in config.arrays {
            class.add_array(array.into());
        }
        class
    }
}

impl Element for Class {
    fn name(&self) -> &str {
        self.scope.handle().name()
    }

    fn parent(&self) -> ParentRef {
        self.scope.handle().parent()
    }

    fn attach(&mut self, parent: ParentRef) {
        self.scope.handle().attach(parent);
    }
}

impl CppElement for Class {
    fn validate(&self) -> Result<()> {
        self.scope.validate()
    }

    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        debug!(class = self.name(); "Rendering class declaration");

        let mut block = out.fork();
        if let Some(doc) = &self.documentation {
            block.push_doc(doc);
        }
        block.try_push_block(&self.header(), ";", |b| self.render_members(b))?;
        out.append(block);
        Ok(())
    }

    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        debug!(class = self.name(); "Rendering class definitions");

        let mut chunks = Vec::new();
        self.collect_definitions(out, &mut chunks)?;

        let mut joined = out.fork();
        for (index, chunk) in chunks.into_iter().enumerate() {
            if index > 0 {
                joined.push_blank();
            }
            joined.append(chunk);
        }
        out.append(joined);
        Ok(())
    }
}
