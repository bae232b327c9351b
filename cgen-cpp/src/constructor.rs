//! Constructors: restricted methods with a member-initializer list.

use std::fmt;

use cgen_core::{CodeBuilder, Element, ParentRef};
use log::trace;

use crate::{
    Error, Result,
    config::{ConstructorConfig, FromTable, MethodConfig},
    element::{Body, CppElement},
    grammar::Violation,
    method::Method,
};

/// Member-initializer list of a [`Constructor`].
///
/// A `Deferred` list is produced when the constructor is rendered, so it may
/// depend on state that is only final after the constructor was built.
pub enum Initializers {
    List(Vec<String>),
    Deferred(Box<dyn Fn() -> Vec<String>>),
}

impl Initializers {
    /// Evaluate the list.
    pub fn resolve(&self) -> Vec<String> {
        match self {
            Self::List(list) => list.clone(),
            Self::Deferred(f) => f(),
        }
    }

    fn push(&mut self, initializer: String) {
        *self = match std::mem::take(self) {
            Self::List(mut list) => {
                list.push(initializer);
                Self::List(list)
            }
            Self::Deferred(f) => Self::Deferred(Box::new(move || {
                let mut list = f();
                list.push(initializer.clone());
                list
            })),
        };
    }

    /// ` : a, b` or nothing.
    fn suffix(&self) -> String {
        let list = self.resolve();
        if list.is_empty() {
            String::new()
        } else {
            format!(" : {}", list.join(", "))
        }
    }
}

impl Default for Initializers {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl fmt::Debug for Initializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A class constructor.
///
/// Shares the argument and body surface of [`Method`] but accepts none of its
/// modifiers and no return type. Those can only reach a constructor through
/// a [`ConstructorConfig`], and validation rejects them.
#[derive(Debug)]
pub struct Constructor {
    base: Method,
    initializers: Initializers,
}

impl Constructor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: Method::new(name),
            initializers: Initializers::default(),
        }
    }

    /// Build from a configuration table, rejecting unrecognized options.
    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(ConstructorConfig::from_table(table)?.into())
    }

    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.base.add_argument(argument);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.base = self.base.doc(doc);
        self
    }

    pub fn implementation(mut self, body: impl Fn(&mut CodeBuilder) + 'static) -> Self {
        self.base = self.base.implementation(body);
        self
    }

    pub fn initializer(mut self, initializer: impl Into<String>) -> Self {
        self.add_initializer(initializer);
        self
    }

    /// Replace the initializer list.
    pub fn initializers<I, S>(mut self, initializers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initializers = Initializers::List(initializers.into_iter().map(Into::into).collect());
        self
    }

    /// Produce the initializer list when the constructor is rendered.
    pub fn deferred_initializers(mut self, f: impl Fn() -> Vec<String> + 'static) -> Self {
        self.initializers = Initializers::Deferred(Box::new(f));
        self
    }

    pub fn add_argument(&mut self, argument: impl Into<String>) {
        self.base.add_argument(argument);
    }

    /// Append an initializer after any existing ones, deferred or not.
    pub fn add_initializer(&mut self, initializer: impl Into<String>) {
        self.initializers.push(initializer.into());
    }

    pub fn arguments(&self) -> &[String] {
        self.base.arguments()
    }

    /// The current initializer list.
    pub fn resolved_initializers(&self) -> Vec<String> {
        self.initializers.resolve()
    }

    /// Render the constructor with its body as it would appear inside the class.
    pub fn render(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        let body = self.body()?;
        if let Some(doc) = self.base.documentation() {
            out.push_doc(doc);
        }
        let header = format!(
            "{}({}){}",
            self.name(),
            self.base.args(),
            self.initializers.suffix()
        );
        out.push_block(&header, "", |b| body.write(b));
        Ok(())
    }

    fn body(&self) -> Result<&Body> {
        self.base
            .body()
            .map_err(|_| Error::missing_implementation("constructor", self.name()))
    }
}

impl From<ConstructorConfig> for Constructor {
    fn from(config: ConstructorConfig) -> Self {
        let base = Method::from(MethodConfig {
            name: config.name,
            ret_type: config.ret_type,
            is_static: config.is_static,
            is_constexpr: config.is_constexpr,
            is_virtual: config.is_virtual,
            is_pure_virtual: config.is_pure_virtual,
            is_const: config.is_const,
            is_override: config.is_override,
            is_final: config.is_final,
            is_inline: config.is_inline,
            arguments: config.arguments,
            implementation: config.implementation,
            documentation: config.documentation,
        });
        Self {
            base,
            initializers: Initializers::List(config.initializers),
        }
    }
}

impl Element for Constructor {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn parent(&self) -> ParentRef {
        self.base.parent()
    }

    fn attach(&mut self, parent: ParentRef) {
        self.base.attach(parent);
    }
}

impl CppElement for Constructor {
    fn validate(&self) -> Result<()> {
        let name = self.name();
        if let Some(modifier) = self.base.modifiers().iter().next() {
            return Err(Error::grammar(
                "constructor",
                name,
                Violation::ConstructorModifier(modifier),
            ));
        }
        if self.base.ret_type().is_some() {
            return Err(Error::grammar(
                "constructor",
                name,
                Violation::ConstructorReturnType,
            ));
        }
        self.base.check_parent("constructor")
    }

    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        if let Some(doc) = self.base.documentation() {
            out.push_doc(doc);
        }
        out.push_line(&format!("{}({});", self.name(), self.base.args()));
        Ok(())
    }

    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        let body = self.body()?;
        trace!(constructor = self.name(); "Rendering constructor definition");
        if let Some(doc) = self.base.documentation() {
            out.push_doc(doc);
        }
        let header = format!(
            "{}({}){}",
            self.full_name(),
            self.base.args(),
            self.initializers.suffix()
        );
        out.push_block(&header, "", |b| body.write(b));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use cgen_core::ScopeHandle;

    use super::*;
    use crate::grammar::Modifier;

    fn point(scope: &ScopeHandle) -> Constructor {
        let mut ctor = Constructor::new("Point")
            .argument("int x")
            .argument("int y")
            .implementation(|_| {});
        ctor.attach(scope.as_parent());
        ctor
    }

    fn definition(ctor: &Constructor) -> Result<String> {
        let mut out = CodeBuilder::cpp();
        ctor.render_definition(&mut out)?;
        Ok(out.build())
    }

    #[test]
    fn test_initializer_list() {
        let scope = ScopeHandle::new("Point");
        let ctor = point(&scope).initializers(["a{1}", "b{2}"]);

        let mut decl = CodeBuilder::cpp();
        ctor.render_declaration(&mut decl).unwrap();
        assert_eq!(decl.build(), "Point(int x, int y);\n");

        assert_eq!(
            definition(&ctor).unwrap(),
            "Point::Point(int x, int y) : a{1}, b{2}\n{\n}\n"
        );
    }

    #[test]
    fn test_no_initializers_no_colon() {
        let scope = ScopeHandle::new("Point");
        let ctor = point(&scope);
        assert_eq!(definition(&ctor).unwrap(), "Point::Point(int x, int y)\n{\n}\n");
    }

    #[test]
    fn test_in_class_render() {
        let scope = ScopeHandle::new("Point");
        let ctor = point(&scope).initializer("m_x{x}").initializer("m_y{y}");
        let mut out = CodeBuilder::cpp();
        ctor.render(&mut out).unwrap();
        assert_eq!(out.build(), "Point(int x, int y) : m_x{x}, m_y{y}\n{\n}\n");
    }

    #[test]
    fn test_deferred_initializers_are_evaluated_at_render_time() {
        let scope = ScopeHandle::new("Point");
        let value = Rc::new(Cell::new(0));
        let captured = Rc::clone(&value);
        let mut ctor = point(&scope)
            .deferred_initializers(move || vec![format!("m_x{{{}}}", captured.get())]);
        ctor.add_initializer("m_y{0}");

        value.set(5);
        assert_eq!(ctor.resolved_initializers(), vec!["m_x{5}", "m_y{0}"]);
        assert!(
            definition(&ctor)
                .unwrap()
                .starts_with("Point::Point(int x, int y) : m_x{5}, m_y{0}\n")
        );
    }

    #[test]
    fn test_modifiers_from_config_are_rejected() {
        let scope = ScopeHandle::new("A");
        for key in ["is_static", "is_virtual", "is_const", "is_inline", "is_final"] {
            let table: toml::Table = toml::from_str(&format!("name = \"A\"\n{key} = true")).unwrap();
            let mut ctor = Constructor::from_table(table).unwrap();
            ctor.attach(scope.as_parent());

            let mut out = CodeBuilder::cpp();
            let err = ctor.render_declaration(&mut out).unwrap_err();
            assert!(
                matches!(err.violation(), Some(Violation::ConstructorModifier(_))),
                "{key}: {err:?}"
            );
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_false_modifiers_from_config_pass() {
        let scope = ScopeHandle::new("A");
        let table: toml::Table = toml::from_str(
            r#"
            name = "A"
            is_static = false
            is_virtual = false
            initializers = ["x{0}"]
            implementation = []
            "#,
        )
        .unwrap();
        let mut ctor = Constructor::from_table(table).unwrap();
        ctor.attach(scope.as_parent());
        assert_eq!(definition(&ctor).unwrap(), "A::A() : x{0}\n{\n}\n");
    }

    #[test]
    fn test_return_type_is_rejected() {
        let scope = ScopeHandle::new("A");
        let table: toml::Table = toml::from_str("name = \"A\"\nret_type = \"int\"").unwrap();
        let mut ctor = Constructor::from_table(table).unwrap();
        ctor.attach(scope.as_parent());
        let err = definition(&ctor).unwrap_err();
        assert_eq!(err.violation(), Some(Violation::ConstructorReturnType));
    }

    #[test]
    fn test_first_modifier_is_reported() {
        let scope = ScopeHandle::new("A");
        let table: toml::Table =
            toml::from_str("name = \"A\"\nis_final = true\nis_static = true").unwrap();
        let mut ctor = Constructor::from_table(table).unwrap();
        ctor.attach(scope.as_parent());
        let err = definition(&ctor).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(Violation::ConstructorModifier(Modifier::Static))
        );
    }

    #[test]
    fn test_orphan_and_missing_body() {
        let ctor = Constructor::new("A");
        let mut out = CodeBuilder::cpp();
        let err = ctor.render_declaration(&mut out).unwrap_err();
        assert!(matches!(*err, Error::Orphan { element: "constructor", .. }));

        let scope = ScopeHandle::new("A");
        let mut ctor = Constructor::new("A");
        ctor.attach(scope.as_parent());
        let err = ctor.render_definition(&mut out).unwrap_err();
        assert!(matches!(
            *err,
            Error::MissingImplementation {
                element: "constructor",
                ..
            }
        ));
        assert!(out.is_empty());
    }
}
