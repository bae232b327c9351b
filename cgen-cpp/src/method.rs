//! Member functions.

use cgen_core::{CodeBuilder, Element, ParentRef};
use log::trace;

use crate::{
    Error, Result,
    config::{FromTable, MethodConfig},
    element::{Body, CppElement, SCOPE_SEPARATOR, join_parts, keyword},
    grammar::Modifiers,
};

/// A member function of a [`Class`](crate::Class).
///
/// The short header (`static int Get() const`) is what appears inside the
/// class body; the full header (`int Outer::Inner::Get() const`) is used for
/// the out-of-class definition and keeps only `const` of all the modifiers.
#[derive(Debug)]
pub struct Method {
    name: String,
    parent: ParentRef,
    ret_type: Option<String>,
    modifiers: Modifiers,
    arguments: Vec<String>,
    implementation: Option<Body>,
    documentation: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: ParentRef::detached(),
            ret_type: None,
            modifiers: Modifiers::default(),
            arguments: Vec::new(),
            implementation: None,
            documentation: None,
        }
    }

    /// Build from a configuration table, rejecting unrecognized options.
    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(MethodConfig::from_table(table)?.into())
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.ret_type = Some(ty.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    pub fn const_(mut self) -> Self {
        self.modifiers.is_const = true;
        self
    }

    pub fn constexpr(mut self) -> Self {
        self.modifiers.is_constexpr = true;
        self
    }

    pub fn virtual_(mut self) -> Self {
        self.modifiers.is_virtual = true;
        self
    }

    /// Mark as `= 0`. The method must also be [`virtual_`](Self::virtual_).
    pub fn pure_virtual(mut self) -> Self {
        self.modifiers.is_pure_virtual = true;
        self
    }

    pub fn override_(mut self) -> Self {
        self.modifiers.is_override = true;
        self
    }

    pub fn final_(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    pub fn inline(mut self) -> Self {
        self.modifiers.is_inline = true;
        self
    }

    /// Replace all modifiers at once.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the body producer.
    pub fn implementation(mut self, body: impl Fn(&mut CodeBuilder) + 'static) -> Self {
        self.implementation = Some(Body::new(body));
        self
    }

    /// Append a parameter, keeping declaration order.
    pub fn add_argument(&mut self, argument: impl Into<String>) {
        self.arguments.push(argument.into());
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn ret_type(&self) -> Option<&str> {
        self.ret_type.as_deref()
    }

    pub fn has_implementation(&self) -> bool {
        self.implementation.is_some()
    }

    /// Whether the class definition pass has to emit this method.
    ///
    /// Pure virtual methods have nothing to define and constexpr methods are
    /// complete at their declaration.
    pub fn needs_definition(&self) -> bool {
        !self.modifiers.is_pure_virtual && !self.modifiers.is_constexpr
    }

    /// Render the method with its body as it would appear inside the class.
    pub fn render(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        let body = self.body()?;
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        out.push_block(&self.short_header(), "", |b| body.write(b));
        Ok(())
    }

    pub(crate) fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub(crate) fn body(&self) -> Result<&Body> {
        self.implementation
            .as_ref()
            .ok_or_else(|| Error::missing_implementation("method", &self.name))
    }

    pub(crate) fn args(&self) -> String {
        self.arguments.join(", ")
    }

    /// Modifier grammar only, without the parent check.
    pub(crate) fn check_modifiers(&self) -> Result<()> {
        self.modifiers
            .check(self.implementation.is_some())
            .map_err(|violation| Error::grammar("method", &self.name, violation))
    }

    pub(crate) fn check_parent(&self, element: &'static str) -> Result<()> {
        if !self.parent.is_attached() {
            return Err(Error::orphan(element, &self.name));
        }
        Ok(())
    }

    /// Header used inside the class body.
    fn short_header(&self) -> String {
        let m = &self.modifiers;
        let signature = format!("{}({})", self.name, self.args());
        let header = join_parts([
            keyword(m.is_static, "static"),
            keyword(m.is_constexpr, "constexpr"),
            keyword(m.is_virtual, "virtual"),
            keyword(m.is_inline, "inline"),
            self.ret_type.as_deref().unwrap_or_default(),
            signature.as_str(),
            keyword(m.is_const, "const"),
            keyword(m.is_override, "override"),
            keyword(m.is_final, "final"),
        ]);
        if m.is_pure_virtual {
            format!("{header} = 0")
        } else {
            header
        }
    }

    /// Header used for the out-of-class definition.
    ///
    /// A return type declared inside an enclosing class is qualified, since
    /// the definition is outside of that class.
    fn full_header(&self) -> String {
        let signature = format!("{}({})", self.full_name(), self.args());
        let ret_type = self
            .ret_type
            .as_deref()
            .map(|ty| self.parent.resolve_type(ty, SCOPE_SEPARATOR))
            .unwrap_or_default();
        join_parts([
            ret_type.as_str(),
            signature.as_str(),
            keyword(self.modifiers.is_const, "const"),
        ])
    }
}

impl From<MethodConfig> for Method {
    fn from(config: MethodConfig) -> Self {
        Self {
            name: config.name,
            parent: ParentRef::detached(),
            ret_type: config.ret_type,
            modifiers: Modifiers {
                is_static: config.is_static,
                is_const: config.is_const,
                is_constexpr: config.is_constexpr,
                is_virtual: config.is_virtual,
                is_pure_virtual: config.is_pure_virtual,
                is_override: config.is_override,
                is_final: config.is_final,
                is_inline: config.is_inline,
            },
            arguments: config.arguments,
            implementation: config.implementation.map(Body::from_lines),
            documentation: config.documentation,
        }
    }
}

impl Element for Method {
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

impl CppElement for Method {
    fn validate(&self) -> Result<()> {
        self.check_modifiers()?;
        self.check_parent("method")
    }

    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        trace!(method = self.name.as_str(); "Rendering method declaration");
        if self.modifiers.is_constexpr {
            return self.render(out);
        }
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        out.push_line(&format!("{};", self.short_header()));
        Ok(())
    }

    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        if self.modifiers.is_pure_virtual {
            return Err(Error::pure_virtual_definition(&self.name));
        }
        let body = self.body()?;
        trace!(method = self.name.as_str(); "Rendering method definition");
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        out.push_block(&self.full_header(), "", |b| body.write(b));
        Ok(())
    }
}
