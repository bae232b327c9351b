//! Variables and data members.

use cgen_core::{CodeBuilder, Element, ParentRef};

use crate::{
    Error, Result,
    config::{FromTable, VariableConfig},
    element::{CppElement, SCOPE_SEPARATOR, join_parts, keyword},
    grammar::{Modifier, Violation},
};

/// A variable, or a data member once it is added to a class.
///
/// Inside a class only constexpr and non-static members carry their value in
/// the declaration; a static member gets it from the out-of-class
/// definition.
#[derive(Debug)]
pub struct Variable {
    name: String,
    parent: ParentRef,
    ty: String,
    is_static: bool,
    is_const: bool,
    is_constexpr: bool,
    is_extern: bool,
    value: Option<String>,
    documentation: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: ParentRef::detached(),
            ty: ty.into(),
            is_static: false,
            is_const: false,
            is_constexpr: false,
            is_extern: false,
            value: None,
            documentation: None,
        }
    }

    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(VariableConfig::from_table(table)?.into())
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn constexpr(mut self) -> Self {
        self.is_constexpr = true;
        self
    }

    pub fn extern_(mut self) -> Self {
        self.is_extern = true;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether a class member needs an out-of-class definition.
    pub fn needs_definition(&self) -> bool {
        self.is_static && !self.is_constexpr
    }

    /// Render as a free variable: `[static] [extern] [constexpr] [const] type name[ = value];`.
    pub fn render(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        let head = join_parts([
            keyword(self.is_static, "static"),
            keyword(self.is_extern, "extern"),
            keyword(self.is_constexpr, "constexpr"),
            keyword(self.is_const, "const"),
            self.ty.as_str(),
            self.name.as_str(),
        ]);
        self.write(out, head, self.value.as_deref());
        Ok(())
    }

    fn write(&self, out: &mut CodeBuilder, head: String, value: Option<&str>) {
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        match value {
            Some(value) => out.push_line(&format!("{head} = {value};")),
            None => out.push_line(&format!("{head};")),
        };
    }
}

impl From<VariableConfig> for Variable {
    fn from(config: VariableConfig) -> Self {
        Self {
            name: config.name,
            parent: ParentRef::detached(),
            ty: config.ty,
            is_static: config.is_static,
            is_const: config.is_const,
            is_constexpr: config.is_constexpr,
            is_extern: config.is_extern,
            value: config.value,
            documentation: config.documentation,
        }
    }
}

impl Element for Variable {
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

impl CppElement for Variable {
    fn validate(&self) -> Result<()> {
        let violation = if self.is_constexpr && self.value.is_none() {
            Some(Violation::ConstexprWithoutValue)
        } else if self.is_extern && self.value.is_some() {
            Some(Violation::ExternWithValue)
        } else if self.is_extern && self.is_static {
            Some(Violation::Conflict {
                modifier: Modifier::Extern,
                with: Modifier::Static,
            })
        } else if self.is_extern && self.is_constexpr {
            Some(Violation::Conflict {
                modifier: Modifier::Extern,
                with: Modifier::Constexpr,
            })
        } else {
            None
        };
        match violation {
            Some(violation) => Err(Error::grammar("variable", &self.name, violation)),
            None => Ok(()),
        }
    }

    /// The member declaration, or the free variable itself when detached.
    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        if !self.parent.is_attached() {
            return self.render(out);
        }
        self.validate()?;
        let head = join_parts([
            keyword(self.is_static, "static"),
            keyword(self.is_constexpr, "constexpr"),
            keyword(self.is_const, "const"),
            self.ty.as_str(),
            self.name.as_str(),
        ]);
        let value = if self.needs_definition() {
            None
        } else {
            self.value.as_deref()
        };
        self.write(out, head, value);
        Ok(())
    }

    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        if !self.parent.is_attached() || !self.needs_definition() {
            return Ok(());
        }
        let qualified = self.full_name();
        let ty = self.parent.resolve_type(&self.ty, SCOPE_SEPARATOR);
        let head = join_parts([
            keyword(self.is_const, "const"),
            ty.as_str(),
            qualified.as_str(),
        ]);
        self.write(out, head, self.value.as_deref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cgen_core::ScopeHandle;

    use super::*;

    fn both(var: &Variable) -> (String, String) {
        let mut decl = CodeBuilder::cpp();
        var.render_declaration(&mut decl).unwrap();
        let mut def = CodeBuilder::cpp();
        var.render_definition(&mut def).unwrap();
        (decl.build(), def.build())
    }

    #[test]
    fn test_free_variable() {
        let var = Variable::new("kLimit", "int").const_().value("10");
        let mut out = CodeBuilder::cpp();
        var.render(&mut out).unwrap();
        assert_eq!(out.build(), "const int kLimit = 10;\n");

        let var = Variable::new("g_count", "int").extern_();
        let mut out = CodeBuilder::cpp();
        var.render(&mut out).unwrap();
        assert_eq!(out.build(), "extern int g_count;\n");
    }

    #[test]
    fn test_static_member() {
        let scope = ScopeHandle::new("MyClass");
        let mut var = Variable::new("m_var", "size_t")
            .static_()
            .const_()
            .value("255");
        var.attach(scope.as_parent());

        let (decl, def) = both(&var);
        assert_eq!(decl, "static const size_t m_var;\n");
        assert_eq!(def, "const size_t MyClass::m_var = 255;\n");
    }

    #[test]
    fn test_static_member_of_nested_type() {
        let scope = ScopeHandle::new("Machine");
        scope.declare_type("State");
        let mut var = Variable::new("s_initial", "State").static_().value("eIdle");
        var.attach(scope.as_parent());

        let (decl, def) = both(&var);
        assert_eq!(decl, "static State s_initial;\n");
        assert_eq!(def, "Machine::State Machine::s_initial = eIdle;\n");
    }

    #[test]
    fn test_constexpr_member_has_no_definition() {
        let scope = ScopeHandle::new("Limits");
        let mut var = Variable::new("kMax", "int")
            .static_()
            .constexpr()
            .value("7");
        var.attach(scope.as_parent());

        let (decl, def) = both(&var);
        assert_eq!(decl, "static constexpr int kMax = 7;\n");
        assert_eq!(def, "");
    }

    #[test]
    fn test_plain_member() {
        let scope = ScopeHandle::new("A");
        let mut var = Variable::new("m_flag", "bool").doc("// Set once.");
        var.attach(scope.as_parent());

        let (decl, def) = both(&var);
        assert_eq!(decl, "// Set once.\nbool m_flag;\n");
        assert_eq!(def, "");
    }

    #[test]
    fn test_grammar() {
        let cases = [
            (
                Variable::new("x", "int").constexpr(),
                Violation::ConstexprWithoutValue,
            ),
            (
                Variable::new("x", "int").extern_().value("1"),
                Violation::ExternWithValue,
            ),
            (
                Variable::new("x", "int").extern_().static_(),
                Violation::Conflict {
                    modifier: Modifier::Extern,
                    with: Modifier::Static,
                },
            ),
        ];
        for (var, expected) in cases {
            let mut out = CodeBuilder::cpp();
            let err = var.render(&mut out).unwrap_err();
            assert_eq!(err.violation(), Some(expected));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_from_table() {
        let table: toml::Table = toml::from_str(
            r#"
            name = "m_var2"
            type = "bool"
            "#,
        )
        .unwrap();
        let var = Variable::from_table(table).unwrap();
        assert_eq!(var.ty(), "bool");
        assert!(!var.is_static());
    }
}
