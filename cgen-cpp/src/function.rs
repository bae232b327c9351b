//! Free (non-member) C++ functions.

use cgen_core::{CodeBuilder, Element, ParentRef};
use log::trace;

use crate::{
    Error, Result,
    config::{FromTable, FunctionConfig},
    element::{Body, CppElement, join_parts, keyword},
    grammar::Violation,
};

/// A free C++ function.
///
/// Arguments are opaque strings (`"int a"`, `"const std::string& s = {}"`)
/// and are emitted as given.
///
/// # Example
///
/// ```
/// use cgen_core::CodeBuilder;
/// use cgen_cpp::Function;
///
/// let f = Function::new("GetAnswer")
///     .returns("int")
///     .implementation(|out| {
///         out.push_line("return 42;");
///     });
///
/// let mut out = CodeBuilder::cpp();
/// f.render(&mut out).unwrap();
/// assert_eq!(out.build(), "int GetAnswer()\n{\n    return 42;\n}\n");
/// ```
#[derive(Debug)]
pub struct Function {
    name: String,
    parent: ParentRef,
    ret_type: Option<String>,
    is_constexpr: bool,
    arguments: Vec<String>,
    implementation: Option<Body>,
    documentation: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: ParentRef::detached(),
            ret_type: None,
            is_constexpr: false,
            arguments: Vec::new(),
            implementation: None,
            documentation: None,
        }
    }

    /// Build from a configuration table, rejecting unrecognized options.
    pub fn from_table(table: toml::Table) -> Result<Self> {
        Ok(FunctionConfig::from_table(table)?.into())
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.ret_type = Some(ty.into());
        self
    }

    pub fn constexpr(mut self) -> Self {
        self.is_constexpr = true;
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

    pub fn is_constexpr(&self) -> bool {
        self.is_constexpr
    }

    /// Render the signature together with the body.
    pub fn render(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        let Some(body) = &self.implementation else {
            return Err(Error::missing_implementation("function", &self.name));
        };
        trace!(function = self.name.as_str(); "Rendering function");

        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        out.push_block(&self.header(), "", |b| body.write(b));
        Ok(())
    }

    fn header(&self) -> String {
        let signature = format!("{}({})", self.name, self.arguments.join(", "));
        join_parts([
            keyword(self.is_constexpr, "constexpr"),
            self.ret_type.as_deref().unwrap_or_default(),
            signature.as_str(),
        ])
    }
}

impl From<FunctionConfig> for Function {
    fn from(config: FunctionConfig) -> Self {
        Self {
            name: config.name,
            parent: ParentRef::detached(),
            ret_type: config.ret_type,
            is_constexpr: config.is_constexpr,
            arguments: config.arguments,
            implementation: config.implementation.map(Body::from_lines),
            documentation: config.documentation,
        }
    }
}

impl Element for Function {
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

impl CppElement for Function {
    fn validate(&self) -> Result<()> {
        if self.is_constexpr && self.implementation.is_none() {
            return Err(Error::grammar(
                "function",
                &self.name,
                Violation::ConstexprWithoutBody,
            ));
        }
        Ok(())
    }

    /// A terminated signature; constexpr functions carry their body here.
    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        self.validate()?;
        if self.is_constexpr {
            return self.render(out);
        }
        if let Some(doc) = &self.documentation {
            out.push_doc(doc);
        }
        out.push_line(&format!("{};", self.header()));
        Ok(())
    }

    /// The full function; nothing for constexpr functions, which were
    /// emitted with the declaration.
    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        if self.is_constexpr {
            return self.validate();
        }
        self.render(out)
    }
}
