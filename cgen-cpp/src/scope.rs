//! Ordered member collections shared by classes and structs.

use cgen_core::{CodeBuilder, Element, ParentRef, ScopeHandle};

use crate::{
    Array, Class, Constructor, Enum, Method, Result, Variable, element::CppElement,
};

/// A member function slot: either a regular method or a constructor.
#[derive(Debug)]
pub enum ClassMethod {
    Method(Method),
    Constructor(Constructor),
}

impl ClassMethod {
    /// Whether the definition pass has to emit anything for this member.
    pub fn needs_definition(&self) -> bool {
        match self {
            Self::Method(method) => method.needs_definition(),
            Self::Constructor(_) => true,
        }
    }

    fn as_element(&self) -> &dyn CppElement {
        match self {
            Self::Method(method) => method,
            Self::Constructor(ctor) => ctor,
        }
    }
}

impl From<Method> for ClassMethod {
    fn from(method: Method) -> Self {
        Self::Method(method)
    }
}

impl From<Constructor> for ClassMethod {
    fn from(ctor: Constructor) -> Self {
        Self::Constructor(ctor)
    }
}

impl Element for ClassMethod {
    fn name(&self) -> &str {
        match self {
            Self::Method(method) => method.name(),
            Self::Constructor(ctor) => ctor.name(),
        }
    }

    fn parent(&self) -> ParentRef {
        self.as_element().parent()
    }

    fn attach(&mut self, parent: ParentRef) {
        match self {
            Self::Method(method) => method.attach(parent),
            Self::Constructor(ctor) => ctor.attach(parent),
        }
    }
}

impl CppElement for ClassMethod {
    fn validate(&self) -> Result<()> {
        self.as_element().validate()
    }

    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()> {
        self.as_element().render_declaration(out)
    }

    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()> {
        self.as_element().render_definition(out)
    }
}

/// Members of a class, each kind kept in insertion order.
///
/// Enums, nested classes and methods form the public part of the
/// declaration; variables and arrays the private part. Every added member is
/// linked back to this scope but stays owned by it.
#[derive(Debug)]
pub struct Scope {
    handle: ScopeHandle,
    enums: Vec<Enum>,
    classes: Vec<Class>,
    methods: Vec<ClassMethod>,
    variables: Vec<Variable>,
    arrays: Vec<Array>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: ScopeHandle::new(name),
            enums: Vec::new(),
            classes: Vec::new(),
            methods: Vec::new(),
            variables: Vec::new(),
            arrays: Vec::new(),
        }
    }

    pub fn handle(&self) -> &ScopeHandle {
        &self.handle
    }

    pub fn add_method(&mut self, method: impl Into<ClassMethod>) -> &mut Self {
        let mut method = method.into();
        method.attach(self.handle.as_parent());
        self.methods.push(method);
        self
    }

    pub fn add_variable(&mut self, mut variable: Variable) -> &mut Self {
        variable.attach(self.handle.as_parent());
        self.variables.push(variable);
        self
    }

    pub fn add_array(&mut self, mut array: Array) -> &mut Self {
        array.attach(self.handle.as_parent());
        self.arrays.push(array);
        self
    }

    pub fn add_enum(&mut self, mut e: Enum) -> &mut Self {
        self.handle.declare_type(e.name());
        e.attach(self.handle.as_parent());
        self.enums.push(e);
        self
    }

    pub fn add_internal_class(&mut self, mut class: Class) -> &mut Self {
        self.handle.declare_type(class.name());
        class.attach(self.handle.as_parent());
        self.classes.push(class);
        self
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn methods(&self) -> &[ClassMethod] {
        &self.methods
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn arrays(&self) -> &[Array] {
        &self.arrays
    }

    pub fn has_public(&self) -> bool {
        !self.enums.is_empty() || !self.classes.is_empty() || !self.methods.is_empty()
    }

    pub fn has_private(&self) -> bool {
        !self.variables.is_empty() || !self.arrays.is_empty()
    }

    /// Validate every member, nested classes included.
    pub fn validate(&self) -> Result<()> {
        for e in &self.enums {
            e.validate()?;
        }
        for class in &self.classes {
            class.validate()?;
        }
        for method in &self.methods {
            method.validate()?;
        }
        for variable in &self.variables {
            variable.validate()?;
        }
        for array in &self.arrays {
            array.validate()?;
        }
        Ok(())
    }

    /// Enums, nested classes, then methods.
    pub fn render_public(&self, out: &mut CodeBuilder) -> Result<()> {
        for e in &self.enums {
            e.render_declaration(out)?;
        }
        for class in &self.classes {
            class.render_declaration(out)?;
        }
        for method in &self.methods {
            method.render_declaration(out)?;
        }
        Ok(())
    }

    /// Variables, then arrays.
    pub fn render_private(&self, out: &mut CodeBuilder) -> Result<()> {
        for variable in &self.variables {
            variable.render_declaration(out)?;
        }
        for array in &self.arrays {
            array.render_declaration(out)?;
        }
        Ok(())
    }

    /// Render every out-of-class definition into its own chunk, in order:
    /// static data, methods, then nested classes.
    pub fn collect_definitions(
        &self,
        template: &CodeBuilder,
        chunks: &mut Vec<CodeBuilder>,
    ) -> Result<()> {
        let statics = self
            .variables
            .iter()
            .filter(|v| v.needs_definition())
            .map(|v| v as &dyn CppElement)
            .chain(
                self.arrays
                    .iter()
                    .filter(|a| a.needs_definition())
                    .map(|a| a as &dyn CppElement),
            );
        let methods = self
            .methods
            .iter()
            .filter(|m| m.needs_definition())
            .map(|m| m as &dyn CppElement);

        for element in statics.chain(methods) {
            let mut chunk = template.fork();
            element.render_definition(&mut chunk)?;
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
        }
        for class in &self.classes {
            class.collect_definitions(template, chunks)?;
        }
        Ok(())
    }
}
