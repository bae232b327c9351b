//! A header/source pair assembled from top-level elements.

use std::fmt;

use cgen_core::CodeBuilder;
use log::debug;

use crate::{Class, Function, Result, element::CppElement};

/// Ordered top-level elements rendered into a header and a source file.
///
/// Each render validates every element before writing, and separates
/// elements with a blank line.
#[derive(Default)]
pub struct TranslationUnit {
    items: Vec<Box<dyn CppElement>>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, function: Function) -> &mut Self {
        self.add(function)
    }

    pub fn add_class(&mut self, class: Class) -> &mut Self {
        self.add(class)
    }

    /// Add any top-level element, e.g. an [`Enum`](crate::Enum) or a free
    /// [`Variable`](crate::Variable).
    pub fn add(&mut self, element: impl CppElement + 'static) -> &mut Self {
        self.items.push(Box::new(element));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        self.items.iter().try_for_each(|item| item.validate())
    }

    /// Declarations of every element.
    pub fn render_header(&self, out: &mut CodeBuilder) -> Result<()> {
        debug!(items = self.items.len(); "Rendering header");
        self.render_with(out, |item, b| item.render_declaration(b))
    }

    /// Definitions of every element; elements without any are skipped.
    pub fn render_source(&self, out: &mut CodeBuilder) -> Result<()> {
        debug!(items = self.items.len(); "Rendering source");
        self.render_with(out, |item, b| item.render_definition(b))
    }

    fn render_with<F>(&self, out: &mut CodeBuilder, render: F) -> Result<()>
    where
        F: Fn(&dyn CppElement, &mut CodeBuilder) -> Result<()>,
    {
        self.validate()?;
        let mut joined = out.fork();
        for item in &self.items {
            let mut chunk = out.fork();
            render(item.as_ref(), &mut chunk)?;
            if chunk.is_empty() {
                continue;
            }
            if !joined.is_empty() {
                joined.push_blank();
            }
            joined.append(chunk);
        }
        out.append(joined);
        Ok(())
    }
}

impl fmt::Debug for TranslationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}
