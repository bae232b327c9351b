//! The two-phase render contract shared by every C++ construct.

use std::fmt;

use cgen_core::{CodeBuilder, Element};

use crate::Result;

/// Separator between nested C++ scopes.
pub const SCOPE_SEPARATOR: &str = "::";

/// A C++ construct that renders an interface part and an out-of-line part.
///
/// Every implementation validates itself before writing anything; a failed
/// render leaves the sink untouched.
pub trait CppElement: Element + fmt::Debug {
    /// Check that the element forms legal C++.
    fn validate(&self) -> Result<()>;

    /// What goes into the header: a signature, or the full body when the
    /// element must be defined where it is declared.
    fn render_declaration(&self, out: &mut CodeBuilder) -> Result<()>;

    /// What goes into the source file. May write nothing.
    fn render_definition(&self, out: &mut CodeBuilder) -> Result<()>;

    /// Name qualified by every enclosing class.
    fn full_name(&self) -> String {
        self.qualified_name(SCOPE_SEPARATOR)
    }
}

/// Producer of a function body, invoked with a sink already indented inside
/// the braces.
pub struct Body(Box<dyn Fn(&mut CodeBuilder)>);

impl Body {
    pub fn new(f: impl Fn(&mut CodeBuilder) + 'static) -> Self {
        Self(Box::new(f))
    }

    /// A body that writes the given lines verbatim.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self::new(move |out| {
            for line in &lines {
                out.push_line(line);
            }
        })
    }

    pub fn write(&self, out: &mut CodeBuilder) {
        (self.0)(out)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Body(..)")
    }
}

/// Join header parts with single spaces, skipping empty ones.
pub(crate) fn join_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `keyword` when `on`, empty otherwise.
pub(crate) fn keyword(on: bool, keyword: &'static str) -> &'static str {
    if on { keyword } else { "" }
}
