//! Code builder utility for generating properly indented code.

use super::{BraceStyle, Indent};

/// Append-only text sink that tracks indentation and emits balanced blocks.
///
/// Every generated construct writes through this type; nothing builds
/// output by concatenating strings on its own.
///
/// # Example
///
/// ```
/// use cgen_core::CodeBuilder;
///
/// let mut builder = CodeBuilder::cpp();
/// builder.push_block("int main()", "", |b| {
///     b.push_line("return 0;");
/// });
///
/// assert_eq!(builder.build(), "int main()\n{\n    return 0;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    braces: BraceStyle,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation and brace style.
    pub fn new(indent: Indent, braces: BraceStyle) -> Self {
        Self {
            indent_level: 0,
            indent,
            braces,
            buffer: String::new(),
        }
    }

    /// 4-space indentation with braces on their own line.
    pub fn cpp() -> Self {
        Self::new(Indent::CPP, BraceStyle::NextLine)
    }

    /// 4-space indentation with braces on the header line.
    pub fn rust() -> Self {
        Self::new(Indent::RUST, BraceStyle::SameLine)
    }

    /// 2-space indentation with braces on the header line.
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT, BraceStyle::SameLine)
    }

    /// Tab indentation with braces on the header line.
    pub fn go() -> Self {
        Self::new(Indent::GO, BraceStyle::SameLine)
    }

    /// An empty builder sharing this builder's configuration and indentation level.
    ///
    /// Render into a fork and [`append`](Self::append) it once the whole
    /// element succeeded, so a failure leaves this builder untouched.
    pub fn fork(&self) -> Self {
        Self {
            indent_level: self.indent_level,
            indent: self.indent,
            braces: self.braces,
            buffer: String::new(),
        }
    }

    /// Commit the content of a fork.
    pub fn append(&mut self, other: CodeBuilder) -> &mut Self {
        self.buffer.push_str(&other.buffer);
        self
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Enter an access region, e.g. `public:`.
    ///
    /// The label sits one level left of the current indentation, which puts
    /// it in line with the braces of the enclosing block.
    pub fn push_label(&mut self, label: &str) -> &mut Self {
        for _ in 0..self.indent_level.saturating_sub(1) {
            self.buffer.push_str(self.indent.unit());
        }
        self.buffer.push_str(label);
        self.buffer.push_str(":\n");
        self
    }

    /// Add a documentation comment verbatim, one output line per input line.
    ///
    /// Common leading whitespace and surrounding blank lines are removed, so
    /// callers can pass indented raw string literals.
    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.iter().position(|l| !l.trim().is_empty());
        let end = lines.iter().rposition(|l| !l.trim().is_empty());
        let (Some(start), Some(end)) = (start, end) else {
            return self;
        };
        let lines = &lines[start..=end];

        let margin = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);

        for line in lines {
            if line.trim().is_empty() {
                self.push_blank();
            } else {
                let body = line.get(margin..).unwrap_or_else(|| line.trim_start());
                self.push_line(body.trim_end());
            }
        }
        self
    }

    /// Add a braced block.
    ///
    /// `postfix` is written right after the closing brace (`;` for class
    /// declarations, empty for function bodies).
    pub fn push_block<F>(&mut self, header: &str, postfix: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.open_block(header);
        f(self);
        self.close_block(postfix);
        self
    }

    /// Add a braced block whose body may fail.
    ///
    /// On error the block is left open; render into a [`fork`](Self::fork)
    /// when the partial output must not reach the final buffer.
    pub fn try_push_block<E, F>(&mut self, header: &str, postfix: &str, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.open_block(header);
        f(self)?;
        self.close_block(postfix);
        Ok(())
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn open_block(&mut self, header: &str) {
        match self.braces {
            BraceStyle::NextLine => {
                if !header.is_empty() {
                    self.push_line(header);
                }
                self.push_line("{");
            }
            BraceStyle::SameLine if header.is_empty() => {
                self.push_line("{");
            }
            BraceStyle::SameLine => {
                self.push_line(&format!("{header} {{"));
            }
        }
        self.push_indent();
    }

    fn close_block(&mut self, postfix: &str) {
        self.push_dedent();
        self.push_line(&format!("}}{postfix}"));
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.unit());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::cpp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::cpp();
        builder.push_line("int x = 1;");
        assert_eq!(builder.build(), "int x = 1;\n");
    }

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_line("function foo() {")
            .push_indent()
            .push_line("return 1;")
            .push_dedent()
            .push_line("}");
        assert_eq!(builder.build(), "function foo() {\n  return 1;\n}\n");
    }

    #[test]
    fn test_odd_indent_width() {
        let mut builder = CodeBuilder::new(Indent::Spaces(3), BraceStyle::NextLine);
        builder.push_block("void f()", "", |b| {
            b.push_block("if (x)", "", |b| {
                b.push_line("g();");
            });
        });
        assert_eq!(
            builder.build(),
            "void f()\n{\n   if (x)\n   {\n      g();\n   }\n}\n"
        );
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::cpp();
        builder.push_dedent().push_line("x;");
        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.build(), "x;\n");
    }

    #[test]
    fn test_next_line_block_with_postfix() {
        let mut builder = CodeBuilder::cpp();
        builder.push_block("struct A", ";", |b| {
            b.push_line("int x;");
        });
        assert_eq!(builder.build(), "struct A\n{\n    int x;\n};\n");
    }

    #[test]
    fn test_same_line_block() {
        let mut builder = CodeBuilder::rust();
        builder.push_block("impl Foo", "", |b| {
            b.push_line("fn bar(&self) {}");
        });
        assert_eq!(builder.build(), "impl Foo {\n    fn bar(&self) {}\n}\n");
    }

    #[test]
    fn test_label_is_outdented() {
        let mut builder = CodeBuilder::cpp();
        builder.push_block("class A", ";", |b| {
            b.push_label("public");
            b.push_line("A();");
        });
        assert_eq!(builder.build(), "class A\n{\npublic:\n    A();\n};\n");
    }

    #[test]
    fn test_try_block_propagates_error() {
        let mut builder = CodeBuilder::cpp();
        let result: Result<(), &str> = builder.try_push_block("void f()", "", |b| {
            b.push_line("a();");
            Err("boom")
        });
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn test_fork_and_append() {
        let mut builder = CodeBuilder::cpp();
        builder.push_indent();

        let mut fork = builder.fork();
        assert!(fork.is_empty());
        fork.push_line("int y;");
        builder.append(fork);

        assert_eq!(builder.as_str(), "    int y;\n");
    }

    #[test]
    fn test_doc_dedent() {
        let mut builder = CodeBuilder::cpp();
        builder.push_indent().push_doc(
            "
            /// Returns the answer.
            ///
            ///   Indented detail.
            ",
        );
        assert_eq!(
            builder.build(),
            "    /// Returns the answer.\n    ///\n    ///   Indented detail.\n"
        );
    }

    #[test]
    fn test_doc_blank_input() {
        let mut builder = CodeBuilder::cpp();
        builder.push_doc("   \n  ");
        assert!(builder.is_empty());
    }
}
