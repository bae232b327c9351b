use std::path::PathBuf;

use cgen_core::CodeBuilder;
use cgen_cpp::{ClassConfig, Model};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the model file
    pub model: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let model = Model::from_file(&self.model).unwrap_or_exit();
        check(&model).unwrap_or_exit();

        println!("✓ {} is valid\n", self.model.display());
        println!("{}", summary(&model));
        Ok(())
    }
}

/// Render the model into throwaway builders so every error surfaces.
fn check(model: &Model) -> cgen_cpp::Result<()> {
    let unit = model.build();
    unit.render_header(&mut CodeBuilder::cpp())?;
    unit.render_source(&mut CodeBuilder::cpp())
}

fn summary(model: &Model) -> String {
    let mut lines = vec![count_line(model.functions.len(), "function")];
    lines.push(count_line(model.classes.len(), "class"));
    for class in &model.classes {
        describe(class, 2, &mut lines);
    }
    lines.join("\n")
}

fn describe(class: &ClassConfig, depth: usize, lines: &mut Vec<String>) {
    let kind = if class.is_struct { "struct" } else { "class" };
    let methods = class.constructors.len() + class.methods.len();
    lines.push(format!(
        "{:indent$}{kind} {} ({} method{}, {} data member{})",
        "",
        class.name,
        methods,
        plural(methods),
        class.variables.len() + class.arrays.len(),
        plural(class.variables.len() + class.arrays.len()),
        indent = depth * 2,
    ));
    for nested in &class.classes {
        describe(nested, depth + 1, lines);
    }
}

fn count_line(count: usize, noun: &str) -> String {
    let suffix = match (count, noun.ends_with('s')) {
        (1, _) => "",
        (_, true) => "es",
        (_, false) => "s",
    };
    format!("  {count} {noun}{suffix}")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let model: Model = r#"
[[functions]]
name = "f"
implementation = []

[[classes]]
name = "Outer"

[[classes.methods]]
name = "g"
implementation = []

[[classes.classes]]
name = "Inner"
is_struct = true

[[classes.classes.variables]]
name = "v"
type = "int"
"#
        .parse()
        .unwrap();

        assert!(check(&model).is_ok());
        assert_eq!(
            summary(&model),
            "  1 function\n  1 class\n    class Outer (1 method, 0 data members)\n      struct Inner (0 methods, 1 data member)"
        );
    }

    #[test]
    fn test_check_reports_missing_implementation() {
        let model: Model = r#"
[[classes]]
name = "A"

[[classes.methods]]
name = "f"
ret_type = "void"
"#
        .parse()
        .unwrap();

        let err = check(&model).unwrap_err();
        assert!(matches!(*err, cgen_cpp::Error::MissingImplementation { .. }));
    }
}
