use std::{fs, path::PathBuf};

use cgen_core::CodeBuilder;
use cgen_cpp::Model;
use clap::Args;
use eyre::{Context, Result};
use log::info;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct RenderCommand {
    /// Path to the model file
    pub model: PathBuf,

    /// Write the header here instead of stdout
    #[arg(long)]
    pub header: Option<PathBuf>,

    /// Write the source here instead of stdout
    #[arg(long)]
    pub source: Option<PathBuf>,
}

/// Rendered text of a model.
struct Output {
    header: String,
    source: String,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let output = self.render().unwrap_or_exit();
        self.write(&output)
    }

    /// Render both files in memory; nothing is written unless both succeed.
    fn render(&self) -> cgen_cpp::Result<Output> {
        let unit = Model::from_file(&self.model)?.build();

        let mut header = CodeBuilder::cpp();
        unit.render_header(&mut header)?;
        let mut source = CodeBuilder::cpp();
        unit.render_source(&mut source)?;

        Ok(Output {
            header: header.build(),
            source: source.build(),
        })
    }

    fn write(&self, output: &Output) -> Result<()> {
        let mut stdout = Vec::new();
        for (path, text) in [(&self.header, &output.header), (&self.source, &output.source)] {
            match path {
                Some(path) => {
                    fs::write(path, text)
                        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                    info!(path:? = path; "Wrote file");
                }
                None if !text.is_empty() => stdout.push(text.as_str()),
                None => {}
            }
        }
        if !stdout.is_empty() {
            print!("{}", stdout.join("\n"));
        }
        Ok(())
    }
}
