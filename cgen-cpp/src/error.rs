use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::grammar::Violation;

/// Result type for cgen-cpp operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model")]
    #[diagnostic(code(cgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {element} configuration: {}", .source.message())]
    #[diagnostic(code(cgen::config))]
    Config {
        element: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("{element} '{name}': {violation}")]
    #[diagnostic(code(cgen::grammar))]
    Grammar {
        element: &'static str,
        name: String,
        violation: Violation,
    },

    #[error("no implementation for {element} '{name}'")]
    #[diagnostic(
        code(cgen::missing_implementation),
        help("attach a body with `implementation`, or declare the method pure virtual")
    )]
    MissingImplementation { element: &'static str, name: String },

    #[error("pure virtual method '{name}' cannot be defined")]
    #[diagnostic(code(cgen::pure_virtual_definition))]
    PureVirtualDefinition { name: String },

    #[error("{element} '{name}' must belong to a class")]
    #[diagnostic(
        code(cgen::orphan),
        help("add it to a class with `add_method` before rendering")
    )]
    Orphan { element: &'static str, name: String },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn config(element: &'static str, source: toml::de::Error) -> Box<Self> {
        Box::new(Error::Config { element, source })
    }

    pub fn grammar(element: &'static str, name: &str, violation: Violation) -> Box<Self> {
        Box::new(Error::Grammar {
            element,
            name: name.to_string(),
            violation,
        })
    }

    pub fn missing_implementation(element: &'static str, name: &str) -> Box<Self> {
        Box::new(Error::MissingImplementation {
            element,
            name: name.to_string(),
        })
    }

    pub fn pure_virtual_definition(name: &str) -> Box<Self> {
        Box::new(Error::PureVirtualDefinition {
            name: name.to_string(),
        })
    }

    pub fn orphan(element: &'static str, name: &str) -> Box<Self> {
        Box::new(Error::Orphan {
            element,
            name: name.to_string(),
        })
    }

    /// The grammar violation, if this is a grammar error.
    pub fn violation(&self) -> Option<Violation> {
        match self {
            Error::Grammar { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}
