//! Layout settings of a [`CodeBuilder`](super::CodeBuilder).

const SPACES: &str = "                ";

/// What one level of nesting is written as.
///
/// Space widths above 16 are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    pub const CPP: Self = Self::Spaces(4);
    pub const RUST: Self = Self::Spaces(4);
    pub const TYPESCRIPT: Self = Self::Spaces(2);
    pub const GO: Self = Self::Tab;

    /// Text of a single level.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from(width).min(SPACES.len())],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CPP
    }
}

/// Where the `{` of a block goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// On its own line, aligned with the header.
    #[default]
    NextLine,
    /// At the end of the header line.
    SameLine,
}
