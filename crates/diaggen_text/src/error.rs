//! Errors raised while parsing or evaluating diagnostic text.
//!
//! The parser and visitors only know *what* went wrong ([`TextErrorKind`]). The builder knows *which record*
//! was being evaluated and wraps the kind into a [`TextError`] at that boundary, so every fatal text error names
//! the diagnostic or substitution that caused it.

use miette::Diagnostic;
use thiserror::Error;

/// What went wrong in a piece of diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextErrorKind {
    #[error("Unknown modifier type: {0}")]
    UnknownModifier(String),

    #[error("modifier '<' syntax not valid with %{0}")]
    AngleOutsideEnumSelect(String),

    #[error("expected '{expected}' while parsing %{modifier}")]
    ExpectedDelimiter { expected: char, modifier: String },

    #[error("expected '{expected}' after {modifier}")]
    ExpectedAfter { expected: char, modifier: String },

    #[error("unterminated %{0}")]
    Unterminated(String),

    #[error("expected modifier in diagnostic")]
    ExpectedModifierIndex,

    #[error("modifier index '{0}' is out of range")]
    ModifierIndexOverflow(String),

    #[error("expected ':' while parsing %plural")]
    ExpectedPluralColon,

    #[error("expected substitution name in %sub")]
    EmptySubstitutionName,

    #[error("Failed to find substitution with name: {0}")]
    UnknownSubstitution(String),

    #[error("Modifier value '{index}' is not valid for this mapping (has {count} mappings)")]
    InvalidMapping { index: usize, count: usize },

    #[error("substitution '{0}' refers to itself")]
    RecursiveSubstitution(String),

    #[error("Diagnostic '{0}' has same name as TextSubstitution definition")]
    NameCollision(String),
}

/// A fatal text error attributed to the record under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{loc}: {kind} (while evaluating '{record}')")]
#[diagnostic(code(diaggen::text))]
pub struct TextError {
    pub record: String,
    pub loc: String,
    pub kind: TextErrorKind,
}

impl TextError {
    pub fn new(record: impl Into<String>, loc: impl Into<String>, kind: TextErrorKind) -> Self {
        Self {
            record: record.into(),
            loc: loc.into(),
            kind,
        }
    }
}
