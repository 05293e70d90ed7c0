//! Per-record entrypoints into the text frontend.
//!
//! [`DiagnosticTextBuilder`] owns the substitution table and runs the parser and one printer for a single record
//! at a time. It is also the point where a bare [`TextErrorKind`] becomes a [`TextError`] naming the record being
//! evaluated: each `build_*` call brackets exactly one record, so there is no ambient "current record" state.

use tracing::debug;

use crate::error::{TextError, TextErrorKind};
use crate::parser;
use crate::piece::Piece;
use crate::printers::{DefinitionPrinter, DocumentationPrinter, EnumDecl, EnumExtractor};
use crate::substitution::SubstitutionTable;

/// The slice of a record the text frontend needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRecord<'a> {
    pub name: &'a str,
    /// Source location used in error messages.
    pub loc: &'a str,
    /// Raw diagnostic text (`Summary` or `Substitution` field).
    pub text: &'a str,
}

impl<'a> TextRecord<'a> {
    pub fn new(name: &'a str, loc: &'a str, text: &'a str) -> Self {
        Self { name, loc, text }
    }

    fn error(&self, kind: TextErrorKind) -> TextError {
        TextError::new(self.name, self.loc, kind)
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticTextBuilder {
    substitutions: SubstitutionTable,
}

impl DiagnosticTextBuilder {
    /// Parse every substitution record into the table.
    ///
    /// ## Errors
    /// - The first substitution whose text does not parse.
    #[tracing::instrument(skip_all)]
    pub fn new<'a>(substitutions: impl IntoIterator<Item = TextRecord<'a>>) -> Result<Self, TextError> {
        let mut table = SubstitutionTable::new();
        for record in substitutions {
            let piece = parser::parse(record.text).map_err(|kind| record.error(kind))?;
            table.insert(record.name, piece);
        }
        debug!(count = table.len(), "parsed text substitutions");
        Ok(Self { substitutions: table })
    }

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Reject a diagnostic whose name is also a substitution name.
    pub fn check_name(&self, record: &TextRecord<'_>) -> Result<(), TextError> {
        if self.substitutions.contains(record.name) {
            return Err(record.error(TextErrorKind::NameCollision(record.name.to_string())));
        }
        Ok(())
    }

    pub fn parse(&self, record: &TextRecord<'_>) -> Result<Piece, TextError> {
        parser::parse(record.text).map_err(|kind| record.error(kind))
    }

    /// Canonical runtime string for the record's text.
    pub fn build_for_definition(&self, record: &TextRecord<'_>) -> Result<String, TextError> {
        let root = self.parse(record)?;
        DefinitionPrinter::new(&self.substitutions)
            .print(&root)
            .map_err(|kind| record.error(kind))
    }

    /// Documentation table for the record's text, prefixed by `severity: ` rendered in the `severity` role.
    pub fn build_for_documentation(&self, severity: &str, record: &TextRecord<'_>) -> Result<Vec<String>, TextError> {
        let root = self.parse(record)?;
        let prefix = Piece::text_with_role(format!("{severity}: "), severity);
        let root = match root {
            Piece::Multi(mut pieces) => {
                pieces.insert(0, prefix);
                Piece::Multi(pieces)
            }
            other => Piece::Multi(vec![prefix, other]),
        };
        DocumentationPrinter::new(&self.substitutions)
            .print(&root)
            .map_err(|kind| record.error(kind))
    }

    /// Enumerations declared by the record's text.
    pub fn build_for_enum(&self, record: &TextRecord<'_>) -> Result<Vec<EnumDecl>, TextError> {
        let root = self.parse(record)?;
        EnumExtractor::new(&self.substitutions)
            .extract(&root)
            .map_err(|kind| record.error(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(subs: &[(&'static str, &'static str)]) -> DiagnosticTextBuilder {
        DiagnosticTextBuilder::new(subs.iter().map(|(name, text)| TextRecord::new(name, "subs.td:1", text))).unwrap()
    }

    #[test]
    fn test_definition_via_substitution() {
        let builder = builder(&[("select_kind", "%select{function|variable}0")]);
        let record = TextRecord::new("warn_unused", "Sema.td:10", "unused %sub{select_kind}1 %0");
        assert_eq!(
            builder.build_for_definition(&record).unwrap(),
            "unused %select{function|variable}1 %0"
        );
    }

    #[test]
    fn test_errors_name_the_diagnostic() {
        let builder = builder(&[]);
        let record = TextRecord::new("warn_bad", "Sema.td:11", "%sub{missing}");
        let err = builder.build_for_definition(&record).unwrap_err();
        assert_eq!(err.record, "warn_bad");
        assert_eq!(err.loc, "Sema.td:11");
        assert_eq!(err.kind, TextErrorKind::UnknownSubstitution("missing".to_string()));
    }

    #[test]
    fn test_bad_substitution_text_names_the_substitution() {
        let err = DiagnosticTextBuilder::new([TextRecord::new("broken", "subs.td:4", "%select{a")]).unwrap_err();
        assert_eq!(err.record, "broken");
        assert_eq!(err.kind, TextErrorKind::Unterminated("select".to_string()));
    }

    #[test]
    fn test_name_collision() {
        let builder = builder(&[("shared", "x")]);
        let err = builder
            .check_name(&TextRecord::new("shared", "Sema.td:1", "y"))
            .unwrap_err();
        assert_eq!(
            err.kind.to_string(),
            "Diagnostic 'shared' has same name as TextSubstitution definition"
        );
        assert!(builder.check_name(&TextRecord::new("other", "Sema.td:2", "y")).is_ok());
    }

    #[test]
    fn test_documentation_has_severity_prefix() {
        let builder = builder(&[]);
        let lines = builder
            .build_for_documentation("error", &TextRecord::new("err_x", "Sema.td:3", "oops"))
            .unwrap();
        let rule = format!("+{}+", "-".repeat(39));
        assert_eq!(
            lines,
            vec![rule.clone(), "|:error:`error:` |nbsp| :diagtext:`oops`|".to_string(), rule]
        );
    }

    #[test]
    fn test_enum_build() {
        let builder = builder(&[]);
        let decls = builder
            .build_for_enum(&TextRecord::new("err_tag", "Sema.td:5", "%enum_select<Tag>{%S{struct}|%U{union}}0"))
            .unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Tag");
        assert_eq!(decls[0].enumerators.len(), 2);
    }
}
