//! Shared dispatch for piece visitors.
//!
//! Every printer implements [`TextVisitor`]: one method per concrete piece variant plus access to its
//! [`ResolveContext`]. The provided [`TextVisitor::visit`] method does the exhaustive dispatch and expands
//! [`Piece::Substitution`] references in place, so printers never see a substitution. They only see the
//! substituted text, with [`TextVisitor::map_index`] translating its argument indexes.
//!
//! ## Notes
//! - `'s` is the lifetime of the substitution table; pieces visited through a substitution live that long.

use crate::error::TextErrorKind;
use crate::piece::{DiffPiece, EnumSelectPiece, Piece, PlaceholderPiece, PluralPiece, SelectPiece, TextPiece};
use crate::substitution::ResolveContext;

pub type VisitResult = Result<(), TextErrorKind>;

pub trait TextVisitor<'s> {
    fn context(&self) -> &ResolveContext<'s>;
    fn context_mut(&mut self) -> &mut ResolveContext<'s>;

    fn visit_multi(&mut self, pieces: &[Piece]) -> VisitResult;
    fn visit_text(&mut self, text: &TextPiece) -> VisitResult;
    fn visit_placeholder(&mut self, placeholder: &PlaceholderPiece) -> VisitResult;
    fn visit_select(&mut self, select: &SelectPiece) -> VisitResult;
    fn visit_enum_select(&mut self, select: &EnumSelectPiece) -> VisitResult;
    fn visit_plural(&mut self, plural: &PluralPiece) -> VisitResult;
    fn visit_diff(&mut self, diff: &DiffPiece) -> VisitResult;

    /// Dispatch on the variant, expanding substitutions with their mapping installed.
    fn visit(&mut self, piece: &Piece) -> VisitResult {
        match piece {
            Piece::Multi(pieces) => self.visit_multi(pieces),
            Piece::Text(text) => self.visit_text(text),
            Piece::Placeholder(placeholder) => self.visit_placeholder(placeholder),
            Piece::Select(select) => self.visit_select(select),
            Piece::EnumSelect(select) => self.visit_enum_select(select),
            Piece::Plural(plural) => self.visit_plural(plural),
            Piece::Diff(diff) => self.visit_diff(diff),
            Piece::Substitution(sub) => {
                let scope = self.context_mut().enter(sub)?;
                let target = scope.target();
                let result = self.visit(target);
                self.context_mut().leave(scope);
                result
            }
        }
    }

    /// Argument index as seen by the diagnostic being printed.
    fn map_index(&self, index: usize) -> Result<usize, TextErrorKind> {
        self.context().map_index(index)
    }
}
