//! Canonical runtime form of a diagnostic text.
//!
//! Substitutions are spliced in and every argument index is rewritten into the diagnostic's own numbering, so
//! the output only uses constructs the runtime formatter understands. `%enum_select` loses its enumerator names
//! and prints as `%select`.


use diaggen_core::lang::modifiers::{self, ModifierKind};

use crate::error::TextErrorKind;
use crate::piece::{DiffPiece, EnumSelectPiece, Piece, PlaceholderPiece, PluralPiece, SelectPiece, TextPiece};
use crate::substitution::{ResolveContext, SubstitutionTable};
use crate::visit::{TextVisitor, VisitResult};

pub struct DefinitionPrinter<'s> {
    ctx: ResolveContext<'s>,
    out: String,
}

impl<'s> DefinitionPrinter<'s> {
    pub fn new(substitutions: &'s SubstitutionTable) -> Self {
        Self {
            ctx: ResolveContext::new(substitutions),
            out: String::new(),
        }
    }

    /// Print `piece` and return the text.
    pub fn print(mut self, piece: &Piece) -> Result<String, TextErrorKind> {
        self.visit(piece)?;
        Ok(self.out)
    }

    fn push_index(&mut self, index: usize) -> VisitResult {
        let mapped = self.map_index(index)?;
        self.out.push_str(&mapped.to_string());
        Ok(())
    }

    fn push_options<'p>(&mut self, options: impl IntoIterator<Item = &'p Piece>) -> VisitResult {
        self.out.push('{');
        for (i, option) in options.into_iter().enumerate() {
            if i > 0 {
                self.out.push('|');
            }
            self.visit(option)?;
        }
        self.out.push('}');
        Ok(())
    }
}

impl<'s> TextVisitor<'s> for DefinitionPrinter<'s> {
    fn context(&self) -> &ResolveContext<'s> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ResolveContext<'s> {
        &mut self.ctx
    }

    fn visit_multi(&mut self, pieces: &[Piece]) -> VisitResult {
        pieces.iter().try_for_each(|piece| self.visit(piece))
    }

    fn visit_text(&mut self, text: &TextPiece) -> VisitResult {
        self.out.push_str(&text.text);
        Ok(())
    }

    fn visit_placeholder(&mut self, placeholder: &PlaceholderPiece) -> VisitResult {
        self.out.push('%');
        self.out.push_str(modifiers::printed_name(placeholder.kind));
        self.push_index(placeholder.index)
    }

    fn visit_select(&mut self, select: &SelectPiece) -> VisitResult {
        self.out.push('%');
        self.out.push_str(modifiers::printed_name(select.kind));
        // `%s` keeps its shorthand; its two options are implied.
        if select.kind != ModifierKind::S {
            self.push_options(&select.options)?;
        }
        self.push_index(select.index)
    }

    fn visit_enum_select(&mut self, select: &EnumSelectPiece) -> VisitResult {
        self.out.push('%');
        self.out.push_str(modifiers::printed_name(ModifierKind::EnumSelect));
        self.push_options(select.bodies())?;
        self.push_index(select.index)
    }

    fn visit_plural(&mut self, plural: &PluralPiece) -> VisitResult {
        self.out.push_str("%plural{");
        for (i, option) in plural.options.iter().enumerate() {
            if i > 0 {
                self.out.push('|');
            }
            self.out.push_str(&option.prefix);
            self.visit(&option.body)?;
        }
        self.out.push('}');
        self.push_index(plural.index)
    }

    fn visit_diff(&mut self, diff: &DiffPiece) -> VisitResult {
        let [a, b, c, d] = &diff.parts;
        self.out.push_str("%diff{");
        self.visit(a)?;
        self.out.push('$');
        self.visit(b)?;
        self.out.push('$');
        self.visit(c)?;
        self.out.push('|');
        self.visit(d)?;
        self.out.push('}');
        self.push_index(diff.indexes[0])?;
        self.out.push(',');
        self.push_index(diff.indexes[1])
    }
}
