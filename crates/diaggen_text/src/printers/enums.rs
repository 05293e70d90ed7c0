//! Collect the enumerations declared by `%enum_select<Name>{...}`.
//!
//! Only selects with a non-empty enumeration name produce a declaration, and only options with a `%Name{...}`
//! prefix produce an enumerator. The enumerator value is the option's position in the select. Uniqueness of
//! names across diagnostics is checked by the caller, which sees every diagnostic.

use crate::error::TextErrorKind;
use crate::piece::{DiffPiece, EnumSelectPiece, Piece, PlaceholderPiece, PluralPiece, SelectPiece, TextPiece};
use crate::substitution::{ResolveContext, SubstitutionTable};
use crate::visit::{TextVisitor, VisitResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator {
    /// Position of the option within its select.
    pub index: usize,
    pub name: String,
}

/// One `%enum_select` enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub enumerators: Vec<Enumerator>,
}

pub struct EnumExtractor<'s> {
    ctx: ResolveContext<'s>,
    found: Vec<EnumDecl>,
}

impl<'s> EnumExtractor<'s> {
    pub fn new(substitutions: &'s SubstitutionTable) -> Self {
        Self {
            ctx: ResolveContext::new(substitutions),
            found: Vec::new(),
        }
    }

    /// Every enumeration reachable from `piece`, in visit order.
    pub fn extract(mut self, piece: &Piece) -> Result<Vec<EnumDecl>, TextErrorKind> {
        self.visit(piece)?;
        Ok(self.found)
    }
}

impl<'s> TextVisitor<'s> for EnumExtractor<'s> {
    fn context(&self) -> &ResolveContext<'s> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ResolveContext<'s> {
        &mut self.ctx
    }

    fn visit_multi(&mut self, pieces: &[Piece]) -> VisitResult {
        pieces.iter().try_for_each(|piece| self.visit(piece))
    }

    fn visit_text(&mut self, _text: &TextPiece) -> VisitResult {
        Ok(())
    }

    fn visit_placeholder(&mut self, _placeholder: &PlaceholderPiece) -> VisitResult {
        Ok(())
    }

    fn visit_select(&mut self, select: &SelectPiece) -> VisitResult {
        select.options.iter().try_for_each(|option| self.visit(option))
    }

    fn visit_enum_select(&mut self, select: &EnumSelectPiece) -> VisitResult {
        if !select.enum_name.is_empty() {
            let enumerators = select
                .options
                .iter()
                .enumerate()
                .filter_map(|(index, option)| {
                    option.enumerator.as_ref().map(|name| Enumerator {
                        index,
                        name: name.clone(),
                    })
                })
                .collect();
            self.found.push(EnumDecl {
                name: select.enum_name.clone(),
                enumerators,
            });
        }
        select.bodies().try_for_each(|body| self.visit(body))
    }

    fn visit_plural(&mut self, plural: &PluralPiece) -> VisitResult {
        plural.options.iter().try_for_each(|option| self.visit(&option.body))
    }

    fn visit_diff(&mut self, _diff: &DiffPiece) -> VisitResult {
        Ok(())
    }
}
