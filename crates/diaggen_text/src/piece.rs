//! Parsed form of diagnostic text.
//!
//! Every construct of the text language maps to one closed [`Piece`] variant. Visitors match on it exhaustively,
//! so adding a variant is a compile error in every printer until it is handled.
//!
//! ## Notes
//! - The root of a parsed text is always a [`Piece::Multi`], even for a single text run.
//! - Argument indexes stored here are *local*: inside a substitution they are translated through the active
//!   modifier mapping when visited (see [`crate::substitution`]).

use diaggen_core::lang::modifiers::ModifierKind;

/// Role of plain diagnostic text in generated documentation.
pub const DIAGTEXT_ROLE: &str = "diagtext";

/// One node of parsed diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Ordered sequence of pieces.
    Multi(Vec<Piece>),
    Text(TextPiece),
    Placeholder(PlaceholderPiece),
    /// `%select{...}N`, and the `%sN` shorthand.
    Select(SelectPiece),
    EnumSelect(EnumSelectPiece),
    Plural(PluralPiece),
    Diff(Box<DiffPiece>),
    /// Reference to a named substitution; expanded by the visitor dispatch, never seen by printers.
    Substitution(SubstitutionPiece),
}

impl Piece {
    /// Literal text with the default `diagtext` role.
    pub fn text(text: impl Into<String>) -> Self {
        Piece::Text(TextPiece::new(text, DIAGTEXT_ROLE))
    }

    /// Literal text carrying a documentation role.
    pub fn text_with_role(text: impl Into<String>, role: impl Into<String>) -> Self {
        Piece::Text(TextPiece::new(text, role))
    }

    pub fn placeholder(kind: ModifierKind, index: usize) -> Self {
        Piece::Placeholder(PlaceholderPiece { kind, index })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPiece {
    pub text: String,
    pub role: String,
}

impl TextPiece {
    pub fn new(text: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: role.into(),
        }
    }
}

/// A single-argument directive such as `%0` or `%ordinal1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderPiece {
    pub kind: ModifierKind,
    pub index: usize,
}

/// Choose one option by the value of argument `index`.
///
/// `kind` records where the select came from: [`ModifierKind::Select`], [`ModifierKind::S`] for the `%s`
/// shorthand, or [`ModifierKind::Diff`] when synthesized from a [`DiffPiece`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPiece {
    pub kind: ModifierKind,
    pub options: Vec<Piece>,
    pub index: usize,
}

/// `%enum_select<Name>{%A{...}|...}N`.
///
/// Each option owns its optional enumerator name, so the option and enumerator counts cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSelectPiece {
    pub enum_name: String,
    pub options: Vec<EnumOption>,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    /// `None` when the option has no `%Name{...}` prefix.
    pub enumerator: Option<String>,
    pub body: Piece,
}

impl EnumSelectPiece {
    /// Options without their enumerator names, in order.
    pub fn bodies(&self) -> impl Iterator<Item = &Piece> {
        self.options.iter().map(|option| &option.body)
    }
}

/// `%plural{1:one|:many}N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralPiece {
    pub options: Vec<PluralOption>,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralOption {
    /// Rule prefix verbatim, including the trailing `:` (`"1:"`, `"[2,5]:"`, `":"`).
    pub prefix: String,
    pub body: Piece,
}

/// `%diff{A$B$C|D}i,j`: print `A`, arg `i`, `B`, arg `j`, `C` when the arguments differ, else `D`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPiece {
    pub parts: [Piece; 4],
    pub indexes: [usize; 2],
}

impl DiffPiece {
    /// The equivalent two-option select.
    ///
    /// The first option splices placeholders for both indexes between the first three parts, the second is the
    /// fallback part. The select is keyed on the first index.
    pub fn as_select(&self) -> SelectPiece {
        let [a, b, c, d] = &self.parts;
        let differs = Piece::Multi(vec![
            a.clone(),
            Piece::placeholder(ModifierKind::Placeholder, self.indexes[0]),
            b.clone(),
            Piece::placeholder(ModifierKind::Placeholder, self.indexes[1]),
            c.clone(),
        ]);
        SelectPiece {
            kind: ModifierKind::Diff,
            options: vec![differs, d.clone()],
            index: self.indexes[0],
        }
    }
}

/// `%sub{Name}0,1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPiece {
    pub name: String,
    /// Caller argument index for each argument of the substituted text.
    pub modifiers: Vec<usize>,
}
