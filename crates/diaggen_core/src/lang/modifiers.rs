//! Define the modifier vocabulary of the diagnostic text language.
//!
//! A modifier is the word between `%` and its first argument (`%select{...}0`, `%ordinal1`, `%0`). This module is
//! the single source of truth for those spellings: a stable identifier ([`ModifierKind`]) plus a const metadata
//! table ([`MODIFIERS`]).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - The bare placeholder (`%0`) has the empty spelling.
//! - [`printed_name`] differs from [`as_str`] for `enum_select`, which is emitted as a plain `select` because the
//!   enumerator names are metadata the runtime formatter never needs.
//!
//! ## Examples
//! ```rust
//! use diaggen_core::lang::modifiers::{self, ModifierKind, ModifierShape};
//!
//! assert_eq!(modifiers::from_str(""), Some(ModifierKind::Placeholder));
//! assert_eq!(modifiers::shape(ModifierKind::Diff), ModifierShape::Diff);
//! assert_eq!(modifiers::from_str("nonsense"), None);
//! ```

/// Stable identifier for every modifier accepted in diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Placeholder,
    Select,
    EnumSelect,
    Sub,
    Plural,
    Diff,
    Ordinal,
    Human,
    S,
    Q,
    ObjCClass,
    ObjCInstance,
    Quoted,
}

/// Syntactic shape of the arguments that follow a modifier.
///
/// ## Notes
/// - `%s` has the [`ModifierShape::Index`] shape even though it parses into a two-option select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierShape {
    /// A single argument index: `%ordinal0`.
    Index,
    /// `|`-separated alternatives in braces, then an index: `%select{a|b}0`.
    Options,
    /// `<Enum>` then alternatives that may carry `%Name{...}` enumerator prefixes.
    NamedOptions,
    /// Alternatives each introduced by a `rule:` prefix: `%plural{1:a|:b}0`.
    PluralOptions,
    /// A braced substitution name then optional comma-separated indexes: `%sub{name}0,1`.
    Substitution,
    /// `{a$b$c|d}` then two indexes: `%diff{...}0,1`.
    Diff,
}

/// Metadata for a modifier.
#[derive(Debug, Clone, Copy)]
pub struct ModifierInfo {
    pub id: ModifierKind,
    pub spelling: &'static str,
    pub printed: &'static str,
    pub shape: ModifierShape,
    pub description: &'static str,
}

/// Registry of all modifiers.
pub const MODIFIERS: &[ModifierInfo] = &[
    info(
        ModifierKind::Placeholder,
        "",
        ModifierShape::Index,
        "Substitute the argument verbatim.",
    ),
    info(
        ModifierKind::Select,
        "select",
        ModifierShape::Options,
        "Choose one alternative by the integer value of the argument.",
    ),
    ModifierInfo {
        id: ModifierKind::EnumSelect,
        spelling: "enum_select",
        printed: "select",
        shape: ModifierShape::NamedOptions,
        description: "Like `select`, additionally naming an enumeration and its enumerators.",
    },
    info(
        ModifierKind::Sub,
        "sub",
        ModifierShape::Substitution,
        "Splice in a named text substitution, remapping its argument indexes.",
    ),
    info(
        ModifierKind::Plural,
        "plural",
        ModifierShape::PluralOptions,
        "Choose one alternative by matching the argument against plural rules.",
    ),
    info(
        ModifierKind::Diff,
        "diff",
        ModifierShape::Diff,
        "Print a type-difference tree when the two arguments differ, else the fallback text.",
    ),
    info(
        ModifierKind::Ordinal,
        "ordinal",
        ModifierShape::Index,
        "Print the argument as an English ordinal (`1st`, `2nd`).",
    ),
    info(
        ModifierKind::Human,
        "human",
        ModifierShape::Index,
        "Print the argument with a human-readable magnitude suffix.",
    ),
    info(
        ModifierKind::S,
        "s",
        ModifierShape::Index,
        "Append `s` unless the argument is exactly one.",
    ),
    info(
        ModifierKind::Q,
        "q",
        ModifierShape::Index,
        "Print the argument as a qualified name.",
    ),
    info(
        ModifierKind::ObjCClass,
        "objcclass",
        ModifierShape::Index,
        "Print an Objective-C selector as a class method.",
    ),
    info(
        ModifierKind::ObjCInstance,
        "objcinstance",
        ModifierShape::Index,
        "Print an Objective-C selector as an instance method.",
    ),
    info(
        ModifierKind::Quoted,
        "quoted",
        ModifierShape::Index,
        "Print the argument surrounded by quotes.",
    ),
];

/// Source spelling.
///
/// ## Parameters
/// - `id`: Modifier identifier.
///
/// ## Returns
/// - The spelling accepted by the parser after `%`.
pub fn as_str(id: ModifierKind) -> &'static str {
    info_for(id).spelling
}

/// Spelling used when a parsed text is printed back into its runtime form.
pub fn printed_name(id: ModifierKind) -> &'static str {
    info_for(id).printed
}

/// Argument shape.
pub fn shape(id: ModifierKind) -> ModifierShape {
    info_for(id).shape
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ModifierKind) -> &'static ModifierInfo {
    MODIFIERS.iter().find(|m| m.id == id).expect("modifier info missing")
}

/// Lookup by source spelling.
///
/// ## Parameters
/// - `s`: Candidate spelling (the text between `%` and the first digit, `<` or `{`).
///
/// ## Returns
/// - `Some(ModifierKind)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<ModifierKind> {
    MODIFIERS.iter().find(|m| m.spelling == s).map(|m| m.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: ModifierKind,
    spelling: &'static str,
    shape: ModifierShape,
    description: &'static str,
) -> ModifierInfo {
    ModifierInfo {
        id,
        spelling,
        printed: spelling,
        shape,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_select_prints_as_select() {
        assert_eq!(as_str(ModifierKind::EnumSelect), "enum_select");
        assert_eq!(printed_name(ModifierKind::EnumSelect), "select");
        assert_eq!(printed_name(ModifierKind::Select), "select");
    }

    #[test]
    fn test_placeholder_has_empty_spelling() {
        assert_eq!(from_str(""), Some(ModifierKind::Placeholder));
        assert_eq!(printed_name(ModifierKind::Placeholder), "");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("objcclass"), Some(ModifierKind::ObjCClass));
        assert_eq!(from_str("ObjCClass"), None);
        assert_eq!(from_str("Select"), None);
    }
}
