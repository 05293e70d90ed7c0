//! Named text substitutions and argument remapping.
//!
//! A substitution is a reusable text fragment referenced as `%sub{Name}i,j,...`. The fragment numbers its own
//! arguments from zero; the use site lists which caller argument each of them stands for. While a visitor walks a
//! substituted fragment, the *active mapping* translates local indexes into caller indexes.
//!
//! ## Notes
//! - Mappings compose: a substitution used inside another one maps through the outer mapping first
//!   (`new[i] = outer[modifiers[i]]`).
//! - [`ResolveContext`] enters and leaves substitutions in strict stack order. Entering a substitution that is
//!   already being expanded is an error instead of unbounded recursion.
//!
//! ## Examples
//! ```rust
//! use diaggen_text::substitution::map_index;
//!
//! assert_eq!(map_index(1, None).unwrap(), 1);
//! assert_eq!(map_index(1, Some(&[4, 7])).unwrap(), 7);
//! assert!(map_index(2, Some(&[4, 7])).is_err());
//! ```

use std::collections::BTreeMap;

use crate::error::TextErrorKind;
use crate::piece::{Piece, SubstitutionPiece};

/// Parsed substitutions, keyed by record name.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, Piece>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed substitution; returns the previous definition of `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, piece: Piece) -> Option<Piece> {
        self.entries.insert(name.into(), piece)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve a name to its stored key and parsed text.
    pub fn lookup(&self, name: &str) -> Result<(&str, &Piece), TextErrorKind> {
        self.entries
            .get_key_value(name)
            .map(|(key, piece)| (key.as_str(), piece))
            .ok_or_else(|| TextErrorKind::UnknownSubstitution(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Translate a local argument index through an optional mapping.
pub fn map_index(index: usize, mappings: Option<&[usize]>) -> Result<usize, TextErrorKind> {
    match mappings {
        None => Ok(index),
        Some(map) => map.get(index).copied().ok_or(TextErrorKind::InvalidMapping {
            index,
            count: map.len(),
        }),
    }
}

/// Compose a use site's modifiers with the enclosing mapping.
pub fn compose(modifiers: &[usize], mappings: Option<&[usize]>) -> Result<Vec<usize>, TextErrorKind> {
    modifiers.iter().map(|&m| map_index(m, mappings)).collect()
}

/// Substitution state of one traversal: the active mapping and the names being expanded.
///
/// Cloning a context snapshots it, which is how nested printers inherit the state of the point where they were
/// spawned.
#[derive(Debug, Clone)]
pub struct ResolveContext<'s> {
    table: &'s SubstitutionTable,
    mappings: Option<Vec<usize>>,
    active: Vec<&'s str>,
}

/// Token returned by [`ResolveContext::enter`]; hand it back to [`ResolveContext::leave`].
#[must_use]
#[derive(Debug)]
pub struct SubstitutionScope<'s> {
    target: &'s Piece,
    previous: Option<Vec<usize>>,
}

impl<'s> SubstitutionScope<'s> {
    /// Parsed text of the entered substitution.
    pub fn target(&self) -> &'s Piece {
        self.target
    }
}

impl<'s> ResolveContext<'s> {
    pub fn new(table: &'s SubstitutionTable) -> Self {
        Self {
            table,
            mappings: None,
            active: Vec::new(),
        }
    }

    pub fn table(&self) -> &'s SubstitutionTable {
        self.table
    }

    pub fn mappings(&self) -> Option<&[usize]> {
        self.mappings.as_deref()
    }

    /// Translate a local index through the active mapping.
    pub fn map_index(&self, index: usize) -> Result<usize, TextErrorKind> {
        map_index(index, self.mappings())
    }

    /// Start expanding `sub`: install its composed mapping and mark it active.
    ///
    /// ## Errors
    /// - [`TextErrorKind::UnknownSubstitution`] for an undefined name.
    /// - [`TextErrorKind::InvalidMapping`] if a modifier has no counterpart in the active mapping.
    /// - [`TextErrorKind::RecursiveSubstitution`] if `sub` is already being expanded.
    pub fn enter(&mut self, sub: &SubstitutionPiece) -> Result<SubstitutionScope<'s>, TextErrorKind> {
        let table = self.table;
        let (name, target) = table.lookup(&sub.name)?;
        if self.active.contains(&name) {
            return Err(TextErrorKind::RecursiveSubstitution(name.to_string()));
        }
        let mapping = compose(&sub.modifiers, self.mappings())?;
        let previous = self.mappings.replace(mapping);
        self.active.push(name);
        tracing::trace!(substitution = name, depth = self.active.len(), "enter substitution");
        Ok(SubstitutionScope { target, previous })
    }

    /// Restore the state from before the matching [`enter`](Self::enter).
    pub fn leave(&mut self, scope: SubstitutionScope<'s>) {
        self.mappings = scope.previous;
        self.active.pop();
    }

    /// A context positioned inside `sub`, leaving `self` untouched.
    pub fn entered(&self, sub: &SubstitutionPiece) -> Result<(Self, &'s Piece), TextErrorKind> {
        let mut inner = self.clone();
        let scope = inner.enter(sub)?;
        Ok((inner, scope.target()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn table(entries: &[(&str, &str)]) -> SubstitutionTable {
        let mut table = SubstitutionTable::new();
        for (name, text) in entries {
            table.insert(*name, parse(text).unwrap());
        }
        table
    }

    fn sub(name: &str, modifiers: &[usize]) -> SubstitutionPiece {
        SubstitutionPiece {
            name: name.to_string(),
            modifiers: modifiers.to_vec(),
        }
    }

    #[test]
    fn test_nested_mappings_compose_and_restore() {
        let table = table(&[("outer", "%sub{inner}1"), ("inner", "%0")]);
        let mut ctx = ResolveContext::new(&table);

        let outer = ctx.enter(&sub("outer", &[5, 3])).unwrap();
        assert_eq!(ctx.mappings(), Some(&[5, 3][..]));

        let inner = ctx.enter(&sub("inner", &[1])).unwrap();
        assert_eq!(ctx.mappings(), Some(&[3][..]));
        assert_eq!(ctx.map_index(0).unwrap(), 3);

        ctx.leave(inner);
        assert_eq!(ctx.mappings(), Some(&[5, 3][..]));
        ctx.leave(outer);
        assert_eq!(ctx.mappings(), None);
    }

    #[test]
    fn test_unknown_name() {
        let table = table(&[]);
        let mut ctx = ResolveContext::new(&table);
        assert_eq!(
            ctx.enter(&sub("missing", &[])).unwrap_err(),
            TextErrorKind::UnknownSubstitution("missing".to_string())
        );
    }

    #[test]
    fn test_out_of_range_modifier() {
        let table = table(&[("a", "%0"), ("b", "%0")]);
        let mut ctx = ResolveContext::new(&table);
        let _scope = ctx.enter(&sub("a", &[0])).unwrap();
        assert_eq!(
            ctx.enter(&sub("b", &[4])).unwrap_err(),
            TextErrorKind::InvalidMapping { index: 4, count: 1 }
        );
    }

    #[test]
    fn test_reentering_active_substitution_is_rejected() {
        let table = table(&[("loop", "%sub{loop}")]);
        let mut ctx = ResolveContext::new(&table);
        let _scope = ctx.enter(&sub("loop", &[])).unwrap();
        assert_eq!(
            ctx.enter(&sub("loop", &[])).unwrap_err(),
            TextErrorKind::RecursiveSubstitution("loop".to_string())
        );
    }

    #[test]
    fn test_sequential_reuse_is_not_recursion() {
        let table = table(&[("a", "x")]);
        let mut ctx = ResolveContext::new(&table);
        let first = ctx.enter(&sub("a", &[])).unwrap();
        ctx.leave(first);
        assert!(ctx.enter(&sub("a", &[])).is_ok());
    }
}
