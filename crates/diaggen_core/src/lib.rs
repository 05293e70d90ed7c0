//! Provide the shared, pure vocabulary of the diagnostic generator.
//!
//! This crate is intentionally small and dependency-free. It contains the canonical spellings that both the text
//! frontend (`diaggen_text`) and the table backends (`diaggen`) must agree on:
//! - the diagnostic text modifiers (`%select`, `%plural`, `%diff`, ...), and
//! - the diagnostic classes, default severities and SFINAE responses read from the record database.
//!
//! It also hosts the wording linter, which only ever needs the raw summary string of a diagnostic.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no record-database types.

pub mod lang;
pub mod wording;
