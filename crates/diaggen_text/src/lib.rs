//! Diagnostic text frontend: piece model, parser, substitutions and printers.
//!
//! A diagnostic summary such as `"%select{function|variable}0 %1 is unused"` is parsed into a [`piece::Piece`]
//! tree. Read-only visitors then re-serialize that tree into the forms the generator needs: the canonical runtime
//! string, the documentation table layout, and the enumerations named by `%enum_select`.
//!
//! ## Notes
//! - This crate is intentionally “text-only”: it knows nothing about groups, categories or the record database.
//!   Records reach it through the narrow [`builder::TextRecord`] view.
//! - Modifier spellings come from `diaggen_core::lang::modifiers`.
//!
//! ## Examples
//! ```rust
//! use diaggen_text::builder::{DiagnosticTextBuilder, TextRecord};
//!
//! let builder = DiagnosticTextBuilder::new([]).unwrap();
//! let record = TextRecord::new("warn_test", "test.td:1", "this %select{is|is not}0 a test");
//! assert_eq!(builder.build_for_definition(&record).unwrap(), "this %select{is|is not}0 a test");
//! ```

pub mod builder;
pub mod error;
pub mod parser;
pub mod piece;
pub mod printers;
pub mod substitution;
pub mod visit;

pub use builder::{DiagnosticTextBuilder, TextRecord};
pub use error::{TextError, TextErrorKind};
pub use piece::Piece;
