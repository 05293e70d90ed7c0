//! Diagnostic vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `ModifierKind`, `DiagClass`) and look up spellings/metadata via
//! registry tables instead of comparing strings all over the generator.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no piece trees, no records, no side effects.
//! - The text parser enforces syntax; registries provide spellings and metadata for shared use (printing,
//!   documentation, validation).
//!
//! ## Examples
//! ```rust
//! use diaggen_core::lang::modifiers::{self, ModifierKind};
//!
//! assert_eq!(modifiers::from_str("select"), Some(ModifierKind::Select));
//! assert_eq!(modifiers::printed_name(ModifierKind::EnumSelect), "select");
//! ```
//!
//! ## See also
//! - `cargo run -p diaggen_core --bin generate_dsl_reference` to generate the Markdown reference tables.

pub mod classes;
pub mod modifiers;
