#![forbid(unsafe_code)]
//! diaggen: compiler diagnostic table generator
//!
//! diaggen reads a database of diagnostic records (diagnostics, diagnostic groups, text substitutions and
//! compatibility ids) and produces the tables a compiler includes to describe its diagnostics: definition
//! rows, enum listings, group arrays, name indexes, per-component headers and a reStructuredText reference.
//! The diagnostic text DSL itself lives in `diaggen_text`; the shared vocabulary lives in `diaggen_core`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Recoverable problems**: Duplicate definitions and wording violations are collected as
//!   [`backend::Report`]s so one run surfaces all of them; everything else is a [`GenError`].

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod records;
pub mod version;

pub use backend::{Action, Output, Reports, generate};
pub use config::GenConfig;
pub use error::GenError;
pub use records::RecordDb;
