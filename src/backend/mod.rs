//! Output backends.
//!
//! Every backend reads the [`RecordDb`] and produces one text artifact. They share three building blocks:
//! - [`groups::GroupGraph`]: diagnostics and subgroups per group name, with stable IDs;
//! - [`pedantic::infer_pedantic`]: the inferred members of `-Wpedantic`;
//! - [`tables::GroupTables`]: the flat arrays and descriptor rows derived from the two above.
//!
//! ## Notes
//!
//! - A backend either returns its complete output or a fatal [`GenError`]; recoverable problems are pushed to
//!   the [`Reports`] sink and do not interrupt generation.
//! - Output depends only on record names and contents, never on declaration order (except where declaration
//!   order is the documented tie-break), so permuting the input gives byte-identical output.

pub mod categories;
pub mod compat;
pub mod defs;
pub mod docs;
pub mod enums;
pub mod groups;
pub mod iface;
pub mod index;
pub mod pedantic;
pub mod report;
pub mod tables;

pub use report::{Report, ReportLevel, Reports};

use diaggen_text::DiagnosticTextBuilder;

use crate::config::GenConfig;
use crate::error::GenError;
use crate::records::RecordDb;
use crate::version::DIAGGEN_VERSION;

/// Which artifact to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `DIAG(...)` definition rows
    Defs,
    /// `DIAG_ENUM` listings for `%enum_select`
    Enums,
    /// `DIAG_COMPAT_ID` rows
    CompatIds,
    /// Per-component interface header
    Iface,
    /// Group arrays, descriptor rows and the category table
    Groups,
    /// `DIAG_NAME_INDEX` rows
    IndexName,
    /// reStructuredText reference of every group
    Docs,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Defs => "defs",
            Action::Enums => "enums",
            Action::CompatIds => "compat-ids",
            Action::Iface => "iface",
            Action::Groups => "groups",
            Action::IndexName => "index-name",
            Action::Docs => "docs",
        }
    }

    fn comment_style(self) -> CommentStyle {
        match self {
            Action::Docs => CommentStyle::Rst,
            _ => CommentStyle::C,
        }
    }
}

/// A generated artifact and everything reported while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub reports: Reports,
}

/// Run one backend.
///
/// ## Errors
/// - Any fatal error of the selected backend (see [`GenError`]).
#[tracing::instrument(skip(db, config), fields(action = action.as_str()))]
pub fn generate(action: Action, db: &RecordDb, config: &GenConfig) -> Result<Output, GenError> {
    let mut reports = Reports::new();
    let body = match action {
        Action::Defs => defs::emit_defs(db, config, &mut reports)?,
        Action::Enums => enums::emit_enums(db, config, &mut reports)?,
        Action::CompatIds => compat::emit_compat_ids(db, config)?,
        Action::Iface => iface::emit_iface(config)?,
        Action::Groups => tables::emit_groups(db, &mut reports)?,
        Action::IndexName => index::emit_index_name(db)?,
        Action::Docs => docs::emit_docs(db, &mut reports)?,
    };

    let mut text = String::new();
    if config.emit_header {
        text.push_str(&banner(action.comment_style()));
    }
    text.push_str(&body);
    tracing::debug!(bytes = text.len(), reports = reports.len(), "generated");
    Ok(Output { text, reports })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    C,
    Rst,
}

fn banner(style: CommentStyle) -> String {
    match style {
        CommentStyle::C => format!("/* Generated by diaggen {DIAGGEN_VERSION}. Do not edit. */\n\n"),
        CommentStyle::Rst => format!(".. Generated by diaggen {DIAGGEN_VERSION}. Do not edit.\n\n"),
    }
}

/// Parse every substitution and reject diagnostics named like one.
pub(crate) fn text_builder(db: &RecordDb) -> Result<DiagnosticTextBuilder, GenError> {
    let builder = DiagnosticTextBuilder::new(db.substitutions().iter().map(|s| s.text_record()))?;
    for diag in db.diagnostics() {
        builder.check_name(&diag.text_record())?;
    }
    Ok(builder)
}
