//! `DIAG(...)` definition rows, one per diagnostic.
//!
//! ```text
//! DIAG(warn_unused_var, CLASS_WARNING, (unsigned)diag::Severity::Warning, "unused variable %0", 812,
//!      SFINAE_Suppress, false, false, false, false, 2)
//! ```
//!
//! (one line in the output). The group column is the ID of the diagnostic's group, else the ID of `pedantic`
//! when the diagnostic was inferred into it, else 0.
//!
//! ## Notes
//!
//! - Placement checks (error in a group, remark without one) run on every diagnostic, before the component
//!   filter, so a bad record in another component still fails the run.
//! - The wording linter only sees diagnostics that are actually emitted.

use std::collections::HashSet;
use std::fmt::Write as _;

use diaggen_core::lang::classes::DiagClass;
use diaggen_core::wording::verify_wording;
use tracing::debug;

use super::categories::CategoryTable;
use super::groups::{GroupGraph, PEDANTIC};
use super::pedantic::infer_pedantic;
use super::report::Reports;
use super::text_builder;
use crate::config::GenConfig;
use crate::error::GenError;
use crate::records::{Diagnostic, RecordDb};

#[tracing::instrument(skip_all, fields(component = config.component_filter()))]
pub fn emit_defs(db: &RecordDb, config: &GenConfig, reports: &mut Reports) -> Result<String, GenError> {
    let text = text_builder(db)?;
    let graph = GroupGraph::build(db, reports)?;
    let categories = CategoryTable::build(&graph);
    let pedantic = infer_pedantic(&graph);
    let in_pedantic: HashSet<&str> = pedantic.diags.iter().map(|d| d.name.as_str()).collect();

    let mut out = String::new();
    if let Some(component) = config.component_filter() {
        let upper = component.to_uppercase();
        write!(
            out,
            "#ifdef {upper}START\n__{upper}START = DIAG_START_{upper},\n#undef {upper}START\n#endif\n\n"
        )?;
    }

    let mut skipped = 0usize;
    for diag in db.diagnostics() {
        check_placement(db, diag)?;

        if !config.includes(&diag.component) {
            skipped += 1;
            continue;
        }

        if config.verify_wording {
            for issue in verify_wording(&diag.summary) {
                reports.error(diag.loc.text.as_str(), issue.to_string());
            }
        }

        let definition = text.build_for_definition(&diag.text_record())?;
        let group_index = match db.group_of(diag) {
            Some(group) => graph.id_of(&group.group_name).unwrap_or_default(),
            None if in_pedantic.contains(diag.name.as_str()) => {
                graph.id_of(PEDANTIC).ok_or(GenError::MissingPedanticGroup)?
            }
            None => 0,
        };

        writeln!(
            out,
            "DIAG({}, {}, (unsigned)diag::Severity::{}, \"{}\", {}, {}, {}, {}, {}, {}, {})",
            diag.name,
            diag.class.as_str(),
            diag.default_severity.as_str(),
            escape_c_string(&definition),
            group_index,
            diag.sfinae.as_str(),
            diag.warning_no_werror,
            diag.show_in_system_header,
            diag.show_in_system_macro,
            diag.deferrable,
            categories.id(graph.diagnostic_category(diag)),
        )?;
    }
    debug!(skipped, "filtered diagnostics by component");
    Ok(out)
}

fn check_placement(db: &RecordDb, diag: &Diagnostic) -> Result<(), GenError> {
    match (diag.class, db.group_of(diag)) {
        (DiagClass::Error, Some(group)) => Err(GenError::ErrorInGroup {
            loc: diag.loc.text.clone(),
            name: diag.name.clone(),
            group: group.group_name.clone(),
        }),
        (DiagClass::Remark, None) => Err(GenError::RemarkWithoutGroup {
            loc: diag.loc.text.clone(),
            name: diag.name.clone(),
        }),
        _ => Ok(()),
    }
}

/// Escape text for a C string literal: `\\`, `\"`, `\n`, `\t`, and three-digit octal for any other
/// non-printable byte.
pub fn escape_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b' '..=b'~' => out.push(char::from(byte)),
            _ => {
                out.push('\\');
                out.push(char::from(b'0' + ((byte >> 6) & 7)));
                out.push(char::from(b'0' + ((byte >> 3) & 7)));
                out.push(char::from(b'0' + (byte & 7)));
            }
        }
    }
    out
}
