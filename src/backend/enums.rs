//! `DIAG_ENUM` listings for every named `%enum_select`.
//!
//! Enumeration names must be unique across all diagnostics and enumerator names unique within their
//! enumeration. Both checks see every component, even when the output is filtered to one.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use super::report::Reports;
use super::text_builder;
use crate::config::GenConfig;
use crate::error::GenError;
use crate::records::{Diagnostic, RecordDb};

#[tracing::instrument(skip_all, fields(component = config.component_filter()))]
pub fn emit_enums(db: &RecordDb, config: &GenConfig, reports: &mut Reports) -> Result<String, GenError> {
    let text = text_builder(db)?;
    let mut declared_by: HashMap<String, &Diagnostic> = HashMap::new();
    let mut out = String::new();

    for diag in db.diagnostics() {
        let print = config.includes(&diag.component);
        for decl in text.build_for_enum(&diag.text_record())? {
            match declared_by.get(&decl.name) {
                Some(previous) => {
                    reports.error(
                        diag.loc.text.as_str(),
                        format!("Duplicate enumeration name '{}'", decl.name),
                    );
                    reports.note(previous.loc.text.as_str(), "Previous diagnostic is here");
                }
                None => {
                    declared_by.insert(decl.name.clone(), diag);
                }
            }

            if print {
                writeln!(out, "DIAG_ENUM({})", decl.name)?;
            }
            let mut seen = HashSet::new();
            for enumerator in &decl.enumerators {
                if !seen.insert(enumerator.name.as_str()) {
                    reports.error(
                        diag.loc.text.as_str(),
                        format!("Duplicate enumerator name '{}'", enumerator.name),
                    );
                }
                if print {
                    writeln!(out, "DIAG_ENUM_ITEM({}, {})", enumerator.index, enumerator.name)?;
                }
            }
            if print {
                out.push_str("DIAG_ENUM_END()\n");
            }
        }
    }
    Ok(out)
}
