//! `DIAG_COMPAT_ID` rows, one enum block per run of records from the same component.

use std::fmt::Write as _;

use crate::config::GenConfig;
use crate::error::GenError;
use crate::records::RecordDb;

/// Emit the compatibility ids in declaration order.
///
/// The first column is the position in the *unfiltered* list, so ids stay stable whichever component is
/// generated.
#[tracing::instrument(skip_all, fields(component = config.component_filter()))]
pub fn emit_compat_ids(db: &RecordDb, config: &GenConfig) -> Result<String, GenError> {
    let mut out = String::new();
    let mut previous: Option<&str> = None;

    for (index, id) in db.compat_ids().iter().enumerate() {
        if !config.includes(&id.component) {
            continue;
        }
        if previous != Some(id.component.as_str()) {
            if previous.is_some() {
                out.push_str("DIAG_COMPAT_IDS_END()\n");
            }
            out.push_str("DIAG_COMPAT_IDS_BEGIN()\n");
            previous = Some(id.component.as_str());
        }
        writeln!(
            out,
            "DIAG_COMPAT_ID({index},{},{},{},{})",
            id.name, id.std, id.diag, id.diag_pre
        )?;
    }

    if previous.is_some() {
        out.push_str("DIAG_COMPAT_IDS_END()\n");
    }
    Ok(out)
}
