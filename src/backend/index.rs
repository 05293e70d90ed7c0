//! `DIAG_NAME_INDEX` rows in name order.

use std::fmt::Write as _;

use crate::error::GenError;
use crate::records::RecordDb;

pub fn emit_index_name(db: &RecordDb) -> Result<String, GenError> {
    let mut out = String::new();
    for diag in db.diagnostics() {
        writeln!(out, "DIAG_NAME_INDEX({})", diag.name)?;
    }
    Ok(out)
}
