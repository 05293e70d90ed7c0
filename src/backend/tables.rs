//! Flatten the group graph into offset-indexed arrays.
//!
//! Three structures come out of one pass over the groups in ID order:
//! - the diagnostics array: each non-empty group's diagnostics followed by a `-1` sentinel, after a leading
//!   sentinel-only run at index 0 that stands for "no diagnostics";
//! - the subgroup array, shaped the same way, holding subgroup IDs;
//! - one [`GroupEntry`] per group with its name offset and its start indexes into the two arrays (0 = none).
//!
//! Start indexes are the running count of array slots, sentinels included, so they are computed in the same
//! iteration that fills the arrays. `pedantic` additionally receives the inferred members after its own.
//!
//! ## Examples
//! With groups `a` (diagnostics `x`, `y`) and `b` (no diagnostics) and `c` (diagnostic `z`):
//!
//! ```text
//! index:  0    1  2  3    4  5
//! slot:   -1   x  y  -1   z  -1
//! ```
//!
//! `a` starts at 1, `b` has 0, `c` starts at 4.

use std::fmt::Write as _;

use super::categories::{CategoryTable, category_enum};
use super::groups::{GroupGraph, GroupInfo};
use super::pedantic::{PedanticSet, infer_pedantic};
use super::report::Reports;
use crate::error::GenError;
use crate::records::RecordDb;

/// Characters allowed in a group name besides ASCII letters and digits.
const GROUP_NAME_PUNCTUATION: &str = "!@#$%^*-+=:?";

const C_WHITESPACE: &[char] = &[' ', '\t', '\n', '\x0b', '\x0c', '\r'];

/// One group's run in an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayRun<T> {
    pub group_id: usize,
    pub items: Vec<T>,
}

/// Descriptor row of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry<'r> {
    pub id: usize,
    pub record_name: &'r str,
    pub group_name: &'r str,
    /// Offset of the group name in [`GroupTables::names`].
    pub name_offset: usize,
    pub diag_index: Option<usize>,
    pub sub_group_index: Option<usize>,
    pub documentation: &'r str,
}

/// NUL-separated string table with the empty string at offset 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable<'r> {
    strings: Vec<&'r str>,
    next_offset: usize,
}

impl<'r> StringTable<'r> {
    pub fn new() -> Self {
        Self {
            strings: vec![""],
            next_offset: 1,
        }
    }

    /// Append a string and return its offset.
    pub fn push(&mut self, s: &'r str) -> usize {
        let offset = self.next_offset;
        self.strings.push(s);
        self.next_offset += s.len() + 1;
        offset
    }

    /// Strings in offset order, starting with the empty string.
    pub fn strings(&self) -> &[&'r str] {
        &self.strings
    }

    /// Total size in bytes, terminators included.
    pub fn size(&self) -> usize {
        self.next_offset
    }
}

impl Default for StringTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct GroupTables<'r> {
    pub diag_arrays: Vec<ArrayRun<&'r str>>,
    pub sub_group_arrays: Vec<ArrayRun<usize>>,
    pub names: StringTable<'r>,
    pub entries: Vec<GroupEntry<'r>>,
}

impl<'r> GroupTables<'r> {
    /// ## Errors
    /// - A group name uses a character outside `[A-Za-z0-9!@#$%^*-+=:?]`.
    #[tracing::instrument(skip_all, fields(groups = graph.len()))]
    pub fn build(graph: &GroupGraph<'r>, pedantic: &PedanticSet<'r>) -> Result<Self, GenError> {
        let mut tables = Self {
            diag_arrays: Vec::new(),
            sub_group_arrays: Vec::new(),
            names: StringTable::new(),
            entries: Vec::with_capacity(graph.len()),
        };
        let mut diag_index = 1;
        let mut sub_group_index = 1;

        for info in graph.iter() {
            if !is_valid_group_name(info.group_name) {
                return Err(GenError::InvalidGroupName(info.group_name.to_string()));
            }
            let name_offset = tables.names.push(info.group_name);

            let diags = diagnostics_of(info, pedantic);
            let diag_start = (!diags.is_empty()).then_some(diag_index);
            if !diags.is_empty() {
                diag_index += diags.len() + 1;
                tables.diag_arrays.push(ArrayRun {
                    group_id: info.id,
                    items: diags,
                });
            }

            let sub_groups = sub_group_ids(graph, info, pedantic);
            let sub_group_start = (!sub_groups.is_empty()).then_some(sub_group_index);
            if !sub_groups.is_empty() {
                sub_group_index += sub_groups.len() + 1;
                tables.sub_group_arrays.push(ArrayRun {
                    group_id: info.id,
                    items: sub_groups,
                });
            }

            tables.entries.push(GroupEntry {
                id: info.id,
                record_name: info.record_name(),
                group_name: info.group_name,
                name_offset,
                diag_index: diag_start,
                sub_group_index: sub_group_start,
                documentation: info.documentation(),
            });
        }
        tracing::debug!(diag_slots = diag_index, sub_group_slots = sub_group_index, "built group tables");
        Ok(tables)
    }

    /// The diagnostics array as emitted; `None` is a sentinel.
    pub fn flat_diag_array(&self) -> Vec<Option<&'r str>> {
        flatten(&self.diag_arrays)
    }

    /// The subgroup array as emitted; `None` is a sentinel.
    pub fn flat_sub_group_array(&self) -> Vec<Option<usize>> {
        flatten(&self.sub_group_arrays)
    }
}

/// Diagnostic names of a group, with the inferred ones appended for `pedantic`.
pub fn diagnostics_of<'r>(info: &GroupInfo<'r>, pedantic: &PedanticSet<'r>) -> Vec<&'r str> {
    let mut names: Vec<&'r str> = info.diags.iter().map(|d| d.name.as_str()).collect();
    if info.is_pedantic() {
        names.extend(pedantic.diags.iter().map(|d| d.name.as_str()));
    }
    names
}

/// Subgroup IDs of a group, with the inferred ones appended for `pedantic`.
pub fn sub_group_ids(graph: &GroupGraph<'_>, info: &GroupInfo<'_>, pedantic: &PedanticSet<'_>) -> Vec<usize> {
    let mut ids: Vec<usize> = info.sub_groups.iter().filter_map(|name| graph.id_of(name)).collect();
    if info.is_pedantic() {
        ids.extend(pedantic.groups.iter().filter_map(|g| graph.id_of(&g.group_name)));
    }
    ids
}

pub fn is_valid_group_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || GROUP_NAME_PUNCTUATION.contains(c))
}

/// Emit the `GET_DIAG_ARRAYS`, `DIAG_ENTRY` and `GET_CATEGORY_TABLE` blocks.
#[tracing::instrument(skip_all)]
pub fn emit_groups(db: &RecordDb, reports: &mut Reports) -> Result<String, GenError> {
    let graph = GroupGraph::build(db, reports)?;
    let pedantic = infer_pedantic(&graph);
    let tables = GroupTables::build(&graph, &pedantic)?;
    let categories = CategoryTable::build(&graph);

    let mut out = String::new();
    out.push_str("\n#ifdef GET_DIAG_ARRAYS\n");
    out.push_str("static const int16_t DiagArrays[] = {\n  /* Empty */ -1,\n");
    for run in &tables.diag_arrays {
        write!(out, "  /* DiagArray{} */ ", run.group_id)?;
        for name in &run.items {
            write!(out, "diag::{name}, ")?;
        }
        out.push_str("-1,\n");
    }
    out.push_str("};\n\n");

    out.push_str("static const int16_t DiagSubGroups[] = {\n  /* Empty */ -1,\n");
    for run in &tables.sub_group_arrays {
        write!(out, "  /* DiagSubGroup{} */ ", run.group_id)?;
        for id in &run.items {
            write!(out, "{id}, ")?;
        }
        out.push_str("-1,\n");
    }
    out.push_str("};\n\n");

    out.push_str("static constexpr char DiagGroupNamesStorage[] =\n");
    let strings = tables.names.strings();
    for (i, name) in strings.iter().enumerate() {
        let terminator = if i + 1 == strings.len() { ";" } else { "" };
        writeln!(out, "  \"{name}\\0\"{terminator}")?;
    }
    out.push_str("\nstatic constexpr llvm::StringTable DiagGroupNames =\n  DiagGroupNamesStorage;\n\n");
    out.push_str("#endif // GET_DIAG_ARRAYS\n\n");

    out.push_str("\n#ifdef DIAG_ENTRY\n");
    for entry in &tables.entries {
        write!(
            out,
            "DIAG_ENTRY({} /* {} */, {}, ",
            entry.record_name, entry.group_name, entry.name_offset
        )?;
        match entry.diag_index {
            Some(index) => write!(out, "/* DiagArray{} */ {index}, ", entry.id)?,
            None => out.push_str("0, "),
        }
        match entry.sub_group_index {
            Some(index) => write!(out, "/* DiagSubGroup{} */ {index}, ", entry.id)?,
            None => out.push_str("0, "),
        }
        writeln!(out, "R\"({})\")", entry.documentation.trim_matches(C_WHITESPACE))?;
    }
    out.push_str("#endif // DIAG_ENTRY\n\n");

    out.push_str("\n#ifdef GET_CATEGORY_TABLE\n");
    for name in categories.names() {
        writeln!(out, "CATEGORY(\"{name}\", {})", category_enum(name))?;
    }
    out.push_str("#endif // GET_CATEGORY_TABLE\n\n");
    Ok(out)
}

fn flatten<T: Copy>(runs: &[ArrayRun<T>]) -> Vec<Option<T>> {
    let mut flat = vec![None];
    for run in runs {
        flat.extend(run.items.iter().copied().map(Some));
        flat.push(None);
    }
    flat
}
