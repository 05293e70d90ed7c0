//! The record database: every definition the generators read.
//!
//! A [`RecordDb`] is built once per run (usually by [`RecordDb::from_json_str`]) and is read-only afterwards.
//! Construction validates cross references, so the backends can look up groups by record name without having to
//! handle dangling references themselves.
//!
//! ## Notes
//!
//! - Diagnostics, groups and substitutions are kept sorted by record name; compatibility ids keep declaration
//!   order. These are the canonical iteration orders of every backend.
//! - Every record carries a [`Loc`] whose `ordinal` is its global declaration position. Ordinals answer "which
//!   definition came first" questions independently of the sort order.

mod loader;

use std::collections::{HashMap, HashSet};
use std::fmt;

use diaggen_core::lang::classes::{DiagClass, SfinaeResponse, Severity};
use diaggen_text::TextRecord;

use crate::error::GenError;

/// Where a record was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loc {
    /// Global declaration position, unique across all records of one database.
    pub ordinal: usize,
    /// Human-readable location (`file.td:12`).
    pub text: String,
}

impl Loc {
    pub fn new(ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            text: text.into(),
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub name: String,
    pub component: String,
    pub class: DiagClass,
    pub default_severity: Severity,
    /// Record name of the `DiagGroup` this diagnostic belongs to.
    pub group: Option<String>,
    /// Direct category; empty when the diagnostic inherits one.
    pub category: String,
    pub summary: String,
    pub sfinae: SfinaeResponse,
    pub show_in_system_header: bool,
    pub show_in_system_macro: bool,
    pub deferrable: bool,
    pub warning_no_werror: bool,
    pub loc: Loc,
}

impl Diagnostic {
    /// View of this diagnostic for the text frontend.
    pub fn text_record(&self) -> TextRecord<'_> {
        TextRecord::new(&self.name, &self.loc.text, &self.summary)
    }

    pub fn is_remark(&self) -> bool {
        self.class == DiagClass::Remark
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagGroup {
    /// Record name (`UnusedGroup`, or `anonymous_<diagnostic>` for inline groups).
    pub name: String,
    /// User-facing flag name (`unused` for `-Wunused`).
    pub group_name: String,
    /// Record names of the subgroups, in declaration order.
    pub sub_groups: Vec<String>,
    pub category: String,
    pub documentation: String,
    /// Created at a diagnostic's use site rather than by an explicit definition.
    pub anonymous: bool,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSubstitution {
    pub name: String,
    pub substitution: String,
    pub loc: Loc,
}

impl TextSubstitution {
    pub fn text_record(&self) -> TextRecord<'_> {
        TextRecord::new(&self.name, &self.loc.text, &self.substitution)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatWarningId {
    pub component: String,
    pub name: String,
    pub diag: String,
    pub diag_pre: String,
    pub std: i64,
    pub loc: Loc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDocumentation {
    pub intro: String,
}

/// Every record of one input, validated and sorted.
#[derive(Debug, Clone, Default)]
pub struct RecordDb {
    diagnostics: Vec<Diagnostic>,
    groups: Vec<DiagGroup>,
    substitutions: Vec<TextSubstitution>,
    compat_ids: Vec<CompatWarningId>,
    documentation: Option<GlobalDocumentation>,
}

impl RecordDb {
    /// Validate and sort the given records.
    ///
    /// ## Errors
    /// - Two records of the same kind share a name.
    /// - A diagnostic or a group refers to a group record that does not exist.
    /// - A group is (transitively) its own subgroup.
    pub fn new(
        mut diagnostics: Vec<Diagnostic>,
        mut groups: Vec<DiagGroup>,
        mut substitutions: Vec<TextSubstitution>,
        compat_ids: Vec<CompatWarningId>,
        documentation: Option<GlobalDocumentation>,
    ) -> Result<Self, GenError> {
        diagnostics.sort_by(|a, b| a.name.cmp(&b.name));
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        substitutions.sort_by(|a, b| a.name.cmp(&b.name));

        check_unique("Diagnostic", diagnostics.iter().map(|d| (d.name.as_str(), &d.loc)))?;
        check_unique("DiagGroup", groups.iter().map(|g| (g.name.as_str(), &g.loc)))?;
        check_unique("TextSubstitution", substitutions.iter().map(|s| (s.name.as_str(), &s.loc)))?;

        let db = Self {
            diagnostics,
            groups,
            substitutions,
            compat_ids,
            documentation,
        };
        db.check_references()?;
        db.check_acyclic()?;
        Ok(db)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn groups(&self) -> &[DiagGroup] {
        &self.groups
    }

    pub fn substitutions(&self) -> &[TextSubstitution] {
        &self.substitutions
    }

    pub fn compat_ids(&self) -> &[CompatWarningId] {
        &self.compat_ids
    }

    pub fn documentation(&self) -> Option<&GlobalDocumentation> {
        self.documentation.as_ref()
    }

    /// Look up a group by record name.
    pub fn group(&self, name: &str) -> Option<&DiagGroup> {
        self.groups
            .binary_search_by(|g| g.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.groups[i])
    }

    /// The group record a diagnostic belongs to, if any.
    pub fn group_of(&self, diag: &Diagnostic) -> Option<&DiagGroup> {
        diag.group.as_deref().and_then(|name| self.group(name))
    }

    fn check_references(&self) -> Result<(), GenError> {
        for diag in &self.diagnostics {
            if let Some(group) = &diag.group {
                if self.group(group).is_none() {
                    return Err(GenError::UnknownGroup {
                        loc: diag.loc.text.clone(),
                        record: diag.name.clone(),
                        group: group.clone(),
                    });
                }
            }
        }
        for group in &self.groups {
            for sub in &group.sub_groups {
                if self.group(sub).is_none() {
                    return Err(GenError::UnknownGroup {
                        loc: group.loc.text.clone(),
                        record: group.name.clone(),
                        group: sub.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Depth-first search over subgroup edges; every later pass relies on the group graph being a DAG.
    fn check_acyclic(&self) -> Result<(), GenError> {
        let mut done: HashSet<&str> = HashSet::new();
        for group in &self.groups {
            let mut on_path = Vec::new();
            self.visit_acyclic(group, &mut on_path, &mut done)?;
        }
        Ok(())
    }

    fn visit_acyclic<'a>(
        &'a self,
        group: &'a DiagGroup,
        on_path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<(), GenError> {
        if done.contains(group.name.as_str()) {
            return Ok(());
        }
        if on_path.contains(&group.name.as_str()) {
            return Err(GenError::SubGroupCycle {
                loc: group.loc.text.clone(),
                group: group.group_name.clone(),
            });
        }
        on_path.push(&group.name);
        for sub in group.sub_groups.iter().filter_map(|name| self.group(name)) {
            self.visit_acyclic(sub, on_path, done)?;
        }
        on_path.pop();
        done.insert(&group.name);
        Ok(())
    }
}

fn check_unique<'a>(kind: &'static str, sorted: impl Iterator<Item = (&'a str, &'a Loc)>) -> Result<(), GenError> {
    let mut seen: HashMap<&str, &Loc> = HashMap::new();
    for (name, loc) in sorted {
        if seen.insert(name, loc).is_some() {
            return Err(GenError::DuplicateRecord {
                loc: loc.text.clone(),
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
