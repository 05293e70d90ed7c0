//! Group graph: which diagnostics and subgroups belong to which group.
//!
//! Groups are keyed by *group name*, not by record: an explicit `DiagGroup` definition and any number of inline
//! definitions with the same name all land in one [`GroupInfo`]. IDs are the rank of the group name in
//! lexicographic order, which is also the order of every table emitted from the graph.
//!
//! ## Notes
//!
//! - Parent links are kept per *record*, in declaration order of the parents.
//! - Defining the same group name more than once is not fatal; it is reported (see [`GroupGraph::build`]).

use std::collections::{BTreeMap, HashMap};

use diaggen_core::lang::classes::DiagClass;
use tracing::debug;

use super::report::Reports;
use crate::error::GenError;
use crate::records::{DiagGroup, Diagnostic, RecordDb};

/// The name of the umbrella group whose membership is partly inferred.
pub const PEDANTIC: &str = "pedantic";

/// Everything known about one group name.
#[derive(Debug, Clone)]
pub struct GroupInfo<'r> {
    pub group_name: &'r str,
    /// Diagnostics directly in the group, in name order.
    pub diags: Vec<&'r Diagnostic>,
    /// Subgroup names, in definition order.
    pub sub_groups: Vec<&'r str>,
    /// Every defining record, in record-name order. Never empty.
    pub defs: Vec<&'r DiagGroup>,
    pub id: usize,
}

impl<'r> GroupInfo<'r> {
    /// Record name of the last definition.
    pub fn record_name(&self) -> &'r str {
        self.defs.last().map_or("", |def| def.name.as_str())
    }

    /// Documentation of the last definition.
    pub fn documentation(&self) -> &'r str {
        self.defs.last().map_or("", |def| def.documentation.as_str())
    }

    pub fn is_pedantic(&self) -> bool {
        self.group_name == PEDANTIC
    }
}

#[derive(Debug)]
pub struct GroupGraph<'r> {
    db: &'r RecordDb,
    groups: BTreeMap<&'r str, GroupInfo<'r>>,
    parents: HashMap<&'r str, Vec<&'r DiagGroup>>,
}

impl<'r> GroupGraph<'r> {
    /// Group the diagnostics, assign IDs and report duplicate definitions.
    ///
    /// ## Errors
    /// - A note is placed in a group.
    #[tracing::instrument(skip_all, fields(diagnostics = db.diagnostics().len(), groups = db.groups().len()))]
    pub fn build(db: &'r RecordDb, reports: &mut Reports) -> Result<Self, GenError> {
        let mut groups: BTreeMap<&'r str, GroupInfo<'r>> = BTreeMap::new();

        for diag in db.diagnostics() {
            let Some(group) = db.group_of(diag) else {
                continue;
            };
            if diag.class == DiagClass::Note {
                return Err(GenError::NoteInGroup {
                    loc: diag.loc.text.clone(),
                    name: diag.name.clone(),
                    group: group.group_name.clone(),
                });
            }
            entry(&mut groups, &group.group_name).diags.push(diag);
        }

        // Every definition gets an entry, so groups without diagnostics still show up.
        for group in db.groups() {
            let info = entry(&mut groups, &group.group_name);
            info.defs.push(group);
            info.sub_groups
                .extend(group.sub_groups.iter().filter_map(|sub| db.group(sub)).map(|sub| sub.group_name.as_str()));
        }

        for (id, info) in groups.values_mut().enumerate() {
            info.id = id;
        }

        let mut declared: Vec<&'r DiagGroup> = db.groups().iter().collect();
        declared.sort_by_key(|group| group.loc.ordinal);
        let mut parents: HashMap<&'r str, Vec<&'r DiagGroup>> = HashMap::new();
        for group in declared {
            for sub in &group.sub_groups {
                parents.entry(sub.as_str()).or_default().push(group);
            }
        }

        let graph = Self { db, groups, parents };
        graph.report_duplicates(reports);
        debug!(groups = graph.groups.len(), "grouped diagnostics");
        Ok(graph)
    }

    fn report_duplicates(&self, reports: &mut Reports) {
        for info in self.groups.values() {
            let single_definition = info.defs.len() == 1 && (!info.defs[0].anonymous || info.diags.len() <= 1);
            if single_definition {
                continue;
            }
            debug!(group = info.group_name, definitions = info.defs.len(), "group defined more than once");

            let mut first = true;
            let mut explicit: Vec<&DiagGroup> = info
                .defs
                .iter()
                .copied()
                .filter(|def| !info.diags.iter().any(|d| d.group.as_deref() == Some(def.name.as_str())))
                .collect();
            explicit.sort_by_key(|def| def.loc.ordinal);
            for def in explicit {
                if first {
                    reports.error(
                        def.loc.text.as_str(),
                        format!("group '{}' is defined more than once", info.group_name),
                    );
                    first = false;
                } else {
                    reports.note(def.loc.text.as_str(), "also defined here");
                }
            }

            for diag in &info.diags {
                let anonymous = self.db.group_of(diag).is_some_and(|g| g.anonymous);
                if !anonymous {
                    continue;
                }
                if first {
                    reports.error(
                        diag.loc.text.as_str(),
                        format!("group '{}' is implicitly defined more than once", info.group_name),
                    );
                    first = false;
                } else {
                    reports.note(diag.loc.text.as_str(), "also implicitly defined here");
                }
            }
        }
    }

    pub fn db(&self) -> &'r RecordDb {
        self.db
    }

    pub fn get(&self, group_name: &str) -> Option<&GroupInfo<'r>> {
        self.groups.get(group_name)
    }

    pub fn id_of(&self, group_name: &str) -> Option<usize> {
        self.get(group_name).map(|info| info.id)
    }

    /// Groups in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &GroupInfo<'r>> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Records listing `group` as a subgroup, in declaration order.
    pub fn parents(&self, group: &DiagGroup) -> &[&'r DiagGroup] {
        self.parents.get(group.name.as_str()).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `group` is named `group_name` or sits (transitively) below a group of that name.
    pub fn is_sub_group_of(&self, group: &DiagGroup, group_name: &str) -> bool {
        group.group_name == group_name
            || self
                .parents(group)
                .iter()
                .any(|parent| self.is_sub_group_of(parent, group_name))
    }

    /// Category of a diagnostic: its own, else the first non-empty one up its group chain.
    pub fn diagnostic_category(&self, diag: &'r Diagnostic) -> &'r str {
        if !diag.category.is_empty() {
            return &diag.category;
        }
        self.db.group_of(diag).map_or("", |group| self.group_category(group))
    }

    fn group_category(&self, group: &'r DiagGroup) -> &'r str {
        if !group.category.is_empty() {
            return &group.category;
        }
        self.parents(group)
            .iter()
            .copied()
            .map(|parent| self.group_category(parent))
            .find(|category| !category.is_empty())
            .unwrap_or("")
    }
}

fn entry<'m, 'r>(groups: &'m mut BTreeMap<&'r str, GroupInfo<'r>>, group_name: &'r str) -> &'m mut GroupInfo<'r> {
    groups.entry(group_name).or_insert_with(|| GroupInfo {
        group_name,
        diags: Vec::new(),
        sub_groups: Vec::new(),
        defs: Vec::new(),
        id: 0,
    })
}
