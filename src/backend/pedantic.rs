//! Infer the implicit members of `-Wpedantic`.
//!
//! Every extension that is ignored by default belongs in `-Wpedantic`, but listing them all by hand would be
//! unmaintainable. Instead, a group counts as pedantic once *all* of its children (direct diagnostics plus
//! subgroups) do, bottom-up from the seed diagnostics. The result is the minimal set of diagnostics and groups
//! to add to `pedantic` so that every seed is covered exactly once:
//! - a seed is added directly only if its group is not itself pedantic;
//! - a pedantic group is added directly only if not all of its parents are pedantic.
//!
//! Seeds already reachable from `pedantic` through the explicit subgroup graph are left alone.
//!
//! ## Notes
//!
//! - Coverage is counted per group *record*; the threshold is the child count of the group *name* it defines.
//! - The group graph is acyclic (checked when the database is built), so propagation terminates.

use std::collections::HashMap;

use diaggen_core::lang::classes::{DiagClass, Severity};
use tracing::debug;

use super::groups::{GroupGraph, PEDANTIC};
use crate::records::{DiagGroup, Diagnostic};

/// What must be added to `pedantic` on top of its explicit members.
#[derive(Debug, Clone, Default)]
pub struct PedanticSet<'r> {
    /// In diagnostic-name order.
    pub diags: Vec<&'r Diagnostic>,
    /// In group-record-name order.
    pub groups: Vec<&'r DiagGroup>,
}

impl PedanticSet<'_> {
    pub fn contains_diag(&self, name: &str) -> bool {
        self.diags.iter().any(|d| d.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.diags.is_empty() && self.groups.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Coverage {
    covered: usize,
    threshold: Option<usize>,
}

struct InferPedantic<'g, 'r> {
    graph: &'g GroupGraph<'r>,
    coverage: HashMap<&'r str, Coverage>,
}

impl<'g, 'r> InferPedantic<'g, 'r> {
    /// Whether every child of `group` is covered, optionally counting one more covered child first.
    fn group_in_pedantic(&mut self, group: &'r DiagGroup, increment: bool) -> bool {
        let graph = self.graph;
        let coverage = self.coverage.entry(group.name.as_str()).or_default();
        let threshold = *coverage.threshold.get_or_insert_with(|| {
            graph
                .get(&group.group_name)
                .map_or(0, |info| info.sub_groups.len() + info.diags.len())
        });
        if increment {
            coverage.covered += 1;
        }
        coverage.covered != 0 && coverage.covered == threshold
    }

    fn mark_group(&mut self, group: &'r DiagGroup) {
        if self.group_in_pedantic(group, true) {
            let graph = self.graph;
            for parent in graph.parents(group).iter().copied() {
                self.mark_group(parent);
            }
        }
    }
}

/// Compute the diagnostics and groups to add to `pedantic`.
#[tracing::instrument(skip_all)]
pub fn infer_pedantic<'r>(graph: &GroupGraph<'r>) -> PedanticSet<'r> {
    let db = graph.db();
    let mut engine = InferPedantic {
        graph,
        coverage: HashMap::new(),
    };

    let seeds: Vec<&'r Diagnostic> = db
        .diagnostics()
        .iter()
        .filter(|d| d.class == DiagClass::Extension && d.default_severity == Severity::Ignored)
        .collect();

    for diag in &seeds {
        if let Some(group) = db.group_of(diag) {
            if !graph.is_sub_group_of(group, PEDANTIC) {
                engine.mark_group(group);
            }
        }
    }

    let mut set = PedanticSet::default();
    for diag in seeds {
        if let Some(group) = db.group_of(diag) {
            if graph.is_sub_group_of(group, PEDANTIC) || engine.group_in_pedantic(group, false) {
                continue;
            }
        }
        set.diags.push(diag);
    }

    for group in db.groups() {
        if !engine.group_in_pedantic(group, false) {
            continue;
        }
        let parents = graph.parents(group);
        if !parents.is_empty() && parents.iter().all(|&parent| engine.group_in_pedantic(parent, false)) {
            continue;
        }
        set.groups.push(group);
    }

    debug!(diags = set.diags.len(), groups = set.groups.len(), "inferred pedantic members");
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::report::Reports;
    use crate::records::RecordDb;

    fn ext(name: &str, group: &str, severity: &str) -> String {
        format!(
            r#"{{ "Name": "{name}", "Class": "CLASS_EXTENSION", "DefaultSeverity": "{severity}", "Group": {{ "Def": "{group}" }} }}"#
        )
    }

    fn names<'a>(set: &'a PedanticSet<'_>) -> (Vec<&'a str>, Vec<&'a str>) {
        (
            set.diags.iter().map(|d| d.name.as_str()).collect(),
            set.groups.iter().map(|g| g.group_name.as_str()).collect(),
        )
    }

    #[test]
    fn test_fully_covered_group_is_added_as_a_group() {
        let json = format!(
            r#"{{ "DiagGroup": [{{ "Name": "Foo", "GroupName": "foo" }}, {{ "Name": "Pedantic", "GroupName": "pedantic" }}],
                 "Diagnostic": [{}] }}"#,
            ext("ext_foo", "Foo", "Ignored")
        );
        let db = RecordDb::from_json_str(&json, "p.json").unwrap();
        let graph = GroupGraph::build(&db, &mut Reports::new()).unwrap();
        let set = infer_pedantic(&graph);
        assert_eq!(names(&set), (vec![], vec!["foo"]));
    }

    #[test]
    fn test_partially_covered_group_contributes_its_diagnostics() {
        let json = format!(
            r#"{{ "DiagGroup": [{{ "Name": "Mixed", "GroupName": "mixed" }}],
                 "Diagnostic": [{}, {}] }}"#,
            ext("ext_quiet", "Mixed", "Ignored"),
            ext("ext_loud", "Mixed", "Warning")
        );
        let db = RecordDb::from_json_str(&json, "p.json").unwrap();
        let graph = GroupGraph::build(&db, &mut Reports::new()).unwrap();
        let set = infer_pedantic(&graph);
        assert_eq!(names(&set), (vec!["ext_quiet"], vec![]));
        assert!(set.contains_diag("ext_quiet"));
    }

    #[test]
    fn test_ungrouped_seed_is_added_directly() {
        let db = RecordDb::from_json_str(
            r#"{ "Diagnostic": [{ "Name": "ext_bare", "Class": "CLASS_EXTENSION", "DefaultSeverity": "Ignored" }] }"#,
            "p.json",
        )
        .unwrap();
        let graph = GroupGraph::build(&db, &mut Reports::new()).unwrap();
        assert_eq!(names(&infer_pedantic(&graph)), (vec!["ext_bare"], vec![]));
    }

    #[test]
    fn test_explicit_pedantic_members_are_left_alone() {
        let json = format!(
            r#"{{ "DiagGroup": [{{ "Name": "Pedantic", "GroupName": "pedantic", "SubGroups": ["Foo"] }},
                               {{ "Name": "Foo", "GroupName": "foo" }}],
                 "Diagnostic": [{}] }}"#,
            ext("ext_foo", "Foo", "Ignored")
        );
        let db = RecordDb::from_json_str(&json, "p.json").unwrap();
        let graph = GroupGraph::build(&db, &mut Reports::new()).unwrap();
        assert!(infer_pedantic(&graph).is_empty());
    }

    #[test]
    fn test_coverage_propagates_only_through_complete_groups() {
        // outer -> {mid, leaf2}; mid -> {leaf1}; every leaf holds one ignored extension.
        let json = format!(
            r#"{{ "DiagGroup": [
                    {{ "Name": "Outer", "GroupName": "outer", "SubGroups": ["Mid", "Leaf2"] }},
                    {{ "Name": "Mid", "GroupName": "mid", "SubGroups": ["Leaf1"] }},
                    {{ "Name": "Leaf1", "GroupName": "leaf1" }},
                    {{ "Name": "Leaf2", "GroupName": "leaf2" }}
                 ],
                 "Diagnostic": [{}, {}] }}"#,
            ext("ext_one", "Leaf1", "Ignored"),
            ext("ext_two", "Leaf2", "Ignored")
        );
        let db = RecordDb::from_json_str(&json, "p.json").unwrap();
        let graph = GroupGraph::build(&db, &mut Reports::new()).unwrap();
        let set = infer_pedantic(&graph);
        assert_eq!(names(&set), (vec![], vec!["outer"]));
    }
}
