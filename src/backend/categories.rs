//! Dense numbering of diagnostic categories.

use std::collections::HashMap;

use super::groups::GroupGraph;

/// Category names by ID; ID 0 is the empty "no category" name.
#[derive(Debug, Clone)]
pub struct CategoryTable<'r> {
    names: Vec<&'r str>,
    ids: HashMap<&'r str, usize>,
}

impl<'r> CategoryTable<'r> {
    /// Number categories in first-seen order over the diagnostics in name order.
    #[tracing::instrument(skip_all)]
    pub fn build(graph: &GroupGraph<'r>) -> Self {
        let mut table = Self {
            names: vec![""],
            ids: HashMap::from([("", 0)]),
        };
        for diag in graph.db().diagnostics() {
            let category = graph.diagnostic_category(diag);
            if !table.ids.contains_key(category) {
                table.ids.insert(category, table.names.len());
                table.names.push(category);
            }
        }
        tracing::debug!(categories = table.names.len() - 1, "numbered categories");
        table
    }

    /// ID of a category name; unknown names map to 0.
    pub fn id(&self, category: &str) -> usize {
        self.ids.get(category).copied().unwrap_or(0)
    }

    /// Category names in ID order, starting with the empty name.
    pub fn names(&self) -> &[&'r str] {
        &self.names
    }
}

/// `DiagCat_` identifier for a category display name.
pub fn category_enum(name: &str) -> String {
    if name.is_empty() {
        return "DiagCat_None".to_string();
    }
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("DiagCat_{sanitized}")
}
