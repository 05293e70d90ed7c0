//! reStructuredText reference of every diagnostic group.
//!
//! One section per `DiagGroup` record, sorted by group name:
//!
//! ```text
//! -Wunused
//! --------
//! Some of the diagnostics controlled by this flag are enabled by default.
//!
//! Also controls `-Wunused-variable`_.
//!
//! **Diagnostic text:**
//!
//! <one documentation table per diagnostic>
//! ```
//!
//! ## Notes
//!
//! - `pedantic` lists its inferred members after its own, in declaration order.
//! - A group made only of remarks is spelled `-R<name>`; mixing remarks and other diagnostics is fatal.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use diaggen_core::lang::classes::Severity;
use diaggen_text::DiagnosticTextBuilder;

use super::groups::GroupGraph;
use super::pedantic::infer_pedantic;
use super::report::Reports;
use super::text_builder;
use crate::error::GenError;
use crate::records::{DiagGroup, Diagnostic, RecordDb};

/// Summary whose text is supplied entirely by the caller at runtime.
const PASSTHROUGH_SUMMARY: &str = "%0";

/// Members of one group name as documented.
#[derive(Debug, Default)]
struct Contents<'r> {
    diags: Vec<&'r Diagnostic>,
    sub_groups: Vec<&'r str>,
}

#[tracing::instrument(skip_all)]
pub fn emit_docs(db: &RecordDb, reports: &mut Reports) -> Result<String, GenError> {
    let intro = db.documentation().ok_or(GenError::MissingDocumentation)?;
    let text = text_builder(db)?;
    let graph = GroupGraph::build(db, reports)?;
    let contents = documented_contents(&graph);

    let mut out = String::new();
    writeln!(out, "{}", intro.intro)?;

    let mut sections: Vec<&DiagGroup> = db.groups().iter().collect();
    sections.sort_by(|a, b| {
        a.group_name
            .cmp(&b.group_name)
            .then(a.loc.ordinal.cmp(&b.loc.ordinal))
    });

    for group in sections {
        write_section(&mut out, group, &contents, &text)?;
    }
    Ok(out)
}

/// Group contents with the inferred `pedantic` members appended in declaration order.
fn documented_contents<'r>(graph: &GroupGraph<'r>) -> BTreeMap<&'r str, Contents<'r>> {
    let mut contents: BTreeMap<&'r str, Contents<'r>> = graph
        .iter()
        .map(|info| {
            let entry = Contents {
                diags: info.diags.clone(),
                sub_groups: info.sub_groups.clone(),
            };
            (info.group_name, entry)
        })
        .collect();

    let pedantic = infer_pedantic(graph);
    let mut diags = pedantic.diags;
    diags.sort_by_key(|d| d.loc.ordinal);
    let mut groups = pedantic.groups;
    groups.sort_by_key(|g| g.loc.ordinal);

    let entry = contents.entry(super::groups::PEDANTIC).or_default();
    entry.diags.extend(diags);
    entry.sub_groups.extend(groups.iter().map(|g| g.group_name.as_str()));
    contents
}

fn write_section(
    out: &mut String,
    group: &DiagGroup,
    contents: &BTreeMap<&str, Contents<'_>>,
    text: &DiagnosticTextBuilder,
) -> Result<(), GenError> {
    let is_remark = is_remark_group(group, contents)?;
    let flag = if is_remark { "-R" } else { "-W" };
    let Some(members) = contents.get(group.group_name.as_str()) else {
        return Ok(());
    };
    let is_synonym = members.diags.is_empty() && members.sub_groups.len() == 1;

    let header = format!("{flag}{}", group.group_name);
    writeln!(out, "{header}\n{}", "-".repeat(header.len()))?;

    if !is_synonym {
        let mut severities = BTreeSet::new();
        collect_severities(&group.group_name, contents, &mut severities);
        if !severities.is_empty() && !severities.contains(&Severity::Ignored) {
            let any_non_errors = severities.contains(&Severity::Warning) || severities.contains(&Severity::Remark);
            if any_non_errors {
                out.push_str("This diagnostic is enabled by default.\n\n");
            } else {
                write!(
                    out,
                    "This diagnostic is an error by default, but the flag ``-Wno-{}`` can be used to disable the \
                     error.\n\n",
                    group.group_name
                )?;
            }
        } else if severities.len() > 1 {
            out.push_str("Some of the diagnostics controlled by this flag are enabled by default.\n\n");
        }
    }

    if !members.sub_groups.is_empty() {
        let lead = if is_synonym {
            "Synonym for "
        } else if members.diags.is_empty() {
            "Controls "
        } else {
            "Also controls "
        };
        let mut sub_groups = members.sub_groups.clone();
        sub_groups.sort_unstable();
        let links: Vec<String> = sub_groups.iter().map(|name| format!("`{flag}{name}`_")).collect();
        writeln!(out, "{lead}{}.\n", links.join(", "))?;
    }

    if !members.diags.is_empty() {
        out.push_str("**Diagnostic text:**\n\n");
        for diag in &members.diags {
            let role = match diag.default_severity {
                Severity::Ignored if is_remark => "remark",
                Severity::Ignored => "warning",
                other => other.doc_role(),
            };
            if diag.summary == PASSTHROUGH_SUMMARY {
                out.push_str("The text of this diagnostic is not controlled by Clang.\n\n");
            } else {
                for line in text.build_for_documentation(role, &diag.text_record())? {
                    writeln!(out, "{line}")?;
                }
                out.push('\n');
            }
        }
    }

    if !group.documentation.is_empty() {
        out.push_str(&group.documentation);
    } else if members.sub_groups.is_empty() && members.diags.is_empty() {
        out.push_str("This diagnostic flag exists for GCC compatibility, and has no effect in Clang.\n");
    }
    out.push('\n');
    Ok(())
}

/// Whether every diagnostic under the group is a remark.
fn is_remark_group(group: &DiagGroup, contents: &BTreeMap<&str, Contents<'_>>) -> Result<bool, GenError> {
    let mut any_remarks = false;
    let mut any_others = false;
    visit_diagnostics(&group.group_name, contents, &mut |diag| {
        if diag.is_remark() {
            any_remarks = true;
        } else {
            any_others = true;
        }
    });
    if any_remarks && any_others {
        return Err(GenError::MixedRemarkGroup {
            loc: group.loc.text.clone(),
            group: group.group_name.clone(),
        });
    }
    Ok(any_remarks)
}

fn collect_severities(group_name: &str, contents: &BTreeMap<&str, Contents<'_>>, out: &mut BTreeSet<Severity>) {
    visit_diagnostics(group_name, contents, &mut |diag| {
        out.insert(diag.default_severity);
    });
}

/// Call `f` on every diagnostic of the group and, recursively, of its subgroups.
fn visit_diagnostics(group_name: &str, contents: &BTreeMap<&str, Contents<'_>>, f: &mut dyn FnMut(&Diagnostic)) {
    let Some(members) = contents.get(group_name) else {
        return;
    };
    for diag in &members.diags {
        f(diag);
    }
    for sub in &members.sub_groups {
        visit_diagnostics(sub, contents, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(json: &str) -> Result<String, GenError> {
        let db = RecordDb::from_json_str(json, "docs.json")?;
        emit_docs(&db, &mut Reports::new())
    }

    #[test]
    fn test_missing_documentation_is_fatal() {
        let err = docs(r#"{ "DiagGroup": [{ "Name": "G", "GroupName": "g" }] }"#).unwrap_err();
        assert!(matches!(err, GenError::MissingDocumentation));
    }

    #[test]
    fn test_empty_group_is_gcc_compatibility() {
        let out = docs(
            r#"{ "GlobalDocumentation": { "Intro": "Intro." },
                 "DiagGroup": [{ "Name": "G", "GroupName": "gcc-only" }] }"#,
        )
        .unwrap();
        assert_eq!(
            out,
            "Intro.\n-Wgcc-only\n----------\n\
             This diagnostic flag exists for GCC compatibility, and has no effect in Clang.\n\n"
        );
    }

    #[test]
    fn test_synonym_and_error_by_default() {
        let out = docs(
            r#"{ "GlobalDocumentation": { "Intro": "" },
                 "DiagGroup": [
                    { "Name": "Alias", "GroupName": "alias", "SubGroups": ["Real"] },
                    { "Name": "Real", "GroupName": "real" }
                 ],
                 "Diagnostic": [{ "Name": "warn_real", "Class": "CLASS_WARNING", "DefaultSeverity": "Error",
                                  "Group": { "Def": "Real" }, "Summary": "%0" }] }"#,
        )
        .unwrap();
        assert_eq!(
            out,
            "\n-Walias\n-------\nSynonym for `-Wreal`_.\n\n\n\
             -Wreal\n------\n\
             This diagnostic is an error by default, but the flag ``-Wno-real`` can be used to disable the error.\n\n\
             **Diagnostic text:**\n\n\
             The text of this diagnostic is not controlled by Clang.\n\n\n"
        );
    }

    #[test]
    fn test_mixed_remark_group_is_fatal() {
        let err = docs(
            r#"{ "GlobalDocumentation": { "Intro": "" },
                 "DiagGroup": [{ "Name": "Mixed", "GroupName": "mixed" }],
                 "Diagnostic": [
                    { "Name": "remark_a", "Class": "CLASS_REMARK", "DefaultSeverity": "Ignored", "Group": { "Def": "Mixed" } },
                    { "Name": "warn_b", "Class": "CLASS_WARNING", "DefaultSeverity": "Warning", "Group": { "Def": "Mixed" } }
                 ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::MixedRemarkGroup { ref group, .. } if group == "mixed"));
    }

    #[test]
    fn test_remark_group_uses_r_flag_and_remark_role() {
        let out = docs(
            r#"{ "GlobalDocumentation": { "Intro": "" },
                 "DiagGroup": [{ "Name": "Pass", "GroupName": "pass" }],
                 "Diagnostic": [{ "Name": "remark_pass", "Class": "CLASS_REMARK", "DefaultSeverity": "Ignored",
                                  "Group": { "Def": "Pass" }, "Summary": "ran" }] }"#,
        )
        .unwrap();
        assert!(out.contains("-Rpass\n------\n"));
        assert!(out.contains("|:remark:`remark:` |nbsp| :diagtext:`ran`|"));
    }
}
