//! JSON front door of the record database.
//!
//! The document is an object keyed by record kind. Field names are spelled as in the `.td` schema
//! (`GroupName`, `SubGroups`, `DefaultSeverity`, ...). Missing optional fields take the schema defaults.
//!
//! ## Notes
//!
//! - Ordinals are handed out in document order: `DiagGroup` records first, then `Diagnostic` records (an inline
//!   group takes the ordinal right before its diagnostic), then `TextSubstitution`, then `CompatWarningId`.
//! - An inline group reference always creates a fresh anonymous `DiagGroup` record named after its diagnostic
//!   (`anonymous_<diagnostic>`), so two inline references to one name are two definitions of that group.

use std::path::Path;

use diaggen_core::lang::classes::{DiagClass, SfinaeResponse, Severity};
use serde::Deserialize;
use tracing::debug;

use super::{CompatWarningId, DiagGroup, Diagnostic, GlobalDocumentation, Loc, RecordDb, TextSubstitution};
use crate::error::GenError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDatabase {
    #[serde(default)]
    diagnostic: Vec<RawDiagnostic>,
    #[serde(default)]
    diag_group: Vec<RawDiagGroup>,
    #[serde(default)]
    text_substitution: Vec<RawTextSubstitution>,
    #[serde(default)]
    compat_warning_id: Vec<RawCompatWarningId>,
    #[serde(default)]
    global_documentation: Option<RawGlobalDocumentation>,
}

#[derive(Debug, Deserialize)]
enum RawGroupRef {
    /// Reference to an explicit `DiagGroup` record.
    Def(String),
    /// Group defined at the use site, by group name.
    Inline(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDiagnostic {
    name: String,
    #[serde(default)]
    component: String,
    class: String,
    default_severity: String,
    #[serde(default)]
    group: Option<RawGroupRef>,
    #[serde(default)]
    category_name: String,
    #[serde(default)]
    summary: String,
    #[serde(rename = "SFINAE", default)]
    sfinae: Option<String>,
    #[serde(default)]
    show_in_system_header: bool,
    #[serde(default)]
    show_in_system_macro: bool,
    #[serde(default)]
    deferrable: bool,
    #[serde(default)]
    warning_no_werror: bool,
    #[serde(default)]
    loc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDiagGroup {
    name: String,
    group_name: String,
    #[serde(default)]
    sub_groups: Vec<String>,
    #[serde(default)]
    category_name: String,
    #[serde(default)]
    documentation: String,
    #[serde(default)]
    loc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTextSubstitution {
    name: String,
    substitution: String,
    #[serde(default)]
    loc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawCompatWarningId {
    component: String,
    name: String,
    diag: String,
    diag_pre: String,
    std: i64,
    #[serde(default)]
    loc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawGlobalDocumentation {
    #[serde(default)]
    intro: String,
}

/// Hands out ordinals and default locations while converting raw records.
struct Converter<'a> {
    source_name: &'a str,
    next_ordinal: usize,
}

impl Converter<'_> {
    fn loc(&mut self, explicit: Option<String>, kind: &str, index: usize) -> Loc {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        let text = explicit.unwrap_or_else(|| format!("{}:{kind}#{index}", self.source_name));
        Loc::new(ordinal, text)
    }
}

impl RecordDb {
    /// Read and load a JSON record database from disk.
    pub fn from_path(path: &Path) -> Result<Self, GenError> {
        let text = std::fs::read_to_string(path).map_err(|source| GenError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text, &path.display().to_string())
    }

    /// Load a JSON record database; `source_name` is used in default locations and error messages.
    #[tracing::instrument(skip(text))]
    pub fn from_json_str(text: &str, source_name: &str) -> Result<Self, GenError> {
        let raw: RawDatabase = serde_json::from_str(text).map_err(|source| GenError::Json {
            source_name: source_name.to_string(),
            source,
        })?;

        let mut conv = Converter {
            source_name,
            next_ordinal: 0,
        };

        let mut groups = Vec::with_capacity(raw.diag_group.len());
        for (index, g) in raw.diag_group.into_iter().enumerate() {
            let loc = conv.loc(g.loc, "DiagGroup", index);
            groups.push(DiagGroup {
                name: g.name,
                group_name: g.group_name,
                sub_groups: g.sub_groups,
                category: g.category_name,
                documentation: g.documentation,
                anonymous: false,
                loc,
            });
        }

        let mut diagnostics = Vec::with_capacity(raw.diagnostic.len());
        for (index, d) in raw.diagnostic.into_iter().enumerate() {
            let group = match d.group {
                None => None,
                Some(RawGroupRef::Def(name)) => Some(name),
                Some(RawGroupRef::Inline(group_name)) => {
                    let loc = conv.loc(d.loc.clone(), "Diagnostic", index);
                    let name = format!("anonymous_{}", d.name);
                    debug!(group = %group_name, record = %name, diagnostic = %d.name, "inline group definition");
                    groups.push(DiagGroup {
                        name: name.clone(),
                        group_name,
                        sub_groups: Vec::new(),
                        category: String::new(),
                        documentation: String::new(),
                        anonymous: true,
                        loc,
                    });
                    Some(name)
                }
            };
            let loc = conv.loc(d.loc, "Diagnostic", index);

            let class = DiagClass::parse(&d.class).ok_or_else(|| GenError::InvalidField {
                loc: loc.text.clone(),
                record: d.name.clone(),
                field: "Class",
                value: d.class.clone(),
            })?;
            let default_severity = Severity::parse(&d.default_severity).ok_or_else(|| GenError::InvalidField {
                loc: loc.text.clone(),
                record: d.name.clone(),
                field: "DefaultSeverity",
                value: d.default_severity.clone(),
            })?;
            let sfinae = match d.sfinae {
                None => SfinaeResponse::default_for(class),
                Some(spelling) => SfinaeResponse::parse(&spelling).ok_or_else(|| GenError::InvalidField {
                    loc: loc.text.clone(),
                    record: d.name.clone(),
                    field: "SFINAE",
                    value: spelling.clone(),
                })?,
            };

            diagnostics.push(Diagnostic {
                name: d.name,
                component: d.component,
                class,
                default_severity,
                group,
                category: d.category_name,
                summary: d.summary,
                sfinae,
                show_in_system_header: d.show_in_system_header,
                show_in_system_macro: d.show_in_system_macro,
                deferrable: d.deferrable,
                warning_no_werror: d.warning_no_werror,
                loc,
            });
        }

        let substitutions = raw
            .text_substitution
            .into_iter()
            .enumerate()
            .map(|(index, s)| TextSubstitution {
                loc: conv.loc(s.loc, "TextSubstitution", index),
                name: s.name,
                substitution: s.substitution,
            })
            .collect();

        let compat_ids = raw
            .compat_warning_id
            .into_iter()
            .enumerate()
            .map(|(index, c)| CompatWarningId {
                loc: conv.loc(c.loc, "CompatWarningId", index),
                component: c.component,
                name: c.name,
                diag: c.diag,
                diag_pre: c.diag_pre,
                std: c.std,
            })
            .collect();

        let documentation = raw
            .global_documentation
            .map(|doc| GlobalDocumentation { intro: doc.intro });

        let db = RecordDb::new(diagnostics, groups, substitutions, compat_ids, documentation)?;
        debug!(
            diagnostics = db.diagnostics().len(),
            groups = db.groups().len(),
            substitutions = db.substitutions().len(),
            "loaded record database"
        );
        Ok(db)
    }
}
