//! Define the classification vocabulary attached to every diagnostic record.
//!
//! Three small closed sets live here, each with the exact spelling used by the record database and by the
//! generated tables:
//! - [`DiagClass`]: what kind of diagnostic a record is (`CLASS_ERROR`, `CLASS_EXTENSION`, ...).
//! - [`Severity`]: the default mapping of a diagnostic (`Ignored`, `Warning`, ...).
//! - [`SfinaeResponse`]: how the diagnostic behaves during template argument deduction.
//!
//! ## Examples
//! ```rust
//! use diaggen_core::lang::classes::{DiagClass, Severity};
//!
//! assert_eq!(DiagClass::parse("CLASS_EXTENSION"), Some(DiagClass::Extension));
//! assert_eq!(Severity::Ignored.as_str(), "Ignored");
//! assert_eq!(Severity::Ignored.doc_role(), "ignored");
//! ```

/// Kind of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagClass {
    Note,
    Remark,
    Warning,
    /// An extension diagnostic; reported as a warning when enabled.
    Extension,
    Error,
}

pub const DIAG_CLASSES: &[(DiagClass, &str)] = &[
    (DiagClass::Note, "CLASS_NOTE"),
    (DiagClass::Remark, "CLASS_REMARK"),
    (DiagClass::Warning, "CLASS_WARNING"),
    (DiagClass::Extension, "CLASS_EXTENSION"),
    (DiagClass::Error, "CLASS_ERROR"),
];

impl DiagClass {
    /// Resolve a record-database spelling such as `CLASS_WARNING`.
    pub fn parse(s: &str) -> Option<Self> {
        DIAG_CLASSES.iter().find(|(_, name)| *name == s).map(|(c, _)| *c)
    }

    pub fn as_str(self) -> &'static str {
        DIAG_CLASSES
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, name)| *name)
            .unwrap_or("CLASS_INVALID")
    }
}

/// Default severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Ignored,
    Remark,
    Warning,
    Error,
    Fatal,
}

pub const SEVERITIES: &[(Severity, &str)] = &[
    (Severity::Ignored, "Ignored"),
    (Severity::Remark, "Remark"),
    (Severity::Warning, "Warning"),
    (Severity::Error, "Error"),
    (Severity::Fatal, "Fatal"),
];

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        SEVERITIES.iter().find(|(_, name)| *name == s).map(|(sev, _)| *sev)
    }

    pub fn as_str(self) -> &'static str {
        SEVERITIES
            .iter()
            .find(|(sev, _)| *sev == self)
            .map(|(_, name)| *name)
            .unwrap_or("Ignored")
    }

    /// Lower-cased spelling used as the text role in generated documentation (`warning`, `error`, ...).
    pub fn doc_role(self) -> &'static str {
        match self {
            Severity::Ignored => "ignored",
            Severity::Remark => "remark",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

/// Behavior of a diagnostic during substitution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfinaeResponse {
    SubstitutionFailure,
    Suppress,
    Report,
    AccessControl,
}

pub const SFINAE_RESPONSES: &[(SfinaeResponse, &str)] = &[
    (SfinaeResponse::SubstitutionFailure, "SFINAE_SubstitutionFailure"),
    (SfinaeResponse::Suppress, "SFINAE_Suppress"),
    (SfinaeResponse::Report, "SFINAE_Report"),
    (SfinaeResponse::AccessControl, "SFINAE_AccessControl"),
];

impl SfinaeResponse {
    pub fn parse(s: &str) -> Option<Self> {
        SFINAE_RESPONSES.iter().find(|(_, name)| *name == s).map(|(r, _)| *r)
    }

    pub fn as_str(self) -> &'static str {
        SFINAE_RESPONSES
            .iter()
            .find(|(r, _)| *r == self)
            .map(|(_, name)| *name)
            .unwrap_or("SFINAE_Suppress")
    }

    /// Response used when a record does not name one: errors are substitution failures, everything else is
    /// suppressed.
    pub fn default_for(class: DiagClass) -> Self {
        match class {
            DiagClass::Error => SfinaeResponse::SubstitutionFailure,
            _ => SfinaeResponse::Suppress,
        }
    }
}
