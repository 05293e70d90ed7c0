//! Recoverable problems found while generating.
//!
//! A [`Report`] does not stop the emitter that raised it: every report of a run is collected into [`Reports`],
//! the output is still produced, and the caller decides afterwards (the CLI exits with status 1 if any report
//! is an error). Notes only ever follow the error they belong to.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Error,
    Note,
}

impl ReportLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportLevel::Error => "error",
            ReportLevel::Note => "note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub loc: String,
    pub message: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.loc, self.level.as_str(), self.message)
    }
}

/// Collected reports, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reports(pub Vec<Report>);

impl Reports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, loc: impl Into<String>, message: impl Into<String>) {
        self.push(ReportLevel::Error, loc.into(), message.into());
    }

    pub fn note(&mut self, loc: impl Into<String>, message: impl Into<String>) {
        self.push(ReportLevel::Note, loc.into(), message.into());
    }

    fn push(&mut self, level: ReportLevel, loc: String, message: String) {
        tracing::debug!(level = level.as_str(), %loc, %message, "report");
        self.0.push(Report { level, loc, message });
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|r| r.level == ReportLevel::Error)
    }

    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|r| r.level == ReportLevel::Error).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Report> {
        self.0.iter()
    }

    /// Messages only, for compact assertions.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.message.as_str()).collect()
    }
}

impl fmt::Display for Reports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.0 {
            writeln!(f, "{report}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_do_not_count_as_errors() {
        let mut reports = Reports::new();
        assert!(!reports.has_errors());
        reports.note("a.td:1", "also defined here");
        assert!(!reports.has_errors());
        reports.error("a.td:2", "group 'x' is defined more than once");
        assert!(reports.has_errors());
        assert_eq!(reports.error_count(), 1);
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_display_is_one_line_per_report() {
        let mut reports = Reports::new();
        reports.error("a.td:2", "first");
        reports.note("a.td:7", "second");
        assert_eq!(reports.to_string(), "a.td:2: error: first\na.td:7: note: second\n");
    }
}
