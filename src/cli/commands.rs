//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::backend::{self, Action, Reports};
use crate::config::GenConfig;
use crate::error::GenError;
use crate::records::RecordDb;

use super::{CliError, CliResult, ExitCode};

/// Load `input`, run one backend and write its output to `output` (stdout when `None`).
///
/// Reports are printed to stderr after the output is written; any error-level report turns the exit code
/// into a failure without suppressing the output.
#[tracing::instrument(skip(output, config), fields(action = action.as_str()))]
pub fn generate_file(action: Action, input: &Path, output: Option<&Path>, config: &GenConfig) -> CliResult<ExitCode> {
    let db = RecordDb::from_path(input).map_err(fatal)?;
    let generated = backend::generate(action, &db, config).map_err(fatal)?;

    match output {
        Some(path) => {
            fs::write(path, &generated.text)
                .map_err(|e| CliError::failure(format!("Error writing {}: {e}", path.display())))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(generated.text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| CliError::failure(format!("Error writing to stdout: {e}")))?;
        }
    }

    Ok(report_outcome(&generated.reports))
}

/// Print every report to stderr and pick the exit code.
fn report_outcome(reports: &Reports) -> ExitCode {
    if !reports.is_empty() {
        eprint!("{reports}");
    }
    if reports.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Render a fatal error with its code and help text.
fn fatal(err: GenError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("diaggen_cli_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_generate_file_writes_output() {
        let input = scratch(
            "index.json",
            r#"{ "Diagnostic": [{ "Name": "warn_b", "Class": "CLASS_WARNING", "DefaultSeverity": "Warning" },
                                { "Name": "warn_a", "Class": "CLASS_WARNING", "DefaultSeverity": "Warning" }] }"#,
        );
        let output = input.with_extension("inc");
        let config = GenConfig::new().with_header(false);
        let code = generate_file(Action::IndexName, &input, Some(&output), &config).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "DIAG_NAME_INDEX(warn_a)\nDIAG_NAME_INDEX(warn_b)\n"
        );
    }

    #[test]
    fn test_error_reports_fail_the_run() {
        let input = scratch(
            "wording.json",
            r#"{ "Diagnostic": [{ "Name": "warn_x", "Class": "CLASS_WARNING", "DefaultSeverity": "Warning",
                                  "Summary": "Capitalized." }] }"#,
        );
        let output = input.with_extension("inc");
        let code = generate_file(Action::Defs, &input, Some(&output), &GenConfig::new()).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(fs::read_to_string(&output).unwrap().contains("DIAG(warn_x,"));
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let missing = std::env::temp_dir().join("diaggen_cli_does_not_exist.json");
        let err = generate_file(Action::Defs, &missing, None, &GenConfig::new()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("diaggen_cli_does_not_exist.json"));
    }

    #[test]
    fn test_report_outcome() {
        let mut reports = Reports::new();
        assert_eq!(report_outcome(&reports), ExitCode::SUCCESS);
        reports.note("a.td:1", "just a note");
        assert_eq!(report_outcome(&reports), ExitCode::SUCCESS);
        reports.error("a.td:2", "bad");
        assert_eq!(report_outcome(&reports), ExitCode::FAILURE);
    }
}
