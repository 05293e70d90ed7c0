//! Fatal errors of a generator run.
//!
//! Anything in [`GenError`] aborts the run: the output of an emitter that fails is never written. Problems that
//! should fail the build but still let generation finish are [`crate::backend::Report`]s instead.

use miette::Diagnostic;
use thiserror::Error;

use diaggen_text::TextError;

#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    #[error("failed to read {path}")]
    #[diagnostic(code(diaggen::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}: invalid record database")]
    #[diagnostic(code(diaggen::json), help("the input must be a JSON object keyed by record kind"))]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{loc}: unknown {field} value '{value}' in record '{record}'")]
    #[diagnostic(code(diaggen::records::field))]
    InvalidField {
        loc: String,
        record: String,
        field: &'static str,
        value: String,
    },

    #[error("{loc}: duplicate {kind} record '{name}'")]
    #[diagnostic(code(diaggen::records::duplicate))]
    DuplicateRecord { loc: String, kind: &'static str, name: String },

    #[error("{loc}: record '{record}' refers to undefined DiagGroup '{group}'")]
    #[diagnostic(code(diaggen::records::unknown_group))]
    UnknownGroup { loc: String, record: String, group: String },

    #[error("{loc}: diagnostic group '{group}' is a subgroup of itself")]
    #[diagnostic(code(diaggen::records::cycle))]
    SubGroupCycle { loc: String, group: String },

    #[error("{loc}: Error {name} cannot be in a warning group [{group}]")]
    #[diagnostic(code(diaggen::defs::error_in_group))]
    ErrorInGroup { loc: String, name: String, group: String },

    #[error("{loc}: Error {name} not in any diagnostic group")]
    #[diagnostic(code(diaggen::defs::remark_without_group))]
    RemarkWithoutGroup { loc: String, name: String },

    #[error("{loc}: Note {name} cannot be in a diagnostic group [{group}]")]
    #[diagnostic(code(diaggen::groups::note_in_group))]
    NoteInGroup { loc: String, name: String, group: String },

    #[error("pedantic group not defined")]
    #[diagnostic(
        code(diaggen::defs::pedantic),
        help("diagnostics were inferred into -Wpedantic, so a DiagGroup with GroupName \"pedantic\" must exist")
    )]
    MissingPedanticGroup,

    #[error("Invalid character in diagnostic group '{0}'")]
    #[diagnostic(code(diaggen::groups::invalid_name))]
    InvalidGroupName(String),

    #[error("{loc}: Diagnostic group contains both remark and non-remark diagnostics")]
    #[diagnostic(code(diaggen::docs::mixed_remarks))]
    MixedRemarkGroup { loc: String, group: String },

    #[error("The Documentation top-level definition is missing, no documentation will be generated.")]
    #[diagnostic(code(diaggen::docs::missing))]
    MissingDocumentation,

    #[error("'iface' requires a component name")]
    #[diagnostic(code(diaggen::iface::component), help("pass --component <NAME>"))]
    MissingComponent,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Text(#[from] TextError),

    #[error("failed to format output")]
    #[diagnostic(code(diaggen::fmt))]
    Format(#[from] std::fmt::Error),
}
