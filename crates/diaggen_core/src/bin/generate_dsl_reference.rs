//! Generate the Markdown reference for the diagnostic text language from `diaggen_core::lang` registries.
//!
//! This binary renders the modifier registry and the diagnostic class/severity/SFINAE vocabularies into
//! `docs/reference/diagnostic-text.md`.
//!
//! ## Notes
//! - The generated file is a derived artifact; update the registries instead of editing it by hand.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p diaggen_core --bin generate_dsl_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If the output file cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use diaggen_core::lang::classes::{DIAG_CLASSES, SEVERITIES, SFINAE_RESPONSES};
use diaggen_core::lang::modifiers::{self, MODIFIERS};

fn main() {
    let root = workspace_root();

    let out_dir = root.join("docs/reference");
    fs::create_dir_all(&out_dir).expect("create docs/reference/");

    write_reference(&out_dir.join("diagnostic-text.md"));
}

fn write_reference(path: &Path) {
    let mut out = String::new();
    out.push_str("# Diagnostic text reference\n\n");
    out.push_str("!!! warning \"Generated file\"\n");
    out.push_str("    Regenerate with: `cargo run -p diaggen_core --bin generate_dsl_reference`\n\n");

    render_modifiers_section(&mut out);
    render_vocabulary_section(&mut out, "## Diagnostic classes", DIAG_CLASSES.iter().map(|(c, s)| (format!("{c:?}"), *s)));
    render_vocabulary_section(&mut out, "## Default severities", SEVERITIES.iter().map(|(v, s)| (format!("{v:?}"), *s)));
    render_vocabulary_section(
        &mut out,
        "## SFINAE responses",
        SFINAE_RESPONSES.iter().map(|(r, s)| (format!("{r:?}"), *s)),
    );

    while out.ends_with("\n\n") {
        out.pop();
    }
    fs::write(path, out).expect("write diagnostic-text.md");
}

fn render_modifiers_section(out: &mut String) {
    out.push_str("## Modifiers\n\n");
    out.push_str("| Id | Spelling | Printed as | Shape | Description |\n");
    out.push_str("|---|---|---|---|---|\n");

    for m in MODIFIERS {
        let spelling = if m.spelling.is_empty() {
            "`%N`".to_string()
        } else {
            format!("`%{}`", m.spelling)
        };
        let printed = if m.printed == modifiers::as_str(m.id) {
            String::new()
        } else {
            format!("`%{}`", m.printed)
        };
        out.push_str(&format!(
            "| {:?} | {} | {} | {:?} | {} |\n",
            m.id, spelling, printed, m.shape, m.description
        ));
    }
    out.push('\n');
}

fn render_vocabulary_section(out: &mut String, heading: &str, rows: impl Iterator<Item = (String, &'static str)>) {
    out.push_str(heading);
    out.push_str("\n\n| Id | Spelling |\n|---|---|\n");
    for (id, spelling) in rows {
        out.push_str(&format!("| {id} | `{spelling}` |\n"));
    }
    out.push('\n');
}

fn workspace_root() -> PathBuf {
    // crates/diaggen_core -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/diaggen_core)")
}
