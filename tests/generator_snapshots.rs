//! Golden snapshot tests for the generated artifacts
//!
//! Every backend runs over `tests/fixtures/sema.json`, a small database with a subgroup, an inferred
//! `-Wpedantic` member, a remark group, a text substitution and two compatibility ids. The snapshots pin the
//! exact text a compiler build would include.
//!
//! Review changes: `cargo insta review`

use diaggen::{Action, GenConfig, RecordDb, generate};

fn fixture() -> RecordDb {
    RecordDb::from_path(std::path::Path::new("tests/fixtures/sema.json")).expect("fixture should load")
}

/// Generate without the banner so snapshots do not change with the crate version.
fn render(action: Action, config: GenConfig) -> String {
    let output = generate(action, &fixture(), &config.with_header(false)).expect("generation failed");
    assert!(output.reports.is_empty(), "unexpected reports:\n{}", output.reports);
    output.text
}

#[test]
fn test_defs_snapshot() {
    insta::assert_snapshot!(render(Action::Defs, GenConfig::new()), @r##"
DIAG(err_bad_thing, CLASS_ERROR, (unsigned)diag::Severity::Error, "bad \"thing\"", 0, SFINAE_SubstitutionFailure, false, false, false, false, 1)
DIAG(ext_empty_decl, CLASS_EXTENSION, (unsigned)diag::Severity::Ignored, "declaration does not declare anything", 2, SFINAE_Suppress, false, false, false, false, 0)
DIAG(ext_gnu_stmt, CLASS_EXTENSION, (unsigned)diag::Severity::Ignored, "use of GNU statement expression", 0, SFINAE_Suppress, false, false, false, false, 0)
DIAG(remark_pass_done, CLASS_REMARK, (unsigned)diag::Severity::Ignored, "%0", 1, SFINAE_Suppress, false, true, false, false, 2)
DIAG(warn_unused_var, CLASS_WARNING, (unsigned)diag::Severity::Warning, "unused %select{function|variable}1 %0", 4, SFINAE_Suppress, false, false, false, false, 1)
"##);
}

#[test]
fn test_defs_for_one_component_snapshot() {
    insta::assert_snapshot!(render(Action::Defs, GenConfig::new().with_component("Frontend")), @r##"
#ifdef FRONTENDSTART
__FRONTENDSTART = DIAG_START_FRONTEND,
#undef FRONTENDSTART
#endif

DIAG(remark_pass_done, CLASS_REMARK, (unsigned)diag::Severity::Ignored, "%0", 1, SFINAE_Suppress, false, true, false, false, 2)
"##);
}

#[test]
fn test_groups_snapshot() {
    insta::assert_snapshot!(render(Action::Groups, GenConfig::new()), @r##"
#ifdef GET_DIAG_ARRAYS
static const int16_t DiagArrays[] = {
  /* Empty */ -1,
  /* DiagArray0 */ diag::ext_gnu_stmt, -1,
  /* DiagArray1 */ diag::remark_pass_done, -1,
  /* DiagArray2 */ diag::ext_empty_decl, -1,
  /* DiagArray4 */ diag::warn_unused_var, -1,
};

static const int16_t DiagSubGroups[] = {
  /* Empty */ -1,
  /* DiagSubGroup2 */ 0, -1,
  /* DiagSubGroup3 */ 4, -1,
};

static constexpr char DiagGroupNamesStorage[] =
  "\0"
  "gnu-ext\0"
  "pass\0"
  "pedantic\0"
  "unused\0"
  "unused-variable\0";

static constexpr llvm::StringTable DiagGroupNames =
  DiagGroupNamesStorage;

#endif // GET_DIAG_ARRAYS


#ifdef DIAG_ENTRY
DIAG_ENTRY(GNUExt /* gnu-ext */, 1, /* DiagArray0 */ 1, 0, R"()")
DIAG_ENTRY(PassRemarks /* pass */, 9, /* DiagArray1 */ 3, 0, R"()")
DIAG_ENTRY(Pedantic /* pedantic */, 14, /* DiagArray2 */ 5, /* DiagSubGroup2 */ 1, R"()")
DIAG_ENTRY(Unused /* unused */, 23, 0, /* DiagSubGroup3 */ 3, R"()")
DIAG_ENTRY(UnusedVariable /* unused-variable */, 30, /* DiagArray4 */ 7, 0, R"(Warn about variables that are declared but never read.)")
#endif // DIAG_ENTRY


#ifdef GET_CATEGORY_TABLE
CATEGORY("", DiagCat_None)
CATEGORY("Semantic Issue", DiagCat_Semantic_Issue)
CATEGORY("Optimization", DiagCat_Optimization)
#endif // GET_CATEGORY_TABLE
"##);
}

#[test]
fn test_docs_snapshot() {
    insta::assert_snapshot!(render(Action::Docs, GenConfig::new()), @r##"
Diagnostic flags
================
-Wgnu-ext
---------
**Diagnostic text:**

+----------------------------------------------------------------------+
|:warning:`warning:` |nbsp| :diagtext:`use of GNU statement expression`|
+----------------------------------------------------------------------+


-Rpass
------
**Diagnostic text:**

The text of this diagnostic is not controlled by Clang.


-Wpedantic
----------
Also controls `-Wgnu-ext`_.

**Diagnostic text:**

+----------------------------------------------------------------------------+
|:warning:`warning:` |nbsp| :diagtext:`declaration does not declare anything`|
+----------------------------------------------------------------------------+


-Wunused
--------
Synonym for `-Wunused-variable`_.


-Wunused-variable
-----------------
This diagnostic is enabled by default.

**Diagnostic text:**

+-----------------------------------------------------+----------------------+------------------------+
|:warning:`warning:` |nbsp| :diagtext:`unused` |nbsp| |+--------------------+| |nbsp| :placeholder:`A`|
|                                                     ||:diagtext:`function`||                        |
|                                                     |+--------------------+|                        |
|                                                     ||:diagtext:`variable`||                        |
|                                                     |+--------------------+|                        |
+-----------------------------------------------------+----------------------+------------------------+


  Warn about variables that are declared but never read.
"##);
}

#[test]
fn test_compat_ids_snapshot() {
    insta::assert_snapshot!(render(Action::CompatIds, GenConfig::new()), @r##"
DIAG_COMPAT_IDS_BEGIN()
DIAG_COMPAT_ID(0,constexpr_body,14,warn_cxx11_body,ext_cxx11_body)
DIAG_COMPAT_IDS_END()
DIAG_COMPAT_IDS_BEGIN()
DIAG_COMPAT_ID(1,raw_string,11,warn_raw,ext_raw)
DIAG_COMPAT_IDS_END()
"##);
}

#[test]
fn test_index_name_snapshot() {
    insta::assert_snapshot!(render(Action::IndexName, GenConfig::new()), @r##"
DIAG_NAME_INDEX(err_bad_thing)
DIAG_NAME_INDEX(ext_empty_decl)
DIAG_NAME_INDEX(ext_gnu_stmt)
DIAG_NAME_INDEX(remark_pass_done)
DIAG_NAME_INDEX(warn_unused_var)
"##);
}

#[test]
fn test_banner_tracks_crate_version() {
    let output = generate(Action::IndexName, &fixture(), &GenConfig::new()).expect("generation failed");
    let banner = format!("/* Generated by diaggen {}. Do not edit. */\n\n", diaggen::version::DIAGGEN_VERSION);
    assert!(output.text.starts_with(&banner));
}
