//! Property-based tests for the diagnostic text frontend.
//!
//! Texts are generated from a small grammar of well-formed constructs, so every generated string must parse.

use diaggen_text::parser;
use diaggen_text::printers::{DefinitionPrinter, DocumentationPrinter};
use diaggen_text::substitution::SubstitutionTable;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Plain text without `%`, delimiters or digits (a digit right after `%0` would extend the index).
fn text_run() -> impl Strategy<Value = String> {
    "[a-z ,.'()]{1,8}"
}

fn index() -> impl Strategy<Value = usize> {
    0usize..10
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        text_run(),
        index().prop_map(|i| format!("%{i}")),
        (
            prop_oneof![Just("ordinal"), Just("human"), Just("q"), Just("s"), Just("quoted")],
            index()
        )
            .prop_map(|(modifier, i)| format!("%{modifier}{i}")),
    ]
}

fn plural_prefix() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("1"), Just("0"), Just("[2,4]")]
}

/// A piece of text: a leaf or a nested construct whose option bodies are sequences.
fn construct() -> impl Strategy<Value = String> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        let sequence = prop::collection::vec(inner, 0..4).prop_map(|parts| parts.concat());
        prop_oneof![
            (prop::collection::vec(sequence.clone(), 1..4), index())
                .prop_map(|(options, i)| format!("%select{{{}}}{i}", options.join("|"))),
            (prop::collection::vec((plural_prefix(), sequence.clone()), 1..4), index()).prop_map(|(options, i)| {
                let options: Vec<String> = options
                    .into_iter()
                    .map(|(prefix, body)| format!("{prefix}:{body}"))
                    .collect();
                format!("%plural{{{}}}{i}", options.join("|"))
            }),
            (
                sequence.clone(),
                sequence.clone(),
                sequence.clone(),
                sequence,
                index(),
                index()
            )
                .prop_map(|(a, b, c, d, i, j)| format!("%diff{{{a}${b}${c}|{d}}}{i},{j}")),
        ]
    })
}

fn diagnostic_text() -> impl Strategy<Value = String> {
    prop::collection::vec(construct(), 0..5).prop_map(|parts| parts.concat())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Property: printing a parsed text without substitutions gives the text back.
    #[test]
    fn definition_round_trips(text in diagnostic_text()) {
        let table = SubstitutionTable::new();
        let root = parser::parse(&text).expect("generated text must parse");
        let printed = DefinitionPrinter::new(&table).print(&root).expect("print");
        prop_assert_eq!(printed, text);
    }

    /// Property: documentation tables are rectangular.
    #[test]
    fn documentation_lines_have_equal_width(text in diagnostic_text()) {
        let table = SubstitutionTable::new();
        let root = parser::parse(&text).expect("generated text must parse");
        let lines = DocumentationPrinter::new(&table).print(&root).expect("print");
        prop_assert!(!lines.is_empty());
        let width = lines[0].chars().count();
        for line in &lines {
            prop_assert_eq!(line.chars().count(), width, "ragged table for {:?}: {:#?}", text, lines);
        }
    }

    /// Property: a text used through an identity substitution prints the same as inline.
    #[test]
    fn identity_substitution_is_transparent(text in diagnostic_text()) {
        let mut table = SubstitutionTable::new();
        table.insert("wrapped", parser::parse(&text).expect("generated text must parse"));
        let identity: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let root = parser::parse(&format!("%sub{{wrapped}}{}", identity.join(","))).expect("parse use site");
        let printed = DefinitionPrinter::new(&table).print(&root).expect("print");
        prop_assert_eq!(printed, text);
    }
}
