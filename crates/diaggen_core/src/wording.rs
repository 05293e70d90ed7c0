//! Wording rules for diagnostic summaries.
//!
//! Diagnostics are rendered mid-sentence (`file.c:1:2: warning: <text>`), so their text must not start with a
//! capital letter and must not end in sentence punctuation. The check works on the raw summary string, before
//! any parsing: a leading or trailing `%select{...}N` is looked through so each alternative is checked on its own.
//!
//! ## Examples
//! ```rust
//! use diaggen_core::wording::{verify_wording, WordingIssue};
//!
//! assert!(verify_wording("unused variable %0").is_empty());
//! assert_eq!(
//!     verify_wording("Unused variable."),
//!     vec![
//!         WordingIssue::StartsWithCapital("Unused".to_string()),
//!         WordingIssue::EndsWithPunctuation('.'),
//!     ]
//! );
//! ```

use std::fmt;

/// A single wording violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordingIssue {
    /// The first word (carried here) starts with a capital letter and is not exempt.
    StartsWithCapital(String),
    /// The text ends with the carried punctuation character.
    EndsWithPunctuation(char),
}

impl fmt::Display for WordingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordingIssue::StartsWithCapital(word) => write!(
                f,
                "Diagnostics should not start with a capital letter; '{}' is invalid",
                word
            ),
            WordingIssue::EndsWithPunctuation(ch) => {
                write!(f, "Diagnostics should not end with punctuation; '{}' is invalid", ch)
            }
        }
    }
}

/// Proper nouns and product names allowed to start a diagnostic.
const EXEMPT_WORDS: &[&str] = &[
    "AddressSanitizer",
    "CFString",
    "Clang",
    "Fuchsia",
    "GNUstep",
    "IBOutletCollection",
    "Microsoft",
    "Neon",
    "Objective",
    "OpenACC",
    "OpenCL",
    "OpenMP",
    "Pascal",
    "Swift",
    "Unicode",
    "Vulkan",
    "WebAssembly",
];

const SELECT_OPEN: &str = "%select{";

/// Check a diagnostic summary and return every violation found, in discovery order.
pub fn verify_wording(text: &str) -> Vec<WordingIssue> {
    let mut issues = Vec::new();
    let bytes = text.as_bytes();

    if text.starts_with(SELECT_OPEN) {
        let Some(close) = matching_close(bytes, SELECT_OPEN.len()) else {
            return issues;
        };

        let mut check_second_word = false;
        for piece in text[SELECT_OPEN.len()..close].split('|') {
            if piece.is_empty() {
                check_second_word = true;
            } else {
                diagnose_start(piece, &mut issues);
            }
        }

        if check_second_word {
            // Skip the closing brace and the single-digit index after it.
            let after = text.get(close + 2..).unwrap_or("").trim_start();
            diagnose_start(after, &mut issues);
        }
    } else {
        diagnose_start(text, &mut issues);
    }

    let mut still_need_end = true;
    let len = bytes.len();
    if len >= 2 && bytes[len - 1].is_ascii_digit() && bytes[len - 2] == b'}' {
        let Some(open) = matching_open(bytes) else {
            return issues;
        };

        let is_select = text[..open].ends_with("select");
        if is_select {
            still_need_end = false;
            for piece in text[open + 1..len - 2].split('|') {
                if !piece.is_empty() {
                    diagnose_end(piece, &mut issues);
                }
            }
        }
    }

    if still_need_end {
        diagnose_end(text, &mut issues);
    }

    issues
}

/// Forward balanced scan starting inside an already-open brace; returns the index of the closing `}`.
fn matching_close(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return Some(i);
        }
    }
    None
}

/// Backward balanced scan from just before a trailing `}N`; returns the index of the matching `{`.
///
/// Index 0 is never inspected, so a text that *is* `{...}N` has no match.
fn matching_open(bytes: &[u8]) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = bytes.len().checked_sub(3)?;
    while i > 0 {
        match bytes[i] {
            b'}' => depth += 1,
            b'{' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return Some(i);
        }
        i -= 1;
    }
    None
}

fn diagnose_start(text: &str, issues: &mut Vec<WordingIssue>) {
    let end = text.find([' ', '-', ',', '}']).unwrap_or(text.len());
    let first = &text[..end];
    if !is_exempt_at_start(first) {
        issues.push(WordingIssue::StartsWithCapital(first.to_string()));
    }
}

fn diagnose_end(text: &str, issues: &mut Vec<WordingIssue>) {
    match text.chars().last() {
        Some(last @ ('.' | '!')) => issues.push(WordingIssue::EndsWithPunctuation(last)),
        // Everything else, including "?" for "; did you mean?", is allowed.
        _ => {}
    }
}

/// Expects `text` to already be split at the first word boundary.
fn is_exempt_at_start(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return true;
    };
    if first.is_ascii_lowercase() || !first.is_ascii_alphanumeric() {
        return true;
    }

    // Acronyms such as ISO, C23, C++14 or OBJECT_MODE, but not a lone capital other than "C".
    if text
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '+' || c == '_')
    {
        return text.len() > 1 || first == 'C';
    }

    EXEMPT_WORDS.contains(&text) || text.starts_with("NSInvocation")
}
