use std::collections::HashMap;

use diaggen_core::lang::classes::{DIAG_CLASSES, DiagClass, SEVERITIES, SFINAE_RESPONSES, Severity, SfinaeResponse};
use diaggen_core::lang::modifiers::{self, ModifierKind, ModifierShape};

#[test]
fn modifier_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, ModifierKind> = HashMap::new();

    for info in modifiers::MODIFIERS {
        assert_eq!(
            modifiers::from_str(info.spelling),
            Some(info.id),
            "modifier spelling not resolvable: {:?}",
            info.spelling
        );
        assert_eq!(modifiers::as_str(info.id), info.spelling, "as_str mismatch for {:?}", info.id);

        if let Some(prev) = seen.insert(info.spelling, info.id) {
            panic!("duplicate modifier spelling {:?}: {:?} and {:?}", info.spelling, prev, info.id);
        }
    }
}

#[test]
fn printed_names_are_parseable() {
    // Whatever the definition printer emits must be accepted by the parser again.
    for info in modifiers::MODIFIERS {
        assert!(
            modifiers::from_str(info.printed).is_some(),
            "printed spelling {:?} of {:?} is not a modifier",
            info.printed,
            info.id
        );
    }
}

#[test]
fn index_shaped_modifiers_take_a_single_argument() {
    let index_shaped: Vec<ModifierKind> = modifiers::MODIFIERS
        .iter()
        .filter(|m| m.shape == ModifierShape::Index)
        .map(|m| m.id)
        .collect();
    assert!(index_shaped.contains(&ModifierKind::Placeholder));
    assert!(index_shaped.contains(&ModifierKind::S));
    assert!(!index_shaped.contains(&ModifierKind::Select));
}

#[test]
fn vocabulary_tables_round_trip() {
    for (class, spelling) in DIAG_CLASSES {
        assert_eq!(DiagClass::parse(spelling), Some(*class));
    }
    for (severity, spelling) in SEVERITIES {
        assert_eq!(Severity::parse(spelling), Some(*severity));
        assert_eq!(severity.as_str(), *spelling);
    }
    for (response, spelling) in SFINAE_RESPONSES {
        assert_eq!(SfinaeResponse::parse(spelling), Some(*response));
        assert_eq!(response.as_str(), *spelling);
    }
}
