//! Parser unit tests.
//!
//! These cover each directive's shape and the first-error-wins failure modes.

use super::*;

fn children(piece: Piece) -> Vec<Piece> {
    match piece {
        Piece::Multi(pieces) => pieces,
        other => panic!("expected Multi root, got {other:?}"),
    }
}

#[test]
fn test_plain_text_is_single_run() {
    assert_eq!(children(parse("expected ';'").unwrap()), vec![Piece::text("expected ';'")]);
    assert!(children(parse("").unwrap()).is_empty());
}

#[test]
fn test_escapes_stay_in_text() {
    assert_eq!(children(parse("100%% sure").unwrap()), vec![Piece::text("100%% sure")]);
    assert_eq!(
        children(parse("%select{a%|b|c}0").unwrap()),
        vec![Piece::Select(SelectPiece {
            kind: ModifierKind::Select,
            options: vec![Piece::Multi(vec![Piece::text("a%|b")]), Piece::Multi(vec![Piece::text("c")])],
            index: 0,
        })]
    );
}

#[test]
fn test_placeholders() {
    assert_eq!(
        children(parse("%0 and %ordinal1 and %q12").unwrap()),
        vec![
            Piece::placeholder(ModifierKind::Placeholder, 0),
            Piece::text(" and "),
            Piece::placeholder(ModifierKind::Ordinal, 1),
            Piece::text(" and "),
            Piece::placeholder(ModifierKind::Q, 12),
        ]
    );
}

#[test]
fn test_select_with_nested_placeholder() {
    let pieces = children(parse("this %select{is|is not %1}0 a test").unwrap());
    assert_eq!(pieces.len(), 3);
    assert_eq!(
        pieces[1],
        Piece::Select(SelectPiece {
            kind: ModifierKind::Select,
            options: vec![
                Piece::Multi(vec![Piece::text("is")]),
                Piece::Multi(vec![
                    Piece::text("is not "),
                    Piece::placeholder(ModifierKind::Placeholder, 1)
                ]),
            ],
            index: 0,
        })
    );
}

#[test]
fn test_empty_select_option() {
    let pieces = children(parse("%select{|x}3").unwrap());
    assert_eq!(
        pieces,
        vec![Piece::Select(SelectPiece {
            kind: ModifierKind::Select,
            options: vec![Piece::Multi(vec![]), Piece::Multi(vec![Piece::text("x")])],
            index: 3,
        })]
    );
}

#[test]
fn test_s_shorthand_is_two_option_select() {
    let pieces = children(parse("argument%s0").unwrap());
    assert_eq!(
        pieces[1],
        Piece::Select(SelectPiece {
            kind: ModifierKind::S,
            options: vec![Piece::text_with_role("", ""), Piece::text("s")],
            index: 0,
        })
    );
}

#[test]
fn test_plural_prefixes_kept_verbatim() {
    let pieces = children(parse("%plural{1:one thing|:%0 things}0").unwrap());
    assert_eq!(
        pieces,
        vec![Piece::Plural(PluralPiece {
            options: vec![
                PluralOption {
                    prefix: "1:".to_string(),
                    body: Piece::Multi(vec![Piece::text("one thing")]),
                },
                PluralOption {
                    prefix: ":".to_string(),
                    body: Piece::Multi(vec![
                        Piece::placeholder(ModifierKind::Placeholder, 0),
                        Piece::text(" things"),
                    ]),
                },
            ],
            index: 0,
        })]
    );
}

#[test]
fn test_enum_select_enumerators() {
    let pieces = children(parse("%enum_select<TagKind>{%Struct{struct}|%Class{class}|union}1").unwrap());
    let Piece::EnumSelect(select) = &pieces[0] else {
        panic!("expected EnumSelect, got {:?}", pieces[0]);
    };
    assert_eq!(select.enum_name, "TagKind");
    assert_eq!(select.index, 1);
    let names: Vec<Option<&str>> = select.options.iter().map(|o| o.enumerator.as_deref()).collect();
    assert_eq!(names, vec![Some("Struct"), Some("Class"), None]);
    assert_eq!(select.options[2].body, Piece::Multi(vec![Piece::text("union")]));
}

#[test]
fn test_enum_select_braced_option_without_name() {
    let pieces = children(parse("%enum_select<E>{{a}|%B{b}}0").unwrap());
    let Piece::EnumSelect(select) = &pieces[0] else {
        panic!("expected EnumSelect");
    };
    assert_eq!(select.options[0].enumerator, None);
    assert_eq!(select.options[0].body, Piece::Multi(vec![Piece::text("a")]));
}

#[test]
fn test_substitution_with_modifiers() {
    assert_eq!(
        children(parse("%sub{select_kind}2,0").unwrap()),
        vec![Piece::Substitution(SubstitutionPiece {
            name: "select_kind".to_string(),
            modifiers: vec![2, 0],
        })]
    );
    assert_eq!(
        children(parse("%sub{plain} tail").unwrap()),
        vec![
            Piece::Substitution(SubstitutionPiece {
                name: "plain".to_string(),
                modifiers: vec![],
            }),
            Piece::text(" tail"),
        ]
    );
}

#[test]
fn test_diff_parts_and_indexes() {
    let pieces = children(parse("%diff{from $ to $|types differ}1,2").unwrap());
    let Piece::Diff(diff) = &pieces[0] else {
        panic!("expected Diff");
    };
    assert_eq!(diff.indexes, [1, 2]);
    assert_eq!(diff.parts[0], Piece::Multi(vec![Piece::text("from ")]));
    assert_eq!(diff.parts[1], Piece::Multi(vec![Piece::text(" to ")]));
    assert_eq!(diff.parts[2], Piece::Multi(vec![]));
    assert_eq!(diff.parts[3], Piece::Multi(vec![Piece::text("types differ")]));
}

#[test]
fn test_diff_dollar_after_second_separator_is_text() {
    let pieces = children(parse("%diff{a $ b $ c$d|e}0,1").unwrap());
    let Piece::Diff(diff) = &pieces[0] else {
        panic!("expected Diff");
    };
    assert_eq!(diff.parts[2], Piece::Multi(vec![Piece::text(" c$d")]));
    assert_eq!(diff.parts[3], Piece::Multi(vec![Piece::text("e")]));
}

#[test]
fn test_unknown_modifier() {
    assert_eq!(
        parse("%bogus0").unwrap_err(),
        TextErrorKind::UnknownModifier("bogus".to_string())
    );
}

#[test]
fn test_angle_outside_enum_select() {
    assert_eq!(
        parse("%select<E>{a}0").unwrap_err(),
        TextErrorKind::AngleOutsideEnumSelect("select".to_string())
    );
}

#[test]
fn test_missing_index_and_overflow() {
    assert_eq!(parse("trailing %").unwrap_err(), TextErrorKind::ExpectedModifierIndex);
    assert_eq!(parse("%select{a|b}").unwrap_err(), TextErrorKind::ExpectedModifierIndex);
    assert_eq!(parse("%sub{x}1,").unwrap_err(), TextErrorKind::ExpectedModifierIndex);
    assert!(matches!(
        parse("%99999999999999999999999").unwrap_err(),
        TextErrorKind::ModifierIndexOverflow(_)
    ));
}

#[test]
fn test_unterminated_constructs() {
    assert_eq!(
        parse("%select{a|b").unwrap_err(),
        TextErrorKind::Unterminated("select".to_string())
    );
    assert_eq!(
        parse("%diff{a$b$c|d").unwrap_err(),
        TextErrorKind::Unterminated("diff".to_string())
    );
    assert_eq!(
        parse("%enum_select<E>{%A{a}").unwrap_err(),
        TextErrorKind::Unterminated("enum_select".to_string())
    );
}

#[test]
fn test_missing_delimiters() {
    assert_eq!(
        parse("%select0").unwrap_err(),
        TextErrorKind::ExpectedDelimiter {
            expected: '{',
            modifier: "select".to_string()
        }
    );
    assert_eq!(
        parse("%diff{a|b}0,1").unwrap_err(),
        TextErrorKind::ExpectedDelimiter {
            expected: '$',
            modifier: "diff".to_string()
        }
    );
    assert_eq!(
        parse("%enum_select{a}0").unwrap_err(),
        TextErrorKind::ExpectedAfter {
            expected: '<',
            modifier: "enum_select".to_string()
        }
    );
    assert_eq!(parse("%plural{one}0").unwrap_err(), TextErrorKind::ExpectedPluralColon);
    assert_eq!(parse("%sub{}0").unwrap_err(), TextErrorKind::EmptySubstitutionName);
}
