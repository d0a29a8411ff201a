use std::collections::HashMap;

use entrysynth_core::lang::diagnostics;
use entrysynth_core::lang::members;
use entrysynth_core::lang::synthetic;

#[test]
fn well_known_member_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, members::WellKnownMemberId> = HashMap::new();

    for info in members::WELL_KNOWN_MEMBERS {
        assert_eq!(
            members::from_str(info.canonical),
            Some(info.id),
            "member canonical spelling not resolvable: {}",
            info.canonical
        );
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate member spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn synthetic_names_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, synthetic::SyntheticNameId> = HashMap::new();

    for info in synthetic::SYNTHETIC_NAMES {
        assert_eq!(synthetic::as_str(info.id), info.canonical);
        assert_eq!(synthetic::from_str(info.canonical), Some(info.id));
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate synthetic name {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn diagnostic_codes_unique_and_templates_match_arity() {
    let mut seen: HashMap<&'static str, diagnostics::DiagnosticCodeId> = HashMap::new();

    for info in diagnostics::DIAGNOSTIC_CODES {
        if let Some(prev) = seen.insert(info.code, info.item.id) {
            panic!("duplicate diagnostic code {:?}: {:?} and {:?}", info.code, prev, info.item.id);
        }
        for i in 0..info.arity {
            assert!(
                info.template.contains(&format!("{{{i}}}")),
                "template for {:?} is missing placeholder {{{i}}}",
                info.item.id
            );
        }
        assert!(
            !info.template.contains(&format!("{{{}}}", info.arity)),
            "template for {:?} has more placeholders than its arity",
            info.item.id
        );
    }
}
