use std::fs::{self, File};

use chrono::NaiveDate;
use rulesraker::parser::Diagnostic;
use rulesraker::{parse, Ruleset, SectionType};

fn fixture(name: &str) -> Ruleset {
    let file = File::open(format!("tests/fixtures/{}.txt", name)).unwrap();
    parse(file).unwrap()
}

#[test]
fn comprules_fixture() {
    let rules = fixture("comprules");
    assert_eq!(rules.effective_date, NaiveDate::from_ymd_opt(2023, 11, 10).unwrap());
    assert_eq!(rules.rules.len(), 13);
    assert_eq!(rules.sections_of_type(SectionType::Part).count(), 2);
    assert_eq!(rules.sections_of_type(SectionType::Chapter).count(), 3);
    assert_eq!(rules.sections_of_type(SectionType::Rule).count(), 4);
    assert_eq!(rules.sections_of_type(SectionType::SubRule).count(), 4);
    assert_eq!(rules.glossary.len(), 4);
    assert_eq!(rules.credits.len(), 2);
}

#[test]
fn document_order_preserved() {
    let rules = fixture("comprules");
    let numbers: Vec<&str> = rules.rules.iter().map(|s| s.number.as_str()).collect();
    assert_eq!(
        numbers,
        vec![
            "1.", "100.", "100.1", "100.1a", "100.1b", "100.2", "101.", "101.1", "7.", "702.",
            "702.9", "702.9a", "702.9b",
        ]
    );
    assert!(rules.rules.iter().all(|s| s.id == s.number));
}

#[test]
fn examples_attached() {
    let rules = fixture("comprules");
    let flying = rules.section("702.9b").unwrap();
    assert_eq!(flying.body.len(), 1);
    assert_eq!(
        flying.examples,
        vec![
            "Two 2/2 fliers can block each other.",
            "A 1/1 with reach can block a flier.",
        ]
    );
    assert!(rules.section("702.9a").unwrap().examples.is_empty());
}

#[test]
fn glossary_terms() {
    let rules = fixture("comprules");
    let ids: Vec<&str> = rules.glossary.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["abandon", "active-player-nonactive-player-order", "flying", "substance"]
    );
    let substance = rules.glossary_item("substance").unwrap();
    assert_eq!(substance.key_text, "Substance (Obsolete)");
    assert_eq!(substance.key_parts, vec!["Substance"]);
}

#[test]
fn crlf_fixture() {
    let rules = fixture("crlf");
    assert_eq!(rules.effective_date, NaiveDate::from_ymd_opt(2020, 2, 7).unwrap());
    assert_eq!(rules.rules.len(), 1);
    assert_eq!(rules.glossary[0].body, "A keyword ability.");
    assert_eq!(rules.credits, vec!["Richard Garfield"]);
}

#[test]
fn malformed_paragraphs_all_reported() {
    let text = fs::read_to_string("tests/fixtures/comprules.txt").unwrap();
    let broken = text
        .replace("100.2. To play", "To play")
        .replace("702.9a Flying is an evasion ability.", "702.9a Flying is an evasion ability.\nExample: x\nstray text");
    let err = parse(broken.as_bytes()).unwrap_err();
    assert_eq!(err.diagnostics.len(), 2);
    assert!(matches!(err.diagnostics[0], Diagnostic::NumberParse(_)));
    assert!(matches!(err.diagnostics[1], Diagnostic::BodyAfterExample(_)));
    let message = err.to_string();
    assert!(message.contains("To play, each player"));
    assert!(message.contains("stray text"));
}

#[test]
fn glossary_failure_reported_after_clean_rules() {
    let text = fs::read_to_string("tests/fixtures/comprules.txt").unwrap();
    let broken = text.replace("Flying\nA keyword ability that", "Flying\n\nA keyword ability that");
    let err = parse(broken.as_bytes()).unwrap_err();
    assert!(err
        .diagnostics
        .iter()
        .all(|d| matches!(d, Diagnostic::GlossaryMissingBody(_))));
    assert!(err.to_string().starts_with("glossary item with no body: \"Flying\""));
}

#[test]
fn json_export() {
    let rules = fixture("comprules");
    let json = serde_json::to_string_pretty(&rules).unwrap();
    let back: Ruleset = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rules);
    assert!(json.contains("\"EffectiveDate\": \"2023-11-10\""));
    assert!(json.contains("\"Type\": \"SubRule\""));
}
