use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{Checked, Diagnostic};

// ASCII-only classes: other scripts' digits are not rule numbers.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)(\.(([0-9]+)([0-9A-Za-z_]+)?))?\.?").unwrap());
static PART_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]\.$").unwrap());
static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}\.$").unwrap());
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}\.[0-9]+$").unwrap());
static SUB_RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}\.[0-9]+[0-9A-Za-z_]+$").unwrap());

const EXAMPLE_PREFIX: &str = "Example:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Part,
    Chapter,
    Rule,
    SubRule,
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SectionType::Part => "Part",
            SectionType::Chapter => "Chapter",
            SectionType::Rule => "Rule",
            SectionType::SubRule => "SubRule",
        })
    }
}

/// One numbered entry of the rules: a part ("1."), a chapter ("100."), a
/// rule ("100.1") or a subrule ("100.1a").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Number")]
    pub number: String,
    #[serde(rename = "Type")]
    pub kind: SectionType,
    #[serde(rename = "Body")]
    pub body: Vec<String>,
    #[serde(rename = "Examples", default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Classify a canonical number purely by its shape.
pub fn section_type(number: &str) -> Option<SectionType> {
    if PART_RE.is_match(number) {
        Some(SectionType::Part)
    } else if CHAPTER_RE.is_match(number) {
        Some(SectionType::Chapter)
    } else if RULE_RE.is_match(number) {
        Some(SectionType::Rule)
    } else if SUB_RULE_RE.is_match(number) {
        Some(SectionType::SubRule)
    } else {
        None
    }
}

/// Split the leading number off a rule paragraph.
/// Returns `(canonical number, remaining text)`.
pub fn parse_number(paragraph: &str) -> Option<(String, &str)> {
    let caps = NUMBER_RE.captures(paragraph)?;
    let rest = &paragraph[caps[0].len()..];

    let major = &caps[1];
    let number = match (caps.get(4), caps.get(5)) {
        (Some(minor), Some(letter)) => format!("{}.{}{}", major, minor.as_str(), letter.as_str()),
        (Some(minor), None) => format!("{}.{}", major, minor.as_str()),
        _ => format!("{}.", major),
    };

    Some((number, rest))
}

fn parse_rule(paragraph: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Section> {
    let Some((number, content)) = parse_number(paragraph) else {
        diagnostics.push(Diagnostic::NumberParse(paragraph.to_string()));
        return None;
    };

    let Some(kind) = section_type(&number) else {
        diagnostics.push(Diagnostic::NumberShape(number));
        return None;
    };

    let mut body = Vec::new();
    let mut examples = Vec::new();
    for line in content.split('\n').map(str::trim) {
        if let Some(example) = line.strip_prefix(EXAMPLE_PREFIX) {
            examples.push(example.trim().to_string());
        } else if !examples.is_empty() {
            diagnostics.push(Diagnostic::BodyAfterExample(paragraph.to_string()));
        } else {
            body.push(line.to_string());
        }
    }

    if body.is_empty() {
        diagnostics.push(Diagnostic::EmptyBody(paragraph.to_string()));
        return None;
    }

    if matches!(kind, SectionType::Part | SectionType::Chapter) && body.len() != 1 {
        diagnostics.push(Diagnostic::BodyLength {
            kind,
            text: paragraph.to_string(),
        });
        return None;
    }

    Some(Section {
        id: number.clone(),
        number,
        kind,
        body,
        examples,
    })
}

/// Parse every rule paragraph, collecting problems from all of them.
pub fn parse_rules(paragraphs: &[String]) -> Checked<Vec<Section>> {
    let mut diagnostics = Vec::new();
    let sections = paragraphs
        .iter()
        .filter_map(|p| parse_rule(p, &mut diagnostics))
        .collect();
    Checked::new(sections, diagnostics)
}
