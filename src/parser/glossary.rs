use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{Checked, Diagnostic};

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// The one term whose own name contains a comma.
const UNSPLIT_HEADING: &str = "Active Player, Nonactive Player Order";
const OBSOLETE_MARKER: &str = "(Obsolete)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "KeyText")]
    pub key_text: String,
    #[serde(rename = "KeyParts")]
    pub key_parts: Vec<String>,
    #[serde(rename = "Body")]
    pub body: String,
}

/// Anchor-safe slug: lower-case, spaces to hyphens, then only `0-9a-z.-`.
/// Collisions between terms are possible and left alone.
pub fn glossary_id(alias: &str) -> String {
    let lowered = alias.trim().to_lowercase();
    SPACES_RE
        .replace_all(&lowered, "-")
        .chars()
        .filter(|c| matches!(c, '0'..='9' | 'a'..='z' | '.' | '-'))
        .collect()
}

/// Aliases named by a glossary heading, "(Obsolete)" markers removed.
pub fn key_parts(heading: &str) -> Vec<String> {
    if heading == UNSPLIT_HEADING {
        return vec![heading.to_string()];
    }
    heading
        .split(',')
        .map(|part| part.replace(OBSOLETE_MARKER, "").trim().to_string())
        .collect()
}

fn parse_item(paragraph: &str) -> Result<GlossaryItem, Diagnostic> {
    let (heading, body) = paragraph
        .split_once('\n')
        .ok_or_else(|| Diagnostic::GlossaryMissingBody(paragraph.to_string()))?;

    let key_parts = key_parts(heading);
    // split always yields at least one part
    let id = glossary_id(key_parts.first().map(String::as_str).unwrap_or_default());

    Ok(GlossaryItem {
        id,
        key_text: heading.to_string(),
        key_parts,
        body: body.to_string(),
    })
}

/// Parse every glossary paragraph, collecting problems from all of them.
pub fn parse_glossary(paragraphs: &[String]) -> Checked<Vec<GlossaryItem>> {
    let mut items = Vec::with_capacity(paragraphs.len());
    let mut diagnostics = Vec::new();
    for paragraph in paragraphs {
        match parse_item(paragraph) {
            Ok(item) => items.push(item),
            Err(e) => diagnostics.push(e),
        }
    }
    Checked::new(items, diagnostics)
}
