pub mod credits;
pub mod error;
pub mod glossary;
pub mod normalize;
pub mod rules;
pub mod sections;

use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use error::{Bucket, Checked, Diagnostic, ParseError};
pub use glossary::GlossaryItem;
pub use rules::{Section, SectionType};

/// A fully parsed Comprehensive Rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(rename = "EffectiveDate")]
    pub effective_date: NaiveDate,
    #[serde(rename = "Rules")]
    pub rules: Vec<Section>,
    #[serde(rename = "Glossary")]
    pub glossary: Vec<GlossaryItem>,
    #[serde(rename = "Credits")]
    pub credits: Vec<String>,
}

impl Ruleset {
    pub fn section(&self, number: &str) -> Option<&Section> {
        self.rules.iter().find(|s| s.number == number)
    }

    /// First glossary item with this slug. Slugs are not unique.
    pub fn glossary_item(&self, id: &str) -> Option<&GlossaryItem> {
        self.glossary.iter().find(|g| g.id == id)
    }

    pub fn sections_of_type(&self, kind: SectionType) -> impl Iterator<Item = &Section> {
        self.rules.iter().filter(move |s| s.kind == kind)
    }
}

fn stage<T>(name: &str, checked: Checked<T>) -> Result<T, ParseError> {
    if !checked.is_clean() {
        warn!(stage = name, problems = checked.diagnostics.len(), "parse failed");
    }
    checked.into_result()
}

/// Six-stage pipeline: bytes → text → paragraphs → buckets → rules,
/// glossary, credits. The first stage that reports anything aborts the
/// parse with every diagnostic from that stage.
pub fn parse<R: Read>(reader: R) -> Result<Ruleset, ParseError> {
    let text = normalize::normalize(reader)?;
    let paragraphs = normalize::split_paragraphs(&text);
    debug!(paragraphs = paragraphs.len(), "split paragraphs");

    let routed = stage("sections", sections::route_paragraphs(&paragraphs))?;
    let effective_date = routed.effective_date.ok_or(Diagnostic::MissingDate)?;

    let rules = stage("rules", rules::parse_rules(&routed.rules))?;
    let glossary = stage("glossary", glossary::parse_glossary(&routed.glossary))?;
    let credits = credits::parse_credits(routed.credits)?;

    info!(
        %effective_date,
        rules = rules.len(),
        glossary = glossary.len(),
        credits = credits.len(),
        "parsed comprehensive rules"
    );

    Ok(Ruleset {
        effective_date,
        rules,
        glossary,
        credits,
    })
}

// ── Tests ──
