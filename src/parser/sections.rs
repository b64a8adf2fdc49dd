use std::sync::LazyLock;

use chrono::{Datelike, Month, NaiveDate};
use regex::Regex;
use tracing::debug;

use super::error::{Bucket, Checked, Diagnostic};

static EFFECTIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9A-Za-z_]+) [0-9]+, [0-9]+").unwrap());

const EFFECTIVE_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Start,
    Rules,
    Glossary,
    Credits,
}

/// The only legal moves. The table of contents ends with "Credits", so the
/// first "Credits" opens the rules and the second one opens the credits.
const TRANSITIONS: [(State, &str, State); 3] = [
    (State::Start, "Credits", State::Rules),
    (State::Rules, "Glossary", State::Glossary),
    (State::Glossary, "Credits", State::Credits),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Marker paragraph, consumed by the transition.
    Advance,
    /// Front matter before the rules.
    Discard,
    Append(Bucket),
}

impl State {
    fn bucket(self) -> Option<Bucket> {
        match self {
            State::Start => None,
            State::Rules => Some(Bucket::Rules),
            State::Glossary => Some(Bucket::Glossary),
            State::Credits => Some(Bucket::Credits),
        }
    }

    pub fn step(self, paragraph: &str) -> (State, Step) {
        if let Some(&(_, _, next)) = TRANSITIONS
            .iter()
            .find(|(from, marker, _)| *from == self && *marker == paragraph)
        {
            return (next, Step::Advance);
        }

        match self.bucket() {
            Some(bucket) => (self, Step::Append(bucket)),
            None => (self, Step::Discard),
        }
    }
}

/// Paragraphs sorted into their buckets, plus the effective date if one
/// was found and the state the walk ended in.
#[derive(Debug, Default)]
pub struct Routed {
    pub state: State,
    pub effective_date: Option<NaiveDate>,
    pub rules: Vec<String>,
    pub glossary: Vec<String>,
    pub credits: Vec<String>,
}

impl Routed {
    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Rules => &mut self.rules,
            Bucket::Glossary => &mut self.glossary,
            Bucket::Credits => &mut self.credits,
        }
    }
}

fn find_effective_date(paragraph: &str) -> Option<NaiveDate> {
    let caps = EFFECTIVE_DATE_RE.captures(paragraph)?;
    let date = NaiveDate::parse_from_str(&caps[0], EFFECTIVE_DATE_FORMAT).ok()?;

    // %B also takes "Nov"; only the full month name counts.
    let month = Month::try_from(u8::try_from(date.month()).ok()?).ok()?;
    month.name().eq_ignore_ascii_case(&caps[1]).then_some(date)
}

/// Walk the paragraphs once, picking up the effective date and routing
/// every paragraph after the table of contents.
pub fn route_paragraphs(paragraphs: &[String]) -> Checked<Routed> {
    let mut routed = Routed::default();

    for paragraph in paragraphs {
        let paragraph = paragraph.trim();

        if routed.effective_date.is_none() {
            routed.effective_date = find_effective_date(paragraph);
        }

        let (next, step) = routed.state.step(paragraph);
        if next != routed.state {
            debug!(from = ?routed.state, to = ?next, "section transition");
        }
        routed.state = next;

        if let Step::Append(bucket) = step {
            routed.bucket_mut(bucket).push(paragraph.to_string());
        }
    }

    let mut diagnostics = Vec::new();
    if routed.effective_date.is_none() {
        diagnostics.push(Diagnostic::MissingDate);
    }
    for (bucket, paragraphs) in [
        (Bucket::Rules, &routed.rules),
        (Bucket::Glossary, &routed.glossary),
        (Bucket::Credits, &routed.credits),
    ] {
        if paragraphs.is_empty() {
            diagnostics.push(Diagnostic::EmptyBucket(bucket));
        }
    }

    debug!(
        final_state = ?routed.state,
        rules = routed.rules.len(),
        glossary = routed.glossary.len(),
        credits = routed.credits.len(),
        "routed paragraphs"
    );

    Checked::new(routed, diagnostics)
}

// ── Tests ──
