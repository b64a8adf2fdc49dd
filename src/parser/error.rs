use std::fmt;

use thiserror::Error;

use super::rules::SectionType;

/// Which routed bucket came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Rules,
    Glossary,
    Credits,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bucket::Rules => "rules",
            Bucket::Glossary => "glossary items",
            Bucket::Credits => "credits",
        })
    }
}

/// A single problem found in the document. Text carried by a variant is the
/// offending paragraph or line, verbatim.
#[derive(Error, Debug)]
pub enum Diagnostic {
    #[error("input is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse effective date from the file")]
    MissingDate,

    #[error("failed to parse any {0} from the file")]
    EmptyBucket(Bucket),

    #[error("failed to parse rule id from {0:?}")]
    NumberParse(String),

    #[error("invalid part number {0:?}")]
    NumberShape(String),

    #[error("rule with no body text {0:?}")]
    EmptyBody(String),

    #[error("rule body text after examples {0:?}")]
    BodyAfterExample(String),

    #[error("rule of type {kind} must have exactly one body element: {text:?}")]
    BodyLength { kind: SectionType, text: String },

    #[error("glossary item with no body: {0:?}")]
    GlossaryMissingBody(String),

    #[error("zero paragraphs of credits found")]
    EmptyCredits,
}

/// Every diagnostic raised by the stage that stopped the parse.
#[derive(Error, Debug)]
#[error("{}", render(.diagnostics))]
pub struct ParseError {
    pub diagnostics: Vec<Diagnostic>,
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        ParseError {
            diagnostics: vec![diagnostic],
        }
    }
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output of one stage: whatever was built, plus everything that went wrong
/// while building it.
#[derive(Debug)]
pub struct Checked<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Checked<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Checked { value, diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Any diagnostic at all discards the value.
    pub fn into_result(self) -> Result<T, ParseError> {
        if self.diagnostics.is_empty() {
            Ok(self.value)
        } else {
            Err(ParseError {
                diagnostics: self.diagnostics,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_report_joins_lines() {
        let err = ParseError {
            diagnostics: vec![
                Diagnostic::MissingDate,
                Diagnostic::EmptyBucket(Bucket::Glossary),
                Diagnostic::NumberParse("Hello".into()),
            ],
        };
        assert_eq!(
            err.to_string(),
            "failed to parse effective date from the file\n\
             failed to parse any glossary items from the file\n\
             failed to parse rule id from \"Hello\""
        );
    }

    #[test]
    fn clean_checked_passes_value_through() {
        let checked = Checked::new(vec![1, 2], Vec::new());
        assert!(checked.is_clean());
        assert_eq!(checked.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn dirty_checked_drops_value() {
        let checked = Checked::new(vec![1, 2], vec![Diagnostic::EmptyCredits]);
        let err = checked.into_result().unwrap_err();
        assert_eq!(err.diagnostics.len(), 1);
        assert_eq!(err.to_string(), "zero paragraphs of credits found");
    }

    #[test]
    fn body_length_names_type() {
        let d = Diagnostic::BodyLength {
            kind: SectionType::Chapter,
            text: "100. General\nextra".into(),
        };
        assert_eq!(
            d.to_string(),
            "rule of type Chapter must have exactly one body element: \"100. General\\nextra\""
        );
    }
}
