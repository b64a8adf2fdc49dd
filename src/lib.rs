//! Parser for the plain-text Magic: The Gathering Comprehensive Rules.
//!
//! [`parse`] turns one dated rules document into a [`Ruleset`]: the numbered
//! rule sections, the glossary, and the credits.

pub mod parser;

pub use parser::{parse, GlossaryItem, ParseError, Ruleset, Section, SectionType};
