//! Past/future grammars for meal description questions
//!
//! A question like "when did we last have lasagna" or "are we going to have
//! tacos" is classified by trying each grammar template in turn. The first
//! template that matches decides the direction, and its suffix (minus filler
//! words) becomes the meal description.

use super::matcher::match_prefix;
use super::template::{Template, TemplateError};
use super::trimmer::trim_suffixes;
use log::debug;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way in time the question looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Past,
    Future,
}

impl Direction {
    pub fn is_future(self) -> bool {
        self == Direction::Future
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Past => "past",
            Direction::Future => "future",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// May be empty; looking up an empty description is the caller's call
    pub description: String,
    pub direction: Direction,
}

impl Classification {
    pub fn is_future(&self) -> bool {
        self.direction.is_future()
    }
}

/// Fillers stripped from the end of a matched description, in this order
pub const TRIM_SET: &[&str] = &["again", "tonight", "night", "last", "next", "recently", "before"];

const PAST_DID_WE_HAVE: &[&[&str]] = &[
    &["", "what", "when", "what day", "which day", "what night"],
    &["did"],
    &["we", "i", "you"],
    &["", "last", "ever"],
    &["have", "eat", "make", "cook"],
];

const PAST_LAST_TIME_WE_ATE: &[&[&str]] = &[
    &["", "when", "what", "what day", "which day"],
    &["is", "was"],
    &["the"],
    &["last", "most recent", "previous"],
    &["time", "day", "night"],
    &["", "that"],
    &["we", "i", "you"],
    &["have", "had", "ate", "eat", "made", "cooked"],
];

const FUTURE_GOING_TO_HAVE: &[&[&str]] = &[
    &["", "when", "what day", "which day"],
    &["", "are", "will", "is"],
    &["we", "we're", "i", "i'm", "you", "you're"],
    &["", "going to", "gonna", "next"],
    &["have", "having", "eat", "eating", "make", "making"],
];

/// One named template table and the direction it implies
pub type TemplateTable<'a> = (&'a str, &'a [&'a [&'a str]], Direction);

const MEAL_QUESTION_TABLES: &[TemplateTable<'static>] = &[
    ("past: did we have", PAST_DID_WE_HAVE, Direction::Past),
    ("past: last time we ate", PAST_LAST_TIME_WE_ATE, Direction::Past),
    ("future: going to have", FUTURE_GOING_TO_HAVE, Direction::Future),
];

/// Ordered templates, each tagged with the direction it implies
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<(Template, Direction)>,
    trims: Vec<String>,
}

impl Grammar {
    pub fn new(rules: Vec<(Template, Direction)>, trims: &[&str]) -> Self {
        Self { rules, trims: trims.iter().map(|t| t.to_string()).collect() }
    }

    /// Build a grammar from word tables, failing on the first malformed one
    pub fn from_tables(
        tables: &[TemplateTable<'_>],
        trims: &[&str],
    ) -> Result<Self, TemplateError> {
        let rules = tables
            .iter()
            .map(|(name, words, direction)| {
                Template::from_words(name, words).map(|template| (template, *direction))
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;
        Ok(Self::new(rules, trims))
    }

    /// The built-in meal question grammar: two past templates, then the future one
    pub fn meal_questions() -> Result<Self, TemplateError> {
        Self::from_tables(MEAL_QUESTION_TABLES, TRIM_SET)
    }

    pub fn rules(&self) -> &[(Template, Direction)] {
        &self.rules
    }

    /// Classify `phrase`, or `None` when no template accepts it
    pub fn classify(&self, phrase: &str) -> Option<Classification> {
        for (template, direction) in &self.rules {
            if let Some(suffix) = match_prefix(phrase, template).into_suffix() {
                let description = trim_suffixes(&suffix, &self.trims);
                debug!("Classified '{}' as {} '{}'", phrase, direction, description);
                return Some(Classification { description, direction: *direction });
            }
        }

        debug!("No grammar template matched '{}'", phrase);
        None
    }
}

static MEAL_QUESTIONS: OnceCell<Grammar> = OnceCell::new();

/// Build the shared built-in grammar; call at startup so a bad table fails there
pub fn init_meal_questions() -> Result<&'static Grammar, TemplateError> {
    MEAL_QUESTIONS.get_or_try_init(Grammar::meal_questions)
}

/// The shared built-in grammar
pub fn meal_questions() -> &'static Grammar {
    // Startup already ran init_meal_questions, so this only fails if that was skipped
    init_meal_questions().unwrap_or_else(|e| panic!("built-in meal grammar is invalid: {e}"))
}

/// Classify a meal question with the built-in grammar
pub fn classify(phrase: &str) -> Option<Classification> {
    meal_questions().classify(phrase)
}
