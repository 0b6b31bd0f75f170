//! Greedy prefix matcher
//!
//! Consumes a phrase slot by slot. Each slot takes the longest of its
//! candidates that prefixes what is left of the phrase, and the leftover text
//! after the last slot is the suffix handed back to the caller.

use super::template::{Template, TemplateSlot};
use super::utils::normalize;
use log::debug;

/// Outcome of running a phrase through one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Every slot matched; holds the text left after the last slot
    Matched(String),
    NoMatch,
}

impl MatchResult {
    pub fn into_suffix(self) -> Option<String> {
        match self {
            MatchResult::Matched(suffix) => Some(suffix),
            MatchResult::NoMatch => None,
        }
    }
}

/// Pick the longest candidate in `slot` that prefixes `remaining`.
///
/// On equal lengths the earliest declared candidate is kept. Normalized
/// candidates of equal length that both prefix the same text are identical,
/// so the choice never changes the outcome.
pub fn longest_candidate<'a>(slot: &'a TemplateSlot, remaining: &str) -> Option<&'a str> {
    let mut best: Option<&str> = None;
    for candidate in slot.candidates() {
        if !remaining.starts_with(candidate.as_str()) {
            continue;
        }
        if best.map_or(true, |b| candidate.len() > b.len()) {
            best = Some(candidate);
        }
    }
    best
}

/// Strip the prefix described by `template` from `phrase`
pub fn match_prefix(phrase: &str, template: &Template) -> MatchResult {
    let mut remaining = normalize(phrase);

    for (index, slot) in template.slots().iter().enumerate() {
        let Some(candidate) = longest_candidate(slot, &remaining) else {
            debug!("Template '{}' failed at slot {} on '{}'", template.name(), index, remaining);
            return MatchResult::NoMatch;
        };
        remaining = remaining[candidate.len()..].trim().to_string();
    }

    debug!("Template '{}' matched, suffix '{}'", template.name(), remaining);
    MatchResult::Matched(remaining)
}
