//! Template data types for the phrase matcher
//!
//! A template is an ordered list of slots, and each slot holds the literal
//! strings that may appear at that position. The empty string marks a slot as
//! optional.

use super::utils::normalize;

/// Errors raised while building template data
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Slot {slot} of template '{template}' has no candidates")]
    EmptySlot { template: String, slot: usize },

    #[error("Template '{0}' has no slots")]
    NoSlots(String),
}

/// One position in a template and the strings accepted there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSlot {
    candidates: Vec<String>,
}

impl TemplateSlot {
    /// Candidates are stored normalized so matching never has to re-case them
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { candidates: candidates.into_iter().map(|c| normalize(c.as_ref())).collect() }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

/// An ordered sequence of slots describing one accepted phrasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    slots: Vec<TemplateSlot>,
}

impl Template {
    /// Build a template, rejecting slots that could never match
    pub fn new(name: &str, slots: Vec<TemplateSlot>) -> Result<Self, TemplateError> {
        if slots.is_empty() {
            return Err(TemplateError::NoSlots(name.to_string()));
        }
        if let Some(slot) = slots.iter().position(|s| s.candidates.is_empty()) {
            return Err(TemplateError::EmptySlot { template: name.to_string(), slot });
        }
        Ok(Self { name: name.to_string(), slots })
    }

    /// Shorthand for declaring a template as nested string lists
    pub fn from_words(name: &str, slots: &[&[&str]]) -> Result<Self, TemplateError> {
        Self::new(name, slots.iter().map(|words| TemplateSlot::new(words.iter())).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[TemplateSlot] {
        &self.slots
    }
}
