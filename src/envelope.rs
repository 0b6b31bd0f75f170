//! Skill request and response envelopes
//!
//! A trimmed-down form of what a voice platform sends: who is asking, when,
//! and which intent with which slots.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequest {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    /// IANA zone of the device, when the platform shares it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub request: RequestKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestKind {
    Launch,
    Intent { intent: Intent },
    CanFulfillIntent { intent: Intent },
    SessionEnded,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slot {
    /// What the user said
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Canonical value from slot resolution, when one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

impl SkillRequest {
    /// Name of the intent for plain intent requests
    pub fn intent_name(&self) -> Option<&str> {
        match &self.request {
            RequestKind::Intent { intent } => Some(&intent.name),
            _ => None,
        }
    }

    /// Name of the intent for can-fulfill checks
    pub fn can_fulfill_intent_name(&self) -> Option<&str> {
        match &self.request {
            RequestKind::CanFulfillIntent { intent } => Some(&intent.name),
            _ => None,
        }
    }

    pub fn is_can_fulfill(&self) -> bool {
        matches!(self.request, RequestKind::CanFulfillIntent { .. })
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        match &self.request {
            RequestKind::Intent { intent } | RequestKind::CanFulfillIntent { intent } => {
                intent.slots.get(name)
            }
            _ => None,
        }
    }

    /// Whether the slot was sent at all, even without a value
    pub fn has_slot(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// Non-blank spoken value of a slot
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slot(name)
            .and_then(|s| s.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Resolved value of a slot, falling back to the spoken value
    pub fn resolved_slot_value(&self, name: &str) -> Option<&str> {
        self.slot(name)
            .and_then(|s| s.resolved.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| self.slot_value(name))
    }

    /// The request time in the device zone, or `default_zone` if the device zone is unknown
    pub fn local_time(&self, default_zone: Tz) -> DateTime<Tz> {
        let zone = match self.timezone.as_deref().map(str::parse::<Tz>) {
            Some(Ok(zone)) => zone,
            Some(Err(e)) => {
                warn!("Ignoring unknown timezone {:?}: {}", self.timezone, e);
                default_zone
            }
            None => default_zone,
        };
        self.timestamp.with_timezone(&zone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Yes,
    No,
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        if value {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotVerdict {
    pub can_understand: Verdict,
    pub can_fulfill: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanFulfill {
    pub can_fulfill: Verdict,
    pub slots: BTreeMap<String, SlotVerdict>,
}

impl CanFulfill {
    pub fn new(can_fulfill: bool) -> Self {
        Self { can_fulfill: can_fulfill.into(), slots: BTreeMap::new() }
    }

    pub fn with_slot(mut self, name: &str, can_understand: bool, can_fulfill: bool) -> Self {
        self.slots.insert(
            name.to_string(),
            SlotVerdict { can_understand: can_understand.into(), can_fulfill: can_fulfill.into() },
        );
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub should_end_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_fulfill: Option<CanFulfill>,
}

impl Default for SkillResponse {
    fn default() -> Self {
        Self {
            speech: None,
            reprompt: None,
            card: None,
            should_end_session: true,
            can_fulfill: None,
        }
    }
}

impl SkillResponse {
    /// Ends the session without saying anything
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn speak(text: impl Into<String>) -> Self {
        Self { speech: Some(text.into()), ..Self::default() }
    }

    pub fn with_card(mut self, title: &str, content: impl Into<String>) -> Self {
        self.card = Some(Card { title: title.to_string(), content: content.into() });
        self
    }

    /// Keeps the session open for an answer
    pub fn with_reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self.should_end_session = false;
        self
    }

    pub fn with_can_fulfill(mut self, can_fulfill: CanFulfill) -> Self {
        self.can_fulfill = Some(can_fulfill);
        self
    }
}
