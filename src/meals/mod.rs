//! Spreadsheet meals API
//!
//! The household keeps its menu in a spreadsheet published as a small web API.
//! It answers two questions: what is planned on a date, and when a meal
//! matching a description was last (or will next be) on the menu.

use crate::parser::Direction;
use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

mod client;
mod short_link;

pub use client::HttpMealsApi;
pub use short_link::{LinkResolver, ShortLinkError, ShortLinkResolver};

/// Separates the part of a description worth speaking from cook's notes
pub const NOTES_DELIMITER: &str = "--";

/// Errors talking to the meals API
#[derive(Debug, thiserror::Error)]
pub enum MealsApiError {
    #[error("Invalid meals API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Meals API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Meals API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Could not decode meals API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Named meals tracked per day, in the order they are read out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealName {
    Breakfast,
    Lunch,
    Supper,
    Dessert,
}

impl MealName {
    pub const ALL: [MealName; 4] =
        [MealName::Breakfast, MealName::Lunch, MealName::Supper, MealName::Dessert];

    pub fn as_str(self) -> &'static str {
        match self {
            MealName::Breakfast => "breakfast",
            MealName::Lunch => "lunch",
            MealName::Supper => "supper",
            MealName::Dessert => "dessert",
        }
    }

    /// Hour after which today's meal counts as already eaten
    pub fn cutoff_hour(self) -> Option<u32> {
        match self {
            MealName::Breakfast => Some(11),
            MealName::Lunch => Some(15),
            MealName::Supper => Some(19),
            MealName::Dessert => None,
        }
    }
}

impl fmt::Display for MealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealName::Breakfast),
            "lunch" => Ok(MealName::Lunch),
            "supper" | "dinner" => Ok(MealName::Supper),
            "dessert" => Ok(MealName::Dessert),
            other => Err(format!("Unknown meal '{}'", other)),
        }
    }
}

/// Everything planned on one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DayMeals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub supper: Option<String>,
    pub dessert: Option<String>,
}

impl DayMeals {
    /// Blank cells count as nothing planned
    pub fn get(&self, meal: MealName) -> Option<&str> {
        let value = match meal {
            MealName::Breakfast => &self.breakfast,
            MealName::Lunch => &self.lunch,
            MealName::Supper => &self.supper,
            MealName::Dessert => &self.dessert,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn planned(&self) -> Vec<(MealName, &str)> {
        MealName::ALL.iter().filter_map(|&m| self.get(m).map(|food| (m, food))).collect()
    }
}

/// A meal found by description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MealRecord {
    pub description: String,
    pub date: NaiveDate,
}

impl MealRecord {
    /// The description up to the notes delimiter, for reading aloud
    pub fn spoken_description(&self) -> &str {
        match self.description.split_once(NOTES_DELIMITER) {
            Some((spoken, _)) => spoken.trim(),
            None => self.description.trim(),
        }
    }
}

/// A description search, starting from `start_date` and walking `direction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealQuery {
    pub description: String,
    pub direction: Direction,
    pub start_date: NaiveDate,
}

/// Where one user's spreadsheet API lives
#[derive(Debug)]
pub struct ApiEndpoint<'a> {
    pub base_url: &'a str,
    pub passphrase: Option<&'a SecretString>,
}

impl ApiEndpoint<'_> {
    /// Base URL plus query parameters, keeping any query the base already has
    pub fn url_with(&self, params: &[(&str, &str)]) -> Result<Url, MealsApiError> {
        let mut url = Url::parse(self.base_url).map_err(|source| MealsApiError::InvalidUrl {
            url: self.base_url.to_string(),
            source,
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            if let Some(passphrase) = self.passphrase {
                let passphrase = passphrase.expose_secret();
                if !passphrase.is_empty() {
                    pairs.append_pair("passphrase", passphrase);
                }
            }
        }
        Ok(url)
    }
}

/// Lookup operations against a user's spreadsheet API
#[async_trait]
pub trait MealsApi: Send + Sync {
    async fn meals_for_date(
        &self,
        endpoint: &ApiEndpoint<'_>,
        date: NaiveDate,
    ) -> Result<DayMeals, MealsApiError>;

    async fn find_meal(
        &self,
        endpoint: &ApiEndpoint<'_>,
        query: &MealQuery,
    ) -> Result<Option<MealRecord>, MealsApiError>;
}
