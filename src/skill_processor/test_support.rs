//! Fakes shared by the handler tests

use super::SkillContext;
use crate::config::Config;
use crate::envelope::{Intent, RequestKind, SkillRequest, Slot};
use crate::meals::{
    ApiEndpoint, DayMeals, LinkResolver, MealQuery, MealRecord, MealsApi, MealsApiError,
    ShortLinkError,
};
use crate::parser::Direction;
use crate::state::{MemorySettingsStore, SettingsStore, UserSettings};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const USER: &str = "user-1";
pub const API_URL: &str = "https://script.example.com/exec";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory spreadsheet
#[derive(Default)]
pub struct FakeMealsApi {
    pub days: HashMap<NaiveDate, DayMeals>,
    pub records: Vec<MealRecord>,
    pub fail: bool,
    pub queries: Mutex<Vec<MealQuery>>,
    pub requested_dates: Mutex<Vec<NaiveDate>>,
}

impl FakeMealsApi {
    fn check(&self, endpoint: &ApiEndpoint<'_>) -> Result<(), MealsApiError> {
        endpoint.url_with(&[])?;
        if self.fail {
            return Err(MealsApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }
}

#[async_trait]
impl MealsApi for FakeMealsApi {
    async fn meals_for_date(
        &self,
        endpoint: &ApiEndpoint<'_>,
        date: NaiveDate,
    ) -> Result<DayMeals, MealsApiError> {
        self.check(endpoint)?;
        self.requested_dates.lock().unwrap().push(date);
        Ok(self.days.get(&date).cloned().unwrap_or_default())
    }

    async fn find_meal(
        &self,
        endpoint: &ApiEndpoint<'_>,
        query: &MealQuery,
    ) -> Result<Option<MealRecord>, MealsApiError> {
        self.check(endpoint)?;
        self.queries.lock().unwrap().push(query.clone());
        let matching = self
            .records
            .iter()
            .filter(|r| r.description.to_lowercase().contains(&query.description));
        let found = match query.direction {
            Direction::Past => {
                matching.filter(|r| r.date <= query.start_date).max_by_key(|r| r.date)
            }
            Direction::Future => {
                matching.filter(|r| r.date >= query.start_date).min_by_key(|r| r.date)
            }
        };
        Ok(found.cloned())
    }
}

/// Keyword -> target; `None` targets answer without redirecting
#[derive(Default)]
pub struct FakeLinkResolver {
    pub links: HashMap<String, Option<String>>,
}

#[async_trait]
impl LinkResolver for FakeLinkResolver {
    async fn resolve(&self, keyword: &str) -> Result<String, ShortLinkError> {
        match self.links.get(keyword) {
            Some(Some(target)) => Ok(target.clone()),
            Some(None) => Err(ShortLinkError::NotARedirect),
            None => Err(ShortLinkError::NoTarget),
        }
    }
}

pub struct Harness {
    pub ctx: SkillContext,
    pub settings: Arc<MemorySettingsStore>,
    pub meals: Arc<FakeMealsApi>,
}

pub fn harness(meals: FakeMealsApi, links: FakeLinkResolver) -> Harness {
    let settings = Arc::new(MemorySettingsStore::new());
    let meals = Arc::new(meals);
    let ctx = SkillContext::with_parts(
        Config::default(),
        meals.clone(),
        settings.clone(),
        Arc::new(links),
    )
    .unwrap();
    Harness { ctx, settings, meals }
}

/// Context with nothing linked and empty fakes
pub fn context() -> SkillContext {
    harness(FakeMealsApi::default(), FakeLinkResolver::default()).ctx
}

/// Harness whose user has already linked a spreadsheet
pub async fn linked(meals: FakeMealsApi) -> Harness {
    let h = harness(meals, FakeLinkResolver::default());
    let settings =
        UserSettings { meals_api_url_base: Some(API_URL.to_string()), passphrase: None };
    h.settings.put(USER, &settings).await.unwrap();
    h
}

/// Friday 2026-10-16, 09:00 in Los Angeles
pub fn request(kind: RequestKind) -> SkillRequest {
    SkillRequest {
        user_id: USER.to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 10, 16, 16, 0, 0).unwrap(),
        timezone: None,
        request: kind,
    }
}

fn build_intent(name: &str, slots: &[(&str, &str)]) -> Intent {
    Intent {
        name: name.to_string(),
        slots: slots
            .iter()
            .map(|(k, v)| (k.to_string(), Slot { value: Some(v.to_string()), resolved: None }))
            .collect(),
    }
}

pub fn intent(name: &str, slots: &[(&str, &str)]) -> RequestKind {
    RequestKind::Intent { intent: build_intent(name, slots) }
}

pub fn can_fulfill(name: &str, slots: &[(&str, &str)]) -> RequestKind {
    RequestKind::CanFulfillIntent { intent: build_intent(name, slots) }
}
