//! Meals planned for a given day
//!
//! Both slots are optional: no meal means every meal of the day and no date
//! means today in the user's timezone.

use super::{HandlerFuture, RequestHandler, SkillContext};
use crate::day_term::plain_day_term;
use crate::envelope::{SkillRequest, SkillResponse};
use crate::meals::MealName;
use crate::response::{is_future_date, render_day_meals};
use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, warn};

const ALL_MEALS: &str = "all";

#[derive(Debug)]
pub struct GetMealHandler;

/// The `meal` slot: `Ok(None)` asks for the whole day
fn requested_meal(request: &SkillRequest) -> Result<Option<MealName>, String> {
    match request.resolved_slot_value("meal") {
        None => Ok(None),
        Some(meal) if meal.eq_ignore_ascii_case(ALL_MEALS) => Ok(None),
        Some(meal) => meal.parse::<MealName>().map(Some).map_err(|_| meal.to_string()),
    }
}

async fn answer(ctx: &SkillContext, request: &SkillRequest) -> Result<SkillResponse> {
    let settings = ctx.user_settings(request).await?;
    let Some(endpoint) = settings.endpoint() else {
        return Ok(ctx.setup_required());
    };

    let meal = match requested_meal(request) {
        Ok(meal) => meal,
        Err(unknown) => {
            return Ok(ctx.say(format!(
                "I do not know the meal {}. Try breakfast, lunch, supper or dessert.",
                unknown
            )));
        }
    };

    let now = ctx.local_time(request);
    let date = match request.slot_value("date") {
        None => now.date_naive(),
        Some(value) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                debug!("Unparseable date slot {:?}: {}", value, e);
                return Ok(ctx.say(format!("I could not understand the date {}.", value)));
            }
        },
    };

    let meals = match ctx.meals_api.meals_for_date(&endpoint, date).await {
        Ok(meals) => meals,
        Err(e) => {
            warn!("Meals lookup for {} failed: {}", date, e);
            return Ok(ctx.say(format!(
                "There was a problem getting meals from the Google Sheets API for {}.",
                date.format("%Y-%m-%d")
            )));
        }
    };

    let day = plain_day_term(&now, date);
    let is_future = is_future_date(&now, date, meal);
    Ok(ctx.render(render_day_meals(meal, &day, is_future, &meals)))
}

impl RequestHandler for GetMealHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.intent_name() == Some("GetMealIntent")
    }

    fn handle<'a>(&'a self, ctx: &'a SkillContext, request: &'a SkillRequest) -> HandlerFuture<'a> {
        Box::pin(answer(ctx, request))
    }
}
