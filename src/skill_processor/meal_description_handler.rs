//! Free-form questions about a meal ("when did we last have lasagna")

use super::{HandlerFuture, RequestHandler, SkillContext};
use crate::day_term::day_term_for_date;
use crate::envelope::{SkillRequest, SkillResponse};
use crate::meals::MealQuery;
use crate::parser::classify;
use crate::parser::utils::sanitize_user_input;
use crate::response::{render_description, render_unrecognized};
use anyhow::Result;
use log::{info, warn};

#[derive(Debug)]
pub struct MealDescriptionHandler;

async fn answer(ctx: &SkillContext, request: &SkillRequest) -> Result<SkillResponse> {
    let phrase = sanitize_user_input(request.slot_value("description").unwrap_or_default());
    let Some(classification) = classify(&phrase) else {
        info!("No grammar matched {:?}", phrase);
        return Ok(ctx.render(render_unrecognized(&phrase)));
    };

    let settings = ctx.user_settings(request).await?;
    let Some(endpoint) = settings.endpoint() else {
        return Ok(ctx.setup_required());
    };

    let now = ctx.local_time(request);
    let query = MealQuery {
        description: classification.description.clone(),
        direction: classification.direction,
        start_date: now.date_naive(),
    };
    let found = match ctx.meals_api.find_meal(&endpoint, &query).await {
        Ok(found) => found,
        Err(e) => {
            warn!("Meal search for {:?} failed: {}", query.description, e);
            return Ok(ctx.say(format!(
                "There was a problem searching for {} in the Google Sheets API.",
                query.description
            )));
        }
    };

    let rendered = match &found {
        Some(record) => {
            let day = day_term_for_date(&now, record.date);
            render_description(&classification, Some((record, &day)))
        }
        None => render_description(&classification, None),
    };
    Ok(ctx.render(rendered))
}

impl RequestHandler for MealDescriptionHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.intent_name() == Some("GetMealByDescriptionIntent")
    }

    fn handle<'a>(&'a self, ctx: &'a SkillContext, request: &'a SkillRequest) -> HandlerFuture<'a> {
        Box::pin(answer(ctx, request))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, date, intent, linked, request, FakeMealsApi};
    use super::*;
    use crate::meals::MealRecord;
    use crate::parser::Direction;
    use pretty_assertions::assert_eq;

    fn history() -> FakeMealsApi {
        let record =
            |description: &str, d| MealRecord { description: description.to_string(), date: d };
        FakeMealsApi {
            records: vec![
                record("Lasagna -- grandma's recipe", date(2026, 10, 13)),
                record("Lasagna", date(2026, 9, 1)),
                record("Fish tacos", date(2026, 10, 19)),
            ],
            ..Default::default()
        }
    }

    fn describe(phrase: &str) -> SkillRequest {
        request(intent("GetMealByDescriptionIntent", &[("description", phrase)]))
    }

    #[tokio::test]
    async fn test_last_time_we_had() {
        let h = linked(history()).await;
        let req = describe("When did we last have   Lasagna");
        assert!(MealDescriptionHandler.can_handle(&req));
        let response = MealDescriptionHandler.handle(&h.ctx, &req).await.unwrap();
        assert_eq!(
            response.speech.as_deref(),
            Some("You last had Lasagna 3 days ago, last Tuesday, October 13th.")
        );
        assert_eq!(
            response.card.unwrap().content,
            "You last had Lasagna -- grandma's recipe 3 days ago, last Tuesday, October 13th."
        );

        let queries = h.meals.queries.lock().unwrap();
        assert_eq!(
            *queries,
            vec![MealQuery {
                description: "lasagna".into(),
                direction: Direction::Past,
                start_date: date(2026, 10, 16),
            }]
        );
    }

    #[tokio::test]
    async fn test_next_time_we_have() {
        let h = linked(history()).await;
        let req = describe("when are we having tacos");
        let response = MealDescriptionHandler.handle(&h.ctx, &req).await.unwrap();
        assert_eq!(
            response.speech.as_deref(),
            Some("You will have Fish tacos in 3 days, on Monday, October 19th.")
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let h = linked(history()).await;
        let req = describe("when will we eat pizza");
        let response = MealDescriptionHandler.handle(&h.ctx, &req).await.unwrap();
        assert_eq!(
            response.speech.as_deref(),
            Some("I could not find pizza planned in the future.")
        );
    }

    #[tokio::test]
    async fn test_unrecognized_phrase_needs_no_sheet() {
        let ctx = context();
        let req = describe("what on earth");
        let response = MealDescriptionHandler.handle(&ctx, &req).await.unwrap();
        assert_eq!(response.speech.as_deref(), Some("I could not understand what on earth."));
    }

    #[tokio::test]
    async fn test_unlinked_user_gets_setup_message() {
        let ctx = context();
        let req = describe("did we have soup");
        let response = MealDescriptionHandler.handle(&ctx, &req).await.unwrap();
        assert!(response.speech.unwrap().starts_with("Your Meals Menu Google Sheet"));
    }

    #[tokio::test]
    async fn test_search_failure() {
        let h = linked(FakeMealsApi { fail: true, ..Default::default() }).await;
        let req = describe("did we have soup");
        let response = MealDescriptionHandler.handle(&h.ctx, &req).await.unwrap();
        assert_eq!(
            response.speech.as_deref(),
            Some("There was a problem searching for soup in the Google Sheets API.")
        );
    }
}
