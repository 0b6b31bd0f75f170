//! Can-fulfill checks
//!
//! The platform asks whether the skill could answer an utterance before the
//! user has named the skill. We say yes only when the request carries enough
//! to answer without a follow-up question.

use super::{HandlerFuture, RequestHandler, SkillContext};
use crate::envelope::{CanFulfill, SkillRequest, SkillResponse};

/// Initializer phrases this short are too vague to claim
const MIN_INITIALIZER_LEN: usize = 6;

#[derive(Debug)]
pub struct CanFulfillGetMealHandler;

impl RequestHandler for CanFulfillGetMealHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.can_fulfill_intent_name() == Some("GetMealIntent")
    }

    fn handle<'a>(
        &'a self,
        _ctx: &'a SkillContext,
        request: &'a SkillRequest,
    ) -> HandlerFuture<'a> {
        Box::pin(async move {
            let has_initializer = request.has_slot("getMealInitializer");
            let has_meal = request.has_slot("meal");
            let has_date = request.has_slot("date");
            let long_initializer = request
                .slot_value("getMealInitializer")
                .is_some_and(|v| v.len() > MIN_INITIALIZER_LEN);

            let can_fulfill = has_meal || (long_initializer && has_date);

            let verdict = CanFulfill::new(can_fulfill)
                .with_slot("getMealInitializer", has_initializer, can_fulfill && has_initializer)
                .with_slot("meal", has_meal, can_fulfill && has_meal)
                .with_slot("date", has_date, can_fulfill && has_date);
            Ok(SkillResponse::silent().with_can_fulfill(verdict))
        })
    }
}

/// Linking a spreadsheet has to happen inside the skill
#[derive(Debug)]
pub struct CanFulfillSetApiUrlHandler;

impl RequestHandler for CanFulfillSetApiUrlHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.can_fulfill_intent_name() == Some("SetMealsApiUrlIntent")
    }

    fn handle<'a>(
        &'a self,
        _ctx: &'a SkillContext,
        _request: &'a SkillRequest,
    ) -> HandlerFuture<'a> {
        Box::pin(async move {
            let verdict = CanFulfill::new(false).with_slot("apiUrlKeyWord", true, false);
            Ok(SkillResponse::silent().with_can_fulfill(verdict))
        })
    }
}
