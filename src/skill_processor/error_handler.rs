//! Fallback replies when a handler fails or nothing accepts a request

use super::{ErrorHandler, SkillContext};
use crate::envelope::{CanFulfill, SkillRequest, SkillResponse};
use log::warn;

pub const TROUBLE: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// Can-fulfill checks must always get a verdict back
#[derive(Debug)]
pub struct CanFulfillErrorHandler;

impl ErrorHandler for CanFulfillErrorHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_can_fulfill()
    }

    fn handle(
        &self,
        _ctx: &SkillContext,
        _request: &SkillRequest,
        error: &anyhow::Error,
    ) -> SkillResponse {
        warn!("Declining can-fulfill request: {}", error);
        let can_fulfill = CanFulfill::new(false).with_slot("meal", false, false);
        SkillResponse::silent().with_can_fulfill(can_fulfill)
    }
}

#[derive(Debug)]
pub struct GenericErrorHandler;

impl ErrorHandler for GenericErrorHandler {
    fn can_handle(&self, _request: &SkillRequest) -> bool {
        true
    }

    fn handle(
        &self,
        _ctx: &SkillContext,
        _request: &SkillRequest,
        error: &anyhow::Error,
    ) -> SkillResponse {
        warn!("Error handled: {:#}", error);
        SkillResponse::speak(TROUBLE).with_reprompt(TROUBLE)
    }
}
