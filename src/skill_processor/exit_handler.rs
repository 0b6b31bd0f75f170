//! Cancel, stop and session-ended handler
//!
//! Ends the session without saying anything.

use super::{HandlerFuture, RequestHandler, SkillContext};
use crate::envelope::{RequestKind, SkillRequest, SkillResponse};

#[derive(Debug)]
pub struct ExitHandler;

impl RequestHandler for ExitHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        matches!(request.request, RequestKind::SessionEnded)
            || matches!(
                request.intent_name(),
                Some("AMAZON.CancelIntent") | Some("AMAZON.StopIntent")
            )
    }

    fn handle<'a>(
        &'a self,
        _ctx: &'a SkillContext,
        _request: &'a SkillRequest,
    ) -> HandlerFuture<'a> {
        Box::pin(async move { Ok(SkillResponse::silent()) })
    }
}
