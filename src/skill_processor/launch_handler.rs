//! Launch and help handler
//!
//! Opening the skill and asking for help both get the same prompt.

use super::{HandlerFuture, RequestHandler, SkillContext};
use crate::envelope::{RequestKind, SkillRequest};

pub const WELCOME: &str = "Which meal and day would you like to know?";

#[derive(Debug)]
pub struct LaunchHandler;

impl RequestHandler for LaunchHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        matches!(request.request, RequestKind::Launch)
            || request.intent_name() == Some("AMAZON.HelpIntent")
    }

    fn handle<'a>(
        &'a self,
        ctx: &'a SkillContext,
        _request: &'a SkillRequest,
    ) -> HandlerFuture<'a> {
        Box::pin(async move { Ok(ctx.say(WELCOME).with_reprompt(WELCOME)) })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, intent, request};
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_launch_prompts_and_keeps_session_open() {
        let ctx = context();
        let response = LaunchHandler.handle(&ctx, &request(RequestKind::Launch)).await.unwrap();
        assert_eq!(response.speech.as_deref(), Some(WELCOME));
        assert_eq!(response.reprompt.as_deref(), Some(WELCOME));
        assert_eq!(response.card.unwrap().title, "Meals Menu");
        assert!(!response.should_end_session);
    }

    #[test]
    fn test_help_is_handled() {
        assert!(LaunchHandler.can_handle(&request(intent("AMAZON.HelpIntent", &[]))));
        assert!(!LaunchHandler.can_handle(&request(intent("GetMealIntent", &[]))));
    }
}
