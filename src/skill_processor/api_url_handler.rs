//! Links a user's spreadsheet API by short link keyword

use super::{HandlerFuture, RequestHandler, SkillContext};
use crate::envelope::{SkillRequest, SkillResponse};
use crate::meals::ShortLinkError;
use crate::state::UserSettings;
use anyhow::{Context, Result};
use log::{info, warn};
use secrecy::SecretString;

const URL_SET: &str = "The API URL has been set.";
const NOT_A_REDIRECT: &str = "The target API URL does not appear to be correct.";
const INVALID_KEYWORD: &str = "The specified URL short name does not appear to be valid.";
const LOOKUP_FAILED: &str = "There was a problem getting the API URL. Please try again later.";

#[derive(Debug)]
pub struct SetMealsApiUrlHandler;

async fn link(ctx: &SkillContext, request: &SkillRequest) -> Result<SkillResponse> {
    let Some(keyword) = request.slot_value("apiUrlKeyWord") else {
        return Ok(ctx.say(INVALID_KEYWORD));
    };

    let url = match ctx.link_resolver.resolve(keyword).await {
        Ok(url) => url,
        Err(ShortLinkError::NotARedirect) => return Ok(ctx.say(NOT_A_REDIRECT)),
        Err(ShortLinkError::Request(e)) => {
            warn!("Short link lookup for '{}' failed: {}", keyword, e);
            return Ok(SkillResponse::speak(LOOKUP_FAILED));
        }
        Err(e) => {
            info!("Rejected short link '{}': {}", keyword, e);
            return Ok(ctx.say(INVALID_KEYWORD));
        }
    };

    let existing = ctx.user_settings(request).await?;
    let passphrase = match request.slot_value("passphrase") {
        Some(passphrase) => Some(SecretString::from(passphrase.to_string())),
        None => existing.passphrase,
    };
    let settings = UserSettings { meals_api_url_base: Some(url.clone()), passphrase };
    ctx.settings
        .put(&request.user_id, &settings)
        .await
        .with_context(|| format!("Failed to save settings for user {}", request.user_id))?;

    info!("Linked meals API for user {}", request.user_id);
    Ok(SkillResponse::speak(URL_SET)
        .with_card(ctx.app_name(), format!("{}  API URL: {}", URL_SET, url)))
}

impl RequestHandler for SetMealsApiUrlHandler {
    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.intent_name() == Some("SetMealsApiUrlIntent")
    }

    fn handle<'a>(&'a self, ctx: &'a SkillContext, request: &'a SkillRequest) -> HandlerFuture<'a> {
        Box::pin(link(ctx, request))
    }
}
