use crate::config::Config;
use crate::envelope::{RequestKind, SkillRequest, SkillResponse};
use crate::meals::{HttpMealsApi, LinkResolver, MealsApi, ShortLinkResolver};
use crate::parser::grammar::init_meal_questions;
use crate::response::Rendered;
use crate::state::{FileSettingsStore, SettingsStore, UserSettings};
use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use log::{debug, error, info};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub mod api_url_handler;
pub mod can_fulfill_handler;
pub mod error_handler;
pub mod exit_handler;
pub mod get_meal_handler;
pub mod launch_handler;
pub mod meal_description_handler;
#[cfg(test)]
pub(crate) mod test_support;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<SkillResponse>> + Send + 'a>>;

/// Shared, read-mostly state every handler can reach
pub struct SkillContext {
    pub config: Config,
    pub default_timezone: Tz,
    pub meals_api: Arc<dyn MealsApi>,
    pub settings: Arc<dyn SettingsStore>,
    pub link_resolver: Arc<dyn LinkResolver>,
}

impl SkillContext {
    /// Build the production context: HTTP clients and the file-backed settings store
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.meals_api.timeout_secs);
        let meals_api = HttpMealsApi::new(timeout).context("Failed to build meals API client")?;
        let link_resolver = ShortLinkResolver::new(&config.meals_api.short_link_base, timeout)
            .context("Failed to build short link client")?;
        let settings = FileSettingsStore::new(config.storage.state_dir.as_deref())?;
        info!("User settings stored in {}", settings.path().display());
        Self::with_parts(config, Arc::new(meals_api), Arc::new(settings), Arc::new(link_resolver))
    }

    pub fn with_parts(
        config: Config,
        meals_api: Arc<dyn MealsApi>,
        settings: Arc<dyn SettingsStore>,
        link_resolver: Arc<dyn LinkResolver>,
    ) -> Result<Self> {
        let default_timezone = config.default_timezone()?;
        init_meal_questions().context("Built-in meal grammar is invalid")?;
        Ok(Self { config, default_timezone, meals_api, settings, link_resolver })
    }

    pub fn app_name(&self) -> &str {
        &self.config.skill.app_name
    }

    pub fn local_time(&self, request: &SkillRequest) -> DateTime<Tz> {
        request.local_time(self.default_timezone)
    }

    /// Speech plus a card with the same text
    pub fn say(&self, text: impl Into<String>) -> SkillResponse {
        let text = text.into();
        SkillResponse::speak(text.clone()).with_card(self.app_name(), text)
    }

    /// Reply for users who have not linked a spreadsheet yet
    pub fn setup_required(&self) -> SkillResponse {
        let message = format!(
            "Your {} Google Sheet has not been linked yet.  {}",
            self.app_name(),
            "Please go to the following web URL for setup instructions: "
        );
        let skill = &self.config.skill;
        SkillResponse::speak(format!("{}{}", message, skill.spoken_setup_url))
            .with_card(self.app_name(), format!("{}{}", message, skill.setup_url))
    }

    /// Stored settings for the user behind `request`
    pub async fn user_settings(&self, request: &SkillRequest) -> Result<UserSettings> {
        self.settings
            .get(&request.user_id)
            .await
            .with_context(|| format!("Failed to read settings for user {}", request.user_id))
    }

    /// Speech plus a card, with card text that may differ from what is said
    pub fn render(&self, rendered: Rendered) -> SkillResponse {
        SkillResponse::speak(rendered.speech).with_card(self.app_name(), rendered.card)
    }
}

pub trait RequestHandler: Debug + Send + Sync {
    fn can_handle(&self, request: &SkillRequest) -> bool;
    fn handle<'a>(&'a self, ctx: &'a SkillContext, request: &'a SkillRequest) -> HandlerFuture<'a>;
}

pub trait ErrorHandler: Debug + Send + Sync {
    fn can_handle(&self, request: &SkillRequest) -> bool;
    fn handle(
        &self,
        ctx: &SkillContext,
        request: &SkillRequest,
        error: &anyhow::Error,
    ) -> SkillResponse;
}

fn describe(request: &SkillRequest) -> String {
    match &request.request {
        RequestKind::Launch => "launch".to_string(),
        RequestKind::Intent { intent } => format!("intent {}", intent.name),
        RequestKind::CanFulfillIntent { intent } => format!("can-fulfill {}", intent.name),
        RequestKind::SessionEnded => "session ended".to_string(),
    }
}

#[derive(Debug)]
pub struct SkillProcessor {
    handlers: Vec<Box<dyn RequestHandler>>,
    error_handlers: Vec<Box<dyn ErrorHandler>>,
}

impl SkillProcessor {
    pub fn new() -> Self {
        // Order matters: the first handler that accepts a request handles it
        let handlers: Vec<Box<dyn RequestHandler>> = vec![
            Box::new(api_url_handler::SetMealsApiUrlHandler),
            Box::new(launch_handler::LaunchHandler),
            Box::new(get_meal_handler::GetMealHandler),
            Box::new(meal_description_handler::MealDescriptionHandler),
            Box::new(can_fulfill_handler::CanFulfillGetMealHandler),
            Box::new(can_fulfill_handler::CanFulfillSetApiUrlHandler),
            Box::new(exit_handler::ExitHandler),
        ];
        let error_handlers: Vec<Box<dyn ErrorHandler>> = vec![
            Box::new(error_handler::CanFulfillErrorHandler),
            Box::new(error_handler::GenericErrorHandler),
        ];
        Self { handlers, error_handlers }
    }

    pub async fn process(&self, ctx: &SkillContext, request: &SkillRequest) -> SkillResponse {
        let name = describe(request);
        debug!("Processing {} for user {}", name, request.user_id);

        let result = match self.handlers.iter().find(|h| h.can_handle(request)) {
            Some(handler) => {
                info!("Handling {} with {:?}", name, handler);
                handler.handle(ctx, request).await
            }
            None => Err(anyhow!("No handler accepts {}", name)),
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to handle {}: {:?}", name, e);
                match self.error_handlers.iter().find(|h| h.can_handle(request)) {
                    Some(handler) => handler.handle(ctx, request, &e),
                    None => SkillResponse::silent(),
                }
            }
        }
    }
}

impl Default for SkillProcessor {
    fn default() -> Self {
        Self::new()
    }
}
