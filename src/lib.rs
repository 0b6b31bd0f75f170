pub mod api_server;
pub mod app;
pub mod cli;
pub mod config;
pub mod day_term;
pub mod env_manager;
pub mod envelope;
pub mod meals;
pub mod parser;
pub mod response;
pub mod skill_processor;
pub mod state;

use anyhow::{Context, Result};
use log::*;

pub async fn run(cli: cli::Cli) -> Result<()> {
    let config = Config::load()?;
    info!("Initializing Meals Menu");
    parser::grammar::init_meal_questions().context("Built-in meal grammar is invalid")?;
    app::Application::new(config).run(cli).await
}

// Re-export commonly used types
pub use config::Config;
pub use parser::{classify, Classification, Direction};
pub use skill_processor::{SkillContext, SkillProcessor};
