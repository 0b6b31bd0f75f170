use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::day_term::day_term_for_date;
use crate::envelope::{Intent, RequestKind, SkillRequest, Slot};
use crate::parser::classify;
use crate::response::render_unrecognized;
use crate::skill_processor::{SkillContext, SkillProcessor};
use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rustyline::DefaultEditor;
use std::collections::HashMap;

/// One-line summary of how a phrase is understood, without any lookup
pub fn describe_phrase(phrase: &str) -> String {
    match classify(phrase) {
        Some(classification) => {
            format!("{}: {}", classification.direction, classification.description)
        }
        None => render_unrecognized(phrase).speech,
    }
}

pub struct Application {
    config: Config,
}

impl Application {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Some(Commands::Serve { addr }) => {
                crate::api_server::start_api_server(self.config.clone(), addr).await
            }
            Some(Commands::Ask { phrase, user }) => {
                let phrase = phrase.join(" ");
                let answer = match user {
                    Some(user) => self.ask_sheet(&user, &phrase).await?,
                    None => describe_phrase(&phrase),
                };
                println!("{}", answer);
                Ok(())
            }
            Some(Commands::Day { date, timezone }) => {
                let now = Utc::now().with_timezone(&self.zone(timezone.as_deref())?);
                println!("{}", day_term_for_date(&now, date));
                Ok(())
            }
            Some(Commands::Console) | None => self.run_console(),
        }
    }

    fn zone(&self, timezone: Option<&str>) -> Result<Tz> {
        match timezone {
            Some(name) => name.parse().map_err(|e| anyhow!("Unknown timezone '{}': {}", name, e)),
            None => self.config.default_timezone(),
        }
    }

    /// Run a description question through the skill exactly as the HTTP endpoint would
    async fn ask_sheet(&self, user_id: &str, phrase: &str) -> Result<String> {
        let ctx = SkillContext::new(self.config.clone())?;
        let slot = Slot { value: Some(phrase.to_string()), resolved: None };
        let request = SkillRequest {
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            timezone: None,
            request: RequestKind::Intent {
                intent: Intent {
                    name: "GetMealByDescriptionIntent".to_string(),
                    slots: HashMap::from([("description".to_string(), slot)]),
                },
            },
        };

        let response = SkillProcessor::new().process(&ctx, &request).await;
        Ok(response.speech.unwrap_or_default())
    }

    fn run_console(&self) -> Result<()> {
        log::info!("Starting Meals Menu console");
        let zone = self.config.default_timezone()?;
        let mut rl = DefaultEditor::new()?;

        println!("Ask a meal question, or 'day YYYY-MM-DD'. Type 'exit' to quit.");
        let prompt = "meals> ";

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    match line {
                        "exit" | "quit" => break,
                        "help" => {
                            println!(
                                "  <question>         - Show how a meal question is understood"
                            );
                            println!("  day <YYYY-MM-DD>   - Describe a date relative to today");
                            println!("  exit               - Leave the console");
                        }
                        _ => match line.strip_prefix("day ") {
                            Some(date) => match date.trim().parse::<NaiveDate>() {
                                Ok(date) => {
                                    let now = Utc::now().with_timezone(&zone);
                                    println!("{}", day_term_for_date(&now, date));
                                }
                                Err(e) => log::error!("Invalid date '{}': {}", date.trim(), e),
                            },
                            None => println!("{}", describe_phrase(line)),
                        },
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}
