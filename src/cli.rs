use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

/// Meals Menu - answers "when did we last have..." questions from a meal planning sheet
#[derive(Debug, Parser)]
#[command(name = "mealsmenu")]
#[command(about = "Answers questions about past and planned meals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters the interactive console)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the skill HTTP endpoint
    #[command(alias = "server")]
    Serve {
        /// Address to listen on (defaults to the configured host and port)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },

    /// Ask a meal question
    Ask {
        /// The question, e.g. "when did we last have lasagna"
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,

        /// Look the answer up in this user's linked sheet instead of only classifying it
        #[arg(long)]
        user: Option<String>,
    },

    /// Describe a date relative to today
    Day {
        /// Date (YYYY-MM-DD)
        #[arg(required = true)]
        date: NaiveDate,

        /// IANA timezone to treat as local (defaults to the configured one)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Interactive console for trying out questions
    #[command(alias = "repl")]
    Console,
}
