use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use mealsmenu::cli::Cli;
use mealsmenu::env_manager;

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set RUST_LOG, so it is read before the logger starts
    env_manager::load_env_file();

    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    mealsmenu::run(cli).await
}
