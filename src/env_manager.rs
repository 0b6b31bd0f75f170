use log::{debug, info};
use std::env;

// Names of optional environment variables
pub const OPTIONAL_ENV_VARS: &[&str] = &["RUST_LOG", crate::config::CONFIG_PATH_ENV];

/// Load variables from a `.env` file when one is present
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file found or error loading it: {}", e),
    }

    for var in OPTIONAL_ENV_VARS {
        if let Ok(value) = env::var(var) {
            debug!("{} = {}", var, value);
        }
    }
}
