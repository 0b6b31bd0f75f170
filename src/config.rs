use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternate config file
pub const CONFIG_PATH_ENV: &str = "MEALSMENU_CONFIG_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub skill: SkillConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub meals_api: MealsApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Title shown on every card
    pub app_name: String,
    /// Used when a request does not carry the device timezone
    pub default_timezone: String,
    pub setup_url: String,
    /// How the setup URL is read out loud
    pub spoken_setup_url: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            app_name: "Meals Menu".to_string(),
            default_timezone: "America/Los_Angeles".to_string(),
            setup_url: "https://tinyurl.com/mealsmenu".to_string(),
            spoken_setup_url: "tiny URL dot com, forward slash, meals menu".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 3000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MealsApiConfig {
    pub timeout_secs: u64,
    /// Short links are resolved as `<short_link_base>/<keyword>`
    pub short_link_base: String,
}

impl Default for MealsApiConfig {
    fn default() -> Self {
        Self { timeout_secs: 10, short_link_base: "https://www.yellkey.com".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Defaults to `~/.mealsmenu`
    pub state_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// The configured default timezone as an IANA zone
    pub fn default_timezone(&self) -> Result<Tz> {
        let zone = &self.skill.default_timezone;
        zone.parse::<Tz>().map_err(|e| anyhow!("Invalid default timezone '{}': {}", zone, e))
    }

    pub fn server_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().with_context(|| format!("Invalid server address {}", addr))
    }
}

fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let proj_dirs = ProjectDirs::from("com", "mealsmenu", "mealsmenu")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.skill.app_name, "Meals Menu");
        assert_eq!(config.default_timezone().unwrap(), chrono_tz::America::Los_Angeles);
        assert_eq!(config.server_addr().unwrap().port(), 3000);
        assert_eq!(config.meals_api.timeout_secs, 10);
        assert!(config.storage.state_dir.is_none());
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.skill.default_timezone = "America/New_York".to_string();
        config.server.port = 8080;
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.default_timezone()?, chrono_tz::America::New_York);
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.skill.app_name, config.skill.app_name);

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[server]\nport = 9000\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.skill.setup_url, "https://tinyurl.com/mealsmenu");
        Ok(())
    }

    #[test]
    fn test_invalid_timezone_is_an_error() {
        let mut config = Config::default();
        config.skill.default_timezone = "Mars/Olympus_Mons".to_string();
        assert!(config.default_timezone().is_err());
    }
}
