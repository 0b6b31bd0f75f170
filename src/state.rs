use crate::meals::ApiEndpoint;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tokio::task;

const STATE_DIR: &str = ".mealsmenu";
const SETTINGS_FILE: &str = "users.json";
const TMP_EXTENSION: &str = "json.tmp";
// Maximum allowed size for the settings file (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// What a user has linked to the skill
#[derive(Debug, Default)]
pub struct UserSettings {
    pub meals_api_url_base: Option<String>,
    pub passphrase: Option<SecretString>,
}

impl UserSettings {
    /// The linked spreadsheet API, if the user has set one up
    pub fn endpoint(&self) -> Option<ApiEndpoint<'_>> {
        let base_url = self.meals_api_url_base.as_deref()?;
        Some(ApiEndpoint { base_url, passphrase: self.passphrase.as_ref() })
    }
}

/// On-disk form of [`UserSettings`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meals_api_url_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    passphrase: Option<String>,
}

impl From<&StoredSettings> for UserSettings {
    fn from(stored: &StoredSettings) -> Self {
        Self {
            meals_api_url_base: stored.meals_api_url_base.clone(),
            passphrase: stored.passphrase.clone().map(SecretString::from),
        }
    }
}

impl From<&UserSettings> for StoredSettings {
    fn from(settings: &UserSettings) -> Self {
        Self {
            meals_api_url_base: settings.meals_api_url_base.clone(),
            passphrase: settings.passphrase.as_ref().map(|p| p.expose_secret().to_string()),
        }
    }
}

/// Per-user settings persistence
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Settings for `user_id`, empty when the user has never linked anything
    async fn get(&self, user_id: &str) -> Result<UserSettings>;

    async fn put(&self, user_id: &str, settings: &UserSettings) -> Result<()>;
}

/// Settings kept in process memory only
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    users: Mutex<HashMap<String, StoredSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, user_id: &str) -> Result<UserSettings> {
        let users = self.users.lock().await;
        Ok(users.get(user_id).map(UserSettings::from).unwrap_or_default())
    }

    async fn put(&self, user_id: &str, settings: &UserSettings) -> Result<()> {
        let mut users = self.users.lock().await;
        users.insert(user_id.to_string(), StoredSettings::from(settings));
        Ok(())
    }
}

/// Settings kept as one JSON map in the state directory
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Store under `state_dir`, or `~/.mealsmenu` when none is configured
    pub fn new(state_dir: Option<&Path>) -> Result<Self> {
        let state_dir = match state_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let home_dir =
                    dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
                home_dir.join(STATE_DIR)
            }
        };
        std::fs::create_dir_all(&state_dir)
            .with_context(|| format!("Failed to create state directory {}", state_dir.display()))?;
        Ok(Self { path: state_dir.join(SETTINGS_FILE), lock: Mutex::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load(path: &Path) -> Result<HashMap<String, StoredSettings>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    // Check file size before loading
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(anyhow!("Settings file exceeds size limit"));
    }

    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| anyhow!("Failed to parse settings file: {}", e))
}

/// Write the whole map to a sibling temp file, then rename it over `path`
fn save(path: &Path, users: &HashMap<String, StoredSettings>) -> Result<()> {
    let tmp_path = path.with_extension(TMP_EXTENSION);
    let file = File::create(&tmp_path)
        .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, users)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, user_id: &str) -> Result<UserSettings> {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        let users = task::spawn_blocking(move || load(&path)).await??;
        Ok(users.get(user_id).map(UserSettings::from).unwrap_or_default())
    }

    async fn put(&self, user_id: &str, settings: &UserSettings) -> Result<()> {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        let user_id = user_id.to_string();
        let stored = StoredSettings::from(settings);
        task::spawn_blocking(move || {
            let mut users = load(&path)?;
            users.insert(user_id, stored);
            save(&path, &users)
        })
        .await?
    }
}
