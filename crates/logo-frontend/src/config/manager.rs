//! Where preferences are kept between sessions

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use super::AppConfig;

/// Shared configuration manager type
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config could not be encoded: {0}")]
    Encode(#[from] ron::Error),
    #[error("config file is malformed: {0}")]
    Decode(#[from] ron::error::SpannedError),
    #[error("browser storage unavailable: {0}")]
    Storage(String),
}

/// Backing store of the serialized preferences
#[derive(Debug, Clone, PartialEq, Eq)]
enum Store {
    /// RON file under the OS config dir
    File(PathBuf),
    /// `localStorage` entry of the page
    #[cfg(target_arch = "wasm32")]
    Browser(&'static str),
    /// Nothing is read or written
    Memory,
}

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "logo-studio.config";

impl Store {
    #[cfg(not(target_arch = "wasm32"))]
    fn platform() -> Self {
        match dirs::config_dir() {
            Some(dir) => Store::File(dir.join("logo-studio").join("config.ron")),
            None => Store::Memory,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn platform() -> Self {
        Store::Browser(STORAGE_KEY)
    }

    /// `Ok(None)` when nothing has been saved yet
    fn read(&self) -> Result<Option<String>, ConfigError> {
        match self {
            Store::File(path) => match std::fs::read_to_string(path) {
                Ok(content) => Ok(Some(content)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            #[cfg(target_arch = "wasm32")]
            Store::Browser(key) => browser::read(key),
            Store::Memory => Ok(None),
        }
    }

    fn write(&self, content: &str) -> Result<(), ConfigError> {
        match self {
            Store::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, content)?;
                Ok(())
            }
            #[cfg(target_arch = "wasm32")]
            Store::Browser(key) => browser::write(key, content),
            Store::Memory => Ok(()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::ConfigError;

    fn storage() -> Result<web_sys::Storage, ConfigError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| ConfigError::Storage("localStorage is not accessible".into()))
    }

    pub fn read(key: &str) -> Result<Option<String>, ConfigError> {
        storage()?
            .get_item(key)
            .map_err(|e| ConfigError::Storage(format!("{:?}", e)))
    }

    pub fn write(key: &str, content: &str) -> Result<(), ConfigError> {
        storage()?
            .set_item(key, content)
            .map_err(|e| ConfigError::Storage(format!("{:?}", e)))
    }
}

/// Current preferences plus whether they differ from what was saved
pub struct ConfigManager {
    config: AppConfig,
    store: Store,
    dirty: bool,
}

impl ConfigManager {
    /// Load the saved preferences, falling back to defaults
    pub fn new() -> Self {
        Self::load(Store::platform())
    }

    /// A manager that never persists anything
    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            config,
            store: Store::Memory,
            dirty: false,
        }
    }

    fn load(store: Store) -> Self {
        let config = match store.read().and_then(|content| content.map(|c| parse(&c)).transpose()) {
            Ok(Some(config)) => {
                tracing::info!("Loaded preferences from {:?}", store);
                config
            }
            Ok(None) => {
                tracing::info!("No saved preferences, using defaults");
                AppConfig::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring saved preferences: {}", e);
                AppConfig::new()
            }
        };

        Self {
            config,
            store,
            dirty: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutable access, marks the preferences as changed
    pub fn config_mut(&mut self) -> &mut AppConfig {
        self.dirty = true;
        &mut self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist the preferences if they changed
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }
        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())?;
        self.store.write(&content)?;
        tracing::info!("Saved preferences to {:?}", self.store);
        self.dirty = false;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::new();
        self.dirty = true;
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(ron::from_str(content)?)
}

pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiTheme;

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(parse("(version: "), Err(ConfigError::Decode(_))));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut manager = ConfigManager::in_memory(AppConfig::new());
        assert!(!manager.is_dirty());

        manager.config_mut().ui.theme = UiTheme::Light;
        assert!(manager.is_dirty());
        manager.save().unwrap();
        assert!(!manager.is_dirty());

        manager.reset_to_defaults();
        assert!(manager.is_dirty());
        assert_eq!(manager.config().ui.theme, UiTheme::Dark);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("logo-studio-config-{}", std::process::id()));
        let store = Store::File(dir.join("config.ron"));

        let mut manager = ConfigManager::load(store.clone());
        assert_eq!(manager.config().ui.theme, UiTheme::Dark);
        manager.config_mut().ui.theme = UiTheme::Light;
        manager.save().unwrap();

        let reloaded = ConfigManager::load(store);
        assert_eq!(reloaded.config().ui.theme, UiTheme::Light);
        let _ = std::fs::remove_dir_all(dir);
    }
}
