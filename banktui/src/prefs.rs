//! Persisted user preferences, stored as JSON in the config directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug)]
pub enum PrefsError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    NoConfigDir,
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {}", e),
            PrefsError::Serialization(e) => write!(f, "Serialization error: {}", e),
            PrefsError::NoConfigDir => write!(f, "Could not find config directory"),
        }
    }
}

impl std::error::Error for PrefsError {}

impl From<std::io::Error> for PrefsError {
    fn from(err: std::io::Error) -> Self {
        PrefsError::Io(err)
    }
}

impl From<serde_json::Error> for PrefsError {
    fn from(err: serde_json::Error) -> Self {
        PrefsError::Serialization(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
}

/// Async preference store using tokio::fs for non-blocking file I/O
#[derive(Clone)]
pub struct PrefsStore {
    config_dir: PathBuf,
}

impl PrefsStore {
    pub async fn new() -> Result<Self, PrefsError> {
        let config_dir = dirs::config_dir()
            .ok_or(PrefsError::NoConfigDir)?
            .join("banktui");
        Self::with_dir(config_dir).await
    }

    pub async fn with_dir(config_dir: PathBuf) -> Result<Self, PrefsError> {
        fs::create_dir_all(&config_dir).await?;
        Ok(Self { config_dir })
    }

    fn prefs_path(&self) -> PathBuf {
        self.config_dir.join("preferences.json")
    }

    /// Load preferences, falling back to defaults when no file exists.
    pub async fn load(&self) -> Result<Preferences, PrefsError> {
        let path = self.prefs_path();
        if !path.exists() {
            return Ok(Preferences::default());
        }

        let data = fs::read_to_string(&path).await?;
        let prefs: Preferences = serde_json::from_str(&data)?;
        Ok(prefs)
    }

    pub async fn save(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(self.prefs_path(), json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::with_dir(dir.path().to_path_buf()).await.unwrap();
        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn saved_theme_survives_reload() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::with_dir(dir.path().to_path_buf()).await.unwrap();

        store
            .save(&Preferences { theme: Theme::Light })
            .await
            .unwrap();

        let reloaded = PrefsStore::with_dir(dir.path().to_path_buf()).await.unwrap();
        let prefs = reloaded.load().await.unwrap();
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = PrefsStore::with_dir(dir.path().to_path_buf()).await.unwrap();
        tokio::fs::write(dir.path().join("preferences.json"), "{not json")
            .await
            .unwrap();
        assert!(matches!(
            store.load().await,
            Err(PrefsError::Serialization(_))
        ));
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
