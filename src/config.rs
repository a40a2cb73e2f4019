use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::ThemeMode;

/// Persisted settings: the theme preference plus the email-relay
/// credentials. Everything is optional; a missing file means defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub theme: Option<ThemeMode>,
    pub relay_service_id: Option<String>,
    pub relay_template_id: Option<String>,
    pub relay_public_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write-through for the theme toggle. The caller treats a failure as
    /// non-fatal; the in-memory mode stays authoritative for the session.
    pub fn save_theme_to(path: &Path, mode: ThemeMode) -> Result<()> {
        let mut config = Self::load_from(path).unwrap_or_default();
        config.theme = Some(mode);
        config.save_to(path)
    }

    /// Theme preference, defaulting to light when unset or unreadable.
    pub fn theme(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    /// Relay credentials resolve env vars first, then the config file,
    /// the same order API keys are looked up elsewhere.
    pub fn relay_credentials(&self) -> Option<(String, String, String)> {
        let service = std::env::var("FOLIO_RELAY_SERVICE_ID")
            .ok()
            .or_else(|| self.relay_service_id.clone())?;
        let template = std::env::var("FOLIO_RELAY_TEMPLATE_ID")
            .ok()
            .or_else(|| self.relay_template_id.clone())?;
        let key = std::env::var("FOLIO_RELAY_PUBLIC_KEY")
            .ok()
            .or_else(|| self.relay_public_key.clone())?;
        Some((service, template, key))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("folio").join("config.json"))
    }
}
