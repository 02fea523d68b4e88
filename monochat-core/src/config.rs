//! Configuration management
//!
//! Settings live in `settings.json` in the data directory:
//! ```json
//! {
//!   "app": {
//!     "timezone": "Europe/Kiev",
//!     "apiBaseUrl": "https://api.monobank.ua",
//!     "requestTimeoutSecs": 30,
//!     "defaultUser": "12345678-1234-1234-1234-123456789abc"
//!   }
//! }
//! ```
//! Keys this crate does not know about are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::monobank::{DEFAULT_TIMEOUT_SECS, MONOBANK_PRODUCTION_URL};
use crate::domain::result::Result;
use crate::services::date::{DateRangeResolver, DEFAULT_TIMEZONE};

/// Overrides `timezone`
pub const TIMEZONE_ENV: &str = "MONOCHAT_TIMEZONE";

/// Overrides `apiBaseUrl`, e.g. to point at a local mock
pub const API_URL_ENV: &str = "MONOCHAT_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_user: Option<Uuid>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Effective configuration: file values, then environment overrides
#[derive(Debug, Clone)]
pub struct Config {
    /// IANA zone name used for all date handling
    pub timezone: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// User for CLI commands run without `--user`
    pub default_user: Option<Uuid>,
    // Raw settings, kept so save() does not drop unknown keys
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            api_base_url: MONOBANK_PRODUCTION_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_user: None,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load from `data_dir`, applying `MONOCHAT_*` environment overrides.
    /// A missing or unreadable settings file yields defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_with(data_dir, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment lookup
    pub fn load_with(data_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let defaults = Self::default();
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Ok(Self {
            timezone: non_empty(env(TIMEZONE_ENV))
                .or_else(|| raw.app.timezone.clone())
                .unwrap_or(defaults.timezone),
            api_base_url: non_empty(env(API_URL_ENV))
                .or_else(|| raw.app.api_base_url.clone())
                .unwrap_or(defaults.api_base_url),
            request_timeout_secs: raw
                .app
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            default_user: raw.app.default_user,
            _raw_settings: raw,
        })
    }

    /// Write the managed fields back, keeping everything else in the file
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        settings.app.timezone = Some(self.timezone.clone());
        settings.app.api_base_url = Some(self.api_base_url.clone());
        settings.app.request_timeout_secs = Some(self.request_timeout_secs);
        settings.app.default_user = self.default_user;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Resolver for the configured zone; an unknown zone is a config error
    pub fn resolver(&self) -> Result<DateRangeResolver> {
        DateRangeResolver::from_name(&self.timezone)
    }
}
