//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Activities whose ID contains this text are left out of the streak
    /// report. Empty disables hiding.
    pub hidden_activity_marker: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("hidden_activity_marker", &self.hidden_activity_marker)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("streaks.db"),
            hidden_activity_marker: "freeze".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (STREAKS_*)
        figment = figment.merge(Env::prefixed("STREAKS_"));

        figment.extract()
    }

    /// Whether an activity is hidden from the streak report.
    pub fn is_hidden(&self, activity_id: &str) -> bool {
        !self.hidden_activity_marker.is_empty()
            && activity_id
                .to_lowercase()
                .contains(&self.hidden_activity_marker.to_lowercase())
    }
}

/// Returns the platform-specific config directory for streaks.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("streaks"))
}

/// Returns the platform-specific data directory for streaks.
///
/// On Linux: `~/.local/share/streaks`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("streaks"))
}
