use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Runtime settings, merged from defaults, an optional `textblast.toml`,
/// and `TEXTBLAST_`-prefixed environment variables (highest priority).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub user_id: String,
    /// Number of sending backends available, used to cap daily limits.
    pub backend_count: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://textblast.db".to_string(),
            user_id: "local".to_string(),
            backend_count: 1,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("textblast.toml"))
            .merge(Env::prefixed("TEXTBLAST_"))
            .extract()
            .map_err(|e| AppError::ConfigurationError(format!("Failed to load settings: {}", e)))
    }
}
