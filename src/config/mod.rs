use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_cache")]
    pub cache: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_week_start")]
    pub week_start: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_cache() -> String {
    Config::cache_file().to_string_lossy().to_string()
}
fn default_api_base() -> String {
    "http://localhost:3001/api".to_string()
}
fn default_week_start() -> String {
    "sunday".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: default_cache(),
            api_base: default_api_base(),
            token: None,
            week_start: default_week_start(),
            request_timeout_secs: default_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("babysteps")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".babysteps")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("babysteps.conf")
    }

    pub fn cache_file() -> PathBuf {
        Self::config_dir().join("babysteps.sqlite")
    }

    /// Defaults when the file is absent; an unparsable file is an error.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<PathBuf> {
        let path = Self::config_file();
        fs::create_dir_all(Self::config_dir())?;
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(path)
    }

    /// Create the config directory and, unless `is_test`, the config file.
    pub fn init_all(cache: Option<&str>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = if Self::config_file().exists() {
            Self::load()?
        } else {
            Self::default()
        };

        if let Some(name) = cache {
            let p = expand_tilde(name);
            config.cache = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            config.save()?;
        }
        Ok(config)
    }

    pub fn cache_path(&self) -> PathBuf {
        expand_tilde(&self.cache)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn first_weekday(&self) -> AppResult<Weekday> {
        match self.week_start.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sun),
            "monday" | "mon" => Ok(Weekday::Mon),
            other => Err(AppError::Config(format!(
                "week_start must be 'sunday' or 'monday' (got '{other}')"
            ))),
        }
    }
}
