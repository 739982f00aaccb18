//! Global apptsync configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cache::{DirStore, KvCache};
use crate::constants::{DEFAULT_SERVER_URL, DEFAULT_SESSION_ID};
use crate::conversation::SessionId;
use crate::error::{ApptsyncError, ApptsyncResult};

static DEFAULT_CACHE_DIR: &str = "~/.cache/apptsync";
static DEFAULT_POLL_INTERVAL: &str = "5s";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

fn default_poll_interval() -> String {
    DEFAULT_POLL_INTERVAL.to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

/// Configuration at ~/.config/apptsync/config.toml
///
/// Every key can be overridden from the environment with an `APPTSYNC_`
/// prefix, e.g. `APPTSYNC_SERVER_URL`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApptsyncConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_session_id")]
    pub session_id: String,

    /// Humantime duration between polls ("5s", "1m")
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for ApptsyncConfig {
    fn default() -> Self {
        ApptsyncConfig {
            server_url: default_server_url(),
            session_id: default_session_id(),
            poll_interval: default_poll_interval(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl ApptsyncConfig {
    pub fn config_path() -> ApptsyncResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ApptsyncError::Config("Could not determine config directory".into()))?
            .join("apptsync");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first run.
    pub fn load() -> ApptsyncResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ApptsyncResult<Self> {
        let config: ApptsyncConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("APPTSYNC"))
            .build()
            .map_err(|e| ApptsyncError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ApptsyncError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ApptsyncResult<()> {
        if self.server_url.trim().is_empty() {
            return Err(ApptsyncError::Config("server_url must not be empty".into()));
        }
        if self.session_id.trim().is_empty() {
            return Err(ApptsyncError::Config("session_id must not be empty".into()));
        }
        self.poll_interval()?;
        Ok(())
    }

    pub fn poll_interval(&self) -> ApptsyncResult<Duration> {
        let interval = humantime::parse_duration(&self.poll_interval).map_err(|e| {
            ApptsyncError::Config(format!("Invalid poll_interval '{}': {e}", self.poll_interval))
        })?;

        if interval.is_zero() {
            return Err(ApptsyncError::Config("poll_interval must be greater than zero".into()));
        }
        Ok(interval)
    }

    pub fn session_id(&self) -> SessionId {
        SessionId::new(self.session_id.clone())
    }

    pub fn cache_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.cache_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The on-disk appointment cache this config points at.
    pub fn cache(&self) -> KvCache<DirStore> {
        KvCache::new(DirStore::new(self.cache_path()))
    }

    /// The effective settings, as they would be written to config.toml.
    pub fn to_toml(&self) -> ApptsyncResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApptsyncError::Serialization(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ApptsyncResult<()> {
        let contents = format!(
            "\
# apptsync configuration

# Appointment service:
# server_url = \"{DEFAULT_SERVER_URL}\"

# Conversation the client speaks in:
# session_id = \"{DEFAULT_SESSION_ID}\"

# Time between appointment polls:
# poll_interval = \"{DEFAULT_POLL_INTERVAL}\"

# Where the last known appointment list is kept:
# cache_dir = \"{DEFAULT_CACHE_DIR}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApptsyncError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ApptsyncError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apptsync/config.toml");

        ApptsyncConfig::create_default_config(&path).unwrap();
        let config = ApptsyncConfig::load_from(&path).unwrap();

        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.session_id(), SessionId::default());
        assert_eq!(config.poll_interval().unwrap(), Duration::from_secs(5));
        assert_eq!(config.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
    }

    #[test]
    fn test_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "server_url = \"http://clinic.local:9000\"\npoll_interval = \"1m 30s\"\ncache_dir = \"/tmp/appts\"\n",
        )
        .unwrap();

        let config = ApptsyncConfig::load_from(&path).unwrap();

        assert_eq!(config.server_url, "http://clinic.local:9000");
        assert_eq!(config.poll_interval().unwrap(), Duration::from_secs(90));
        assert_eq!(config.cache_path(), PathBuf::from("/tmp/appts"));
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval = \"soon\"\n").unwrap();

        let err = ApptsyncConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid poll_interval"));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = ApptsyncConfig {
            poll_interval: "0s".to_string(),
            ..Default::default()
        };
        assert!(config.poll_interval().is_err());
    }

    #[test]
    fn test_empty_session_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session_id = \"  \"\n").unwrap();

        assert!(ApptsyncConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_effective_settings_render_as_toml() {
        let config = ApptsyncConfig {
            server_url: "http://clinic.local:9000".to_string(),
            ..Default::default()
        };

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("server_url = \"http://clinic.local:9000\""));
        assert!(rendered.contains("poll_interval = \"5s\""));

        let parsed: ApptsyncConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.session_id, DEFAULT_SESSION_ID);
    }

    #[test]
    fn test_cache_dir_tilde_is_expanded() {
        let config = ApptsyncConfig::default();
        let path = config.cache_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with(".cache/apptsync"));
    }
}
