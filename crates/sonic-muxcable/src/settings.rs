//! Settings file support for the muxcable utilities.
//!
//! Loads database connection settings from a TOML file.
//! Default location: /etc/sonic/muxcable.conf

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sonic_db::{MemoryDb, RedisConfig, RedisDb, SonicDb};
use tracing::{debug, info};

use crate::error::{MuxCableError, MuxCableResult};

/// Default settings file location.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/sonic/muxcable.conf";

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Redis host
    #[serde(default = "default_redis_host")]
    pub redis_host: String,

    /// Redis port
    #[serde(default = "default_redis_port")]
    pub redis_port: u16,

    /// Redis database number for CONFIG_DB
    #[serde(default = "default_config_db_number")]
    pub config_db_number: u32,

    /// Redis database number for STATE_DB
    #[serde(default = "default_state_db_number")]
    pub state_db_number: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Serve the databases from JSON mock tables in this directory instead of Redis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_tables_dir: Option<PathBuf>,
}

/// Complete muxcable utility settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MuxCableSettings {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseSettings,
}

fn default_redis_host() -> String {
    "127.0.0.1".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_config_db_number() -> u32 {
    4
}

fn default_state_db_number() -> u32 {
    6
}

fn default_connection_timeout() -> u64 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            redis_host: default_redis_host(),
            redis_port: default_redis_port(),
            config_db_number: default_config_db_number(),
            state_db_number: default_state_db_number(),
            connection_timeout_secs: default_connection_timeout(),
            mock_tables_dir: None,
        }
    }
}

impl MuxCableSettings {
    /// Load settings from file, falling back to defaults if the file is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> MuxCableResult<Self> {
        let path = path.as_ref();

        let settings: Self = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                MuxCableError::Settings(format!(
                    "Failed to parse settings file {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Settings file {} not found, using defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(MuxCableError::Io(e)),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> MuxCableResult<()> {
        if self.database.redis_host.is_empty() {
            return Err(MuxCableError::Settings(
                "redis_host must not be empty".to_string(),
            ));
        }

        if self.database.redis_port == 0 {
            return Err(MuxCableError::Settings(
                "redis_port must be > 0".to_string(),
            ));
        }

        if self.database.connection_timeout_secs == 0 {
            return Err(MuxCableError::Settings(
                "connection_timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connection_timeout_secs)
    }

    /// Redis connection parameters
    pub fn redis_config(&self) -> RedisConfig {
        let mut config = RedisConfig::new(&self.database.redis_host, self.database.redis_port)
            .with_connection_timeout(self.connection_timeout());
        config.config_db_number = self.database.config_db_number;
        config.state_db_number = self.database.state_db_number;
        config
    }

    /// Opens the database backend selected by these settings.
    pub async fn open_db(&self) -> MuxCableResult<Box<dyn SonicDb>> {
        match &self.database.mock_tables_dir {
            Some(dir) => {
                info!("Using mock tables from {}", dir.display());
                Ok(Box::new(MemoryDb::from_mock_tables(dir)?))
            }
            None => Ok(Box::new(RedisDb::connect(&self.redis_config()).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonic_db::DbId;

    #[test]
    fn test_default_settings() {
        let settings = MuxCableSettings::default();
        assert_eq!(settings.database.redis_host, "127.0.0.1");
        assert_eq!(settings.database.redis_port, 6379);
        assert_eq!(settings.database.config_db_number, 4);
        assert_eq!(settings.database.state_db_number, 6);
        assert!(settings.database.mock_tables_dir.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
[database]
redis_host = "192.168.1.1"
state_db_number = 16
mock_tables_dir = "/tmp/mock_tables"
"#;
        let settings: MuxCableSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database.redis_host, "192.168.1.1");
        assert_eq!(settings.database.state_db_number, 16);
        assert_eq!(
            settings.database.mock_tables_dir,
            Some(PathBuf::from("/tmp/mock_tables"))
        );
        // Unspecified values should use defaults
        assert_eq!(settings.database.redis_port, 6379);
    }

    #[test]
    fn test_validate_invalid_redis_port() {
        let mut settings = MuxCableSettings::default();
        settings.database.redis_port = 0;
        assert!(matches!(
            settings.validate(),
            Err(MuxCableError::Settings(_))
        ));
    }

    #[test]
    fn test_redis_config_carries_db_numbers() {
        let mut settings = MuxCableSettings::default();
        settings.database.state_db_number = 16;
        settings.database.connection_timeout_secs = 2;

        let config = settings.redis_config();
        assert_eq!(config.db_number(DbId::StateDb), 16);
        assert_eq!(config.db_number(DbId::ConfigDb), 4);
        assert_eq!(config.connection_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_load_nonexistent_file_defaults() {
        let settings = MuxCableSettings::load_or_default("/nonexistent/muxcable.conf").unwrap();
        assert_eq!(settings.database.redis_host, "127.0.0.1");
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muxcable.conf");
        fs::write(&path, "[database\nredis_port = ").unwrap();

        let err = MuxCableSettings::load_or_default(&path).unwrap_err();
        assert!(matches!(err, MuxCableError::Settings(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muxcable.conf");
        fs::write(&path, "[database]\nredis_port = 0\n").unwrap();

        assert!(MuxCableSettings::load_or_default(&path).is_err());
    }

    #[tokio::test]
    async fn test_open_db_with_mock_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config_db.json"),
            r#"{"MUX_CABLE|Ethernet0": {"state": "auto"}}"#,
        )
        .unwrap();

        let mut settings = MuxCableSettings::default();
        settings.database.mock_tables_dir = Some(dir.path().to_path_buf());

        let db = settings.open_db().await.unwrap();
        assert_eq!(
            db.keys(DbId::ConfigDb, "MUX_CABLE").await.unwrap(),
            vec!["Ethernet0".to_string()]
        );
    }
}
