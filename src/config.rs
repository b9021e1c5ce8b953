//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/jobboard/config.toml`).
//! Every section and key is optional; missing values fall back to defaults.
//! `MONGO_URI`, `SECRET` and `PORT` environment variables override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::{JwtConfig, DEFAULT_EXPIRATION_HOURS};
use crate::infrastructure::crypto::password::DEFAULT_BCRYPT_COST;
use crate::infrastructure::database::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Path used when neither `--config` nor `JOBBOARD_CONFIG` is given.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jobboard")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds granted to in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            shutdown_timeout: 30,
        }
    }
}

/// Storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbDriver {
    #[default]
    MongoDb,
    /// Process-local maps, lost on restart
    Memory,
}

impl std::fmt::Display for DbDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbDriver::MongoDb => write!(f, "mongodb"),
            DbDriver::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub driver: DbDriver,
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pool_size: Option<u32>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            driver: DbDriver::default(),
            uri: defaults.uri,
            name: defaults.name,
            max_pool_size: defaults.max_pool_size,
        }
    }
}

impl DatabaseSection {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            uri: self.uri.clone(),
            name: self.name.clone(),
            max_pool_size: self.max_pool_size,
        }
    }

    /// Connection string with any password replaced, for logs.
    pub fn redacted_uri(&self) -> String {
        match (self.uri.find("://"), self.uri.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.uri[..scheme_end], &self.uri[at + 1..])
            }
            _ => self.uri.clone(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: JwtConfig::default().secret,
            jwt_expiration_hours: DEFAULT_EXPIRATION_HOURS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl SecurityConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            expiration_hours: self.jwt_expiration_hours,
            ..JwtConfig::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Put job mutations behind bearer authentication and stamp the creator
    pub require_auth: bool,
    /// Only the creator of an owned job may update or delete it
    pub enforce_ownership: bool,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            enforce_ownership: true,
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `MONGO_URI`, `SECRET` and `PORT` from `lookup`. An unparsable
    /// `PORT` is ignored.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGO_URI").filter(|v| !v.is_empty()) {
            self.database.uri = uri;
        }
        if let Some(secret) = lookup("SECRET").filter(|v| !v.is_empty()) {
            self.security.jwt_secret = secret;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret must not be empty".into()));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost must be within 4..=31, got {}",
                self.security.bcrypt_cost
            )));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.database.driver == DbDriver::MongoDb && self.database.uri.trim().is_empty() {
            return Err(ConfigError::Invalid("database.uri must not be empty".into()));
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.driver, DbDriver::MongoDb);
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert_eq!(config.security.jwt_expiration_hours, 72);
        assert_eq!(config.security.bcrypt_cost, 10);
        assert!(config.jobs.require_auth);
        assert!(config.jobs.enforce_ownership);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [database]
            driver = "memory"

            [jobs]
            require_auth = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.driver, DbDriver::Memory);
        assert!(!config.jobs.require_auth);
        assert!(config.jobs.enforce_ownership);
    }

    #[test]
    fn unknown_driver_is_rejected() {
        let err = AppConfig::from_toml("[database]\ndriver = \"postgres\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut config = AppConfig::default();
        config.apply_env_overrides_from(|key| match key {
            "MONGO_URI" => Some("mongodb://db:27017".into()),
            "SECRET" => Some("s3cret".into()),
            "PORT" => Some("5000".into()),
            _ => None,
        });

        assert_eq!(config.database.uri, "mongodb://db:27017");
        assert_eq!(config.security.jwt_secret, "s3cret");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn bad_port_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides_from(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn validation_rules() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = " ".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 3;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.security.jwt_expiration_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("jobboard-config-{}", uuid::Uuid::new_v4()))
            .join("config.toml");

        let mut config = AppConfig::default();
        config.server.port = 4321;
        config.save(&path).unwrap();

        let loaded = AppConfig::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.server.port, 4321);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn uri_credentials_are_redacted() {
        let mut section = DatabaseSection::default();
        section.uri = "mongodb://admin:pw@db:27017".into();
        assert_eq!(section.redacted_uri(), "mongodb://***@db:27017");

        section.uri = "mongodb://localhost:27017".into();
        assert_eq!(section.redacted_uri(), "mongodb://localhost:27017");
    }
}
