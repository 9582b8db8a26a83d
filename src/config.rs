use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Server settings, read from an optional YAML file and then overridden by
/// command-line flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub database: String,
    pub cors_origin: Option<String>,
    pub log_level: String,
    pub bcrypt_cost: u32,
    /// Return `null` instead of the bcrypt hash in `User.password`.
    pub redact_password_hash: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database: "orgdir.db".to_string(),
            cors_origin: None,
            log_level: "info".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            redact_password_hash: false,
        }
    }
}

/// Values given on the command line. `None` keeps the file or default value.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database: Option<String>,
    pub cors_origin: Option<String>,
    pub log_level: Option<String>,
    pub bcrypt_cost: Option<u32>,
    pub redact_password_hash: Option<bool>,
}

impl ServerConfig {
    /// Defaults when `path` is `None`, otherwise the YAML file at `path`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("Invalid config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if overrides.cors_origin.is_some() {
            self.cors_origin = overrides.cors_origin;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        if let Some(cost) = overrides.bcrypt_cost {
            self.bcrypt_cost = cost;
        }
        if let Some(redact) = overrides.redact_password_hash {
            self.redact_password_hash = redact;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database, "orgdir.db");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(!config.redact_password_hash);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ServerConfig::from_yaml("port: 8080\nredact_password_hash: true\n").unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.redact_password_hash);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database: \":memory:\"\ncors_origin: http://localhost:5173").unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database, ":memory:");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ServerConfig::load(Some(Path::new("/nonexistent/orgdir.yaml"))).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = ServerConfig::default().apply(ConfigOverrides {
            port: Some(4000),
            bcrypt_cost: Some(4),
            ..Default::default()
        });
        assert_eq!(config.port, 4000);
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.database, "orgdir.db");
    }
}
