//! Service configuration
//!
//! Layering, lowest to highest precedence: built-in defaults, an optional TOML
//! file, `ADVISOR_*` environment variables, then command-line flags (applied
//! by the binary).

use crate::errors::ServiceError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7860;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Interface to bind (all interfaces by default)
    pub host: String,
    pub port: u16,
    /// Directory holding encoders.json and model.json
    pub artifacts_dir: PathBuf,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifacts_dir: PathBuf::from("artifacts"),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load defaults, the TOML file (explicit path or `ADVISOR_CONFIG`), and env overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ServiceError> {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os("ADVISOR_CONFIG").map(PathBuf::from));

        let mut config = match file {
            Some(file) => Self::load_config_from_file(&file)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_config_from_file(path: &Path) -> Result<Self, ServiceError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ServiceError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ServiceError> {
        toml::from_str(content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config file: {e}")))
    }

    /// Apply `ADVISOR_*` overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ADVISOR_HOST").filter(|v| !v.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = lookup("ADVISOR_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ServiceError::Config(format!("Invalid ADVISOR_PORT: {port}")))?;
        }
        if let Some(dir) = lookup("ADVISOR_ARTIFACTS_DIR").filter(|v| !v.trim().is_empty()) {
            self.artifacts_dir = PathBuf::from(dir.trim());
        }
        if let Some(level) = lookup("ADVISOR_LOG").filter(|v| !v.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:7860");
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServiceConfig::from_toml_str("port = 8080\nartifacts_dir = \"/srv/advisor\"\n")
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.artifacts_dir, PathBuf::from("/srv/advisor"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ServiceConfig::from_toml_str("prot = 1").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("ADVISOR_HOST", "127.0.0.1"),
                ("ADVISOR_PORT", " 9000 "),
                ("ADVISOR_LOG", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = ServiceConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("ADVISOR_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("advisor.toml");
        fs::write(&path, "host = \"127.0.0.1\"\nlog_level = \"warn\"\n").unwrap();

        let config = ServiceConfig::load_config_from_file(&path).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_level, "warn");

        assert!(ServiceConfig::load_config_from_file(&dir.path().join("missing.toml")).is_err());
    }
}
