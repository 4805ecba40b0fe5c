//! Browser configuration

use serde::{Deserialize, Serialize};

use axiom_navigation::{
    MigrationConfig, DEFAULT_INTERNAL_BASE_URL, DEFAULT_SESSION_RESTORE_PATH,
    DEFAULT_WEBSERVER_PORT,
};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port the embedded web server listened on in older versions
    pub webserver_port: u16,
    /// Base of the internal scheme, e.g. `internal://local`
    pub internal_base_url: String,
    /// Path of the session-restore page under the internal base
    pub session_restore_path: String,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn migration(&self) -> Result<MigrationConfig> {
        Ok(MigrationConfig::new(
            self.webserver_port,
            &self.internal_base_url,
            &self.session_restore_path,
        )?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webserver_port: DEFAULT_WEBSERVER_PORT,
            internal_base_url: DEFAULT_INTERNAL_BASE_URL.to_string(),
            session_restore_path: DEFAULT_SESSION_RESTORE_PATH.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "webserver_port": 9000 }"#).unwrap();
        assert_eq!(config.webserver_port, 9000);
        assert_eq!(config.internal_base_url, "internal://local");
        assert_eq!(config.log_filter, "info");

        let migration = config.migration().unwrap();
        assert_eq!(
            migration.legacy_error_page_prefix(),
            "http://localhost:9000/errors/error.html?url="
        );
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(CoreError::Config(_))
        ));

        let config = Config {
            internal_base_url: "local".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.migration(), Err(CoreError::Navigation(_))));
    }
}
