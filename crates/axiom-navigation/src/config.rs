//! Migration configuration
//!
//! Everything the migrator needs to know about the running application is
//! passed in through [`MigrationConfig`]: the port of the embedded web server
//! that older versions served special pages from, and the layout of the
//! current internal scheme.

use url::Url;

use crate::error::NavigationError;
use crate::Result;

pub const DEFAULT_WEBSERVER_PORT: u16 = 6571;
pub const DEFAULT_INTERNAL_BASE_URL: &str = "internal://local";
pub const DEFAULT_SESSION_RESTORE_PATH: &str = "session-restore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    webserver_port: u16,
    /// Normalized base URL without a trailing slash
    internal_base_url: String,
    internal_scheme: String,
    session_restore_path: String,
    /// `http://localhost:<port>/` as the url crate serializes it
    webserver_origin: String,
}

impl MigrationConfig {
    pub fn new(
        webserver_port: u16,
        internal_base_url: &str,
        session_restore_path: &str,
    ) -> Result<Self> {
        if webserver_port == 0 {
            return Err(NavigationError::InvalidConfig(
                "web server port cannot be 0".to_string(),
            ));
        }

        let base = Url::parse(internal_base_url.trim()).map_err(|e| {
            NavigationError::InvalidConfig(format!(
                "internal base URL {:?}: {}",
                internal_base_url, e
            ))
        })?;
        if base.cannot_be_a_base() || base.query().is_some() || base.fragment().is_some() {
            return Err(NavigationError::InvalidConfig(format!(
                "internal base URL {:?} must be a plain base URL",
                internal_base_url
            )));
        }

        let session_restore_path = session_restore_path.trim().trim_matches('/');
        if session_restore_path.is_empty() {
            return Err(NavigationError::InvalidConfig(
                "session restore path cannot be empty".to_string(),
            ));
        }

        // Port 80 is elided by the url crate, so the origin has to go through it too
        let origin = Url::parse(&format!("http://localhost:{}/", webserver_port))
            .map_err(|e| NavigationError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            webserver_port,
            internal_base_url: base.as_str().trim_end_matches('/').to_string(),
            internal_scheme: base.scheme().to_string(),
            session_restore_path: session_restore_path.to_string(),
            webserver_origin: origin.as_str().to_string(),
        })
    }

    pub fn webserver_port(&self) -> u16 {
        self.webserver_port
    }

    pub fn internal_base_url(&self) -> &str {
        &self.internal_base_url
    }

    pub fn internal_scheme(&self) -> &str {
        &self.internal_scheme
    }

    pub fn session_restore_path(&self) -> &str {
        &self.session_restore_path
    }

    /// Root of every page the embedded web server used to serve
    pub fn webserver_origin(&self) -> &str {
        &self.webserver_origin
    }

    /// Error page prefix written by versions that still used the web server
    pub fn legacy_error_page_prefix(&self) -> String {
        format!("{}errors/error.html?url=", self.webserver_origin)
    }

    /// Current session-restore redirect prefix
    pub fn session_restore_prefix(&self) -> String {
        format!(
            "{}/{}?url=",
            self.internal_base_url, self.session_restore_path
        )
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            webserver_port: DEFAULT_WEBSERVER_PORT,
            internal_base_url: DEFAULT_INTERNAL_BASE_URL.to_string(),
            internal_scheme: "internal".to_string(),
            session_restore_path: DEFAULT_SESSION_RESTORE_PATH.to_string(),
            webserver_origin: format!("http://localhost:{}/", DEFAULT_WEBSERVER_PORT),
        }
    }
}
