//! AXIOM Navigation - internal URLs and address migration
//!
//! Special pages live on the browser's own internal scheme. Older versions
//! served them from an embedded web server on `localhost`, and persisted
//! session history still references those addresses. This crate recognizes
//! both forms and rewrites stored history into the current one:
//! - Legacy error pages → session-restore redirects
//! - Authorization tokens stripped from internal pages

mod config;
mod error;
mod internal;
mod migration;

pub use config::{
    MigrationConfig, DEFAULT_INTERNAL_BASE_URL, DEFAULT_SESSION_RESTORE_PATH,
    DEFAULT_WEBSERVER_PORT,
};
pub use error::NavigationError;
pub use internal::{InternalUrl, AUTHORIZATION_PARAM, ERROR_PAGE_PATH, URL_PARAM};
pub use migration::{AddressMigrator, Migration, MigrationDiagnostic, NestedRepair, RewriteRule};

pub use url::Url;

pub type Result<T> = std::result::Result<T, NavigationError>;
