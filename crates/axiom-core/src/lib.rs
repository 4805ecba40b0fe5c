//! AXIOM Core
//!
//! Application-level wiring for tab session history: configuration,
//! logging and the archiver the storage layer talks to.

mod archiver;
mod config;
mod error;

pub use archiver::SessionArchiver;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use axiom_navigation::{
    AddressMigrator, InternalUrl, Migration, MigrationConfig, MigrationDiagnostic,
    NavigationError, NestedRepair, RewriteRule, Url,
};
pub use axiom_session::{
    Decoder, Encoder, KeyedArchive, SessionError, SessionRecord, Timestamp,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging, `RUST_LOG` overrides the configured filter
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}
