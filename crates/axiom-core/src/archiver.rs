//! Session archiver
//!
//! Glue between the storage layer and [`SessionRecord`]: builds the migrator
//! from [`Config`] once and turns records into archive bytes and back.

use axiom_navigation::AddressMigrator;
use axiom_session::{KeyedArchive, SessionRecord};
use url::Url;

use crate::config::Config;
use crate::Result;

#[derive(Debug, Clone)]
pub struct SessionArchiver {
    migrator: AddressMigrator,
}

impl SessionArchiver {
    pub fn new(config: &Config) -> Result<Self> {
        let migrator = AddressMigrator::new(config.migration()?);

        tracing::debug!(
            webserver_port = config.webserver_port,
            internal_base_url = %config.internal_base_url,
            "Session archiver ready"
        );

        Ok(Self { migrator })
    }

    pub fn migrator(&self) -> &AddressMigrator {
        &self.migrator
    }

    /// Snapshot of live navigation state, stamped with the current time
    pub fn record(&self, current_page: i64, urls: &[Url]) -> Result<SessionRecord> {
        Ok(SessionRecord::try_new(
            current_page,
            urls,
            axiom_session::now(),
            &self.migrator,
        )?)
    }

    pub fn archive(&self, record: &SessionRecord) -> Result<Vec<u8>> {
        let mut archive = KeyedArchive::new();
        record.encode(&mut archive, &self.migrator);
        Ok(archive.to_bytes()?)
    }

    /// Unreadable bytes are an error; unreadable fields inside a readable
    /// archive are tolerated by [`SessionRecord::decode`].
    pub fn restore(&self, bytes: &[u8]) -> Result<SessionRecord> {
        let archive = KeyedArchive::from_bytes(bytes)?;
        let record = SessionRecord::decode(&archive, &self.migrator);

        tracing::debug!(
            url_count = record.urls().len(),
            current_page = record.current_page(),
            "Restored session record"
        );

        Ok(record)
    }
}
