//! Session history of a single tab
//!
//! A [`SessionRecord`] is immutable: any change in navigation state produces
//! a new record. Every address goes through the [`AddressMigrator`] before it
//! is stored, whether the record is built from live state or decoded from
//! an archive.
//!
//! The two construction paths have different contracts:
//! - [`SessionRecord::new`] trusts its caller and only asserts the invariants
//!   in debug builds ([`SessionRecord::try_new`] reports them as errors)
//! - [`SessionRecord::decode`] never fails, so historical data always restores

use axiom_navigation::AddressMigrator;
use url::Url;

use crate::coder::{Decoder, Encoder};
use crate::error::SessionError;
use crate::timestamp::Timestamp;
use crate::Result;

pub const CURRENT_PAGE_KEY: &str = "currentPage";
pub const URLS_KEY: &str = "urls";
pub const LAST_USED_TIME_KEY: &str = "lastUsedTime";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Offset from the newest entry: 0 is the last url, `1 - len` the first
    current_page: i64,
    /// Navigation history, oldest first
    urls: Vec<Url>,
    last_used_time: Timestamp,
}

impl SessionRecord {
    /// Creates a record from live navigation state.
    ///
    /// `current_page` must be in `(-urls.len(), 0]` and `urls` must not be
    /// empty. Violations are caller bugs and panic in debug builds.
    pub fn new(
        current_page: i64,
        urls: &[Url],
        last_used_time: Timestamp,
        migrator: &AddressMigrator,
    ) -> Self {
        debug_assert!(!urls.is_empty(), "Session has at least one entry");
        debug_assert!(
            is_valid_page_index(current_page, urls.len()),
            "Session index is valid"
        );

        Self::build(current_page, urls, last_used_time, migrator)
    }

    /// Same as [`SessionRecord::new`] but reports invariant violations
    pub fn try_new(
        current_page: i64,
        urls: &[Url],
        last_used_time: Timestamp,
        migrator: &AddressMigrator,
    ) -> Result<Self> {
        validate(current_page, urls.len())?;
        Ok(Self::build(current_page, urls, last_used_time, migrator))
    }

    /// Restores a record from an archive.
    ///
    /// Missing or malformed fields fall back to defaults (0 / empty history);
    /// nothing is validated.
    pub fn decode<D: Decoder + ?Sized>(decoder: &D, migrator: &AddressMigrator) -> Self {
        let current_page = decoder.decode_as_int(CURRENT_PAGE_KEY);
        let urls = decoder.decode_urls(URLS_KEY).unwrap_or_default();
        let last_used_time = decoder.decode_as_u64(LAST_USED_TIME_KEY);

        if urls.is_empty() {
            tracing::warn!(current_page, "Restored session record has no urls");
        }

        Self::build(current_page, &urls, last_used_time, migrator)
    }

    /// Writes the record, migrating the urls again on the way out
    pub fn encode<E: Encoder + ?Sized>(&self, encoder: &mut E, migrator: &AddressMigrator) {
        encoder.encode_int(CURRENT_PAGE_KEY, self.current_page);
        encoder.encode_urls(URLS_KEY, &migrator.migrate(&self.urls));
        // The archive only has signed integers
        encoder.encode_int(LAST_USED_TIME_KEY, self.last_used_time as i64);
    }

    /// Interchange form with stringified numbers, for tooling and debugging
    pub fn to_json(&self) -> serde_json::Value {
        let urls: Vec<&str> = self.urls.iter().map(Url::as_str).collect();

        serde_json::json!({
            "currentPage": self.current_page.to_string(),
            "lastUsedTime": self.last_used_time.to_string(),
            "urls": urls,
        })
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn last_used_time(&self) -> Timestamp {
        self.last_used_time
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// The page the tab was showing, `None` for a corrupt restored record
    pub fn current_url(&self) -> Option<&Url> {
        let len = i64::try_from(self.urls.len()).ok()?;
        let index = usize::try_from(self.current_page.checked_add(len - 1)?).ok()?;
        self.urls.get(index)
    }

    fn build(
        current_page: i64,
        urls: &[Url],
        last_used_time: Timestamp,
        migrator: &AddressMigrator,
    ) -> Self {
        Self {
            current_page,
            urls: migrator.migrate(urls),
            last_used_time,
        }
    }
}

pub fn is_valid_page_index(current_page: i64, len: usize) -> bool {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    current_page > -len && current_page <= 0
}

/// Checks the invariants fresh records must satisfy
pub fn validate(current_page: i64, len: usize) -> Result<()> {
    if len == 0 {
        return Err(SessionError::EmptyHistory);
    }
    if !is_valid_page_index(current_page, len) {
        return Err(SessionError::PageIndexOutOfRange {
            index: current_page,
            len,
        });
    }
    Ok(())
}
