//! AXIOM Session History
//!
//! Persists and restores the navigation history of a single tab:
//! - An ordered list of visited urls, oldest first
//! - The index of the current page, counted back from the newest entry
//! - When the tab was last used
//!
//! Records are written through a caller-supplied keyed coder. Stored urls are
//! migrated to the current internal scheme on every load and save.

mod coder;
mod error;
mod record;
mod timestamp;

pub use coder::{ArchiveValue, Decoder, Encoder, KeyedArchive};
pub use error::SessionError;
pub use record::{
    is_valid_page_index, validate, SessionRecord, CURRENT_PAGE_KEY, LAST_USED_TIME_KEY, URLS_KEY,
};
pub use timestamp::{now, to_datetime, Timestamp};

pub type Result<T> = std::result::Result<T, SessionError>;
