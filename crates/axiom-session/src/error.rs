//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session history must have at least one entry")]
    EmptyHistory,

    #[error("Page index {index} is out of range for {len} history entries")]
    PageIndexOutOfRange { index: i64, len: usize },

    #[error("Archive error: {0}")]
    Archive(#[from] serde_json::Error),
}
