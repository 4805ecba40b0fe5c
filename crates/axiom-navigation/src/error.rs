//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid migration config: {0}")]
    InvalidConfig(String),
}
