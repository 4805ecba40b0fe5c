//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] axiom_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] axiom_navigation::NavigationError),

    #[error("Configuration error: {0}")]
    Config(String),
}
