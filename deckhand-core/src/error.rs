//! Error types for deckhand-core

use thiserror::Error;

/// Main error type for the deckhand-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Studio service API error
    #[error("API error: {0}")]
    Api(String),

    /// Conversation not found
    #[error("conversation not found: {0}")]
    ConversationNotFound(String),
}

/// Result type alias for deckhand-core
pub type Result<T> = std::result::Result<T, Error>;
