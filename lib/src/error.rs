/// Error type for the stash library
///
/// Every fallible operation in the crate returns [`Result`], so callers deal with
/// a single enum. Conversions from the underlying crates are derived or written
/// out below so `?` works across layers.
#[derive(Debug, thiserror::Error)]
pub enum StashError {
    /// Database-related errors (SQLite)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O errors (file operations, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// User with the given id does not exist
    #[error("User with ID {0} not found")]
    UserNotFound(i64),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password hashing errors
    #[error("Password hashing error: {0}")]
    Crypto(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bookmark import failed.
    ///
    /// The message is deliberately generic; the underlying parse or read error
    /// is only reachable through [`std::error::Error::source`].
    #[error("Failed to import Netscape backup")]
    ImportFailed(#[source] Box<StashError>),

    /// HTML parsing errors
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using StashError
pub type Result<T> = std::result::Result<T, StashError>;

impl From<String> for StashError {
    fn from(s: String) -> Self {
        StashError::Other(s)
    }
}

impl From<&str> for StashError {
    fn from(s: &str) -> Self {
        StashError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for StashError {
    fn from(err: serde_yaml::Error) -> Self {
        StashError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for StashError {
    fn from(err: serde_json::Error) -> Self {
        StashError::Json(err.to_string())
    }
}

impl From<argon2::Error> for StashError {
    fn from(err: argon2::Error) -> Self {
        StashError::Crypto(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for StashError {
    fn from(err: argon2::password_hash::Error) -> Self {
        StashError::Crypto(err.to_string())
    }
}
