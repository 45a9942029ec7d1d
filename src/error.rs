//! Error types for taskdeck
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, failed validation, bad config)
//! - 3: Not found (update targeting a nonexistent task id)
//! - 4: Operation failed (transport failure, server error, io)

use thiserror::Error;

/// Exit codes for the taskdeck CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A declared client-side form constraint failed (title length,
    /// due date in the past, email shape, age range).
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    // Not found (exit code 3)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status the client has no
    /// dedicated mapping for.
    #[error("Server rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::Validation { .. } => exit_codes::USER_ERROR,

            Error::TaskNotFound(_) => exit_codes::NOT_FOUND,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::Transport(_)
            | Error::Api { .. }
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, Error>;
