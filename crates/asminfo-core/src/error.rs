//! Error types for asminfo-core

/// Result type for asminfo-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while applying updates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from asminfo-fs
    #[error(transparent)]
    Fs(#[from] asminfo_fs::Error),

    /// Error from asminfo-content
    #[error(transparent)]
    Content(#[from] asminfo_content::Error),

    #[error("Current value '{value}' for attribute '{attribute}' is not in a correct version format")]
    InvalidVersionValue { attribute: String, value: String },

    #[error("Specified value '{format}' for attribute '{attribute}' is not a correct version format")]
    InvalidVersionFormat { attribute: String, format: String },

    #[error("Unknown token '{token}'")]
    UnknownToken { token: String },

    #[error("Invalid date format '{format}'")]
    InvalidDateFormat { format: String },
}
