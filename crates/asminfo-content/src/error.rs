//! Error types for asminfo-content

/// Result type for asminfo-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in asminfo-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File extension '{extension}' is not supported")]
    UnsupportedDialect { extension: String },
}
