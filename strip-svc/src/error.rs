//! Error types for whitelist document parsing

use thiserror::Error;

/// Errors that can occur while parsing a variant collection document.
#[derive(Debug, Error)]
pub enum SvcError {
    /// A required key was absent from a record line.
    ///
    /// The `keywords` key is guaranteed by the format to be present on
    /// every variant entry line; its absence means the record is
    /// structurally broken and the whole document is rejected.
    #[error("value not found for key `{key}` in line `{line}`")]
    MissingKey { key: String, line: String },
}
