//! Error types for codex operations.

use miette::Diagnostic;

/// Main error type for codex boundary operations.
///
/// The core tree operations (render, filter, apply edits) are total and do
/// not produce errors; everything here comes from the serialization boundary
/// or an external collaborator.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum CodexError {
    /// Serialization/deserialization error
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// Document persistence collaborator failure
    #[error("document store error: {0}")]
    #[diagnostic(code(codex::store))]
    Store(String),

    /// Image upload collaborator failure
    #[error(transparent)]
    #[diagnostic_source]
    Upload(#[from] UploadError),
}

/// Failure surface of the image upload collaborator.
///
/// These are the only user-visible errors in the core's boundary: a failed
/// upload aborts the insertion and leaves the document untouched.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("image exceeds the {limit_bytes} byte upload limit")]
    #[diagnostic(code(codex::upload::too_large))]
    TooLarge { limit_bytes: usize },

    #[error("unsupported image type: {mime}")]
    #[diagnostic(code(codex::upload::unsupported))]
    UnsupportedType { mime: String },

    #[error("upload failed: {0}")]
    #[diagnostic(code(codex::upload::transport))]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_messages() {
        let err = UploadError::TooLarge { limit_bytes: 5 * 1024 * 1024 };
        assert_eq!(err.to_string(), "image exceeds the 5242880 byte upload limit");

        let err = CodexError::from(UploadError::Transport("connection reset".into()));
        assert_eq!(err.to_string(), "upload failed: connection reset");
    }
}
