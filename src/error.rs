//! Error types for the text mutation engine.
//!
//! This module defines all error types that can occur while opening, mutating and
//! saving a document.

/// Result type alias for text mutation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during text mutation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input document is unreadable, corrupt or encrypted
    #[error("Failed to open document '{path}': {reason}")]
    DocumentOpen {
        /// Path that was opened
        path: String,
        /// Reason for the failure
        reason: String,
    },

    /// Text could not be inserted because the font is unavailable
    #[error("Failed to insert text with font '{font}': {reason}")]
    TextInsert {
        /// Font that was requested
        font: String,
        /// Reason for the failure
        reason: String,
    },

    /// Output document could not be written
    #[error("Failed to save document '{path}': {reason}")]
    DocumentSave {
        /// Destination path
        path: String,
        /// Reason for the failure
        reason: String,
    },

    /// Malformed or unknown operation request
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors the font fallback can recover from.
    pub fn is_text_insert(&self) -> bool {
        matches!(self, Error::TextInsert { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_open_error() {
        let err = Error::DocumentOpen {
            path: "in.pdf".to_string(),
            reason: "not a document".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("in.pdf"));
        assert!(msg.contains("not a document"));
    }

    #[test]
    fn test_text_insert_error() {
        let err = Error::TextInsert {
            font: "ArialMT".to_string(),
            reason: "font not resolvable".to_string(),
        };
        assert!(err.is_text_insert());
        assert!(format!("{}", err).contains("ArialMT"));
    }

    #[test]
    fn test_document_save_error() {
        let err = Error::DocumentSave {
            path: "/nonexistent/out.pdf".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(!err.is_text_insert());
        let msg = format!("{}", err);
        assert!(msg.contains("/nonexistent/out.pdf"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(format!("{}", err).contains("missing"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
