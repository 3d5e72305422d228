//! Unified error types for chatpulse.
//!
//! This module provides a single [`ChatpulseError`] enum that covers all error
//! cases in the library, plus a crate-local [`Result`] alias.
//!
//! # Error Handling Philosophy
//!
//! Transcript exports are noisy by nature, so parsing and analysis never fail
//! on individual malformed lines — they degrade by discarding or appending.
//! Only input that cannot be obtained or decoded at all is fatal. The optional
//! LLM advisory step can fail independently ([`ChatpulseError::Advisory`])
//! without invalidating the rest of the report.

use std::io;
#[cfg(feature = "archive")]
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatpulse operations.
///
/// # Example
///
/// ```rust
/// use chatpulse::error::Result;
/// use chatpulse::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpulseError>;

/// The error type for all chatpulse operations.
///
/// Each variant contains context about what went wrong and, where applicable,
/// the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpulseError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export bundle doesn't exist
    /// - Permission denied
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript bytes are not valid UTF-8.
    ///
    /// This is the only fatal condition for the analysis core: an input that
    /// cannot be decoded as text cannot be parsed at all.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The export bundle could not be read as a ZIP archive.
    #[cfg(feature = "archive")]
    #[error("Archive error{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Archive {
        /// The underlying ZIP error
        #[source]
        source: zip::result::ZipError,
        /// The bundle path, if available
        path: Option<PathBuf>,
    },

    /// No chat transcript was found inside the export bundle.
    ///
    /// Either the requested entry name does not exist, or the archive
    /// contains no `.txt` file at all.
    #[error("No chat transcript found in bundle: {message}")]
    ChatFileNotFound {
        /// Description of what was looked for
        message: String,
    },

    /// The input doesn't match the expected structure.
    #[error("Invalid {what}: {message}")]
    InvalidFormat {
        /// What was being interpreted (e.g. "timestamp", "transcript")
        what: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The optional LLM advisory call did not produce a result.
    ///
    /// Never fatal: callers drop the advisory suggestions and keep the rest
    /// of the report.
    #[error("Advisory unavailable: {0}")]
    Advisory(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpulseError {
    /// Creates a UTF-8 decoding error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatpulseError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an archive error from a ZIP failure.
    #[cfg(feature = "archive")]
    pub fn archive(source: zip::result::ZipError, path: Option<PathBuf>) -> Self {
        ChatpulseError::Archive { source, path }
    }

    /// Creates a chat-file-not-found error.
    pub fn chat_file_not_found(message: impl Into<String>) -> Self {
        ChatpulseError::ChatFileNotFound {
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(what: &'static str, message: impl Into<String>) -> Self {
        ChatpulseError::InvalidFormat {
            what,
            message: message.into(),
        }
    }

    /// Creates an advisory error.
    pub fn advisory(message: impl Into<String>) -> Self {
        ChatpulseError::Advisory(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpulseError::Io(_))
    }

    /// Returns `true` if this is a UTF-8 decoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatpulseError::Utf8 { .. })
    }

    /// Returns `true` if this is an advisory (non-fatal) error.
    pub fn is_advisory(&self) -> bool {
        matches!(self, ChatpulseError::Advisory(_))
    }

    /// Returns `true` if the analysis itself failed, as opposed to the
    /// optional advisory step.
    pub fn is_fatal(&self) -> bool {
        !self.is_advisory()
    }
}

impl From<std::string::FromUtf8Error> for ChatpulseError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatpulseError::Utf8 {
            context: "transcript decoding".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
