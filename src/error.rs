//! Unified error types for chatmap.
//!
//! This module provides a single [`ChatmapError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - Only structural failures are fatal: an unrecognizable export format or a
//!   transcript that does not begin with a message header. Everything else
//!   (an unparseable timestamp, an unrecognized attachment filename) degrades
//!   within a single message and never aborts a conversion run.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatmap operations.
///
/// # Example
///
/// ```rust
/// use chatmap::error::Result;
/// use chatmap::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatmapError>;

/// The error type for all chatmap operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatmapError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No known export format matches the transcript's opening lines.
    ///
    /// Detection tests every known header pattern against the first
    /// non-blank lines of the transcript. If none matches, the file is
    /// either not a WhatsApp export or was produced by an application
    /// version this crate does not know about.
    #[error(
        "unrecognized export format: none of the first {scanned} non-blank lines \
         matches a known message header pattern"
    )]
    UnrecognizedFormat {
        /// How many non-blank lines were examined
        scanned: usize,
    },

    /// The transcript's first line is not a valid message header.
    ///
    /// A continuation line can only extend an existing message; a transcript
    /// that opens with one has nothing to continue, so the whole conversion
    /// is aborted rather than producing a silently-wrong document.
    #[error("malformed transcript: first line is not a message header: {line:?}")]
    MalformedTranscript {
        /// The offending first line
        line: String,
    },

    /// A message was constructed with no body lines at all.
    ///
    /// Every message carries at least one body line (attachment-only
    /// messages keep the marker text as a placeholder), so this is rejected
    /// at the construction boundary.
    #[error("message from {} has an empty body", .sender.as_deref().unwrap_or("<notice>"))]
    EmptyBody {
        /// Sender of the rejected message, if any
        sender: Option<String>,
    },

    /// An invalid media filename pattern was supplied in the configuration.
    #[error("invalid media filename pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when rendered output is not valid UTF-8.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatmapError {
    /// Creates an unrecognized-format error.
    pub fn unrecognized_format(scanned: usize) -> Self {
        ChatmapError::UnrecognizedFormat { scanned }
    }

    /// Creates a malformed-transcript error from the offending first line.
    pub fn malformed_transcript(line: impl Into<String>) -> Self {
        ChatmapError::MalformedTranscript { line: line.into() }
    }

    /// Creates an empty-body error.
    pub fn empty_body(sender: Option<String>) -> Self {
        ChatmapError::EmptyBody { sender }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatmapError::Io(_))
    }

    /// Returns `true` if this is an unrecognized-format error.
    pub fn is_unrecognized_format(&self) -> bool {
        matches!(self, ChatmapError::UnrecognizedFormat { .. })
    }

    /// Returns `true` if this is a malformed-transcript error.
    pub fn is_malformed_transcript(&self) -> bool {
        matches!(self, ChatmapError::MalformedTranscript { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
