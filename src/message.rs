//! The message record produced by transcript assembly.
//!
//! This module provides [`Message`], the immutable representation of one chat
//! message, together with [`Attachment`] and [`MediaKind`] for messages that
//! reference inline media.
//!
//! # Overview
//!
//! A message consists of:
//! - **Required**: `timestamp` (plus its original text) and `body`
//! - **Optional**: `sender` (`None` marks a system notice) and `attachment`
//!
//! Messages are created only during assembly and are immutable afterwards:
//! all fields are private, construction validates the body is non-empty, and
//! the only mutation surface is the consuming [`with_attachment`]
//! (`Message::with_attachment`) builder used by the attachment resolver.
//!
//! # Examples
//!
//! ```
//! use chatmap::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 12, 9)
//!     .unwrap()
//!     .and_hms_opt(8, 54, 43)
//!     .unwrap();
//! let msg = Message::new(
//!     Some("Alice".to_string()),
//!     ts,
//!     "9/12/24, 08:54:43",
//!     vec!["Hello".to_string(), "world".to_string()],
//! )
//! .unwrap();
//!
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.body(), "Hello\nworld");
//! assert!(!msg.is_system_notice());
//! ```

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ChatmapError, Result};

/// Media classification derived from an attachment's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (jpg, png, gif, webp, ...)
    Image,
    /// Video clip (mp4, mov, 3gp, ...)
    Video,
    /// Voice note or audio file (opus, mp3, m4a, ...)
    Audio,
    /// Anything else shared as a file (pdf, vcf, ...)
    Document,
    /// No media kind could be determined; used for redacted exports where
    /// the application replaced the file with an omission marker.
    None,
}

impl MediaKind {
    /// Classifies a media kind from a file extension (case-insensitive).
    ///
    /// Unknown extensions classify as [`MediaKind::Document`]: the file is
    /// real, we just don't know how to embed it inline.
    pub fn from_extension(ext: &str) -> MediaKind {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" | "bmp" => MediaKind::Image,
            "mp4" | "mov" | "avi" | "mkv" | "webm" | "3gp" => MediaKind::Video,
            "opus" | "mp3" | "m4a" | "ogg" | "aac" | "wav" | "flac" => MediaKind::Audio,
            _ => MediaKind::Document,
        }
    }

    /// Returns `true` for every kind except [`MediaKind::None`].
    pub fn is_media(self) -> bool {
        !matches!(self, MediaKind::None)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Document => write!(f, "document"),
            MediaKind::None => write!(f, "none"),
        }
    }
}

/// A reference to inline media attached to a message.
///
/// `filename` is relative to the transcript's source directory and is never
/// checked for existence here; resolution to a real file is the renderer's
/// explicit, fallible step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Media filename relative to the source directory; `None` for redacted
    /// exports where only the omission marker survived.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub filename: Option<String>,

    /// Kind classified from the filename's extension.
    pub kind: MediaKind,
}

impl Attachment {
    /// Creates an attachment with a resolved filename.
    pub fn resolved(filename: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            filename: Some(filename.into()),
            kind,
        }
    }

    /// Creates the attachment-shaped record for a redacted export.
    pub fn redacted() -> Self {
        Self {
            filename: None,
            kind: MediaKind::None,
        }
    }

    /// Returns `true` if this attachment carries no filename.
    pub fn is_redacted(&self) -> bool {
        self.filename.is_none()
    }

    /// Returns the filename's extension, if any.
    pub fn extension(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
    }
}

/// One chat message, immutable once assembled.
///
/// Messages are totally ordered by transcript position. The parser never
/// reorders them, even when clock anomalies put timestamps out of
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author; `None` for system notices
    /// (group-membership changes, encryption banners).
    sender: Option<String>,

    /// Parsed calendar date + time. Transcripts carry no timezone, so the
    /// naive type is the honest representation.
    timestamp: NaiveDateTime,

    /// The timestamp exactly as written in the transcript, kept so the
    /// renderer can display the original text rather than a reformatting.
    timestamp_text: String,

    /// Body lines joined with `\n`; never empty. Attachment-only messages
    /// keep the marker text as their placeholder body.
    body: String,

    /// Resolved media reference, if the body carried an attachment marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    attachment: Option<Attachment>,
}

impl Message {
    /// Creates a message from its header fields and body lines.
    ///
    /// Rejects an empty line sequence at the boundary: every message owns at
    /// least one body line (which may itself be an empty string, since blank
    /// separator lines inside a message are preserved).
    pub fn new(
        sender: Option<String>,
        timestamp: NaiveDateTime,
        timestamp_text: impl Into<String>,
        lines: Vec<String>,
    ) -> Result<Self> {
        if lines.is_empty() {
            return Err(ChatmapError::empty_body(sender));
        }
        Ok(Self {
            sender,
            timestamp,
            timestamp_text: timestamp_text.into(),
            body: lines.join("\n"),
            attachment: None,
        })
    }

    /// Builder method attaching a resolved media reference.
    ///
    /// Used by the attachment resolver; the body text is left untouched so
    /// the record keeps the transcript text verbatim (the renderer decides
    /// what to do with the marker line).
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the sender name, or `None` for system notices.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the parsed timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the timestamp as written in the transcript.
    pub fn timestamp_text(&self) -> &str {
        &self.timestamp_text
    }

    /// Returns the body, lines joined with `\n`.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Iterates over the body's lines.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body.split('\n')
    }

    /// Returns the attachment reference, if any.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Returns `true` if this message has no sender (join/leave/encryption
    /// notices).
    pub fn is_system_notice(&self) -> bool {
        self.sender.is_none()
    }

    /// Returns `true` if an attachment marker was resolved on this message.
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 9)
            .unwrap()
            .and_hms_opt(8, 54, 43)
            .unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(
            Some("Alice".into()),
            ts(),
            "9/12/24, 08:54:43",
            vec!["Hello".into()],
        )
        .unwrap();
        assert_eq!(msg.sender(), Some("Alice"));
        assert_eq!(msg.body(), "Hello");
        assert_eq!(msg.timestamp_text(), "9/12/24, 08:54:43");
        assert!(msg.attachment().is_none());
        assert!(!msg.is_system_notice());
    }

    #[test]
    fn test_message_rejects_empty_body() {
        let err = Message::new(Some("Alice".into()), ts(), "x", vec![]).unwrap_err();
        assert!(matches!(err, ChatmapError::EmptyBody { .. }));
    }

    #[test]
    fn test_message_multiline_body() {
        let msg = Message::new(
            Some("Alice".into()),
            ts(),
            "x",
            vec!["Hello".into(), String::new(), "world".into()],
        )
        .unwrap();
        assert_eq!(msg.body(), "Hello\n\nworld");
        let lines: Vec<&str> = msg.body_lines().collect();
        assert_eq!(lines, vec!["Hello", "", "world"]);
    }

    #[test]
    fn test_system_notice_has_no_sender() {
        let msg = Message::new(None, ts(), "x", vec!["Alice left".into()]).unwrap();
        assert!(msg.is_system_notice());
        assert_eq!(msg.sender(), None);
    }

    #[test]
    fn test_with_attachment_keeps_body() {
        let msg = Message::new(
            Some("Carol".into()),
            ts(),
            "x",
            vec!["photo.jpg (file attached)".into()],
        )
        .unwrap()
        .with_attachment(Attachment::resolved("photo.jpg", MediaKind::Image));

        assert!(msg.has_attachment());
        assert_eq!(msg.body(), "photo.jpg (file attached)");
        assert_eq!(
            msg.attachment().unwrap().filename.as_deref(),
            Some("photo.jpg")
        );
    }

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_extension("jpg"), MediaKind::Image);
        assert_eq!(MediaKind::from_extension("JPG"), MediaKind::Image);
        assert_eq!(MediaKind::from_extension("mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_extension("opus"), MediaKind::Audio);
        assert_eq!(MediaKind::from_extension("pdf"), MediaKind::Document);
        assert_eq!(MediaKind::from_extension("xyz"), MediaKind::Document);
    }

    #[test]
    fn test_media_kind_display() {
        assert_eq!(MediaKind::Image.to_string(), "image");
        assert_eq!(MediaKind::None.to_string(), "none");
    }

    #[test]
    fn test_attachment_redacted() {
        let att = Attachment::redacted();
        assert!(att.is_redacted());
        assert_eq!(att.kind, MediaKind::None);
        assert!(att.extension().is_none());
    }

    #[test]
    fn test_attachment_extension() {
        let att = Attachment::resolved("00000002-PHOTO-2017-05-24-06-15-02.jpg", MediaKind::Image);
        assert_eq!(att.extension(), Some("jpg"));
    }

    #[test]
    fn test_message_serialization_skips_missing_attachment() {
        let msg = Message::new(Some("Alice".into()), ts(), "x", vec!["hi".into()]).unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("Alice"));
        assert!(!json.contains("attachment"));
    }
}
