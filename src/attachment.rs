//! Attachment marker resolution.
//!
//! The exporting application replaces inline media with literal text
//! markers. Three forms exist in the wild:
//!
//! - Android export-with-media: `00000002-PHOTO-2017-05-24-06-15-02.jpg (file attached)`
//! - iOS export-with-media: `<attached: 00000002-PHOTO-2017-05-24-06-15-02.jpg>`
//! - Redacted export: `<Media omitted>` (no filename survives)
//!
//! Resolution is pure string classification: the resolver tags the message
//! record with a media reference but never touches the filesystem and never
//! rewrites the body, so the record keeps the transcript text verbatim.
//! Existence checks belong to the renderer.

use regex::Regex;

use crate::config::{DEFAULT_MEDIA_FILENAME_PATTERN, ParserConfig};
use crate::error::Result;
use crate::message::{Attachment, MediaKind, Message};

/// Marker emitted when media was stripped from the export entirely.
pub const MEDIA_OMITTED_MARKER: &str = "<Media omitted>";

/// Suffix of the Android export-with-media marker.
pub const FILE_ATTACHED_SUFFIX: &str = "(file attached)";

/// Prefix of the iOS export-with-media marker.
pub const ATTACHED_PREFIX: &str = "<attached:";

/// One recognized marker occurrence within a body line.
enum Marker<'a> {
    /// `<Media omitted>` with no filename
    Omitted,
    /// A filename reference from either export-with-media shape
    File(&'a str),
}

/// Matches a single body line against the known marker forms.
fn match_marker(line: &str) -> Option<Marker<'_>> {
    let trimmed = line.trim();
    if trimmed == MEDIA_OMITTED_MARKER {
        return Some(Marker::Omitted);
    }
    if let Some(prefix) = trimmed.strip_suffix(FILE_ATTACHED_SUFFIX) {
        let name = prefix.trim_end();
        if !name.is_empty() {
            return Some(Marker::File(name));
        }
    }
    if let Some(inner) = trimmed
        .strip_prefix(ATTACHED_PREFIX)
        .and_then(|rest| rest.strip_suffix('>'))
    {
        let name = inner.trim();
        if !name.is_empty() {
            return Some(Marker::File(name));
        }
    }
    None
}

/// Returns `true` if a body line is one of the recognized attachment
/// markers. The renderer uses this to substitute the embed for the marker
/// line on attachment-bearing messages.
pub fn is_attachment_marker(line: &str) -> bool {
    match_marker(line).is_some()
}

/// Classifies attachment markers in assembled messages.
///
/// # Example
///
/// ```rust
/// use chatmap::attachment::AttachmentResolver;
/// use chatmap::{MediaKind, Message};
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2017, 5, 24)
///     .unwrap()
///     .and_hms_opt(6, 15, 2)
///     .unwrap();
/// let msg = Message::new(
///     Some("Carol".to_string()),
///     ts,
///     "24/5/17, 06:15:02",
///     vec!["00000002-PHOTO-2017-05-24-06-15-02.jpg (file attached)".to_string()],
/// )?;
///
/// let resolved = AttachmentResolver::new().resolve(msg);
/// let attachment = resolved.attachment().unwrap();
/// assert_eq!(attachment.kind, MediaKind::Image);
/// # Ok::<(), chatmap::ChatmapError>(())
/// ```
#[derive(Debug)]
pub struct AttachmentResolver {
    filename_pattern: Regex,
}

impl AttachmentResolver {
    /// Creates a resolver using the default filename convention.
    pub fn new() -> Self {
        Self {
            filename_pattern: Regex::new(DEFAULT_MEDIA_FILENAME_PATTERN)
                .expect("valid default media pattern"),
        }
    }

    /// Creates a resolver from a parser configuration.
    ///
    /// # Errors
    ///
    /// [`crate::ChatmapError::Pattern`] if the configured filename pattern
    /// is not a valid regex.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            filename_pattern: Regex::new(&config.media_filename_pattern)?,
        })
    }

    /// Scans a message body for an attachment marker and tags the record.
    ///
    /// - A filename matching the configured convention resolves to a media
    ///   reference classified by extension.
    /// - The bare omission marker resolves to an attachment-shaped record
    ///   with no filename, so the renderer can show a placeholder.
    /// - A marker whose filename does not match the convention leaves the
    ///   message unchanged: the literal text stays in the body and nothing
    ///   is silently lost.
    pub fn resolve(&self, message: Message) -> Message {
        let attachment = message.body_lines().find_map(|line| match match_marker(line)? {
            Marker::Omitted => Some(Attachment::redacted()),
            Marker::File(name) => {
                if self.filename_pattern.is_match(name) {
                    let ext = std::path::Path::new(name)
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .unwrap_or("");
                    Some(Attachment::resolved(name, MediaKind::from_extension(ext)))
                } else {
                    None
                }
            }
        });

        match attachment {
            Some(attachment) => message.with_attachment(attachment),
            None => message,
        }
    }
}

impl Default for AttachmentResolver {
    fn default() -> Self {
        Self::new()
    }
}
