//! Configuration types for the parser and the renderer.
//!
//! Builder-style structs with sensible defaults, usable without any CLI
//! framework. The attachment filename convention and the format-detection
//! window live here: the naming convention is inferred from real exports
//! rather than documented anywhere, so it must stay configurable to tolerate
//! drift across application versions.
//!
//! # Example
//!
//! ```rust
//! use chatmap::config::ParserConfig;
//! use chatmap::TranscriptParser;
//!
//! let config = ParserConfig::new().with_detect_window(5);
//! let parser = TranscriptParser::with_config(config)?;
//! # Ok::<(), chatmap::ChatmapError>(())
//! ```

use serde::{Deserialize, Serialize};

/// Default media filename convention: numeric sequence prefix, media-type
/// token, timestamp, extension (e.g. `00000002-PHOTO-2017-05-24-06-15-02.jpg`).
pub const DEFAULT_MEDIA_FILENAME_PATTERN: &str =
    r"^\d+-(?:PHOTO|IMG|IMAGE|VIDEO|VID|AUDIO|PTT|GIF|STICKER|DOC|DOCUMENT)-\d{4}(?:-\d{2}){5}\.[A-Za-z0-9]+$";

/// Configuration for transcript parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// How many non-blank opening lines format detection examines
    /// (default: 10)
    pub detect_window: usize,

    /// Regex a referenced media filename must match to be resolved
    /// (default: [`DEFAULT_MEDIA_FILENAME_PATTERN`])
    pub media_filename_pattern: String,

    /// Drop sender-less system notices from the output (default: false;
    /// notices are part of the archive)
    pub skip_system_notices: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            detect_window: 10,
            media_filename_pattern: DEFAULT_MEDIA_FILENAME_PATTERN.to_string(),
            skip_system_notices: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of opening lines examined during format detection.
    #[must_use]
    pub fn with_detect_window(mut self, window: usize) -> Self {
        self.detect_window = window;
        self
    }

    /// Overrides the media filename convention.
    #[must_use]
    pub fn with_media_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.media_filename_pattern = pattern.into();
        self
    }

    /// Sets whether sender-less system notices are dropped.
    #[must_use]
    pub fn with_skip_system_notices(mut self, skip: bool) -> Self {
        self.skip_system_notices = skip;
        self
    }
}

/// Configuration for HTML rendering.
///
/// The page template is explicit configuration with built-in defaults, not
/// an ambient file lookup, so the renderer is testable without filesystem
/// access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Document title, substituted for `{title}` in the header template
    /// (default: "Chat transcript")
    pub title: String,

    /// Render the statistics summary block above the messages
    /// (default: true)
    pub include_summary: bool,

    /// Check that attachment files exist before embedding them; a missing
    /// file degrades that single embed to a placeholder (default: false;
    /// rendering is pure by default)
    pub check_media: bool,

    /// Override for the built-in page header (everything up to the first
    /// message block); `{title}` is substituted
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub header_template: Option<String>,

    /// Override for the built-in page footer
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub footer_template: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Chat transcript".to_string(),
            include_summary: true,
            check_media: false,
            header_template: None,
            footer_template: None,
        }
    }
}

impl RenderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enables or disables the summary block.
    #[must_use]
    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    /// Enables or disables media existence checking.
    #[must_use]
    pub fn with_check_media(mut self, check: bool) -> Self {
        self.check_media = check;
        self
    }

    /// Overrides the page header template.
    #[must_use]
    pub fn with_header_template(mut self, template: impl Into<String>) -> Self {
        self.header_template = Some(template.into());
        self
    }

    /// Overrides the page footer template.
    #[must_use]
    pub fn with_footer_template(mut self, template: impl Into<String>) -> Self {
        self.footer_template = Some(template.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.detect_window, 10);
        assert_eq!(
            config.media_filename_pattern,
            DEFAULT_MEDIA_FILENAME_PATTERN
        );
        assert!(!config.skip_system_notices);
    }

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .with_detect_window(3)
            .with_skip_system_notices(true)
            .with_media_filename_pattern(r"^.+\.jpg$");

        assert_eq!(config.detect_window, 3);
        assert!(config.skip_system_notices);
        assert_eq!(config.media_filename_pattern, r"^.+\.jpg$");
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.title, "Chat transcript");
        assert!(config.include_summary);
        assert!(!config.check_media);
        assert!(config.header_template.is_none());
        assert!(config.footer_template.is_none());
    }

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::new()
            .with_title("Holiday group")
            .with_summary(false)
            .with_check_media(true)
            .with_header_template("<html><body>")
            .with_footer_template("</body></html>");

        assert_eq!(config.title, "Holiday group");
        assert!(!config.include_summary);
        assert!(config.check_media);
        assert_eq!(config.header_template.as_deref(), Some("<html><body>"));
        assert_eq!(config.footer_template.as_deref(), Some("</body></html>"));
    }

    #[test]
    fn test_default_media_pattern_matches_convention() {
        let re = regex::Regex::new(DEFAULT_MEDIA_FILENAME_PATTERN).unwrap();
        assert!(re.is_match("00000002-PHOTO-2017-05-24-06-15-02.jpg"));
        assert!(re.is_match("00000019-VIDEO-2018-01-02-10-11-12.mp4"));
        assert!(re.is_match("00000007-AUDIO-2020-06-01-09-00-00.opus"));
        assert!(!re.is_match("holiday.jpg"));
        assert!(!re.is_match("PHOTO-2017-05-24.jpg"));
    }
}
