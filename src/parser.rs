//! Transcript parsing: line classification and message assembly.
//!
//! [`TranscriptParser`] folds the raw line sequence of an export into an
//! ordered sequence of immutable [`Message`] records. The pass is strictly
//! sequential and keeps a single "message under construction" slot; parsing
//! one transcript shares no state with parsing another, so callers may run
//! transcripts in parallel with zero coordination.
//!
//! # Example
//!
//! ```rust
//! use chatmap::TranscriptParser;
//!
//! let parser = TranscriptParser::new();
//! let transcript = parser.parse_str(
//!     "12/10/14, 00:59:54: Alice: Hello\nworld",
//!     ".",
//! )?;
//!
//! assert_eq!(transcript.messages().len(), 1);
//! assert_eq!(transcript.messages()[0].body(), "Hello\nworld");
//! # Ok::<(), chatmap::ChatmapError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::attachment::AttachmentResolver;
use crate::config::ParserConfig;
use crate::error::{ChatmapError, Result};
use crate::format::ExportFormat;
use crate::message::Message;
use crate::stats::TranscriptStats;

/// An assembled transcript: the ordered message records plus the directory
/// the export was extracted into, used by the renderer to qualify attachment
/// filenames.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    source_dir: PathBuf,
    messages: Vec<Message>,
}

impl Transcript {
    pub(crate) fn new(source_dir: PathBuf, messages: Vec<Message>) -> Self {
        Self {
            source_dir,
            messages,
        }
    }

    /// Returns the directory attachment filenames are relative to.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the message records in transcript order, read-only.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the transcript holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Computes summary statistics over the records.
    pub fn stats(&self) -> TranscriptStats {
        TranscriptStats::collect(&self.messages)
    }

    /// Consumes the transcript, yielding the message records.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// The message under construction during assembly.
struct Draft {
    sender: Option<String>,
    timestamp: NaiveDateTime,
    timestamp_text: String,
    lines: Vec<String>,
}

impl Draft {
    fn finish(self) -> Result<Message> {
        Message::new(self.sender, self.timestamp, self.timestamp_text, self.lines)
    }
}

/// Parser for WhatsApp TXT transcript exports.
///
/// The parser detects the export format once per transcript, then classifies
/// each line as a header (starts a new message) or a continuation (appended
/// to the message under construction). A header line whose timestamp text
/// names no real calendar instant is demoted to a continuation (verbatim,
/// prefix included) so one malformed line never loses the rest of the
/// transcript.
pub struct TranscriptParser {
    config: ParserConfig,
    resolver: AttachmentResolver,
}

impl TranscriptParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            resolver: AttachmentResolver::new(),
        }
    }

    /// Creates a parser with custom configuration.
    ///
    /// # Errors
    ///
    /// [`ChatmapError::Pattern`] if the configured media filename pattern is
    /// not a valid regex.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let resolver = AttachmentResolver::from_config(&config)?;
        Ok(Self { config, resolver })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a transcript file.
    ///
    /// The file's containing directory becomes the transcript's source
    /// directory for attachment resolution.
    pub fn parse_path(&self, path: &Path) -> Result<Transcript> {
        let content = fs::read_to_string(path)?;
        let source_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        self.parse_str(&content, source_dir)
    }

    /// Parses transcript content from a string.
    pub fn parse_str(&self, content: &str, source_dir: impl Into<PathBuf>) -> Result<Transcript> {
        let lines: Vec<&str> = content.lines().collect();
        self.parse_lines(&lines, source_dir)
    }

    /// Parses an explicit line sequence.
    ///
    /// # Errors
    ///
    /// - [`ChatmapError::UnrecognizedFormat`] if no known header pattern
    ///   matches the opening lines.
    /// - [`ChatmapError::MalformedTranscript`] if the first line is not a
    ///   header (there is no prior message for it to continue).
    ///
    /// Both are fatal and produce no partial output.
    pub fn parse_lines(
        &self,
        lines: &[&str],
        source_dir: impl Into<PathBuf>,
    ) -> Result<Transcript> {
        let format = ExportFormat::detect(lines, self.config.detect_window)?;

        let mut messages: Vec<Message> = Vec::new();
        let mut current: Option<Draft> = None;

        for (idx, line) in lines.iter().enumerate() {
            if let Some(header) = format.match_header(line) {
                if let Some(timestamp) = format.parse_timestamp(&header.timestamp_text) {
                    if let Some(draft) = current.take() {
                        messages.push(draft.finish()?);
                    }
                    current = Some(Draft {
                        sender: header.sender,
                        timestamp,
                        timestamp_text: header.timestamp_text,
                        lines: vec![header.rest],
                    });
                } else {
                    // Header-shaped line with an impossible timestamp:
                    // demoted to a continuation of the current message,
                    // verbatim.
                    Self::append_continuation(current.as_mut(), line);
                }
            } else if idx == 0 {
                return Err(ChatmapError::malformed_transcript(*line));
            } else {
                Self::append_continuation(current.as_mut(), line);
            }
        }

        if let Some(draft) = current.take() {
            messages.push(draft.finish()?);
        }

        let messages = messages
            .into_iter()
            .filter(|msg| !(self.config.skip_system_notices && msg.is_system_notice()))
            .map(|msg| self.resolver.resolve(msg))
            .collect();

        Ok(Transcript::new(source_dir.into(), messages))
    }

    fn append_continuation(current: Option<&mut Draft>, line: &str) {
        if let Some(draft) = current {
            draft.lines.push(line.to_string());
        }
        // No message under construction means every header so far was
        // demoted; the orphan line has nothing to continue and is dropped.
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}
