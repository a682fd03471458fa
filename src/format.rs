//! Export format detection and header-line matching.
//!
//! WhatsApp transcript exports vary by application era. Each supported
//! grammar is one [`ExportFormat`] variant owning its own header pattern and
//! chrono date layouts; detection picks a variant once per transcript, so no
//! format flags leak into the parsing logic. Adding a new export era means
//! adding one variant and one test fixture, not editing a shared expression.
//!
//! Supported formats:
//! - Legacy: `12/10/14, 00:59:54: Alice: Hello` (colon-delimited timestamp)
//! - Bracketed: `[9/12/24, 08:54:43] Alice: Hello`, with an optional `~ `
//!   before the sender for contacts not in the exporting user's address book

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatmapError, Result};

/// Legacy header: `D/M/YY, HH:MM:SS: SENDER: BODY`.
const LEGACY_HEADER: &str = r"^(\d{1,2}/\d{1,2}/\d{2,4}, \d{1,2}:\d{2}(?::\d{2})?): (.*)$";

/// Bracketed header: `[D/M/YY, HH:MM:SS] SENDER: BODY`, optional AM/PM.
const BRACKETED_HEADER: &str =
    r"^\[(\d{1,2}/\d{1,2}/\d{2,4}, \d{1,2}:\d{2}(?::\d{2})?(?: ?[APap][Mm])?)\] (.*)$";

/// Sender prefix inside the post-timestamp remainder. The optional `~ `
/// marks a sender outside the address book and is stripped, never kept as
/// part of the name. Sender names cannot contain colons, so the split point
/// is the first colon-space.
const SENDER_PREFIX: &str = r"^(?:~ )?([^:]+): (.*)$";

/// One recognized export grammar.
///
/// Variants are tried in declaration order during detection; the first whose
/// header pattern matches one of the transcript's opening lines wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// Colon-delimited timestamp, no brackets. Seen in early exports.
    Legacy,
    /// Bracketed timestamp with optional `~ ` sender marker. Current exports.
    Bracketed,
}

/// A successfully matched header line, decomposed into its parts.
///
/// `sender = None` marks a system notice: a header whose remainder carries
/// no `name: ` prefix (encryption banners, group-membership changes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    /// The timestamp exactly as written (brackets and trailing separator
    /// excluded).
    pub timestamp_text: String,
    /// Display name, tilde marker stripped; `None` for system notices.
    pub sender: Option<String>,
    /// The first body line (may be empty).
    pub rest: String,
}

impl ExportFormat {
    /// All supported formats, in detection order.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Legacy, ExportFormat::Bracketed]
    }

    fn header_regex(self) -> &'static Regex {
        static LEGACY: OnceLock<Regex> = OnceLock::new();
        static BRACKETED: OnceLock<Regex> = OnceLock::new();
        match self {
            ExportFormat::Legacy => {
                LEGACY.get_or_init(|| Regex::new(LEGACY_HEADER).expect("valid header pattern"))
            }
            ExportFormat::Bracketed => BRACKETED
                .get_or_init(|| Regex::new(BRACKETED_HEADER).expect("valid header pattern")),
        }
    }

    fn sender_regex() -> &'static Regex {
        static SENDER: OnceLock<Regex> = OnceLock::new();
        SENDER.get_or_init(|| Regex::new(SENDER_PREFIX).expect("valid sender pattern"))
    }

    /// Returns the chrono layouts this format's timestamps may use.
    ///
    /// Exports are inconsistent about seconds, year width, and (in bracketed
    /// exports) 12-hour clocks, so several layouts are tried in order.
    pub fn timestamp_layouts(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Legacy => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
            ExportFormat::Bracketed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
                "%d/%m/%y, %I:%M:%S %p",
                "%d/%m/%y, %I:%M %p",
                "%d/%m/%Y, %I:%M:%S %p",
                "%d/%m/%Y, %I:%M %p",
            ],
        }
    }

    /// Tests whether `line` begins a new message under this format.
    ///
    /// Returns the decomposed header on a match; any other line is a
    /// continuation of the message currently under assembly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatmap::ExportFormat;
    ///
    /// let header = ExportFormat::Bracketed
    ///     .match_header("[9/12/24, 08:54:43] ~ Bob: <Media omitted>")
    ///     .unwrap();
    /// assert_eq!(header.sender.as_deref(), Some("Bob"));
    /// assert_eq!(header.rest, "<Media omitted>");
    /// ```
    pub fn match_header(self, line: &str) -> Option<HeaderLine> {
        let caps = self.header_regex().captures(line)?;
        let timestamp_text = caps[1].to_string();
        let remainder = caps.get(2).map_or("", |m| m.as_str());

        let (sender, rest) = match Self::sender_regex().captures(remainder) {
            Some(parts) => (
                Some(parts[1].trim().to_string()),
                parts[2].to_string(),
            ),
            None => (None, remainder.to_string()),
        };

        Some(HeaderLine {
            timestamp_text,
            sender,
            rest,
        })
    }

    /// Parses a matched timestamp text against this format's layouts.
    ///
    /// `None` means the text looked like a timestamp but names no real
    /// calendar instant (e.g. a 31st of February); the assembler demotes
    /// such a line to a continuation rather than failing the run.
    pub fn parse_timestamp(self, text: &str) -> Option<NaiveDateTime> {
        self.timestamp_layouts()
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
    }

    /// Detects which format a transcript uses from its opening lines.
    ///
    /// Each format's header pattern is tried, in declaration order, against
    /// the first `window` non-blank lines; the first format that matches any
    /// of them wins. Detection is pure pattern matching: deterministic and
    /// idempotent.
    ///
    /// # Errors
    ///
    /// [`ChatmapError::UnrecognizedFormat`] if no pattern matches.
    pub fn detect(lines: &[&str], window: usize) -> Result<ExportFormat> {
        let sample: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !line.trim().is_empty())
            .take(window)
            .collect();

        for format in Self::all() {
            if sample.iter().any(|line| format.header_regex().is_match(line)) {
                return Ok(*format);
            }
        }

        Err(ChatmapError::unrecognized_format(sample.len()))
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Legacy => write!(f, "legacy"),
            ExportFormat::Bracketed => write!(f, "bracketed"),
        }
    }
}
