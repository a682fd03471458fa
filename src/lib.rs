//! # Chatmap
//!
//! A Rust library for converting exported WhatsApp chat transcripts into
//! styled, self-contained HTML documents.
//!
//! ## Overview
//!
//! WhatsApp exports a conversation as a loosely-structured plain-text log
//! (`_chat.txt`), optionally accompanied by the referenced media files. The
//! format is undocumented and has drifted across application versions:
//! timestamps change delimiters, senders gain marker prefixes, media is
//! either referenced by filename or redacted to a literal marker, and
//! messages span multiple physical lines with nothing to distinguish a
//! continuation from a new message except the absence of a header prefix.
//!
//! Chatmap handles that complexity in four small, testable stages:
//!
//! 1. **Format detection** — [`ExportFormat`] inspects the opening lines
//!    and picks the grammar the export uses.
//! 2. **Classification + assembly** — [`TranscriptParser`] folds the line
//!    stream into ordered, immutable [`Message`] records, merging
//!    continuation lines into the preceding record's body.
//! 3. **Attachment resolution** — media markers are classified into typed
//!    [`Attachment`](message::Attachment) references, without touching the
//!    filesystem.
//! 4. **Rendering** — [`HtmlRenderer`] maps the records onto an HTML
//!    document, one block per message, escaping text and substituting
//!    attachment references with embed markup.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatmap::{HtmlRenderer, TranscriptParser};
//!
//! fn main() -> chatmap::Result<()> {
//!     let parser = TranscriptParser::new();
//!     let transcript = parser.parse_str(
//!         "[9/12/24, 08:54:43] Alice: Hello\nstill me on a new line",
//!         ".",
//!     )?;
//!
//!     let mut html = Vec::new();
//!     HtmlRenderer::new().render(&transcript, &mut html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`TranscriptParser`], [`Transcript`]: classification and
//!   assembly
//! - [`format`] — [`ExportFormat`]: the closed set of known export grammars
//! - [`message`] — [`Message`], [`Attachment`](message::Attachment),
//!   [`MediaKind`]: the immutable records
//! - [`attachment`] — [`AttachmentResolver`](attachment::AttachmentResolver):
//!   marker classification
//! - [`render`] — [`HtmlRenderer`]: HTML output
//! - [`stats`] — [`TranscriptStats`](stats::TranscriptStats): summary counts
//! - [`config`] — [`ParserConfig`](config::ParserConfig),
//!   [`RenderConfig`](config::RenderConfig)
//! - [`error`] — [`ChatmapError`], [`Result`]
//! - [`cli`] — CLI argument types (feature `cli`)
//!
//! ## Concurrency
//!
//! The core is sequential; all parser state is local to one pass and
//! immutable after construction. Parsing one transcript is independent of
//! parsing another, so callers may convert many transcripts in parallel
//! with zero coordination.

pub mod attachment;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod render;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatmapError, Result};
pub use format::ExportFormat;
pub use message::{Attachment, MediaKind, Message};
pub use parser::{Transcript, TranscriptParser};
pub use render::HtmlRenderer;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatmap::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::message::{Attachment, MediaKind, Message};
    pub use crate::parser::{Transcript, TranscriptParser};

    // Error types
    pub use crate::error::{ChatmapError, Result};

    // Format detection
    pub use crate::format::{ExportFormat, HeaderLine};

    // Attachment resolution
    pub use crate::attachment::AttachmentResolver;

    // Rendering
    pub use crate::render::HtmlRenderer;

    // Statistics
    pub use crate::stats::TranscriptStats;

    // Configuration
    pub use crate::config::{ParserConfig, RenderConfig};
}
