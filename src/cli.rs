//! Command-line interface definition using clap.
//!
//! Only compiled with the `cli` feature; the library itself has no CLI
//! framework dependency.

use clap::Parser;

/// Convert an exported WhatsApp chat transcript into a styled,
/// self-contained HTML document.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatmap")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatmap _chat.txt
    chatmap export-folder/ -o holiday.html --title \"Holiday group\"
    chatmap _chat.txt --check-media
    chatmap _chat.txt --no-summary --skip-notices")]
pub struct Args {
    /// Path to the exported transcript file, or to the directory the export
    /// was extracted into (containing _chat.txt)
    pub transcript: String,

    /// Path to the output HTML file
    #[arg(short, long, default_value = "chat.html")]
    pub output: String,

    /// Document title
    #[arg(long, default_value = "Chat transcript")]
    pub title: String,

    /// Omit the statistics summary block
    #[arg(long)]
    pub no_summary: bool,

    /// Verify that attachment files exist; missing ones render as
    /// placeholders instead of broken embeds
    #[arg(long)]
    pub check_media: bool,

    /// Drop sender-less system notices (join/leave/encryption banners)
    #[arg(long)]
    pub skip_notices: bool,
}
