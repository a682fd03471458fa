//! # chatmap CLI
//!
//! Command-line interface for the chatmap library.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatmap::cli::Args;
use chatmap::config::{ParserConfig, RenderConfig};
use chatmap::{ChatmapError, HtmlRenderer, TranscriptParser};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatmapError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let transcript_path = resolve_transcript_path(Path::new(&args.transcript))?;

    // Print header
    println!("💬 chatmap v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", transcript_path.display());
    println!("💾 Output:  {}", args.output);
    println!("🏷️  Title:   {}", args.title);
    if args.check_media {
        println!("🔎 Media:   existence-checked");
    }
    println!();

    // Step 1: Parse the transcript
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let parser_config = ParserConfig::new().with_skip_system_notices(args.skip_notices);
    let parser = TranscriptParser::with_config(parser_config)?;
    let transcript = parser.parse_path(&transcript_path)?;
    let stats = transcript.stats();
    println!(
        "   Found {} messages, {} notices, {} attachments ({:.2}s)",
        stats.messages,
        stats.notices,
        stats.attachments,
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Render HTML
    println!("🖋️  Rendering HTML...");
    let render_start = Instant::now();
    let render_config = RenderConfig::new()
        .with_title(&args.title)
        .with_summary(!args.no_summary)
        .with_check_media(args.check_media);
    let renderer = HtmlRenderer::with_config(render_config);

    let file = File::create(&args.output)?;
    let mut sink = BufWriter::new(file);
    renderer.render(&transcript, &mut sink)?;
    sink.flush()?;
    println!("   Written in {:.2}s", render_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", args.output);

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Participants:  {}", stats.participants.len());
    println!("   Messages:      {}", stats.messages);
    println!("   Notices:       {}", stats.notices);
    println!("   Attachments:   {}", stats.attachments);
    println!("   Total time:    {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Resolves the transcript argument to a concrete file path.
///
/// A directory argument means "the folder the export was extracted into";
/// the transcript inside is conventionally named `_chat.txt`.
fn resolve_transcript_path(path: &Path) -> Result<PathBuf, ChatmapError> {
    if path.is_dir() {
        let candidate = path.join("_chat.txt");
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(ChatmapError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no _chat.txt found in {}", path.display()),
        )));
    }
    Ok(path.to_path_buf())
}
