//! Integration tests for the parse → resolve → render pipeline.

use std::fs;

use chatmap::prelude::*;

const LEGACY_TRANSCRIPT: &str = "\
12/10/14, 00:59:54: Alice: Hello
world
12/10/14, 01:00:02: Bob: Hi Alice
12/10/14, 01:00:30: Alice: How are you?
still typing

done now
12/10/14, 01:01:00: Bob: Fine!";

const BRACKETED_TRANSCRIPT: &str = "\
[9/12/24, 08:54:40] Messages and calls are end-to-end encrypted. No one outside of this chat can read or listen to them.
[9/12/24, 08:54:43] ~ Bob: <Media omitted>
[9/12/24, 08:55:00] Carol: 00000002-PHOTO-2017-05-24-06-15-02.jpg (file attached)
[9/12/24, 08:55:30] Carol: <attached: 00000019-VIDEO-2018-01-02-10-11-12.mp4>
[9/12/24, 08:56:00] Alice: look at https://example.com/album
[9/12/24, 08:56:30] Alice: bye";

// =========================================================================
// Legacy format
// =========================================================================

#[test]
fn legacy_message_count_equals_header_count() {
    let transcript = TranscriptParser::new()
        .parse_str(LEGACY_TRANSCRIPT, ".")
        .unwrap();
    // 4 header lines, 4 messages; continuations never become messages.
    assert_eq!(transcript.len(), 4);
}

#[test]
fn legacy_continuations_merge_into_previous_body() {
    let transcript = TranscriptParser::new()
        .parse_str(LEGACY_TRANSCRIPT, ".")
        .unwrap();
    let messages = transcript.messages();
    assert_eq!(messages[0].body(), "Hello\nworld");
    assert_eq!(messages[2].body(), "How are you?\nstill typing\n\ndone now");
}

#[test]
fn legacy_body_round_trip_reconstructs_input_lines() {
    let transcript = TranscriptParser::new()
        .parse_str(LEGACY_TRANSCRIPT, ".")
        .unwrap();

    // Re-joining each message's header line with its body lines must
    // reconstruct the input exactly.
    let mut rebuilt: Vec<String> = Vec::new();
    for msg in transcript.messages() {
        let mut lines = msg.body_lines();
        let first = lines.next().unwrap();
        rebuilt.push(format!(
            "{}: {}: {}",
            msg.timestamp_text(),
            msg.sender().unwrap(),
            first
        ));
        rebuilt.extend(lines.map(String::from));
    }
    assert_eq!(rebuilt.join("\n"), LEGACY_TRANSCRIPT);
}

// =========================================================================
// Bracketed format
// =========================================================================

#[test]
fn bracketed_full_pipeline() {
    let transcript = TranscriptParser::new()
        .parse_str(BRACKETED_TRANSCRIPT, "export")
        .unwrap();
    let messages = transcript.messages();
    assert_eq!(messages.len(), 6);

    // Encryption banner: a sender-less system notice.
    assert!(messages[0].is_system_notice());

    // Tilde marker stripped from the sender, redacted attachment kept.
    assert_eq!(messages[1].sender(), Some("Bob"));
    let redacted = messages[1].attachment().unwrap();
    assert!(redacted.is_redacted());
    assert_eq!(redacted.kind, MediaKind::None);

    // Android-shape media reference.
    let photo = messages[2].attachment().unwrap();
    assert_eq!(photo.kind, MediaKind::Image);
    assert_eq!(
        photo.filename.as_deref(),
        Some("00000002-PHOTO-2017-05-24-06-15-02.jpg")
    );

    // iOS-shape media reference.
    let video = messages[3].attachment().unwrap();
    assert_eq!(video.kind, MediaKind::Video);

    // Plain messages pass through untouched.
    assert!(messages[4].attachment().is_none());
    assert_eq!(messages[5].body(), "bye");
}

#[test]
fn bracketed_stats() {
    let transcript = TranscriptParser::new()
        .parse_str(BRACKETED_TRANSCRIPT, ".")
        .unwrap();
    let stats = transcript.stats();
    assert_eq!(stats.messages, 5);
    assert_eq!(stats.notices, 1);
    assert_eq!(stats.attachments, 3);
    assert_eq!(stats.participants, vec!["Alice", "Bob", "Carol"]);
    assert_eq!(stats.extensions, vec!["jpg", "mp4"]);
}

// =========================================================================
// Order preservation
// =========================================================================

#[test]
fn order_follows_transcript_position_not_timestamps() {
    let content = "\
12/10/14, 23:59:54: Alice: late stamp first
11/10/14, 00:00:01: Bob: earlier stamp second
13/10/14, 12:00:00: Carol: later stamp third";
    let transcript = TranscriptParser::new().parse_str(content, ".").unwrap();
    let senders: Vec<_> = transcript
        .messages()
        .iter()
        .filter_map(|m| m.sender())
        .collect();
    assert_eq!(senders, vec!["Alice", "Bob", "Carol"]);
    // The stamps really are out of chronological order.
    let stamps: Vec<_> = transcript.messages().iter().map(|m| m.timestamp()).collect();
    assert!(stamps[0] > stamps[1]);
}

// =========================================================================
// Failure modes produce no partial output
// =========================================================================

#[test]
fn unrecognized_format_yields_no_messages() {
    let err = TranscriptParser::new()
        .parse_str("shopping list\n- milk\n- eggs", ".")
        .unwrap_err();
    assert!(err.is_unrecognized_format());
}

#[test]
fn malformed_first_line_yields_no_messages() {
    let content = "continuation before any header\n12/10/14, 00:59:54: Alice: hi";
    let err = TranscriptParser::new().parse_str(content, ".").unwrap_err();
    assert!(err.is_malformed_transcript());
}

// =========================================================================
// Detector determinism
// =========================================================================

#[test]
fn detection_is_idempotent() {
    for _ in 0..3 {
        let lines: Vec<&str> = BRACKETED_TRANSCRIPT.lines().collect();
        assert_eq!(
            ExportFormat::detect(&lines, 10).unwrap(),
            ExportFormat::Bracketed
        );
    }
}

// =========================================================================
// File-based pipeline with a real export directory
// =========================================================================

#[test]
fn parse_and_render_from_export_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("_chat.txt"), BRACKETED_TRANSCRIPT).unwrap();
    fs::write(
        dir.path().join("00000002-PHOTO-2017-05-24-06-15-02.jpg"),
        b"jpeg bytes",
    )
    .unwrap();

    let transcript = TranscriptParser::new()
        .parse_path(&dir.path().join("_chat.txt"))
        .unwrap();
    assert_eq!(transcript.source_dir(), dir.path());

    let renderer = HtmlRenderer::with_config(RenderConfig::new().with_check_media(true));
    let html = renderer.render_to_string(&transcript).unwrap();

    // The photo exists, so it embeds; the video does not, so it degrades.
    assert!(html.contains(r#"<img class="attachment""#));
    assert!(html.contains("missing media"));
    // Whole-document structure survives.
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<ul class="summary">"#));
}

#[test]
fn rendered_document_escapes_transcript_text() {
    let content = "12/10/14, 00:59:54: A&B <crew>: 1 < 2 & 3 > 2";
    let transcript = TranscriptParser::new().parse_str(content, ".").unwrap();
    let html = HtmlRenderer::new().render_to_string(&transcript).unwrap();
    assert!(html.contains("A&amp;B &lt;crew&gt;"));
    assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
}
