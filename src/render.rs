//! HTML rendering of assembled transcripts.
//!
//! [`HtmlRenderer`] maps the ordered message records onto an HTML document,
//! one block per message, escaping all transcript text and substituting
//! attachment references with embed markup. The page template is explicit
//! configuration with built-in defaults, so rendering is testable without
//! any filesystem access. The single filesystem concern, checking that a
//! referenced media file exists, is opt-in and degrades one embed, never
//! the document.

use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::attachment::is_attachment_marker;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::message::{Attachment, MediaKind, Message};
use crate::parser::Transcript;
use crate::stats::TranscriptStats;

/// Built-in page header; `{title}` is substituted with the configured title.
const DEFAULT_HEADER: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body { font-family: sans-serif; max-width: 46em; margin: 0 auto; padding: 1em; background: #ece5dd; }
h1 { font-size: 1.4em; }
ul.summary { background: #fff; border-radius: 6px; padding: 0.8em 2em; list-style: square; }
div.message { background: #fff; border-radius: 6px; padding: 0.5em 0.8em; margin: 0.5em 0; }
div.message.notice { background: #fdf3c8; text-align: center; font-style: italic; }
p.meta { margin: 0; font-size: 0.8em; color: #667; }
span.sender { font-weight: bold; color: #075e54; }
p.body { margin: 0.3em 0 0 0; white-space: pre-wrap; }
p.media-omitted { margin: 0.3em 0 0 0; color: #999; font-style: italic; }
img.attachment { max-width: 100%; border-radius: 4px; margin-top: 0.3em; }
</style>
</head>
<body>
<h1>{title}</h1>
"#;

/// Built-in page footer.
const DEFAULT_FOOTER: &str = "</body>\n</html>\n";

/// Inline thumbnail shown for generic file attachments.
const FILE_PLACEHOLDER: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAGAAAAB7CAMAAAC8V3VSAAAAY1BMVEX///8AAABbW1tsbGwxMTF+fn6goKDj4+PY2Nitra01NTWnp6c9PT05OTnf39+Tk5P29vbu7u5JSUm9vb2amposLCwMDAxRUVGKiorDw8PKyspkZGRxcXEVFRUmJibS0tIcHBzyOjX6AAADQ0lEQVRoge2a6ZKrIBCFwWg0u0vW0cT7/k95k0xYhAYa0JqpKc+vjDLnC0QaWpoQSbdjezpTL92zkiCVZ37WXBXKvrwG2lOaYvpQPIL9Ka3dhCbC/qlkYn9KF3b/faw/pZkVcBINz5cFUl09IFwt/gfear3CPXJvrYZ9WBobVuJboOfMSxtllFamhnwCbHzsdQBtDA0xo4gC0C+wXf+5e/IaHwlwE4TC1s5zgMQ/5oUg5EC7zHIPBdiTLw44A8Nw+b5V+/pLACkSPPR26fcdZzixAaQ5sZ4GQI6coA3FOAAiVqt2GgDpOKGbBkBaThhO2dEARITXQeAbD1BuOUEOfOMBSJVyghT4RgSQ/M4JIvAFA9j07aVrUljil4MBLAINFpqeA+6sZ8EA9m2H670IfI8qElCyvcLwsgh8nx1fMIDFYXWpFIFvGwlgTmqIVgJfOCBnPuq+TgS+JApAFsxHCW/DwBcBEFvO0214RwS+JgYgjQVND30lLcgJu95GAciaynrUSdu2yUvsCXs+SVGA3JnRRQJI4SLEAki1mxgg7/4nAtjz3zEAz3HaJNMCnir7zbVrL2/VL91HBmhKZsAMmAEMsPvJHhSHDKkDkIG7AUtT/IKkp/FOQG92g6T1wQnwfMmpvUpxAhZmM0jq3ssNWJnNIGmvo5yAcm1207XV3oK4n6KyM/up6vS3LHOomAEzYAaMA8ibJUoNeOjgBuDj9fkWAijMhjoB6IMT4LVkAqcfTkBrttMFHG44AfoBh0XAj+AElCeznyrobMD9FFXGzFFVC53OYCZalaMEH/78hpk8A2YADrCeATGAslk5BC+WWACqFsJ8ku8E5GZXWfApOAaArHVRTy7xAOSSCRwgIwHIRF9LX9GA6h8KsIfMUQBS1GZbptT4G6Mm2r5wyVIq8Rtm8gz4I4CU7KYF7NgH/9oWh2r2xYOrc+xi0T4Lry+yS9iyXMy7Qsoqnl0U4TVeVvHlioRXqdnE868DCa+zs0gcDpbDP1OfSkGTqkYcbx7fV8qgWkeTEmkl3H2YPkm9l/h6Gl1vCkvKnichDLLzwiPtxilV9hsRVcuggGkbXHcN2Rse99ux3XpWjqs6bxdHuaSJ/Ads3C/5Z6OwGwAAAABJRU5ErkJggg==";

/// Inline thumbnail shown for video attachments.
const VIDEO_PLACEHOLDER: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAOsAAADWCAMAAAAHMIWUAAAAhFBMVEX///8AAACUlJT5+fmZmZk7OzuioqKMjIzb29v29vZiYmLm5ua6urrW1ta/v7/Pz8/x8fESEhJoaGhFRUWtra2goKB0dHTh4eEjIyOJiYl5eXkaGhrGxsbQ0NA+Pj7y8vJPT08sLCxYWFizs7M1NTUdHR12dnYqKipMTEyBgYEMDAxdXV3wf6aIAAAIuklEQVR4nO2dfV/qIBTHt6nT1OtDWllZmXpL8/2/v5s3K86BAWdjcNhnv/+cMPhug3M4G5AkVurM1pPxsptxU3c5nqxnHTsICw3yYS/lrd4wH1QHHZ9Cc1hrOK4C+vQQuv5EPfwpe0tfQ1e9hPZlbu7yI3S1S2q+JJKu/4aucgWt1gTS0SZ0dStqOLNFvQldVQfaWZF2tqHr6US3Fqh/QlfSlR7vTKjr0FV0qKkedRe6fk6ltbVN6JVE5cWoS12+w+3DsS9KdDZWWZ+kDIwmiHnnQtb5UduVFsJOinIssumVlBp0YnZdvCAx85GWdSDmvfk80HnKD0VVL6jYkzr1c642zOLpP2i1TZJMLMHa8H8J3MjvoevL7lldfWUHNVMm3RaNHMDV1bQLpTpiZhtLKOhOzJuJNRoqCVRXUnVdFsUjYDCupdU2SXIx84iW91rMC5vWQOXbvsqn6CuSafpscHW7tNomiditXdOyjsSCpZauspn3ONFUTnOQ+6Nf3RZfXbNAf08MnoDwgfx8vixkENxk5TGcdDlEzaxTqvQoZN7SsoKClS39KJGsYIKulEDf3YATvtCqm4zFzMSoyb2YV93SZS8BtDG5D9aHMl7EpA+02ibJXsh8oGW9EgsuaukyrPisS721IY4BOjJiPwqHF5QQQoLscmFLl2CFqzLC/2VFZ/lSFfMIjVuPlhUUrGnpklH5vR+36J+hoUgwRKAGoYFvOaHlBXb5SZMQP6hv33/g2zo3FWl5ddUSXbyVOXlhwQvrlGd9t9h7dNzUNS4pibGAb0kcMoCC9S0d+wv9y3F02NgARVusv7oKiS7eIzHvSsi7N6RF7fIyOsFhF9NbL+CHGeIckkB7IUatgV02tXRsRr8qiq6A0bl9JVxdSW9iUcS8YsHvxtTAPF2e1g48ZrytYERPfXsCrvYNLS94/swtHXOdj6FW3DedQ4yeUBsc9C2Jr4iBV2+RHnW5ZxOF7rXJCwKXhvqaCLh4BocFC4RNbIIDyJSe2yYM1Rj7VXE4bDTEWOC6EkeCoGC74ADwss5N5g4eMD3ClUIvwLckjgSB12fX0hHaHbauhuygDRAbHLytxJEgKNjYfyrKOzta8Eabgj/uQi/EkWCpguEIIEchC8OtAle3UuiFOBLUR9SKBE3METZAk+cFLgwxhA1dPOMLQyiL0IupxPQELbRh1ALM45s2qUKvoFySQMH2jwR8l7wANTBdMnehF+IAPytXMOyI96ARGVo9MMWm2IUk8QHa0LKWLRiEAD8dWvBTb7hAYJUaegEuHnEkWLZg5CdRWMU3E+TQi+hbPhPzpiULLs8KzKMusKUScPGIgdLSBZdnFW8r9c4As654c6aV+B6dFPMpzQqMFfHOwB6ROMAvX7CeVZPxtcptFV08atxGLJgYytOy9golvoRJV8/FCZWqkLlKwVrWRqtlbaZa1maqZW2mWtZmqmVtplrWZgqxZt0mKdOyEoeW3KVldTcbmoMqxBGjU8vassaulrVljV0ta8sau1rWljV2tawta+xqWVvW2NWytqyxyzfrbNfPxtTPqh3JL+vVZVrkLXVugBN5ZRWmzxFnMDuRV1Zxwip5Xnt1+WSF82HmZRfgLC2frO/w5NZziFzJIyv83P6sPXVCRDV5ZB2kssjTDasoMGu6pa4eU0GhWX1an/Cs/qwPA1Zv1ocDa4k5lqXEg9WP9WHC6sX6sGFNN7VbHz6s9VsfTqzUtRGpYsWazqlzEEnixVqv9eHGmu6J0/QJYsdao/VhyJoeaoozcmSlr3llJ56s9VgfpqzpnLpKnYW4stZhffiypq+urQ9jVufWhzWrY+vDm9Wt9eHO6tL6sGelr5FaqAhYnVmfGFjTlYMdE5NIWEtsBaFSJKz0db8UioXVRaONhpW6rKBC8bBWv7HxsJKXXZcUDyt18X9Z8bCS112XFA9r9VfS8bBS16+TFQ1r9a4pHlYHo/ZIWLUbi9kqDlYnrn8UrK4CihGwOgsU82d19/ETd1aXH7UxZ3X6uQhr1pPbKRCcWalb1JjEl/XZ+Wd7bFnduA9ATFlXdXwNw5O1nq+cOLLW8f3AWQxZa/smnh9rfV+bcmN17D4AMWMl7hRKEyvWRb2TgDmxEjeUJIsPa40f017EhtXDBFEmrI8+pl7xYCVvglZKLFirv76wEgPWoa8VO8Kz1uo+AIVm3XhcQ8QjK9p/9b+aOl8d74Td5HUI0IbJJTbHrSifrDtwbi/uAxBmnYOfjgeT4n6ZxE2LXQhspZrO0TomjttT53fDtZpCSlrBHdbfUZty/phddgK+DrLgF9zr9hns31lH7Odl0u2GWpdrAti2yQP47bunrFdg39jPDgP+rnlStWeBjcrTLrrPzdp8BKJNUPt18NEuH8Fu+LPfRfbWq79as5YQ7SpBG6z3QlfQoQ4SGdo8qDkPMXqEz68C1/DQMXQVnakPwc5xHzzyCrJCZQ1Scl3DY01xJ6DjcJnvgyysi49ZGQjf1ov3i442w3d6Q1SXw0d0OMTwy7WQi/QzekadcyNWXMZIP6YU9U7pJlwdHemEiE4//0iB3NiNbIaBhBjEFv8Xt1u8xDgb4U+pxUYNi40ocnz70t++1wp2p53EgkKY0v8hYpxOJLVVya6s5RT7GB2ojtT1KAKG93Ia598u16+xgkLhB+4VyXreX0tU0t1BwfBX4RnJffFZm1oXMHSqAXaJvqR8lTFVJk17eQztdpbjl4IXFUT3VQ/7fx26vJ/labYoqnrhaPymKMenVtfHfjfnpuz4ttFUWve9uQ42RmkdItnniFkGm6nwKaKV8aXj4CN0FV3Jpj8dhq6kE53sgiu5+UzsZT0mHSkc6Kh0oLypmczNJ2SrOXXdwXgf5DKTEJcx3tvHsuPQtXrkwFfXVb7j6ezi6aZOu+ox/D8325W5pKB6P+VuVlQ8qzNaj3d5N+Ombr6bTEeW9/Mfj3CQnADbW2kAAAAASUVORK5CYII=";

/// Escapes text for inclusion in HTML element or attribute content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Wraps bare http(s) URLs in already-escaped text with anchor tags.
fn linkify(escaped: &str) -> String {
    static LINK: OnceLock<Regex> = OnceLock::new();
    let re = LINK.get_or_init(|| Regex::new(r"https?://[^\s<]+").expect("valid link pattern"));
    re.replace_all(escaped, |caps: &regex::Captures<'_>| {
        let url = &caps[0];
        format!(r#"<a href="{url}">{url}</a>"#)
    })
    .into_owned()
}

/// Renders a [`Transcript`] into an HTML document.
///
/// # Example
///
/// ```rust
/// use chatmap::{HtmlRenderer, TranscriptParser};
///
/// let transcript = TranscriptParser::new()
///     .parse_str("12/10/14, 00:59:54: Alice: Hello", ".")?;
///
/// let html = HtmlRenderer::new().render_to_string(&transcript)?;
/// assert!(html.contains("Alice"));
/// # Ok::<(), chatmap::ChatmapError>(())
/// ```
pub struct HtmlRenderer {
    config: RenderConfig,
}

impl HtmlRenderer {
    /// Creates a renderer with default configuration.
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    /// Creates a renderer with custom configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the transcript to any writable sink.
    ///
    /// Emits the page header, the summary block (unless disabled), one block
    /// per message in transcript order, and the page footer.
    pub fn render<W: Write>(&self, transcript: &Transcript, sink: &mut W) -> Result<()> {
        let header = self
            .config
            .header_template
            .as_deref()
            .unwrap_or(DEFAULT_HEADER);
        let footer = self
            .config
            .footer_template
            .as_deref()
            .unwrap_or(DEFAULT_FOOTER);

        let title = escape_html(&self.config.title);
        sink.write_all(header.replace("{title}", &title).as_bytes())?;

        if self.config.include_summary {
            self.render_summary(&transcript.stats(), sink)?;
        }

        for message in transcript.messages() {
            self.render_message(message, transcript.source_dir(), sink)?;
        }

        sink.write_all(footer.as_bytes())?;
        Ok(())
    }

    /// Renders the transcript to a `String`.
    pub fn render_to_string(&self, transcript: &Transcript) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(transcript, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn render_summary<W: Write>(&self, stats: &TranscriptStats, sink: &mut W) -> Result<()> {
        writeln!(sink, r#"<ul class="summary">"#)?;
        writeln!(sink, "  <li>messages: {}</li>", stats.messages)?;
        writeln!(sink, "  <li>notices: {}</li>", stats.notices)?;
        writeln!(sink, "  <li>attachments: {}</li>", stats.attachments)?;
        writeln!(sink, "  <li>participants: {}</li>", stats.participants.len())?;
        writeln!(sink, "  <li>file extensions: {}</li>", stats.extensions.len())?;
        writeln!(sink, "</ul>")?;
        Ok(())
    }

    fn render_message<W: Write>(
        &self,
        message: &Message,
        source_dir: &Path,
        sink: &mut W,
    ) -> Result<()> {
        let class = if message.is_system_notice() {
            "message notice"
        } else {
            "message"
        };
        writeln!(sink, r#"<div class="{class}">"#)?;

        write!(
            sink,
            r#"  <p class="meta"><span class="timestamp">{}</span>"#,
            escape_html(message.timestamp_text())
        )?;
        if let Some(sender) = message.sender() {
            write!(sink, r#" <span class="sender">{}</span>"#, escape_html(sender))?;
        }
        writeln!(sink, "</p>")?;

        // On attachment-bearing messages the marker line is replaced by the
        // embed below; everything else renders as body text.
        let hide_markers = message.has_attachment();
        let visible: Vec<&str> = message
            .body_lines()
            .filter(|line| !(hide_markers && is_attachment_marker(line)))
            .collect();

        if visible.iter().any(|line| !line.trim().is_empty()) {
            let rendered: Vec<String> = visible
                .iter()
                .map(|line| linkify(&escape_html(line)))
                .collect();
            writeln!(sink, r#"  <p class="body">{}</p>"#, rendered.join("<br>"))?;
        }

        if let Some(attachment) = message.attachment() {
            self.render_attachment(attachment, source_dir, sink)?;
        }

        writeln!(sink, "</div>")?;
        Ok(())
    }

    fn render_attachment<W: Write>(
        &self,
        attachment: &Attachment,
        source_dir: &Path,
        sink: &mut W,
    ) -> Result<()> {
        let Some(filename) = attachment.filename.as_deref() else {
            writeln!(sink, r#"  <p class="media-omitted">media omitted</p>"#)?;
            return Ok(());
        };

        let path = source_dir.join(filename);
        if self.config.check_media && !path.exists() {
            writeln!(
                sink,
                r#"  <p class="media-omitted">missing media: {}</p>"#,
                escape_html(filename)
            )?;
            return Ok(());
        }

        let href = escape_html(&path.display().to_string());
        match attachment.kind {
            MediaKind::Image => writeln!(
                sink,
                r#"  <img class="attachment" src="{href}" alt="{}">"#,
                escape_html(filename)
            )?,
            MediaKind::Video => writeln!(
                sink,
                r#"  <a class="attachment" href="{href}"><img src="{VIDEO_PLACEHOLDER}" alt="video"></a>"#
            )?,
            MediaKind::Audio | MediaKind::Document | MediaKind::None => writeln!(
                sink,
                r#"  <a class="attachment" href="{href}"><img src="{FILE_PLACEHOLDER}" alt="file"></a>"#
            )?,
        }
        Ok(())
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
