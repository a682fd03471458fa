//! Summary statistics over an assembled transcript.
//!
//! Computed once from the message records and rendered as the summary block
//! at the top of the HTML document.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::message::Message;

/// Counts and participant/extension sets for one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptStats {
    /// Messages with a sender
    pub messages: usize,
    /// Sender-less system notices
    pub notices: usize,
    /// Messages carrying an attachment reference (redacted ones included)
    pub attachments: usize,
    /// Distinct sender names, sorted
    pub participants: Vec<String>,
    /// Distinct attachment file extensions, sorted
    pub extensions: Vec<String>,
}

impl TranscriptStats {
    /// Computes statistics over a message sequence.
    pub fn collect(messages: &[Message]) -> Self {
        let mut participants = BTreeSet::new();
        let mut extensions = BTreeSet::new();
        let mut chat_count = 0;
        let mut notice_count = 0;
        let mut attachment_count = 0;

        for msg in messages {
            match msg.sender() {
                Some(sender) => {
                    chat_count += 1;
                    participants.insert(sender.to_string());
                }
                None => notice_count += 1,
            }
            if let Some(attachment) = msg.attachment() {
                attachment_count += 1;
                if let Some(ext) = attachment.extension() {
                    extensions.insert(ext.to_ascii_lowercase());
                }
            }
        }

        Self {
            messages: chat_count,
            notices: notice_count,
            attachments: attachment_count,
            participants: participants.into_iter().collect(),
            extensions: extensions.into_iter().collect(),
        }
    }
}
