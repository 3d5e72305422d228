//! WhatsApp TXT transcript parser.
//!
//! Converts the raw decoded text of an exported log into an ordered
//! [`Transcript`] of [`Message`] values in a single linear pass.
//!
//! # Format
//!
//! One strict header pattern is supported:
//!
//! ```text
//! DD/MM/YYYY HH:MM - Sender: text
//! DD/MM/YYYY HH:MM - system event text
//! ```
//!
//! Any line that does not match the header pattern is a continuation of the
//! current message and is appended with its original line break. Lines that
//! appear before the first valid header are discarded silently. Malformed
//! individual lines never abort the parse — the parser degrades by dropping
//! or appending, and only undecodable input is fatal (handled upstream by
//! the loader).

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::message::{Message, TIMESTAMP_FORMAT};

/// Header pattern: `DD/MM/YYYY HH:MM - rest`.
const HEADER_PATTERN: &str = r"^(\d{2}/\d{2}/\d{4} \d{2}:\d{2}) - (.+)$";

/// Sender split within a header's rest: `Sender: text`.
const SENDER_PATTERN: &str = r"^([^:]+):\s?(.*)$";

/// A parsed conversation: the ordered message sequence plus the distinct
/// non-system senders found in it.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Messages in input order. Timestamps are non-decreasing.
    pub messages: Vec<Message>,
    /// Sorted distinct senders of non-system messages. May hold any number
    /// of participants; two is the common case for this analyzer.
    pub participants: Vec<String>,
}

impl Transcript {
    /// Returns the number of messages, system lines included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` when no message parsed at all.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over participant-authored (non-system) messages.
    pub fn participant_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_system())
    }
}

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatpulse::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let transcript = parser.parse_str("01/05/2024 10:00 - Alice: oi!\ntudo bem?");
/// assert_eq!(transcript.len(), 1);
/// assert_eq!(transcript.messages[0].text(), "oi!\ntudo bem?");
/// ```
pub struct TranscriptParser {
    config: AnalyzerConfig,
    header: Regex,
    sender: Regex,
}

impl TranscriptParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates a parser with a custom configuration (placeholder tokens,
    /// system phrases).
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            // Both patterns are fixed literals; compilation cannot fail.
            header: Regex::new(HEADER_PATTERN).expect("valid header pattern"),
            sender: Regex::new(SENDER_PATTERN).expect("valid sender pattern"),
        }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid UTF-8.
    pub fn parse_file(&self, path: &Path) -> Result<Transcript> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes)?;
        Ok(self.parse_str(&content))
    }

    /// Parses raw transcript text into an ordered message sequence.
    ///
    /// A transcript with zero parseable headers yields an empty transcript,
    /// not an error. Out-of-order headers (timestamps going backwards) are
    /// discarded together with their continuation lines so the output
    /// sequence stays chronological.
    pub fn parse_str(&self, content: &str) -> Transcript {
        let mut builder = TranscriptBuilder::new(&self.config);
        // Exports sometimes begin with a BOM that survives extraction.
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for line in content.lines() {
            if let Some(caps) = self.header.captures(line) {
                let timestamp_str = caps.get(1).map_or("", |m| m.as_str());
                let rest = caps.get(2).map_or("", |m| m.as_str()).trim();

                // The pattern guarantees the shape but not calendar validity
                // (e.g. 31/02); drop headers chrono rejects.
                let Ok(timestamp) =
                    NaiveDateTime::parse_from_str(timestamp_str, TIMESTAMP_FORMAT)
                else {
                    builder.discard_current();
                    continue;
                };

                // System phrasing wins even when a colon makes the line look
                // like `Sender: text` (the encryption banner does both).
                if self.config.matches_system_phrase(rest) {
                    builder.start_system(timestamp, rest);
                } else if let Some(sender_caps) = self.sender.captures(rest) {
                    let sender = sender_caps.get(1).map_or("", |m| m.as_str()).trim();
                    let text = sender_caps.get(2).map_or("", |m| m.as_str());
                    builder.start_message(timestamp, sender, text);
                } else {
                    // No `Sender: ` segment before the first colon: platform
                    // event, no reliable author.
                    builder.start_system(timestamp, rest);
                }
            } else {
                builder.continuation(line);
            }
        }

        builder.finish()
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates the message currently being assembled during the line scan.
struct TranscriptBuilder<'a> {
    config: &'a AnalyzerConfig,
    messages: Vec<Message>,
    current: Option<PendingMessage>,
    // Set while skipping a discarded (out-of-order or invalid) message so
    // its continuation lines are dropped too.
    discarding: bool,
}

struct PendingMessage {
    timestamp: NaiveDateTime,
    sender: String,
    is_system: bool,
    lines: Vec<String>,
}

impl<'a> TranscriptBuilder<'a> {
    fn new(config: &'a AnalyzerConfig) -> Self {
        Self {
            config,
            messages: Vec::new(),
            current: None,
            discarding: false,
        }
    }

    fn start_message(&mut self, timestamp: NaiveDateTime, sender: &str, text: &str) {
        self.flush();
        if self.out_of_order(timestamp) {
            self.discarding = true;
            return;
        }
        self.discarding = false;
        self.current = Some(PendingMessage {
            timestamp,
            sender: sender.to_string(),
            is_system: false,
            lines: vec![text.to_string()],
        });
    }

    fn start_system(&mut self, timestamp: NaiveDateTime, text: &str) {
        self.flush();
        if self.out_of_order(timestamp) {
            self.discarding = true;
            return;
        }
        self.discarding = false;
        self.current = Some(PendingMessage {
            timestamp,
            sender: String::new(),
            is_system: true,
            lines: vec![text.to_string()],
        });
    }

    fn continuation(&mut self, line: &str) {
        if self.discarding {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.lines.push(line.to_string());
        }
        // Orphan line before any valid header: discarded silently.
    }

    fn discard_current(&mut self) {
        self.flush();
        self.discarding = true;
    }

    fn out_of_order(&self, timestamp: NaiveDateTime) -> bool {
        self.messages
            .last()
            .is_some_and(|last| timestamp < last.timestamp())
    }

    fn flush(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };
        let text: String = pending
            .lines
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        let text = text.trim();

        // A header with nothing but whitespace after it is dropped; every
        // emitted Message has non-empty text.
        let Ok(msg) = Message::new(pending.timestamp, pending.sender, text) else {
            return;
        };

        let msg = if pending.is_system {
            msg.as_system()
        } else if self.config.is_media_placeholder(msg.text()) {
            msg.as_media_placeholder()
        } else {
            msg
        };
        self.messages.push(msg);
    }

    fn finish(mut self) -> Transcript {
        self.flush();

        let mut participants: Vec<String> = Vec::new();
        for msg in &self.messages {
            if !msg.is_system() && !participants.iter().any(|p| p == msg.sender()) {
                participants.push(msg.sender().to_string());
            }
        }
        participants.sort();

        Transcript {
            messages: self.messages,
            participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Transcript {
        TranscriptParser::new().parse_str(content)
    }

    #[test]
    fn test_single_message() {
        let t = parse("01/05/2024 10:00 - Alice: oi");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages[0].sender(), "Alice");
        assert_eq!(t.messages[0].text(), "oi");
        assert_eq!(t.participants, vec!["Alice"]);
    }

    #[test]
    fn test_continuation_lines_append() {
        let t = parse("01/01/2024 10:00 - A: hi\nworld");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages[0].text(), "hi\nworld");
    }

    #[test]
    fn test_blank_continuation_preserved() {
        let t = parse("01/01/2024 10:00 - A: first\n\nthird");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages[0].text(), "first\n\nthird");
    }

    #[test]
    fn test_system_message_no_sender_segment() {
        let t = parse("01/05/2024 09:59 - Alice entrou usando o link de convite");
        assert_eq!(t.len(), 1);
        assert!(t.messages[0].is_system());
        assert_eq!(t.messages[0].sender(), "");
        assert!(t.participants.is_empty());
    }

    #[test]
    fn test_system_phrase_with_sender_prefix() {
        // Encryption notice sometimes carries a colon in older exports.
        let t = parse(
            "01/05/2024 09:59 - Alice: Messages and calls are end-to-end encrypted. No one \
             outside of this chat can read them.",
        );
        assert_eq!(t.len(), 1);
        assert!(t.messages[0].is_system());
        assert!(t.participants.is_empty());
    }

    #[test]
    fn test_media_placeholder_flagged_and_kept() {
        let t = parse("01/05/2024 10:00 - Alice: <Mídia oculta>");
        assert_eq!(t.len(), 1);
        assert!(t.messages[0].is_media_placeholder());
        assert!(!t.messages[0].is_system());
        assert_eq!(t.participants, vec!["Alice"]);
    }

    #[test]
    fn test_orphan_lines_before_first_header_discarded() {
        let t = parse("junk line\nmore junk\n01/05/2024 10:00 - Alice: oi");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages[0].text(), "oi");
    }

    #[test]
    fn test_empty_input_yields_empty_transcript() {
        assert!(parse("").is_empty());
        assert!(parse("no headers at all\njust noise").is_empty());
    }

    #[test]
    fn test_message_with_colon_in_text() {
        let t = parse("01/05/2024 10:00 - Alice: lembrete: comprar pão");
        assert_eq!(t.messages[0].sender(), "Alice");
        assert_eq!(t.messages[0].text(), "lembrete: comprar pão");
    }

    #[test]
    fn test_two_digit_year_not_a_header() {
        // Outside the single supported format: becomes a continuation or is
        // discarded, never a new message.
        let t = parse("01/05/2024 10:00 - Alice: oi\n01/05/24 10:05 - Bob: tchau");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages[0].text(), "oi\n01/05/24 10:05 - Bob: tchau");
    }

    #[test]
    fn test_invalid_calendar_date_discarded_with_continuations() {
        let t = parse(
            "01/05/2024 10:00 - Alice: oi\n31/02/2024 11:00 - Bob: impossible\ncontinuation\n\
             01/05/2024 12:00 - Bob: real",
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.messages[1].text(), "real");
    }

    #[test]
    fn test_out_of_order_header_discarded() {
        let t = parse(
            "02/05/2024 10:00 - Alice: oi\n01/05/2024 09:00 - Bob: earlier\n\
             02/05/2024 11:00 - Bob: later",
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.messages[0].sender(), "Alice");
        assert_eq!(t.messages[1].text(), "later");
        // ordering invariant holds
        assert!(t.messages[0].timestamp() <= t.messages[1].timestamp());
    }

    #[test]
    fn test_whitespace_only_message_dropped() {
        let t = parse("01/05/2024 10:00 - Alice:  \n   \n01/05/2024 10:01 - Bob: oi");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages[0].sender(), "Bob");
    }

    #[test]
    fn test_participants_sorted_distinct() {
        let t = parse(
            "01/05/2024 10:00 - Zeca: a\n01/05/2024 10:01 - Ana: b\n01/05/2024 10:02 - Zeca: c",
        );
        assert_eq!(t.participants, vec!["Ana", "Zeca"]);
    }

    #[test]
    fn test_bom_stripped() {
        let t = parse("\u{feff}01/05/2024 10:00 - Alice: oi");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let t = parse("01/05/2024 10:00 - Alice: oi\r\ncontinua\r\n01/05/2024 10:01 - Bob: ola");
        assert_eq!(t.len(), 2);
        assert_eq!(t.messages[0].text(), "oi\ncontinua");
    }

    #[test]
    fn test_participant_messages_iterator() {
        let t = parse(
            "01/05/2024 09:59 - criou o grupo \"nós\"\n01/05/2024 10:00 - Alice: oi\n\
             01/05/2024 10:01 - Bob: ola",
        );
        assert_eq!(t.len(), 3);
        assert_eq!(t.participant_messages().count(), 2);
    }
}
