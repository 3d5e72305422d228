//! Transcript message type.
//!
//! This module provides [`Message`], the typed record produced by the
//! transcript parser. Every analyzer consumes the same immutable sequence of
//! these values.
//!
//! # Overview
//!
//! A message consists of:
//! - **Required**: `timestamp` (naive, the export carries no timezone) and `text`
//! - **Classification**: `is_system` and `is_media_placeholder` flags set by
//!   the parser, never by this type
//!
//! System messages (encryption notices, group events) have an empty `sender`
//! and are excluded from all participant-keyed statistics.
//!
//! # Examples
//!
//! ```
//! use chatpulse::Message;
//!
//! let msg = Message::parse_header("01/05/2024 10:00", "Alice", "oi, tudo bem?")?;
//! assert_eq!(msg.sender(), "Alice");
//! assert!(!msg.is_system());
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ChatpulseError, Result};

/// Timestamp format used by the supported export locale.
///
/// This is a narrow, explicit format contract: anything that does not match
/// `DD/MM/YYYY HH:MM` is rejected rather than fuzzily parsed.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A single message from a parsed chat transcript.
///
/// Constructed once by [`TranscriptParser`](crate::parser::TranscriptParser)
/// and never mutated afterward. The parser guarantees that `text` is
/// non-empty after trimming and that timestamps are non-decreasing across
/// the parsed sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent. Naive calendar date + time; WhatsApp
    /// exports carry no timezone information.
    pub timestamp: NaiveDateTime,

    /// Display name of the author. Empty for system messages.
    pub sender: String,

    /// Text content. May contain newlines for multiline messages.
    pub text: String,

    /// `true` for platform events (encryption notice, group changes) that
    /// have no reliable author.
    #[serde(default)]
    pub is_system: bool,

    /// `true` when the text is a media-omitted marker rather than real
    /// content. Kept for timing/count statistics, excluded from lexical
    /// analysis.
    #[serde(default)]
    pub is_media_placeholder: bool,
}

impl Message {
    /// Creates a participant message, validating the invariants enforced at
    /// this layer: the timestamp string must match `DD/MM/YYYY HH:MM` and
    /// the text must be non-empty after trimming.
    ///
    /// System/placeholder classification is the parser's responsibility, not
    /// this type's; both flags start as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidFormat`] when the timestamp does not
    /// match the expected pattern or the text is blank.
    pub fn parse_header(
        timestamp: &str,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self> {
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| ChatpulseError::invalid_format("timestamp", e.to_string()))?;
        Self::new(timestamp, sender, text)
    }

    /// Creates a participant message from an already-parsed timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidFormat`] when the text is blank.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatpulseError::invalid_format(
                "message text",
                "must be non-empty after trimming",
            ));
        }
        Ok(Self {
            timestamp,
            sender: sender.into(),
            text,
            is_system: false,
            is_media_placeholder: false,
        })
    }

    // =========================================================================
    // Builder methods (used by the parser during classification)
    // =========================================================================

    /// Marks this message as a system event and clears its sender.
    #[must_use]
    pub fn as_system(mut self) -> Self {
        self.is_system = true;
        self.sender.clear();
        self
    }

    /// Marks this message as a media placeholder.
    #[must_use]
    pub fn as_media_placeholder(mut self) -> Self {
        self.is_media_placeholder = true;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name. Empty for system messages.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns `true` for platform events with no reliable author.
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns `true` when the text is a media-omitted marker.
    pub fn is_media_placeholder(&self) -> bool {
        self.is_media_placeholder
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` for messages that carry analyzable content: authored
    /// by a participant and not a media placeholder.
    pub fn has_lexical_content(&self) -> bool {
        !self.is_system && !self.is_media_placeholder
    }

    /// Number of whitespace-separated words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_header_valid() {
        let msg = Message::parse_header("01/05/2024 10:30", "Alice", "oi").unwrap();
        assert_eq!(msg.sender(), "Alice");
        assert_eq!(msg.text(), "oi");
        assert_eq!(msg.timestamp().day(), 1);
        assert_eq!(msg.timestamp().month(), 5);
        assert_eq!(msg.timestamp().year(), 2024);
        assert_eq!(msg.timestamp().hour(), 10);
        assert_eq!(msg.timestamp().minute(), 30);
        assert!(!msg.is_system());
        assert!(!msg.is_media_placeholder());
    }

    #[test]
    fn test_parse_header_rejects_bad_timestamp() {
        // Two-digit year, US order, or ISO dates are all outside the contract
        assert!(Message::parse_header("01/05/24 10:30", "A", "oi").is_err());
        assert!(Message::parse_header("2024-05-01 10:30", "A", "oi").is_err());
        assert!(Message::parse_header("01/05/2024", "A", "oi").is_err());
    }

    #[test]
    fn test_new_rejects_blank_text() {
        let ts = NaiveDateTime::parse_from_str("01/05/2024 10:30", TIMESTAMP_FORMAT).unwrap();
        assert!(Message::new(ts, "Alice", "").is_err());
        assert!(Message::new(ts, "Alice", "   \n  ").is_err());
        assert!(Message::new(ts, "Alice", "x").is_ok());
    }

    #[test]
    fn test_as_system_clears_sender() {
        let msg = Message::parse_header("01/05/2024 10:30", "ignored", "encryption notice")
            .unwrap()
            .as_system();
        assert!(msg.is_system());
        assert_eq!(msg.sender(), "");
        assert!(!msg.has_lexical_content());
    }

    #[test]
    fn test_as_media_placeholder() {
        let msg = Message::parse_header("01/05/2024 10:30", "Alice", "<Mídia oculta>")
            .unwrap()
            .as_media_placeholder();
        assert!(msg.is_media_placeholder());
        assert!(!msg.is_system());
        assert!(!msg.has_lexical_content());
    }

    #[test]
    fn test_counts() {
        let msg = Message::parse_header("01/05/2024 10:30", "Alice", "oi tudo bem").unwrap();
        assert_eq!(msg.word_count(), 3);
        assert_eq!(msg.char_count(), 11);
    }

    #[test]
    fn test_multiline_text_preserved() {
        let msg = Message::parse_header("01/05/2024 10:30", "Alice", "hi\nworld").unwrap();
        assert_eq!(msg.text(), "hi\nworld");
        assert_eq!(msg.word_count(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let msg = Message::parse_header("01/05/2024 10:30", "Alice", "hi\nthere").unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, parsed);
        // embedded newline survives the round trip
        assert_eq!(parsed.text(), "hi\nthere");
    }
}
