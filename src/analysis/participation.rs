//! Participation analysis: pure counting aggregates.
//!
//! Exact tallies over the full message sequence in a single O(n) pass:
//! totals, per-participant counts and share, per-hour / per-weekday /
//! per-date histograms, conversation span, and average message length per
//! participant. System messages are counted separately and excluded from
//! all participant-keyed statistics.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::parser::Transcript;

/// Counting aggregates for one transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participation {
    /// Participant-authored messages (system lines excluded).
    pub total_messages: usize,
    /// Platform-event lines.
    pub system_messages: usize,
    /// Messages per participant.
    pub per_participant: BTreeMap<String, usize>,
    /// Percentage share of `total_messages` per participant.
    pub participant_share: BTreeMap<String, f64>,
    /// Messages per hour-of-day bucket.
    pub per_hour: [usize; 24],
    /// Messages per weekday, Monday first.
    pub per_weekday: [usize; 7],
    /// Messages per calendar date.
    pub per_date: BTreeMap<NaiveDate, usize>,
    /// Timestamp of the first message, if any.
    pub first_timestamp: Option<NaiveDateTime>,
    /// Timestamp of the last message, if any.
    pub last_timestamp: Option<NaiveDateTime>,
    /// Inclusive span between first and last message, in days.
    pub duration_days: i64,
    /// Number of distinct dates with at least one participant message.
    pub active_days: usize,
    /// `total_messages / active_days` (0 when there are no active days).
    pub avg_messages_per_active_day: f64,
    /// Mean characters per message per participant.
    pub avg_chars_per_message: BTreeMap<String, f64>,
    /// Mean words per message per participant.
    pub avg_words_per_message: BTreeMap<String, f64>,
}

/// Tallies participation statistics over a transcript.
pub fn analyze(transcript: &Transcript) -> Participation {
    let mut stats = Participation::default();
    let mut chars: BTreeMap<&str, usize> = BTreeMap::new();
    let mut words: BTreeMap<&str, usize> = BTreeMap::new();

    for msg in &transcript.messages {
        if msg.is_system() {
            stats.system_messages += 1;
            continue;
        }

        stats.total_messages += 1;
        *stats
            .per_participant
            .entry(msg.sender().to_string())
            .or_insert(0) += 1;
        *chars.entry(msg.sender()).or_insert(0) += msg.char_count();
        *words.entry(msg.sender()).or_insert(0) += msg.word_count();

        let ts = msg.timestamp();
        stats.per_hour[ts.hour() as usize] += 1;
        stats.per_weekday[ts.weekday().num_days_from_monday() as usize] += 1;
        *stats.per_date.entry(ts.date()).or_insert(0) += 1;

        if stats.first_timestamp.is_none() {
            stats.first_timestamp = Some(ts);
        }
        stats.last_timestamp = Some(ts);
    }

    if let (Some(first), Some(last)) = (stats.first_timestamp, stats.last_timestamp) {
        stats.duration_days = (last.date() - first.date()).num_days() + 1;
    }

    stats.active_days = stats.per_date.len();
    if stats.active_days > 0 {
        stats.avg_messages_per_active_day =
            stats.total_messages as f64 / stats.active_days as f64;
    }

    let total = stats.total_messages as f64;
    for (sender, count) in &stats.per_participant {
        stats
            .participant_share
            .insert(sender.clone(), *count as f64 / total * 100.0);
    }
    for (sender, total_chars) in chars {
        let count = stats.per_participant[sender] as f64;
        stats
            .avg_chars_per_message
            .insert(sender.to_string(), total_chars as f64 / count);
    }
    for (sender, total_words) in words {
        let count = stats.per_participant[sender] as f64;
        stats
            .avg_words_per_message
            .insert(sender.to_string(), total_words as f64 / count);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TranscriptParser;

    fn analyze_text(content: &str) -> Participation {
        analyze(&TranscriptParser::new().parse_str(content))
    }

    #[test]
    fn test_counts_and_share() {
        let p = analyze_text(
            "01/05/2024 10:00 - A: oi\n01/05/2024 10:01 - B: olá\n01/05/2024 10:02 - A: tudo bem?",
        );
        assert_eq!(p.total_messages, 3);
        assert_eq!(p.per_participant["A"], 2);
        assert_eq!(p.per_participant["B"], 1);
        assert!((p.participant_share["A"] - 66.666_666).abs() < 0.001);
        assert!((p.participant_share["B"] - 33.333_333).abs() < 0.001);
    }

    #[test]
    fn test_system_excluded_from_participant_stats() {
        let p = analyze_text(
            "01/05/2024 09:59 - grupo criado\n01/05/2024 10:00 - A: oi",
        );
        assert_eq!(p.system_messages, 1);
        assert_eq!(p.total_messages, 1);
        assert_eq!(p.per_participant.len(), 1);
        // system line does not land in histograms either
        assert_eq!(p.per_hour.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_hour_and_weekday_buckets() {
        // 01/05/2024 is a Wednesday
        let p = analyze_text("01/05/2024 22:15 - A: boa noite");
        assert_eq!(p.per_hour[22], 1);
        assert_eq!(p.per_weekday[2], 1);
    }

    #[test]
    fn test_dates_and_span() {
        let p = analyze_text(
            "01/05/2024 10:00 - A: oi\n01/05/2024 11:00 - B: oi\n03/05/2024 09:00 - A: voltei",
        );
        assert_eq!(p.active_days, 2);
        assert_eq!(p.duration_days, 3);
        assert!((p.avg_messages_per_active_day - 1.5).abs() < f64::EPSILON);
        let first_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(p.per_date[&first_date], 2);
    }

    #[test]
    fn test_message_length_averages() {
        let p = analyze_text(
            "01/05/2024 10:00 - A: um dois\n01/05/2024 10:01 - A: tres quatro cinco seis",
        );
        assert!((p.avg_words_per_message["A"] - 3.0).abs() < f64::EPSILON);
        // "um dois" = 7 chars, "tres quatro cinco seis" = 22 chars
        assert!((p.avg_chars_per_message["A"] - 14.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_transcript() {
        let p = analyze_text("");
        assert_eq!(p.total_messages, 0);
        assert_eq!(p.duration_days, 0);
        assert!(p.first_timestamp.is_none());
        assert!((p.avg_messages_per_active_day).abs() < f64::EPSILON);
    }

    #[test]
    fn test_placeholder_counts_toward_totals() {
        let p = analyze_text("01/05/2024 10:00 - A: <Mídia oculta>");
        assert_eq!(p.total_messages, 1);
        assert_eq!(p.per_participant["A"], 1);
    }
}
