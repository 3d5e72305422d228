//! Lexicon-based sentiment analysis.
//!
//! Deliberately simple: disjoint positive/negative word lists, no negation
//! handling, no intensity modifiers. Per message, polarity is positive hits
//! minus negative hits; a message is neutral when polarity is 0 or no
//! lexicon words are present.
//!
//! Aggregates are reported on a bounded -1..+1 scale: the hit ratio
//! `(positive - negative) / (positive + negative)` over a participant's (or
//! everyone's) non-system, non-placeholder messages. `None` when the lexicon
//! never matched, which scorers treat as "no signal" rather than neutral
//! certainty. The same scale is used by the relationship scorer.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::parser::Transcript;

/// Lexicon hit counts and score for one participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantSentiment {
    /// Positive lexicon hits.
    pub positive_hits: usize,
    /// Negative lexicon hits.
    pub negative_hits: usize,
    /// `(positive - negative) / (positive + negative)`, `None` without hits.
    pub score: Option<f64>,
}

/// Aggregate sentiment for a transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Per-participant hit counts and scores.
    pub per_participant: BTreeMap<String, ParticipantSentiment>,
    /// Hit ratio over all participants combined, -1..+1.
    pub overall: Option<f64>,
}

/// Polarity of a single message text: positive hits minus negative hits.
///
/// 0 means neutral (either balanced hits or no lexicon words at all).
pub fn message_polarity(text: &str, config: &AnalyzerConfig) -> i64 {
    let (positive, negative) = count_hits(text, config);
    positive as i64 - negative as i64
}

fn count_hits(text: &str, config: &AnalyzerConfig) -> (usize, usize) {
    // Fixed literal; compilation cannot fail.
    let word_re = Regex::new(r"[\p{L}\p{N}']+").expect("valid word pattern");
    let lowered = text.to_lowercase();
    let mut positive = 0;
    let mut negative = 0;
    for token in word_re.find_iter(&lowered) {
        let word = token.as_str().trim_matches('\'');
        if config.positive_words.contains(word) {
            positive += 1;
        } else if config.negative_words.contains(word) {
            negative += 1;
        }
    }
    (positive, negative)
}

fn ratio(positive: usize, negative: usize) -> Option<f64> {
    let total = positive + negative;
    if total == 0 {
        None
    } else {
        Some((positive as f64 - negative as f64) / total as f64)
    }
}

/// Computes sentiment aggregates over a transcript.
pub fn analyze(transcript: &Transcript, config: &AnalyzerConfig) -> SentimentSummary {
    let mut per_participant: BTreeMap<String, ParticipantSentiment> = transcript
        .participants
        .iter()
        .map(|p| (p.clone(), ParticipantSentiment::default()))
        .collect();

    for msg in transcript.participant_messages() {
        if msg.is_media_placeholder() {
            continue;
        }
        let (positive, negative) = count_hits(msg.text(), config);
        if let Some(entry) = per_participant.get_mut(msg.sender()) {
            entry.positive_hits += positive;
            entry.negative_hits += negative;
        }
    }

    let mut total_positive = 0;
    let mut total_negative = 0;
    for entry in per_participant.values_mut() {
        entry.score = ratio(entry.positive_hits, entry.negative_hits);
        total_positive += entry.positive_hits;
        total_negative += entry.negative_hits;
    }

    SentimentSummary {
        per_participant,
        overall: ratio(total_positive, total_negative),
    }
}
