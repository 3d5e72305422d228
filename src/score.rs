//! Relationship scoring: one bounded 0-100 number from the metrics.
//!
//! The score is a weighted sum of five sub-scores, each independently
//! clamped to [0, 100] before weighting so no single extreme factor can
//! push the total out of range:
//!
//! | component      | weight | normalization                                       |
//! |----------------|--------|-----------------------------------------------------|
//! | balance        | 0.30   | `100 - (max_share - min_share)`; 0 if < 2 senders   |
//! | engagement     | 0.25   | msgs per active day against the reference, capped   |
//! | positive emoji | 0.20   | positive-emoji ratio against the reference, capped  |
//! | responsiveness | 0.15   | linear from fast (100) to slow (0); 50 when unknown |
//! | sentiment      | 0.10   | -1..+1 mapped onto 0..100; 50 when unknown          |
//!
//! The weights are fixed constants summing to 1.0 and are pinned by tests.
//! Scoring is pure and deterministic given a snapshot: no randomness, no
//! external calls. An empty transcript scores 0.0 with all components at 0.

use serde::{Deserialize, Serialize};

use crate::analysis::MetricsSnapshot;
use crate::config::AnalyzerConfig;

/// Weight of message-count parity between participants.
pub const WEIGHT_BALANCE: f64 = 0.30;
/// Weight of conversation volume per active day.
pub const WEIGHT_ENGAGEMENT: f64 = 0.25;
/// Weight of affectionate emoji usage.
pub const WEIGHT_POSITIVE_EMOJI: f64 = 0.20;
/// Weight of reply speed.
pub const WEIGHT_RESPONSIVENESS: f64 = 0.15;
/// Weight of lexicon sentiment.
pub const WEIGHT_SENTIMENT: f64 = 0.10;

/// The five normalized sub-scores, each in [0, 100].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Message-count parity; 100 means a perfect 50/50 split.
    pub balance: f64,
    /// Messages per active day against the engagement reference.
    pub engagement: f64,
    /// Positive-emoji share against the reference ratio.
    pub positive_emoji: f64,
    /// Inverse of average reply time with diminishing returns.
    pub responsiveness: f64,
    /// Aggregate polarity mapped from -1..+1 onto 0..100.
    pub sentiment: f64,
}

/// Final compatibility score with its component breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipScore {
    /// Weighted total in [0, 100], rounded to one decimal.
    pub value: f64,
    /// The clamped sub-scores that produced the total.
    pub components: ScoreComponents,
}

impl RelationshipScore {
    /// Computes the score from a metrics snapshot.
    ///
    /// Deterministic and idempotent: the same snapshot always yields the
    /// same score.
    pub fn compute(snapshot: &MetricsSnapshot, config: &AnalyzerConfig) -> Self {
        if snapshot.participation.total_messages == 0 {
            return Self::default();
        }

        let components = ScoreComponents {
            balance: balance_score(snapshot),
            engagement: engagement_score(snapshot, config),
            positive_emoji: positive_emoji_score(snapshot, config),
            responsiveness: responsiveness_score(snapshot, config),
            sentiment: sentiment_score(snapshot),
        };

        let value = components.balance * WEIGHT_BALANCE
            + components.engagement * WEIGHT_ENGAGEMENT
            + components.positive_emoji * WEIGHT_POSITIVE_EMOJI
            + components.responsiveness * WEIGHT_RESPONSIVENESS
            + components.sentiment * WEIGHT_SENTIMENT;

        Self {
            value: round1(value),
            components,
        }
    }
}

/// Parity of message counts. Decays linearly as the share split diverges
/// from 50/50; a solo conversation has no parity to measure and scores 0.
fn balance_score(snapshot: &MetricsSnapshot) -> f64 {
    let shares = &snapshot.participation.participant_share;
    if shares.len() < 2 {
        return 0.0;
    }
    let max = shares.values().copied().fold(f64::MIN, f64::max);
    let min = shares.values().copied().fold(f64::MAX, f64::min);
    clamp(100.0 - (max - min))
}

fn engagement_score(snapshot: &MetricsSnapshot, config: &AnalyzerConfig) -> f64 {
    let per_day = snapshot.participation.avg_messages_per_active_day;
    clamp(per_day / config.engagement_reference * 100.0)
}

fn positive_emoji_score(snapshot: &MetricsSnapshot, config: &AnalyzerConfig) -> f64 {
    if snapshot.lexical.total_emojis == 0 {
        return 0.0;
    }
    clamp(snapshot.lexical.positive_emoji_ratio() / config.positive_emoji_reference * 100.0)
}

fn responsiveness_score(snapshot: &MetricsSnapshot, config: &AnalyzerConfig) -> f64 {
    let Some(avg) = snapshot.response_times.overall_minutes else {
        return 50.0;
    };
    if avg <= config.fast_reply_minutes {
        100.0
    } else if avg >= config.slow_reply_minutes {
        0.0
    } else {
        clamp(
            100.0
                * (1.0
                    - (avg - config.fast_reply_minutes)
                        / (config.slow_reply_minutes - config.fast_reply_minutes)),
        )
    }
}

fn sentiment_score(snapshot: &MetricsSnapshot) -> f64 {
    let Some(overall) = snapshot.sentiment.overall else {
        return 50.0;
    };
    clamp((overall.clamp(-1.0, 1.0) + 1.0) / 2.0 * 100.0)
}

fn clamp(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
