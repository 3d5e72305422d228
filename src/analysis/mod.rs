//! Metrics engine: independent analyzer passes over a parsed transcript.
//!
//! This module contains:
//! - [`timing`] - response-time analysis
//! - [`participation`] - message counts and activity histograms
//! - [`lexical`] - word and emoji frequency
//! - [`sentiment`] - lexicon-based polarity
//!
//! Each analyzer is a pure function over the same immutable message
//! sequence, writing its own isolated result. [`MetricsSnapshot::build`]
//! fans out over all of them and collects the results; no analyzer depends
//! on another's output, so ordering between the passes is irrelevant.
//!
//! # Quick Start
//!
//! ```rust
//! use chatpulse::analysis::MetricsSnapshot;
//! use chatpulse::config::AnalyzerConfig;
//! use chatpulse::parser::TranscriptParser;
//!
//! let config = AnalyzerConfig::default();
//! let transcript = TranscriptParser::new()
//!     .parse_str("01/05/2024 10:00 - Alice: bom dia!");
//! let snapshot = MetricsSnapshot::build(&transcript, &config);
//! assert_eq!(snapshot.participation.total_messages, 1);
//! ```

pub mod lexical;
pub mod participation;
pub mod sentiment;
pub mod timing;

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::parser::Transcript;

pub use lexical::LexicalStats;
pub use participation::Participation;
pub use sentiment::SentimentSummary;
pub use timing::ResponseTimes;

/// The complete set of derived statistics for one transcript.
///
/// Built once per analysis run and read-only afterward. The scorer and the
/// insight generator both consume this structure; neither touches the
/// message sequence again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Sorted distinct non-system senders.
    pub participants: Vec<String>,
    /// Counts and activity histograms.
    pub participation: Participation,
    /// Per-participant and global average response times.
    pub response_times: ResponseTimes,
    /// Word and emoji frequency tables.
    pub lexical: LexicalStats,
    /// Lexicon-based polarity per participant and globally.
    pub sentiment: SentimentSummary,
}

impl MetricsSnapshot {
    /// Runs every analyzer over the transcript and collects the results.
    pub fn build(transcript: &Transcript, config: &AnalyzerConfig) -> Self {
        Self {
            participants: transcript.participants.clone(),
            participation: participation::analyze(transcript),
            response_times: timing::analyze(transcript, config),
            lexical: lexical::analyze(transcript, config),
            sentiment: sentiment::analyze(transcript, config),
        }
    }
}
