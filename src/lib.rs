//! # Chatpulse
//!
//! A Rust library for analyzing exported WhatsApp chat transcripts: message
//! timing, participation balance, vocabulary and emoji usage, lexicon-based
//! sentiment, and a combined 0-100 compatibility score.
//!
//! ## Overview
//!
//! Chatpulse takes the plain-text export WhatsApp produces ("Export chat")
//! and turns it into structured metrics:
//!
//! - **Parsing** — multi-line messages, system notices, media placeholders
//! - **Timing** — average reply times per participant, with a session ceiling
//!   so overnight gaps don't count as replies
//! - **Participation** — per-sender volume, hourly and weekday histograms
//! - **Lexical** — most-used words (stopword-filtered) and emojis
//! - **Sentiment** — lexicon hit ratio on a -1..+1 scale
//! - **Score** — a weighted 0-100 compatibility score with visible components
//!
//! An optional LLM advisor (behind the `llm` feature) can add up to five
//! suggestions on top of the deterministic report; it never affects the
//! metrics or the score.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! let config = AnalyzerConfig::default();
//! let transcript = TranscriptParser::with_config(config.clone())
//!     .parse_str("01/05/2024 10:00 - Ana: oi\n01/05/2024 10:02 - Bia: oi");
//! let report = Report::build(&transcript, &config);
//!
//! assert_eq!(report.metrics.participation.total_messages, 2);
//! assert!(report.score.value <= 100.0);
//! ```
//!
//! ## Reading from an export bundle
//!
//! With the `archive` feature, `.zip` bundles straight out of WhatsApp work
//! too:
//!
//! ```rust,no_run
//! use chatpulse::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = AnalyzerConfig::default();
//!     let text = chatpulse::loader::load_transcript_text("export.zip", None)?;
//!     let transcript = TranscriptParser::with_config(config.clone()).parse_str(&text);
//!     let report = Report::build(&transcript, &config);
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — transcript parsing ([`TranscriptParser`](parser::TranscriptParser), [`Transcript`](parser::Transcript))
//! - [`config`] — [`AnalyzerConfig`](config::AnalyzerConfig), stopwords, lexicons
//! - [`analysis`] — the four analyzers and [`MetricsSnapshot`](analysis::MetricsSnapshot)
//! - [`score`] — [`RelationshipScore`](score::RelationshipScore) and its components
//! - [`insights`] — summary text and heuristic suggestions
//! - [`report`] — [`Report`](report::Report), the full pipeline
//! - [`advisor`] — [`Advisor`](advisor::Advisor) trait, no-op and hosted variants
//! - [`loader`] — plain-text and `.zip` bundle loading (`archive` feature)
//! - [`cli`] — CLI types (`cli` feature)
//! - [`error`] — Unified error types ([`ChatpulseError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

pub mod advisor;
pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod insights;
#[cfg(feature = "archive")]
pub mod loader;
pub mod message;
pub mod parser;
pub mod report;
pub mod score;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpulseError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatpulseError, Result};

    // Parsing
    pub use crate::parser::{Transcript, TranscriptParser};

    // Configuration
    pub use crate::config::AnalyzerConfig;

    // Metrics
    pub use crate::analysis::MetricsSnapshot;

    // Scoring
    pub use crate::score::{RelationshipScore, ScoreComponents};

    // Full pipeline
    pub use crate::report::Report;

    // Advisory
    pub use crate::advisor::{Advisor, NoopAdvisor};
}
