//! Full analysis pipeline: transcript in, report out.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::advisor::{Advisor, MAX_SUGGESTIONS};
use crate::analysis::MetricsSnapshot;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::insights;
use crate::parser::Transcript;
use crate::score::RelationshipScore;

/// Everything the analysis produces for one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub score: RelationshipScore,
    pub metrics: MetricsSnapshot,
    pub summary: String,
    pub suggestions: Vec<String>,
    /// Present only when an advisor ran and succeeded.
    pub llm_suggestions: Option<Vec<String>>,
}

impl Report {
    /// Runs the deterministic pipeline: metrics, score, summary, suggestions.
    #[must_use]
    pub fn build(transcript: &Transcript, config: &AnalyzerConfig) -> Self {
        let metrics = MetricsSnapshot::build(transcript, config);
        let score = RelationshipScore::compute(&metrics, config);
        let summary = insights::build_summary(&metrics, &score);
        let suggestions = insights::build_suggestions(&metrics, &score);
        Self {
            score,
            metrics,
            summary,
            suggestions,
            llm_suggestions: None,
        }
    }

    /// Asks the advisor for suggestions over this report's digest and stores
    /// them, capped at [`MAX_SUGGESTIONS`].
    ///
    /// # Errors
    ///
    /// Propagates the advisor's error; the report itself is left unchanged
    /// in that case.
    pub fn attach_advice<A: Advisor>(&mut self, advisor: &A) -> Result<()> {
        let mut suggestions = advisor.advise(&self.digest())?;
        suggestions.truncate(MAX_SUGGESTIONS);
        self.llm_suggestions = Some(suggestions);
        Ok(())
    }

    /// Compact, bounded plain-text digest of the metrics, suitable as advisor
    /// input. Contains aggregates only, never message text.
    #[must_use]
    pub fn digest(&self) -> String {
        let p = &self.metrics.participation;
        let mut out = String::new();
        let _ = writeln!(out, "Compatibility score: {:.1}/100", self.score.value);
        let _ = writeln!(
            out,
            "Components: balance {:.1}, engagement {:.1}, positive emoji {:.1}, \
             responsiveness {:.1}, sentiment {:.1}",
            self.score.components.balance,
            self.score.components.engagement,
            self.score.components.positive_emoji,
            self.score.components.responsiveness,
            self.score.components.sentiment,
        );
        let _ = writeln!(
            out,
            "Messages: {} over {} days ({:.1} per active day)",
            p.total_messages, p.duration_days, p.avg_messages_per_active_day
        );
        for (sender, share) in &p.participant_share {
            let _ = writeln!(out, "Share: {sender} {share:.1}%");
        }
        match self.metrics.response_times.overall_minutes {
            Some(avg) => {
                let _ = writeln!(out, "Average reply time: {avg:.1} min");
            }
            None => {
                let _ = writeln!(out, "Average reply time: n/a");
            }
        }
        match self.metrics.sentiment.overall {
            Some(overall) => {
                let _ = writeln!(out, "Word sentiment: {overall:+.2} (-1..+1)");
            }
            None => {
                let _ = writeln!(out, "Word sentiment: n/a");
            }
        }
        let _ = writeln!(
            out,
            "Emojis: {} total, {:.0}% positive",
            self.metrics.lexical.total_emojis,
            self.metrics.lexical.positive_emoji_ratio() * 100.0
        );
        out
    }
}
