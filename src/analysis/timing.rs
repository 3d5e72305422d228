//! Response-time analysis.
//!
//! A response interval exists at each sender transition between consecutive
//! non-system messages and is attributed to the replier ("how fast I
//! answered them"). Consecutive messages from the same sender (a burst)
//! contribute no samples. Intervals above the configured session ceiling are
//! treated as a new conversation session rather than a slow reply and are
//! excluded, so long inactivity gaps don't skew the averages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::message::Message;
use crate::parser::Transcript;

/// Average response latencies, in minutes.
///
/// `None` means "not applicable" (fewer than one valid transition), never
/// zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseTimes {
    /// Mean reply latency per participant. Every participant appears as a
    /// key; the value is `None` for participants who never replied.
    pub per_participant: BTreeMap<String, Option<f64>>,
    /// Mean over all retained samples across participants.
    pub overall_minutes: Option<f64>,
}

/// Computes response-time averages over a transcript.
pub fn analyze(transcript: &Transcript, config: &AnalyzerConfig) -> ResponseTimes {
    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut previous: Option<&Message> = None;

    for msg in transcript.participant_messages() {
        if let Some(prev) = previous {
            if prev.sender() != msg.sender() {
                let minutes =
                    (msg.timestamp() - prev.timestamp()).num_seconds() as f64 / 60.0;
                if minutes >= 0.0 && minutes <= config.session_ceiling_minutes as f64 {
                    samples.entry(msg.sender()).or_default().push(minutes);
                }
            }
        }
        previous = Some(msg);
    }

    let mut per_participant: BTreeMap<String, Option<f64>> = transcript
        .participants
        .iter()
        .map(|p| (p.clone(), None))
        .collect();

    let mut all: Vec<f64> = Vec::new();
    for (sender, times) in samples {
        let mean = times.iter().sum::<f64>() / times.len() as f64;
        per_participant.insert(sender.to_string(), Some(mean));
        all.extend_from_slice(&times);
    }

    let overall_minutes = if all.is_empty() {
        None
    } else {
        Some(all.iter().sum::<f64>() / all.len() as f64)
    };

    ResponseTimes {
        per_participant,
        overall_minutes,
    }
}
