//! Insight rendering: summary text and heuristic suggestions.
//!
//! Pure functions over a [`MetricsSnapshot`] and [`RelationshipScore`] —
//! deterministic, side-effect-free, no generated text. The suggestion list
//! is selected by rule from a pre-authored catalog, so two runs over the
//! same snapshot always produce the same output.

use std::fmt::Write as _;

use crate::analysis::MetricsSnapshot;
use crate::score::RelationshipScore;

/// Weekday labels, Monday first (matching the participation histogram).
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ============================================================================
// Suggestion catalog
// ============================================================================

const SUGGEST_SCORE_HIGH: &str =
    "Offer a premium tier for highly engaged pairs: weekly reports and personalized challenges \
     to keep the current level.";
const SUGGEST_SCORE_MID: &str =
    "Bundle an insight package with preventive alerts (engagement drops) and light reconnection \
     tasks for pairs on an upward path.";
const SUGGEST_SCORE_LOW: &str =
    "Offer guided follow-up services (coaching or partner therapists) for pairs that need \
     support improving their communication.";
const SUGGEST_VOLUME_HIGH: &str =
    "Monetize via subscription with daily digests and contextual reminders, leveraging the high \
     average message volume.";
const SUGGEST_VOLUME_LOW: &str =
    "Add a freemium layer with monthly reports and an upsell to detailed analyses once \
     engagement grows.";
const SUGGEST_SLOW_REPLIES: &str =
    "Ship smart nudges that flag slowing replies and offer ready-made prompts to re-engage.";
const SUGGEST_FAST_REPLIES: &str =
    "Trial light gamification with fast-reply goals and digital rewards for highly responsive \
     pairs.";
const SUGGEST_POSITIVE_PAIR: &str =
    "Explore partnerships with wellness and couple-experience brands (gift cards, discounts) \
     triggered by positive engagement.";
const SUGGEST_LONG_TERM: &str =
    "Sell professional packages for therapists or coaches with progress dashboards for \
     long-running conversations.";
const SUGGEST_NEGATIVE_TONE: &str =
    "Add a mood alert that routes to mediation content or partner professionals when the tone \
     turns negative.";
const SUGGEST_POSITIVE_TONE: &str =
    "Run marketing campaigns around positive stories (with consent), positioning the product as \
     a reinforcer of good habits.";

// ============================================================================
// Summary
// ============================================================================

/// Renders a natural-language summary of the snapshot: top-line numbers and
/// the single most notable pattern.
pub fn build_summary(snapshot: &MetricsSnapshot, score: &RelationshipScore) -> String {
    let p = &snapshot.participation;
    if p.total_messages == 0 {
        return "No participant messages were found in this transcript.".to_string();
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "{} messages across {} days ({:.1} per active day), compatibility score {:.1}/100.",
        p.total_messages, p.duration_days, p.avg_messages_per_active_day, score.value
    );

    for (sender, share) in &p.participant_share {
        let _ = write!(
            out,
            " {} sent {:.1}% of the messages.",
            sender, share
        );
    }

    if let Some(avg) = snapshot.response_times.overall_minutes {
        let _ = write!(out, " Average reply time: {avg:.1} min.");
    }

    if let Some(line) = notable_pattern(snapshot) {
        let _ = write!(out, " {line}");
    }

    if let Some((hour, count)) = busiest_hour(snapshot) {
        let _ = write!(out, " Most active hour: {hour:02}h ({count} messages).");
    }
    if let Some((weekday, count)) = busiest_weekday(snapshot) {
        let _ = write!(out, " Busiest day: {weekday} ({count} messages).");
    }

    if let Some(overall) = snapshot.sentiment.overall {
        let _ = write!(out, " Word sentiment: {overall:+.2} on a -1..+1 scale.");
    }

    if let Some((emoji, count)) = snapshot.lexical.top_emojis.first() {
        let _ = write!(out, " Favorite emoji: {emoji} ({count}x).");
    }

    out
}

/// The single most notable pattern: the largest participation imbalance when
/// it is pronounced, otherwise the fastest responder.
fn notable_pattern(snapshot: &MetricsSnapshot) -> Option<String> {
    let shares = &snapshot.participation.participant_share;
    if shares.len() >= 2 {
        let (dominant, share) = shares
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then(b.0.cmp(a.0)))?;
        if *share >= 65.0 {
            return Some(format!(
                "Most notable pattern: {dominant} dominates the conversation with {share:.1}% of \
                 the messages."
            ));
        }
    }

    let fastest = snapshot
        .response_times
        .per_participant
        .iter()
        .filter_map(|(sender, avg)| avg.map(|a| (sender, a)))
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(b.0)))?;
    Some(format!(
        "Most notable pattern: {} is the fastest responder, averaging {:.1} min.",
        fastest.0, fastest.1
    ))
}

fn busiest_hour(snapshot: &MetricsSnapshot) -> Option<(usize, usize)> {
    snapshot
        .participation
        .per_hour
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .max_by_key(|(hour, count)| (**count, usize::MAX - hour))
        .map(|(hour, count)| (hour, *count))
}

fn busiest_weekday(snapshot: &MetricsSnapshot) -> Option<(&'static str, usize)> {
    snapshot
        .participation
        .per_weekday
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .max_by_key(|(day, count)| (**count, usize::MAX - day))
        .map(|(day, count)| (WEEKDAYS[day], *count))
}

// ============================================================================
// Suggestions
// ============================================================================

/// Selects business-style suggestions from the fixed catalog by rule.
///
/// Order is stable and duplicates are removed; the list is empty only for
/// an empty snapshot.
pub fn build_suggestions(snapshot: &MetricsSnapshot, score: &RelationshipScore) -> Vec<String> {
    let p = &snapshot.participation;
    if p.total_messages == 0 {
        return Vec::new();
    }

    let mut selected: Vec<&'static str> = Vec::new();

    if score.value >= 80.0 {
        selected.push(SUGGEST_SCORE_HIGH);
    } else if score.value >= 60.0 {
        selected.push(SUGGEST_SCORE_MID);
    } else {
        selected.push(SUGGEST_SCORE_LOW);
    }

    if p.avg_messages_per_active_day >= 25.0 {
        selected.push(SUGGEST_VOLUME_HIGH);
    } else {
        selected.push(SUGGEST_VOLUME_LOW);
    }

    if let Some(avg) = snapshot.response_times.overall_minutes {
        if avg > 45.0 {
            selected.push(SUGGEST_SLOW_REPLIES);
        } else if avg < 10.0 {
            selected.push(SUGGEST_FAST_REPLIES);
        }
    }

    if snapshot.participants.len() == 2 && snapshot.lexical.positive_emoji_ratio() >= 0.1 {
        selected.push(SUGGEST_POSITIVE_PAIR);
    } else if p.duration_days >= 180 {
        selected.push(SUGGEST_LONG_TERM);
    }

    if let Some(overall) = snapshot.sentiment.overall {
        if overall < -0.1 {
            selected.push(SUGGEST_NEGATIVE_TONE);
        } else if overall > 0.2 {
            selected.push(SUGGEST_POSITIVE_TONE);
        }
    }

    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for item in selected {
        if !seen.contains(&item) {
            seen.push(item);
            out.push(item.to_string());
        }
    }
    out
}
