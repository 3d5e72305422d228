//! Lexical analysis: word and emoji frequency.
//!
//! Words come from lowercase tokenization of non-system, non-placeholder
//! messages, with stopwords and pure-number tokens dropped. Emoji are
//! detected by scanning characters against fixed Unicode ranges — a
//! detection rule, not a lexicon — across all non-system messages.
//!
//! Top-N reporting is deterministic under ties: equal-frequency items keep
//! first-occurrence order.

use std::collections::BTreeMap;
use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::parser::Transcript;

/// Word pattern: runs of letters/digits, apostrophes allowed inside.
const WORD_PATTERN: &str = r"[\p{L}\p{N}']+";

/// Word and emoji frequency tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexicalStats {
    /// Top-N most frequent words per participant, most frequent first.
    pub top_words: BTreeMap<String, Vec<(String, usize)>>,
    /// Top-N most frequent emoji across the whole conversation.
    pub top_emojis: Vec<(String, usize)>,
    /// Total emoji occurrences.
    pub total_emojis: usize,
    /// Occurrences of emoji from the positive set.
    pub positive_emoji_count: usize,
}

impl LexicalStats {
    /// Share of emoji that are positive, 0.0 when there are none.
    pub fn positive_emoji_ratio(&self) -> f64 {
        if self.total_emojis == 0 {
            0.0
        } else {
            self.positive_emoji_count as f64 / self.total_emojis as f64
        }
    }
}

/// Returns `true` for code points in the emoji blocks this analyzer tracks
/// (Miscellaneous Symbols and Pictographs through Symbols and Pictographs
/// Extended-A, plus Dingbats).
pub fn is_emoji(c: char) -> bool {
    matches!(u32::from(c),
        0x1F300..=0x1F5FF
        | 0x1F600..=0x1F64F
        | 0x1F680..=0x1F6FF
        | 0x1F700..=0x1F77F
        | 0x1F780..=0x1F7FF
        | 0x1F800..=0x1F8FF
        | 0x1F900..=0x1F9FF
        | 0x1FA00..=0x1FA6F
        | 0x1FA70..=0x1FAFF
        | 0x2700..=0x27BF)
}

/// Counts occurrences while remembering first-seen order, so `top_n` can
/// break frequency ties deterministically.
#[derive(Debug, Default)]
struct FrequencyTable {
    counts: HashMap<String, (usize, usize)>,
    next_rank: usize,
}

impl FrequencyTable {
    fn bump(&mut self, key: &str) {
        if let Some((count, _)) = self.counts.get_mut(key) {
            *count += 1;
        } else {
            self.counts
                .insert(key.to_string(), (1, self.next_rank));
            self.next_rank += 1;
        }
    }

    fn top_n(&self, n: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(&String, &(usize, usize))> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
        entries
            .into_iter()
            .take(n)
            .map(|(word, (count, _))| (word.clone(), *count))
            .collect()
    }
}

/// Computes word and emoji frequency over a transcript.
pub fn analyze(transcript: &Transcript, config: &AnalyzerConfig) -> LexicalStats {
    // Fixed literal; compilation cannot fail.
    let word_re = Regex::new(WORD_PATTERN).expect("valid word pattern");

    let mut words: BTreeMap<&str, FrequencyTable> = BTreeMap::new();
    let mut emojis = FrequencyTable::default();
    let mut total_emojis = 0;
    let mut positive_emoji_count = 0;

    for msg in transcript.participant_messages() {
        for c in msg.text().chars().filter(|c| is_emoji(*c)) {
            emojis.bump(c.encode_utf8(&mut [0u8; 4]));
            total_emojis += 1;
            if config.positive_emojis.contains(&c) {
                positive_emoji_count += 1;
            }
        }

        if msg.is_media_placeholder() {
            continue;
        }

        let table = words.entry(msg.sender()).or_default();
        let lowered = msg.text().to_lowercase();
        for token in word_re.find_iter(&lowered) {
            let word = token.as_str().trim_matches('\'');
            if word.is_empty()
                || config.stopwords.contains(word)
                || word.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            table.bump(word);
        }
    }

    let top_words = words
        .into_iter()
        .map(|(sender, table)| (sender.to_string(), table.top_n(config.top_words)))
        .collect();

    LexicalStats {
        top_words,
        top_emojis: emojis.top_n(config.top_emojis),
        total_emojis,
        positive_emoji_count,
    }
}
