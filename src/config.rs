//! Analyzer configuration and lexicon data.
//!
//! All process-wide word lists (stopwords, media-placeholder tokens,
//! sentiment lexicon, positive emoji) live here as immutable configuration
//! built once and passed explicitly into each analyzer. No hidden global
//! state, so configs can be shared across analysis runs and threads freely.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::new()
//!     .with_top_words(5)
//!     .with_session_ceiling_minutes(240);
//! assert_eq!(config.top_words, 5);
//! ```

use std::collections::HashSet;

/// Generic connectors and articles dropped from word-frequency tables.
///
/// Portuguese-centric (matching the supported export locale), with
/// accent-stripped variants listed alongside the accented forms.
const STOPWORDS: &[&str] = &[
    "a", "ao", "aos", "as", "até", "ate", "com", "da", "das", "de", "do", "dos", "e", "em",
    "então", "entao", "essa", "esse", "esta", "está", "estão", "estao", "eu", "ficar", "foi",
    "isso", "já", "ja", "lá", "la", "mas", "na", "nas", "não", "nao", "no", "nos", "num", "numa",
    "o", "os", "para", "por", "pra", "pro", "que", "quem", "se", "sem", "sim", "sou", "sua",
    "suas", "ta", "tá", "tava", "tem", "tudo", "um", "uma", "você", "voce", "vou",
];

/// Markers WhatsApp substitutes for omitted media, compared case-insensitively
/// against the trimmed message text.
const MEDIA_PLACEHOLDERS: &[&str] = &[
    "<mídia oculta>",
    "<midia oculta>",
    "<arquivo de mídia oculto>",
    "<arquivo de midia oculto>",
    "<media omitted>",
    "imagem ocultada",
    "áudio ocultado",
    "audio ocultado",
    "image omitted",
    "audio omitted",
    "video omitted",
];

/// Content phrases that identify a system line even when the header parses.
const SYSTEM_PHRASES: &[&str] = &[
    "as mensagens e as chamadas são protegidas com a criptografia",
    "messages and calls are end-to-end encrypted",
    "criou o grupo",
    "created group",
    "mudou o nome do grupo",
    "changed the subject",
    "adicionou você",
    "security code changed",
];

/// Positive sentiment lexicon (fixed list, no stemming).
const POSITIVE_WORDS: &[&str] = &[
    "amo", "amor", "amada", "amado", "amiga", "amigo", "beijo", "carinho", "carinhosa",
    "carinhoso", "feliz", "fofa", "fofo", "gostei", "grata", "grato", "linda", "lindo",
    "obrigada", "obrigado", "ótimo", "otimo", "perfeito", "querida", "querido", "saudade",
    "sucesso",
];

/// Negative sentiment lexicon (fixed list, no stemming).
const NEGATIVE_WORDS: &[&str] = &[
    "briga", "cansada", "cansado", "chateada", "chateado", "erro", "irritada", "irritado",
    "magoada", "magoado", "medo", "problema", "raiva", "sozinha", "sozinho", "stress", "triste",
];

/// Emoji counted as affectionate for the positive-emoji score component.
const POSITIVE_EMOJIS: &[char] = &[
    '😍', '❤', '🥰', '😘', '😊', '😁', '💕', '💞', '💖', '💗', '💓', '💘', '☺', '😄', '😃', '😆',
    '🤗',
];

/// Configuration for a full analysis run.
///
/// Holds the tunable thresholds and the immutable lexicons. Defaults match
/// the documented scoring formula; the builder methods exist mostly for
/// tests and library embedders.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Response intervals above this are treated as a new conversation
    /// session rather than a slow reply, and excluded from averages
    /// (default: 480 minutes).
    pub session_ceiling_minutes: i64,

    /// How many words per participant to report (default: 10).
    pub top_words: usize,

    /// How many emoji to report globally (default: 15).
    pub top_emojis: usize,

    /// Messages per active day that count as full engagement (default: 40).
    pub engagement_reference: f64,

    /// Positive-emoji share of all emoji that counts as full marks
    /// (default: 0.25).
    pub positive_emoji_reference: f64,

    /// Average reply time (minutes) at or below which responsiveness is
    /// perfect (default: 5).
    pub fast_reply_minutes: f64,

    /// Average reply time (minutes) at or above which responsiveness is
    /// zero (default: 60).
    pub slow_reply_minutes: f64,

    /// Words excluded from frequency tables.
    pub stopwords: HashSet<String>,

    /// Trimmed, lowercased texts recognized as media placeholders.
    pub media_placeholders: HashSet<String>,

    /// Lowercased content fragments that mark a line as a system event.
    pub system_phrases: Vec<String>,

    /// Positive sentiment lexicon.
    pub positive_words: HashSet<String>,

    /// Negative sentiment lexicon.
    pub negative_words: HashSet<String>,

    /// Emoji counted as positive.
    pub positive_emojis: HashSet<char>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            session_ceiling_minutes: 480,
            top_words: 10,
            top_emojis: 15,
            engagement_reference: 40.0,
            positive_emoji_reference: 0.25,
            fast_reply_minutes: 5.0,
            slow_reply_minutes: 60.0,
            stopwords: STOPWORDS.iter().map(ToString::to_string).collect(),
            media_placeholders: MEDIA_PLACEHOLDERS.iter().map(ToString::to_string).collect(),
            system_phrases: SYSTEM_PHRASES.iter().map(ToString::to_string).collect(),
            positive_words: POSITIVE_WORDS.iter().map(ToString::to_string).collect(),
            negative_words: NEGATIVE_WORDS.iter().map(ToString::to_string).collect(),
            positive_emojis: POSITIVE_EMOJIS.iter().copied().collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session ceiling for response-time averaging.
    #[must_use]
    pub fn with_session_ceiling_minutes(mut self, minutes: i64) -> Self {
        self.session_ceiling_minutes = minutes;
        self
    }

    /// Sets how many top words per participant to report.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets how many top emoji to report.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Sets the messages-per-active-day engagement reference.
    #[must_use]
    pub fn with_engagement_reference(mut self, msgs_per_day: f64) -> Self {
        self.engagement_reference = msgs_per_day;
        self
    }

    /// Replaces the stopword list.
    #[must_use]
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = words.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if a trimmed message text is a media placeholder.
    pub fn is_media_placeholder(&self, text: &str) -> bool {
        self.media_placeholders.contains(&text.trim().to_lowercase())
    }

    /// Returns `true` if a message content matches known system phrasing.
    pub fn matches_system_phrase(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.system_phrases.iter().any(|p| lower.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.session_ceiling_minutes, 480);
        assert_eq!(config.top_words, 10);
        assert_eq!(config.top_emojis, 15);
        assert!((config.engagement_reference - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let config = AnalyzerConfig::new()
            .with_top_words(3)
            .with_top_emojis(5)
            .with_session_ceiling_minutes(120)
            .with_engagement_reference(20.0);
        assert_eq!(config.top_words, 3);
        assert_eq!(config.top_emojis, 5);
        assert_eq!(config.session_ceiling_minutes, 120);
        assert!((config.engagement_reference - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lexicons_disjoint() {
        let config = AnalyzerConfig::default();
        assert!(config.positive_words.is_disjoint(&config.negative_words));
    }

    #[test]
    fn test_media_placeholder_detection() {
        let config = AnalyzerConfig::default();
        assert!(config.is_media_placeholder("<Mídia oculta>"));
        assert!(config.is_media_placeholder("  <Media omitted>  "));
        assert!(config.is_media_placeholder("<MEDIA OMITTED>"));
        assert!(!config.is_media_placeholder("vamos almoçar?"));
    }

    #[test]
    fn test_system_phrase_detection() {
        let config = AnalyzerConfig::default();
        assert!(config.matches_system_phrase(
            "Messages and calls are end-to-end encrypted. No one outside of this chat can read them."
        ));
        assert!(config.matches_system_phrase("Alice criou o grupo \"nós\""));
        assert!(!config.matches_system_phrase("bom dia!"));
    }

    #[test]
    fn test_custom_stopwords() {
        let config = AnalyzerConfig::new().with_stopwords(["foo", "bar"]);
        assert!(config.stopwords.contains("foo"));
        assert!(!config.stopwords.contains("de"));
    }
}
