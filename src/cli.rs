//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Report output format options
//!
//! # Using OutputFormat in Libraries
//!
//! [`OutputFormat`] is designed to be usable outside of CLI context:
//!
//! ```rust
//! use chatpulse::cli::OutputFormat;
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Analyze a WhatsApp chat export and score the conversation's health.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse chat.txt
    chatpulse export.zip
    chatpulse export.zip --chat-file 'WhatsApp Chat with Bia.txt'
    chatpulse chat.txt --format json
    chatpulse chat.txt --llm --llm-model gpt-4o")]
pub struct Args {
    /// Path to the exported chat (.txt or .zip bundle)
    pub input: String,

    /// Archive entry to read, when the bundle holds several .txt files
    #[arg(long, value_name = "NAME")]
    pub chat_file: Option<String>,

    /// Report output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of top words per participant
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top_words: usize,

    /// Number of top emojis overall
    #[arg(long, value_name = "N", default_value_t = 15)]
    pub top_emojis: usize,

    /// Longest gap (minutes) still counted as a reply
    #[arg(long, value_name = "MINUTES", default_value_t = 480)]
    pub session_ceiling: i64,

    /// Ask a hosted LLM for extra suggestions (needs OPENAI_API_KEY)
    #[arg(long)]
    pub llm: bool,

    /// Go through the advisory step without calling any service
    #[arg(long, conflicts_with = "llm")]
    pub llm_dry_run: bool,

    /// Model to use for LLM suggestions
    #[arg(long, value_name = "MODEL", default_value = "gpt-4o-mini")]
    pub llm_model: String,

    /// Chat completions endpoint for LLM suggestions
    #[arg(
        long,
        value_name = "URL",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub llm_endpoint: String,

    /// LLM request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub llm_timeout: u64,
}

/// Report output format options.
///
/// - [`Text`](OutputFormat::Text) - Human-readable sectioned report (default)
/// - [`Json`](OutputFormat::Json) - Full report as a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable sectioned report
    #[default]
    Text,

    /// Full report as JSON
    Json,
}

impl OutputFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "json"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "Text");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["chatpulse", "chat.txt"]);
        assert_eq!(args.input, "chat.txt");
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.top_words, 10);
        assert_eq!(args.top_emojis, 15);
        assert_eq!(args.session_ceiling, 480);
        assert!(!args.llm);
    }

    #[test]
    fn test_args_llm_flags() {
        let args = Args::parse_from([
            "chatpulse",
            "export.zip",
            "--llm",
            "--llm-model",
            "gpt-4o",
            "--llm-timeout",
            "5",
        ]);
        assert!(args.llm);
        assert_eq!(args.llm_model, "gpt-4o");
        assert_eq!(args.llm_timeout, 5);
    }
}
