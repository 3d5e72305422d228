//! Edge-case tests for noisy, real-world export files.

use chatpulse::analysis::MetricsSnapshot;
use chatpulse::config::AnalyzerConfig;
use chatpulse::parser::{Transcript, TranscriptParser};
use chatpulse::Message;

fn parse(content: &str) -> Transcript {
    TranscriptParser::new().parse_str(content)
}

#[test]
fn test_crlf_line_endings() {
    let transcript = parse(
        "01/06/2024 09:00 - Ana: oi\r\n01/06/2024 09:01 - Bia: tudo bem\r\ncontinuação\r\n",
    );
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages[1].text(), "tudo bem\ncontinuação");
}

#[test]
fn test_leading_bom() {
    let transcript = parse("\u{feff}01/06/2024 09:00 - Ana: oi");
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages[0].sender(), "Ana");
}

#[test]
fn test_orphan_lines_before_first_header() {
    let transcript = parse("texto solto\noutra linha\n01/06/2024 09:00 - Ana: oi");
    assert_eq!(transcript.len(), 1);
}

#[test]
fn test_out_of_order_header_discarded_with_continuations() {
    let transcript = parse(
        "01/06/2024 10:00 - Ana: primeira\n\
         01/06/2024 09:00 - Bia: do passado\n\
         linha presa à mensagem descartada\n\
         01/06/2024 10:05 - Ana: segunda\n",
    );
    assert_eq!(transcript.len(), 2);
    assert!(transcript
        .messages
        .iter()
        .all(|m| !m.text().contains("descartada")));
    assert_eq!(transcript.participants, vec!["Ana".to_string()]);
}

#[test]
fn test_calendar_invalid_date_discarded() {
    let transcript = parse(
        "31/02/2024 09:00 - Ana: impossível\n01/06/2024 09:00 - Bia: real\n",
    );
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages[0].sender(), "Bia");
}

#[test]
fn test_two_digit_year_is_continuation_not_header() {
    let transcript = parse(
        "01/06/2024 09:00 - Ana: hoje\n01/06/24 09:05 - Bia: formato curto\n",
    );
    // The second line doesn't match the header shape, so it folds into Ana's
    // message.
    assert_eq!(transcript.len(), 1);
    assert!(transcript.messages[0].text().contains("formato curto"));
}

#[test]
fn test_colon_inside_message_text() {
    let transcript = parse("01/06/2024 09:00 - Ana: lembrete: reunião às 15:00");
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages[0].sender(), "Ana");
    assert_eq!(transcript.messages[0].text(), "lembrete: reunião às 15:00");
}

#[test]
fn test_unicode_sender_names() {
    let transcript = parse(
        "01/06/2024 09:00 - José Ângelo: oi\n01/06/2024 09:01 - 美咲: こんにちは\n",
    );
    assert_eq!(
        transcript.participants,
        vec!["José Ângelo".to_string(), "美咲".to_string()]
    );
}

#[test]
fn test_media_placeholder_variants_flagged() {
    let transcript = parse(
        "01/06/2024 09:00 - Ana: <Mídia oculta>\n\
         01/06/2024 09:01 - Bia: <Media omitted>\n\
         01/06/2024 09:02 - Ana: imagem ocultada\n",
    );
    assert_eq!(transcript.len(), 3);
    assert!(transcript.messages.iter().all(Message::is_media_placeholder));
}

#[test]
fn test_emoji_only_message_counts_toward_emoji_stats() {
    let config = AnalyzerConfig::default();
    let transcript = parse("01/06/2024 09:00 - Ana: 😍😍🎉\n01/06/2024 09:01 - Bia: ok");
    let snapshot = MetricsSnapshot::build(&transcript, &config);
    assert_eq!(snapshot.lexical.total_emojis, 3);
    assert_eq!(snapshot.lexical.positive_emoji_count, 2);
}

#[test]
fn test_word_ranking_tie_breaks_by_first_occurrence() {
    let config = AnalyzerConfig::default().with_top_words(2);
    let transcript = parse(
        "01/06/2024 09:00 - Ana: zebra abacaxi\n01/06/2024 09:01 - Ana: zebra abacaxi\n",
    );
    let snapshot = MetricsSnapshot::build(&transcript, &config);
    let words = &snapshot.lexical.top_words["Ana"];
    assert_eq!(words[0].0, "zebra");
    assert_eq!(words[1].0, "abacaxi");
}

#[test]
fn test_whitespace_only_message_dropped() {
    let transcript = parse("01/06/2024 09:00 - Ana:    \n01/06/2024 09:01 - Bia: oi");
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.messages[0].sender(), "Bia");
}

#[test]
fn test_session_gap_excluded_from_reply_averages() {
    let config = AnalyzerConfig::default();
    let transcript = parse(
        "01/06/2024 09:00 - Ana: bom dia\n\
         01/06/2024 09:02 - Bia: bom dia\n\
         02/06/2024 08:00 - Ana: acordou?\n",
    );
    let snapshot = MetricsSnapshot::build(&transcript, &config);
    // The overnight gap (23h) is over the 480-minute ceiling, so only Bia's
    // two-minute reply counts.
    let overall = snapshot.response_times.overall_minutes.unwrap();
    assert!((overall - 2.0).abs() < 1e-9);
    assert!(snapshot.response_times.per_participant["Ana"].is_none());
}

#[test]
fn test_encryption_notice_with_colon_is_system() {
    let transcript = parse(
        "01/06/2024 09:00 - As mensagens e as chamadas são protegidas com a criptografia de ponta a ponta: ninguém fora desta conversa pode lê-las.\n\
         01/06/2024 09:01 - Ana: oi\n",
    );
    let config = AnalyzerConfig::default();
    let snapshot = MetricsSnapshot::build(&transcript, &config);
    assert_eq!(snapshot.participation.system_messages, 1);
    assert_eq!(snapshot.participants, vec!["Ana".to_string()]);
}
