//! # chatpulse CLI
//!
//! Command-line interface for the chatpulse library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatpulse::cli::{Args, OutputFormat};
use chatpulse::config::AnalyzerConfig;
use chatpulse::loader::load_transcript_text;
use chatpulse::parser::TranscriptParser;
use chatpulse::report::Report;
use chatpulse::ChatpulseError;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatpulseError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let config = AnalyzerConfig::default()
        .with_session_ceiling_minutes(args.session_ceiling)
        .with_top_words(args.top_words)
        .with_top_emojis(args.top_emojis);

    if args.format == OutputFormat::Text {
        println!("💬 chatpulse v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:  {}", args.input);
        if let Some(ref chat_file) = args.chat_file {
            println!("📄 Entry:  {}", chat_file);
        }
        println!();
    }

    let text = load_transcript_text(&args.input, args.chat_file.as_deref())?;
    let transcript = TranscriptParser::with_config(config.clone()).parse_str(&text);
    let mut report = Report::build(&transcript, &config);

    if args.llm_dry_run {
        // Exercises the advisory path end to end with the no-op advisor.
        if let Err(e) = report.attach_advice(&chatpulse::advisor::NoopAdvisor) {
            eprintln!("⚠️  {e}");
        }
    } else if args.llm {
        attach_llm_advice(&mut report, &args);
    }

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ChatpulseError::invalid_format("report", e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            print_report(&report);
            println!(
                "⏱️  Done in {:.2}s",
                total_start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}

#[cfg(feature = "llm")]
fn attach_llm_advice(report: &mut Report, args: &Args) {
    use chatpulse::advisor::{AdvisorConfig, OpenAiAdvisor};

    let advisor_config = AdvisorConfig::default()
        .with_model(args.llm_model.clone())
        .with_endpoint(args.llm_endpoint.clone())
        .with_timeout_secs(args.llm_timeout);
    let result = OpenAiAdvisor::new(advisor_config).and_then(|advisor| {
        report.attach_advice(&advisor)
    });
    if let Err(e) = result {
        eprintln!("⚠️  {e}");
    }
}

#[cfg(not(feature = "llm"))]
fn attach_llm_advice(_report: &mut Report, _args: &Args) {
    eprintln!("⚠️  --llm requested but this build has no LLM support");
}

fn print_report(report: &Report) {
    let p = &report.metrics.participation;

    println!("📊 Overview");
    println!("   Messages:       {}", p.total_messages);
    println!("   System lines:   {}", p.system_messages);
    println!(
        "   Period:         {} days ({} active)",
        p.duration_days, p.active_days
    );
    println!(
        "   Per active day: {:.1} messages",
        p.avg_messages_per_active_day
    );
    println!();

    println!("👥 Participation");
    for (sender, count) in &p.per_participant {
        let share = p.participant_share.get(sender).copied().unwrap_or(0.0);
        println!("   {sender}: {count} messages ({share:.1}%)");
    }
    println!();

    println!("⏳ Response times");
    match report.metrics.response_times.overall_minutes {
        Some(avg) => println!("   Overall: {avg:.1} min"),
        None => println!("   Overall: n/a"),
    }
    for (sender, avg) in &report.metrics.response_times.per_participant {
        match avg {
            Some(avg) => println!("   {sender}: {avg:.1} min"),
            None => println!("   {sender}: n/a"),
        }
    }
    println!();

    println!("🔤 Top words");
    for (sender, words) in &report.metrics.lexical.top_words {
        let rendered: Vec<String> = words
            .iter()
            .map(|(word, count)| format!("{word} ({count})"))
            .collect();
        println!("   {sender}: {}", rendered.join(", "));
    }
    if !report.metrics.lexical.top_emojis.is_empty() {
        let rendered: Vec<String> = report
            .metrics
            .lexical
            .top_emojis
            .iter()
            .map(|(emoji, count)| format!("{emoji} ({count})"))
            .collect();
        println!("   Emojis: {}", rendered.join(", "));
    }
    println!();

    println!("❤️  Compatibility score: {:.1}/100", report.score.value);
    let c = &report.score.components;
    println!("   Balance:        {:.1}", c.balance);
    println!("   Engagement:     {:.1}", c.engagement);
    println!("   Positive emoji: {:.1}", c.positive_emoji);
    println!("   Responsiveness: {:.1}", c.responsiveness);
    println!("   Sentiment:      {:.1}", c.sentiment);
    println!();

    println!("💡 Summary");
    println!("   {}", report.summary);
    println!();

    if !report.suggestions.is_empty() {
        println!("🔎 Suggestions");
        for suggestion in &report.suggestions {
            println!("   • {suggestion}");
        }
        println!();
    }

    if let Some(llm_suggestions) = &report.llm_suggestions {
        println!("🤖 LLM suggestions");
        if llm_suggestions.is_empty() {
            println!("   (none)");
        }
        for suggestion in llm_suggestions {
            println!("   • {suggestion}");
        }
        println!();
    }
}
