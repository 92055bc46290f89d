#![allow(missing_docs)]

//! Chaperone CLI — conversation safety and interest analysis.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use tracing::warn;

use chaperone::ai::{analyze_conversation_with_ai, SafetyReport};
use chaperone::config::ChaperoneConfig;
use chaperone::interest::analyze_interest;
use chaperone::providers::router::resolve_generator;
use chaperone::safety::{analyze_conversation_safety, PatternLibrary};
use chaperone::types::Message;

#[derive(Parser)]
#[command(name = "chaperone", version, about = "Trust and safety scoring for dating-app conversations")]
struct Cli {
    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a conversation (JSON array of messages) for safety risk.
    Scan {
        /// Path to a JSON file, or `-` for stdin.
        path: PathBuf,
        /// Also ask the configured AI provider for a second opinion.
        #[arg(long)]
        ai: bool,
    },
    /// Score how interested the other person appears from a transcript.
    Interest {
        /// Path to a plain-text transcript, or `-` for stdin.
        path: PathBuf,
    },
    /// Print the risk-pattern rule table.
    Patterns,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ChaperoneConfig::load().context("failed to load configuration")?;

    let _guard = match &config.logging.dir {
        Some(dir) => Some(
            chaperone::logging::init_with_file(Path::new(dir), &config.logging.level)
                .context("failed to initialise file logging")?,
        ),
        None => {
            chaperone::logging::init_cli(&config.logging.level);
            None
        }
    };

    let cli = Cli::parse();

    match cli.command {
        Command::Scan { path, ai } => scan(&path, ai, cli.json, &config).await,
        Command::Interest { path } => interest(&path, cli.json),
        Command::Patterns => {
            patterns(cli.json);
            Ok(())
        }
    }
}

async fn scan(path: &Path, ai: bool, json: bool, config: &ChaperoneConfig) -> Result<()> {
    let raw = read_input(path)?;
    let messages: Vec<Message> =
        serde_json::from_str(&raw).context("input must be a JSON array of messages")?;

    let report = if ai {
        match resolve_generator(&config.ai) {
            Ok(generator) => analyze_conversation_with_ai(&messages, generator.as_ref()).await,
            Err(e) => {
                warn!(error = %e, "no usable AI provider, running pattern-only analysis");
                SafetyReport::from(analyze_conversation_safety(&messages))
            }
        }
    } else {
        SafetyReport::from(analyze_conversation_safety(&messages))
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn interest(path: &Path, json: bool) -> Result<()> {
    let transcript = read_input(path)?;
    let analysis = analyze_interest(&transcript);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!(
        "{} (score {}/100)",
        analysis.level.label(),
        analysis.overall_score
    );
    println!(
        "  messages: {} from them, {} from you",
        analysis.engagement.contact_messages, analysis.engagement.user_messages
    );
    println!("  question rate: {:.0}%", analysis.engagement.question_rate);
    println!(
        "  components: length {} questions {} sentiment {} enthusiasm {}",
        analysis.scores.message_length,
        analysis.scores.questions,
        analysis.scores.sentiment,
        analysis.scores.enthusiasm
    );
    Ok(())
}

fn patterns(json: bool) {
    let library = PatternLibrary::standard();

    if json {
        let rows: Vec<serde_json::Value> = library
            .rules()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "rule": r.rule,
                    "category": r.category,
                    "severity": r.severity,
                    "confidence": r.confidence,
                    "title": r.title,
                })
            })
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(out) => println!("{out}"),
            Err(e) => warn!(error = %e, "failed to serialize rule table"),
        }
        return;
    }

    for rule in library.rules() {
        println!(
            "{:<28} {:?}/{:?} confidence {:.2}  {}",
            rule.rule, rule.category, rule.severity, rule.confidence, rule.title
        );
    }
}

fn print_report(report: &SafetyReport) {
    let check = &report.pattern_analysis;
    let verdict = if check.is_safe { "SAFE" } else { "CAUTION" };
    println!(
        "{verdict}: risk {:.2}, combined {:.2}, {} alert(s)",
        check.risk_level,
        report.combined_risk,
        check.alerts.len()
    );

    for alert in &check.alerts {
        let when = Utc
            .timestamp_millis_opt(alert.timestamp)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "  [{:?}] {} ({:?}, {when})",
            alert.severity, alert.title, alert.category
        );
        if !alert.matched.is_empty() {
            println!("      matched: {:?}", alert.matched);
        }
        println!("      {}", alert.recommendation);
    }

    if let Some(ai) = &report.ai {
        println!(
            "AI opinion: risk {:.2}, trust {:.0}/100",
            ai.overall_risk, ai.trust_score
        );
        for flag in &ai.red_flags {
            println!("  red flag: {flag}");
        }
    }

    if !check.safety_tips.is_empty() {
        println!("Tips:");
        for tip in &check.safety_tips {
            println!("  - {tip}");
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
