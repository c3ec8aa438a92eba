//! CLI parser and command dispatch.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use memory_core::UserId;

use crate::components::SeedComponents;
use crate::trend::TrendConfig;

#[derive(Parser)]
#[command(name = "seed-bot")]
#[command(about = "Conversational assistant with per-user memory and mood-trend context", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one message; the turn is saved into a session transcript.
    Chat {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        message: String,
        /// Continue an existing session; a new one is created when omitted.
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Show the stored memories most similar to a query.
    Recall {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        query: String,
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
    /// Print a user's memory collection, most recent last.
    Memory {
        #[arg(short, long)]
        user: String,
        /// Only the last N records.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the current mood-trend hint for a user.
    Trend {
        #[arg(short, long)]
        user: String,
        /// Override the analysis window.
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// List a user's saved sessions, most recent first.
    Sessions {
        #[arg(short, long)]
        user: String,
    },
}

fn format_ts(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Runs `command` and prints its result to stdout.
pub async fn run(command: Commands, components: &SeedComponents) -> Result<()> {
    match command {
        Commands::Chat {
            user,
            message,
            session,
        } => {
            let outcome = components
                .chat
                .handle_session_turn(&user, session.as_deref(), &message)
                .await?;
            println!("{}", outcome.turn.reply);
            println!();
            println!("[session {} | mood: {}]", outcome.session_id, outcome.turn.emotion);
        }
        Commands::Recall {
            user,
            query,
            top_k,
        } => {
            let user = UserId::parse(&user)?;
            let retriever = components.chat.retriever();
            let vector = retriever.embed_query(&query).await;
            if vector.is_none() {
                eprintln!("Embedding backend unavailable; nothing to rank against.");
            }
            let context = retriever
                .retrieve(&user, vector.as_deref(), top_k.unwrap_or(retriever.top_k()))
                .await;
            for scored in &context.memories {
                println!(
                    "{:.4}  {}  {:<9}  {}",
                    scored.score,
                    format_ts(scored.record.timestamp),
                    scored.record.role,
                    scored.record.text
                );
            }
        }
        Commands::Memory { user, limit } => {
            let user = UserId::parse(&user)?;
            let records = components.memory_store.try_load(&user).await?;
            let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
            for record in records.iter().skip(skip) {
                println!(
                    "{}  {:<9}  dim={}  {}",
                    format_ts(record.timestamp),
                    record.role,
                    record.vector.len(),
                    record.text
                );
            }
            println!("({} records)", records.len());
        }
        Commands::Trend { user, days } => {
            let user = UserId::parse(&user)?;
            let analyzer = components.chat.trend_analyzer();
            let mut config: TrendConfig = analyzer.config().clone();
            if let Some(days) = days {
                config.window_days = days;
            }
            let transcripts = components.sessions.list(&user).await;
            match crate::trend::analyze_transcripts(&transcripts, Utc::now().timestamp(), &config) {
                Some(hint) => println!("{}", hint.render()),
                None => println!("No dominant mood in the last {} days.", config.window_days),
            }
        }
        Commands::Sessions { user } => {
            let user = UserId::parse(&user)?;
            for transcript in components.sessions.list(&user).await {
                println!(
                    "{}  {}  {:>3} turns  {}",
                    transcript.id,
                    format_ts(transcript.updated),
                    transcript.turns.len(),
                    transcript.title
                );
            }
        }
    }
    Ok(())
}
