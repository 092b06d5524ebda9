use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use kb_retrieval_core::{
    generate_followups, load_knowledge_base, ConversationTurn, Document, RetrievalOptions,
    Retriever,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "kb-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Knowledge base: a JSON file or a folder of JSON files
    #[arg(long, env = "KB_SEARCH_KNOWLEDGE_BASE")]
    knowledge_base: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Rank knowledge-base notes for a question.
    Search {
        /// Staff question
        #[arg(long)]
        query: String,
        /// Number of notes to return.
        #[arg(long, default_value = "3")]
        top_n: usize,
        /// JSON array of prior conversation turns used to fold short follow-ups.
        #[arg(long)]
        history: Option<PathBuf>,
        /// Number of prior user turns folded into short follow-ups.
        #[arg(long, default_value = "3")]
        context_turns: usize,
    },
    /// Suggest next questions for the notes a question matches.
    Followups {
        /// Staff question
        #[arg(long)]
        query: String,
    },
    /// Typeahead suggestions for a partial question.
    Suggest {
        /// Text typed so far
        #[arg(long)]
        prefix: String,
        /// Recent searches, most recent first. Repeatable.
        #[arg(long)]
        recent: Vec<String>,
        /// Maximum number of suggestions.
        #[arg(long, default_value = "8")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "kb-search boot"
    );

    let documents = load_documents(&cli.knowledge_base)?;

    match cli.command {
        Command::Search {
            query,
            top_n,
            history,
            context_turns,
        } => {
            let history = match history {
                Some(path) => load_history(&path)?,
                None => Vec::new(),
            };
            let retriever = Retriever::new(RetrievalOptions {
                top_n,
                max_context_turns: context_turns,
                ..RetrievalOptions::default()
            });

            let response = retriever.answer(&query, &history, &documents);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            println!("query: {}", response.query);
            if response.contextual_query != response.query {
                println!("contextual_query: {}", response.contextual_query);
            }
            println!("confidence: {}", response.confidence.as_str());

            if response.results.is_empty() {
                println!("no matching notes; try rephrasing or browse by category");
            }

            for hit in &response.results {
                println!(
                    "[{}] score={:.2} id={} title={}",
                    hit.confidence.as_str(),
                    hit.score,
                    hit.document.id,
                    hit.document.title
                );
                println!("  category={}", hit.document.category);
                println!("  content:\n{}", hit.document.content);
            }

            for followup in &response.followups {
                println!("followup: {followup}");
            }
        }
        Command::Followups { query } => {
            let retriever = Retriever::default();
            let matched: Vec<Document> = retriever
                .retrieve(&query, &documents)
                .into_iter()
                .map(|hit| hit.document)
                .collect();
            let followups = generate_followups(&query, &matched, &documents);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&followups)?);
            } else {
                for followup in followups {
                    println!("{followup}");
                }
            }
        }
        Command::Suggest {
            prefix,
            recent,
            limit,
        } => {
            let retriever = Retriever::new(RetrievalOptions {
                suggestion_limit: limit,
                ..RetrievalOptions::default()
            });
            let suggestions = retriever.suggest(&prefix, &documents, &recent);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                for suggestion in suggestions {
                    match suggestion.id {
                        Some(id) => println!("[{:?}] {} ({id})", suggestion.kind, suggestion.text),
                        None => println!("[{:?}] {}", suggestion.kind, suggestion.text),
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_documents(path: &Path) -> anyhow::Result<Vec<Document>> {
    let report = load_knowledge_base(path)
        .with_context(|| format!("loading knowledge base from {}", path.display()))?;

    for skipped in &report.skipped_files {
        warn!(
            path = %skipped.path.display(),
            reason = %skipped.reason,
            "skipped knowledge base file"
        );
    }
    for rejected in &report.rejected_documents {
        warn!(path = %rejected.path.display(), reason = %rejected.reason, "rejected document");
    }

    info!(
        path = %path.display(),
        documents = report.documents.len(),
        fingerprint = %report.fingerprint,
        "knowledge base loaded"
    );

    Ok(report.documents)
}

fn load_history(path: &Path) -> anyhow::Result<Vec<ConversationTurn>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading conversation history {}", path.display()))?;
    let turns: Vec<ConversationTurn> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing conversation history {}", path.display()))?;
    Ok(turns)
}
