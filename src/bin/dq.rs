//! dq - Data Quality Agent CLI
//!
//! Command-line interface for profiling datasets, screening outliers,
//! suggesting validation rules, and recording rule feedback.

use clap::{Parser, Subcommand};
use dq_agent::anomaly::AnomalyDetector;
use dq_agent::error::Result;
use dq_agent::feedback::{FeedbackRecord, FeedbackStore};
use dq_agent::ingest::read_dataset;
use dq_agent::profile::profile;
use dq_agent::rules::{HeuristicSuggester, RuleStore, RuleSuggester};
use std::path::PathBuf;

/// Data Quality Agent
#[derive(Parser)]
#[command(name = "dq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile a dataset
    Profile {
        /// Path to a CSV or TSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: text, json, or yaml
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Screen numeric columns for outlier rows
    Anomalies {
        /// Path to a CSV or TSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Flagging threshold on the absolute z-score
        #[arg(short, long, default_value = "3.0")]
        threshold: f64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Suggest validation rules from a dataset's profile
    Suggest {
        /// Path to a CSV or TSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Also append suggested rules to a rule store file
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// List validated rules from a rule store file
    Rules {
        /// Path to the rule store file
        #[arg(long)]
        store: PathBuf,
    },

    /// Record or list feedback on rules
    Feedback {
        /// Path to the feedback database
        #[arg(long)]
        db: PathBuf,

        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Subcommand)]
enum FeedbackAction {
    /// Record feedback on a rule
    Add {
        /// The rule expression the feedback refers to
        #[arg(long)]
        rule: String,

        /// Mark the rule as accepted (rejected when absent)
        #[arg(long)]
        accepted: bool,

        /// Free-form comment
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// List recorded feedback
    List,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profile {
            input,
            format,
            output,
        } => cmd_profile(&input, &format, output.as_deref()),

        Commands::Anomalies {
            input,
            threshold,
            format,
        } => cmd_anomalies(&input, threshold, &format),

        Commands::Suggest {
            input,
            format,
            store,
        } => cmd_suggest(&input, &format, store.as_deref()),

        Commands::Rules { store } => cmd_rules(&store),

        Commands::Feedback { db, action } => cmd_feedback(&db, action),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_profile(input: &std::path::Path, format: &str, output: Option<&std::path::Path>) -> Result<()> {
    eprintln!("Loading {:?}...", input);
    let dataset = read_dataset(input)?;
    eprintln!(
        "Loaded {} rows x {} columns",
        dataset.n_rows(),
        dataset.n_columns()
    );

    let result = profile(&dataset);
    let rendered = match format {
        "json" => result.to_json()?,
        "yaml" => result.to_yaml()?,
        _ => result.to_string(),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!("Profile written to {:?}", path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn cmd_anomalies(input: &std::path::Path, threshold: f64, format: &str) -> Result<()> {
    eprintln!("Loading {:?}...", input);
    let dataset = read_dataset(input)?;

    let fitted = AnomalyDetector::with_threshold(threshold).fit(&dataset)?;
    eprintln!(
        "Fitted {} numeric columns, threshold {}",
        fitted.stats().len(),
        threshold
    );

    let hits = fitted.detect(&dataset)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&hits)?),
        _ => {
            if hits.is_empty() {
                println!("No rows above threshold");
            }
            for hit in &hits {
                println!(
                    "row {}: score {:.2} (p {:.4}) in {}",
                    hit.row,
                    hit.score,
                    hit.tail_probability,
                    hit.column.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn cmd_suggest(input: &std::path::Path, format: &str, store: Option<&std::path::Path>) -> Result<()> {
    eprintln!("Loading {:?}...", input);
    let dataset = read_dataset(input)?;
    let result = profile(&dataset);
    let rules = HeuristicSuggester::new().suggest(&result)?;
    eprintln!("Suggested {} rules", rules.len());

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rules)?),
        _ => {
            for rule in &rules {
                println!("{}  ({})", rule, rule.rationale);
            }
        }
    }

    if let Some(path) = store {
        let store = RuleStore::new(path);
        for rule in &rules {
            store.store_rule(rule)?;
        }
        eprintln!("Stored {} rules to {:?}", rules.len(), path);
    }
    Ok(())
}

fn cmd_rules(store: &std::path::Path) -> Result<()> {
    for rule in RuleStore::new(store).load()? {
        println!("{}", rule);
    }
    Ok(())
}

fn cmd_feedback(db: &std::path::Path, action: FeedbackAction) -> Result<()> {
    let store = FeedbackStore::open(db)?;
    match action {
        FeedbackAction::Add {
            rule,
            accepted,
            comment,
        } => {
            let id = store.add(&FeedbackRecord::new(rule, accepted, comment))?;
            eprintln!("Recorded feedback #{}", id);
        }
        FeedbackAction::List => {
            for record in store.list()? {
                let verdict = if record.accepted { "accepted" } else { "rejected" };
                if record.comment.is_empty() {
                    println!("[{}] {}", verdict, record.rule);
                } else {
                    println!("[{}] {} ({})", verdict, record.rule, record.comment);
                }
            }
        }
    }
    store.close()
}
