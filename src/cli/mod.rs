//! Command-line interface for halldetect.
//!
//! Provides commands for verifying a question, browsing example questions,
//! running an interactive session, probing the backend and showing the
//! resolved configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::adapters::{Backend, HttpBackend};
use crate::config::{self, Overrides, ResolvedConfig};
use crate::core::{Controller, Rejected};
use crate::domain::RequestState;
use crate::samples;

pub mod interactive;
pub mod render;

/// halldetect - Verify AI answers against a fact-checking service
#[derive(Parser, Debug)]
#[command(name = "halldetect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verification service base address (overrides HALLDETECT_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds (0 or unset waits indefinitely)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question and show the verification
    Ask {
        /// The question (words are joined with spaces)
        #[arg(conflicts_with = "example")]
        query: Vec<String>,

        /// Use example question N instead (see `halldetect examples`)
        #[arg(short, long)]
        example: Option<usize>,

        /// Also print the raw verification data
        #[arg(long)]
        raw: bool,
    },

    /// List example questions
    Examples,

    /// Start an interactive session
    Interactive {
        /// Start with the raw verification view enabled
        #[arg(long)]
        raw: bool,
    },

    /// Check that the verification service is reachable
    Health,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Default log filter implied by `-v` flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let overrides = Overrides {
            api_base: self.api_base,
            timeout_seconds: self.timeout,
        };

        match self.command {
            Commands::Ask {
                query,
                example,
                raw,
            } => {
                let config = config::load_config(&overrides)?;
                ask(&config, query, example, raw).await
            }
            Commands::Examples => {
                interactive::print_examples();
                Ok(())
            }
            Commands::Interactive { raw } => {
                let config = config::load_config(&overrides)?;
                let controller = Controller::new(HttpBackend::from_config(&config)?);
                interactive::run(controller, &config.api_base, raw).await
            }
            Commands::Health => {
                let config = config::load_config(&overrides)?;
                health(&config).await
            }
            Commands::Config => {
                let config = config::load_config(&overrides)?;
                show_config(&config);
                Ok(())
            }
        }
    }
}

/// Resolve the query from positional words or an example number
fn resolve_query(words: Vec<String>, example: Option<usize>) -> Result<String> {
    match example {
        Some(n) => samples::pick(n)
            .map(|s| s.question.to_string())
            .with_context(|| {
                format!(
                    "No example {}; choose 1-{}",
                    n,
                    samples::SAMPLE_QUESTIONS.len()
                )
            }),
        None => Ok(words.join(" ")),
    }
}

/// Submit one question and render the outcome
async fn ask(
    config: &ResolvedConfig,
    words: Vec<String>,
    example: Option<usize>,
    raw: bool,
) -> Result<()> {
    let query = resolve_query(words, example)?;

    let mut controller = Controller::new(HttpBackend::from_config(config)?);

    if verify(&mut controller, &query, &config.api_base, raw).await
        && controller.state().error().is_some()
    {
        std::process::exit(1);
    }

    Ok(())
}

/// Run one submission, showing `Loading` while the call is in flight.
///
/// Returns `false` if the query was declined without contacting the backend.
pub(crate) async fn verify<B: Backend>(
    controller: &mut Controller<B>,
    query: &str,
    api_base: &str,
    raw: bool,
) -> bool {
    let ticket = match controller.begin(query) {
        Ok(ticket) => ticket,
        Err(Rejected::EmptyQuery) => {
            debug!("Empty query; nothing submitted");
            return false;
        }
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };
    eprint!("{}", render::render_state(controller.state(), api_base, raw));

    let outcome = controller.backend().ask(ticket.query()).await;
    controller.settle(ticket, outcome);

    match controller.state() {
        RequestState::Failed(message) => eprint!("{}", render::render_failure(message, api_base)),
        state => print!("{}", render::render_state(state, api_base, raw)),
    }

    true
}

/// Probe the verification service
async fn health(config: &ResolvedConfig) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;

    match backend.health_check().await {
        Ok(greeting) => {
            println!("✅ {} is up: {}", backend.base_url(), greeting);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {} is not reachable: {}", backend.base_url(), e);
            std::process::exit(1);
        }
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &ResolvedConfig) {
    println!("halldetect configuration");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!(
        "API base:    {} (from {})",
        config.api_base, config.api_base_source
    );
    println!(
        "Timeout:     {}",
        config
            .timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_query_from_words() {
        let words = vec!["What".to_string(), "is".to_string(), "2+2?".to_string()];
        assert_eq!(resolve_query(words, None).unwrap(), "What is 2+2?");
        assert_eq!(resolve_query(Vec::new(), None).unwrap(), "");
    }

    #[test]
    fn test_resolve_query_from_example() {
        assert_eq!(
            resolve_query(Vec::new(), Some(2)).unwrap(),
            "What is the capital of France?"
        );
        assert!(resolve_query(Vec::new(), Some(0)).is_err());
        assert!(resolve_query(Vec::new(), Some(99)).is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "halldetect",
            "--api-base",
            "http://127.0.0.1:9000",
            "ask",
            "Who",
            "invented",
            "Python?",
            "--raw",
        ])
        .unwrap();

        assert_eq!(cli.api_base.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cli.log_level(), "warn");
        match cli.command {
            Commands::Ask { query, example, raw } => {
                assert_eq!(query.join(" "), "Who invented Python?");
                assert!(example.is_none());
                assert!(raw);
            }
            other => panic!("Expected ask, got {:?}", other),
        }
    }

    #[test]
    fn test_example_conflicts_with_query() {
        assert!(Cli::try_parse_from(["halldetect", "ask", "hi", "--example", "1"]).is_err());
        assert!(Cli::try_parse_from(["halldetect", "-vv", "ask", "--example", "1"]).is_ok());
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["halldetect", "-v", "examples"]).unwrap();
        assert_eq!(cli.log_level(), "info");
        let cli = Cli::try_parse_from(["halldetect", "health", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
    }
}
