//! Line-oriented interactive session.
//!
//! Each line of text is submitted as a query. Lines starting with `/` are
//! commands:
//! - `/examples` lists the example questions
//! - `/pick N` loads example N into the draft (does not submit)
//! - `/send` submits the draft
//! - `/raw` toggles the raw verification view
//! - `/quit` ends the session
//!
//! Start a line with `//` to submit a question that itself begins with `/`.

use std::io::Write as _;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::adapters::Backend;
use crate::core::Controller;
use crate::domain::is_submittable;
use crate::samples;

use super::{render, verify};

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Submit(String),
    Examples,
    Pick(usize),
    Send,
    ToggleRaw,
    Quit,
    Unknown(String),
}

impl Input {
    /// Interpret one line typed by the user
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix('/') else {
            return Self::Submit(line.to_string());
        };
        if command.starts_with('/') {
            // Drop the escaping slash, keep the rest as typed
            let at = line.len() - line.trim_start().len();
            return Self::Submit(format!("{}{}", &line[..at], &line[at + 1..]));
        }

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("examples"), None) => Self::Examples,
            (Some("pick"), Some(n)) => match n.parse() {
                Ok(n) => Self::Pick(n),
                Err(_) => Self::Unknown(trimmed.to_string()),
            },
            (Some("send"), None) => Self::Send,
            (Some("raw"), None) => Self::ToggleRaw,
            (Some("quit") | Some("exit"), None) => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// Print the example list
pub fn print_examples() {
    for (i, sample) in samples::SAMPLE_QUESTIONS.iter().enumerate() {
        match sample.category {
            Some(tag) => println!("{:>3}. [{}] {}", i + 1, tag, sample.question),
            None => println!("{:>3}. {}", i + 1, sample.question),
        }
    }
}

/// Run the session until `/quit` or end of input
pub async fn run<B: Backend>(
    mut controller: Controller<B>,
    api_base: &str,
    mut raw: bool,
) -> Result<()> {
    println!("AI Hallucination Detector");
    println!("Type a question and press Enter. /examples lists test questions, /quit exits, // escapes a leading slash.");
    print!("{}", render::render_state(controller.state(), api_base, raw));

    let mut draft = String::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };

        match Input::parse(&line) {
            Input::Submit(query) => {
                // A blank line is declined and leaves the draft alone
                if !is_submittable(&query) {
                    continue;
                }
                draft = query;
                verify(&mut controller, &draft, api_base, raw).await;
            }
            Input::Examples => print_examples(),
            Input::Pick(n) => match samples::pick(n) {
                Some(sample) => {
                    draft = sample.question.to_string();
                    println!("Draft: {}", draft);
                    println!("Use /send to verify it.");
                }
                None => eprintln!(
                    "No example {}; pick 1-{}",
                    n,
                    samples::SAMPLE_QUESTIONS.len()
                ),
            },
            Input::Send => {
                verify(&mut controller, &draft, api_base, raw).await;
            }
            Input::ToggleRaw => {
                raw = !raw;
                println!("Raw view {}", if raw { "on" } else { "off" });
            }
            Input::Quit => break,
            Input::Unknown(cmd) => eprintln!("Unknown command: {}", cmd),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_submitted_as_typed() {
        assert_eq!(
            Input::parse("  Who invented the bicycle? "),
            Input::Submit("  Who invented the bicycle? ".to_string())
        );
        assert_eq!(Input::parse(""), Input::Submit(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Input::parse("/examples"), Input::Examples);
        assert_eq!(Input::parse("/pick 3"), Input::Pick(3));
        assert_eq!(Input::parse(" /send "), Input::Send);
        assert_eq!(Input::parse("/raw"), Input::ToggleRaw);
        assert_eq!(Input::parse("/quit"), Input::Quit);
        assert_eq!(Input::parse("/exit"), Input::Quit);
    }

    #[test]
    fn test_double_slash_submits_text_starting_with_slash() {
        assert_eq!(
            Input::parse("//etc/passwd is what?"),
            Input::Submit("/etc/passwd is what?".to_string())
        );
        assert_eq!(Input::parse(" //quit "), Input::Submit(" /quit ".to_string()));
    }

    #[test]
    fn test_bad_commands() {
        assert_eq!(Input::parse("/pick x"), Input::Unknown("/pick x".to_string()));
        assert_eq!(Input::parse("/pick"), Input::Unknown("/pick".to_string()));
        assert_eq!(Input::parse("/dance"), Input::Unknown("/dance".to_string()));
    }
}
