//! Terminal rendering of the request state.
//!
//! Renderers build a `String` so they can be tested without a terminal.
//! Colours come from `console` and switch off automatically when stdout is
//! not a tty or NO_COLOR is set.

use std::fmt::Write as _;

use console::{style, Style};

use crate::domain::{RequestState, VerificationResult};
use crate::interpret::{meter_fill, ColorScheme, Interpretation, StatusPresentation};

const METER_WIDTH: usize = 20;

fn scheme_style(scheme: ColorScheme) -> Style {
    match scheme {
        ColorScheme::Success => Style::new().green(),
        ColorScheme::Danger => Style::new().red(),
        ColorScheme::Warning => Style::new().yellow(),
        ColorScheme::Neutral => Style::new().dim(),
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", style(title).bold().underlined());
}

fn indented(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "  {}", line);
    }
}

fn banner(out: &mut String, presentation: &StatusPresentation) {
    if !presentation.banner {
        return;
    }

    let accent = scheme_style(presentation.color_scheme).bold();
    let icon = presentation.icon.unwrap_or(" ");
    let _ = writeln!(
        out,
        "{}",
        accent.apply_to(format!("[{}] {}", icon, presentation.title))
    );
    if let Some(subtitle) = presentation.subtitle {
        let _ = writeln!(out, "    {}", subtitle);
    }
}

fn meter(out: &mut String, label: &str, percent: i64, scheme: ColorScheme) {
    let filled = meter_fill(percent, METER_WIDTH);
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(METER_WIDTH - filled)
    );
    let _ = writeln!(
        out,
        "  {:<16}{:>5}  {}",
        label,
        format!("{}%", percent),
        scheme_style(scheme).apply_to(bar)
    );
}

/// Render a successful verification
pub fn render_result(result: &VerificationResult, raw: bool) -> String {
    let view = Interpretation::of(result);
    let mut out = String::new();

    banner(&mut out, &view.presentation);

    heading(&mut out, "AI Response");
    indented(&mut out, view.ai_answer);

    if let Some(corrected) = view.corrected_answer {
        heading(&mut out, "Corrected Answer");
        indented(&mut out, corrected);
    }

    heading(&mut out, "Verification Metrics");
    let _ = writeln!(
        out,
        "  {:<16}{}",
        "Status",
        scheme_style(view.presentation.color_scheme)
            .bold()
            .apply_to(&view.presentation.title)
    );
    meter(&mut out, "Similarity", view.similarity_pct, ColorScheme::Neutral);
    meter(&mut out, "Entity Overlap", view.overlap_pct, ColorScheme::Success);

    if let Some(reference) = &view.reference {
        heading(&mut out, "Source Reference");
        if let Some(title) = reference.title {
            let _ = writeln!(out, "  {}", style(title).bold());
        }
        let _ = writeln!(out, "  {}", style(reference.url).cyan());
        if let Some(summary) = reference.summary {
            out.push('\n');
            indented(&mut out, summary);
        }
    }

    if raw {
        heading(&mut out, "Raw Verification Data");
        match serde_json::to_string_pretty(&result.verification) {
            Ok(json) => out.push_str(&json),
            Err(e) => {
                let _ = write!(out, "(unavailable: {})", e);
            }
        }
        out.push('\n');
    }

    out
}

/// Render a failed submission: one message and one hint
pub fn render_failure(message: &str, api_base: &str) -> String {
    format!(
        "{} {}\n{}\n",
        style("⚠").red().bold(),
        style(message).red(),
        style(format!(
            "Check that the verification service is running at {} and try again.",
            api_base
        ))
        .dim()
    )
}

/// Render whatever the current state is
pub fn render_state(state: &RequestState, api_base: &str, raw: bool) -> String {
    match state {
        RequestState::Idle => format!(
            "{}\n",
            style("Ask a question to get started with AI verification").dim()
        ),
        RequestState::Loading => format!("{}\n", style("Analyzing...").dim()),
        RequestState::Succeeded(result) => render_result(result, raw),
        RequestState::Failed(message) => render_failure(message, api_base),
    }
}
