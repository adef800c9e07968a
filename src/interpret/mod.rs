//! Result interpretation.
//!
//! Derives read-only display values from a successful verification:
//! - `classify`: status -> title, subtitle, colours, banner
//! - `metrics`: 0..=1 ratios -> whole percentages
//!
//! Nothing here is stored; callers recompute on every render.

pub mod classify;
pub mod metrics;

pub use classify::{classify, ColorScheme, StatusPresentation, UNKNOWN_TITLE};
pub use metrics::{meter_fill, normalize_percent};

use crate::domain::VerificationResult;

/// Supporting source for a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub summary: Option<&'a str>,
}

/// Everything needed to present a successful verification
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation<'a> {
    pub presentation: StatusPresentation,
    pub ai_answer: &'a str,
    pub corrected_answer: Option<&'a str>,
    pub similarity_pct: i64,
    pub overlap_pct: i64,
    /// Present only when the service sent a non-empty `reference_url`
    pub reference: Option<Reference<'a>>,
}

impl<'a> Interpretation<'a> {
    pub fn of(result: &'a VerificationResult) -> Self {
        let verdict = &result.verification;

        let reference = if verdict.has_reference() {
            verdict.reference_url.as_deref().map(|url| Reference {
                url,
                title: verdict.reference_title.as_deref(),
                summary: verdict
                    .reference_summary
                    .as_deref()
                    .filter(|s| !s.is_empty()),
            })
        } else {
            None
        };

        Self {
            presentation: classify(&verdict.status_code()),
            ai_answer: &result.ai_answer,
            corrected_answer: result.corrected_answer.as_deref().filter(|s| !s.is_empty()),
            similarity_pct: normalize_percent(verdict.similarity),
            overlap_pct: normalize_percent(verdict.ner_overlap),
            reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> VerificationResult {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_verified_answer_with_reference() {
        let result = parse(
            r#"{"ai_answer": "Paris", "verification": {
                "status": "likely_correct", "similarity": 0.95, "ner_overlap": 0.8,
                "reference_url": "https://en.wikipedia.org/wiki/France", "reference_title": "France"
            }}"#,
        );

        let view = Interpretation::of(&result);
        assert_eq!(view.presentation.title, "Verified Correct");
        assert_eq!(view.similarity_pct, 95);
        assert_eq!(view.overlap_pct, 80);
        assert_eq!(view.ai_answer, "Paris");

        let reference = view.reference.unwrap();
        assert_eq!(reference.url, "https://en.wikipedia.org/wiki/France");
        assert_eq!(reference.title, Some("France"));
        assert!(reference.summary.is_none());
    }

    #[test]
    fn test_unknown_status_without_metrics() {
        let result = parse(r#"{"ai_answer": "X", "verification": {"status": "totally_new_status"}}"#);

        let view = Interpretation::of(&result);
        assert_eq!(view.presentation.title, "totally_new_status");
        assert!(!view.presentation.banner);
        assert_eq!(view.similarity_pct, 0);
        assert_eq!(view.overlap_pct, 0);
        assert!(view.reference.is_none());
        assert!(view.corrected_answer.is_none());
    }

    #[test]
    fn test_corrected_answer_is_surfaced() {
        let result = parse(
            r#"{"ai_answer": "Edison", "corrected_answer": "Whitcomb Judson invented the zipper.",
                "verification": {"status": "possible_hallucination", "similarity": 0.3}}"#,
        );

        let view = Interpretation::of(&result);
        assert_eq!(view.presentation.title, "Hallucination Detected");
        assert_eq!(
            view.corrected_answer,
            Some("Whitcomb Judson invented the zipper.")
        );
        assert_eq!(view.similarity_pct, 30);
    }
}
