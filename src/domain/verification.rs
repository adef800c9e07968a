//! Verification payload returned by the backend for `POST /ask`.
//!
//! Parsing is permissive: absent fields, JSON `null`, unknown fields and
//! documented fields of the wrong JSON type are all accepted. Only a body
//! that is not a JSON object fails to parse.
//!
//! A wrongly typed field degrades rather than failing the response:
//! - answer text given as a number or boolean is shown as its JSON text
//! - other string fields of another type are treated as absent
//! - metrics given as numeric strings are parsed, anything else is absent
//! - a `verification` member that is not an object counts as empty

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Successful `/ask` response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The AI-generated answer being checked
    #[serde(default, deserialize_with = "answer_text")]
    pub ai_answer: String,

    /// Present only when the service proposes a correction
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub corrected_answer: Option<String>,

    /// The service's judgement of `ai_answer`
    #[serde(default, deserialize_with = "object_or_default")]
    pub verification: VerificationVerdict,
}

/// The `verification` object of a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationVerdict {
    /// Raw status string; see [`VerificationVerdict::status_code`]
    #[serde(
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    /// Semantic similarity between answer and reference, nominally 0..=1
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub similarity: Option<f64>,

    /// Named-entity overlap between answer and reference, nominally 0..=1
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub ner_overlap: Option<f64>,

    #[serde(
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_url: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_title: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_summary: Option<String>,

    /// Why the service reached its status (e.g. `no_wikipedia_result`)
    #[serde(
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,

    /// Any fields this client does not know about, kept for the raw view
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerificationVerdict {
    /// Interpret the raw status string
    pub fn status_code(&self) -> StatusCode {
        StatusCode::parse(self.status.as_deref())
    }

    /// Whether a supporting source was found.
    ///
    /// An empty URL counts as absent.
    pub fn has_reference(&self) -> bool {
        self.reference_url
            .as_deref()
            .map(|url| !url.is_empty())
            .unwrap_or(false)
    }
}

/// Verification status reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Answer matches a reliable reference
    LikelyCorrect,

    /// Answer disagrees with the reference
    PossibleHallucination,

    /// No reference could be found to check against
    NoReferenceFound,

    /// A status this client does not know (kept verbatim)
    Unrecognized(String),

    /// No status at all (absent, null or empty)
    Missing,
}

impl StatusCode {
    pub const LIKELY_CORRECT: &'static str = "likely_correct";
    pub const POSSIBLE_HALLUCINATION: &'static str = "possible_hallucination";
    pub const NO_REFERENCE_FOUND: &'static str = "no_reference_found";

    /// Parse a raw status string as sent on the wire
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Missing,
            Some(Self::LIKELY_CORRECT) => Self::LikelyCorrect,
            Some(Self::POSSIBLE_HALLUCINATION) => Self::PossibleHallucination,
            Some(Self::NO_REFERENCE_FOUND) => Self::NoReferenceFound,
            Some(other) => Self::Unrecognized(other.to_string()),
        }
    }

    /// Wire representation, `None` for [`StatusCode::Missing`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::LikelyCorrect => Some(Self::LIKELY_CORRECT),
            Self::PossibleHallucination => Some(Self::POSSIBLE_HALLUCINATION),
            Self::NoReferenceFound => Some(Self::NO_REFERENCE_FOUND),
            Self::Unrecognized(raw) => Some(raw.as_str()),
            Self::Missing => None,
        }
    }

    /// Whether this is one of the three statuses the service documents
    pub fn is_known(&self) -> bool {
        matches!(
            self,
            Self::LikelyCorrect | Self::PossibleHallucination | Self::NoReferenceFound
        )
    }
}

/// Strings as-is, numbers and booleans as their JSON text, anything else absent
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn answer_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(deserializer)?.unwrap_or_default())
}

fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Numbers, or strings holding a number
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

fn object_or_default<'de, D>(deserializer: D) -> Result<VerificationVerdict, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Ok(VerificationVerdict::default()),
    }
}
