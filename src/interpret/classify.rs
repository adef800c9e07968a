//! Status classification.
//!
//! Maps a [`StatusCode`] to what the user sees. The table is fixed; anything
//! outside the three documented statuses is shown by its raw value without a
//! banner.

use std::borrow::Cow;

use crate::domain::StatusCode;

/// Label used when the service sent no status at all
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Colour family of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Success,
    Danger,
    Warning,
    Neutral,
}

impl ColorScheme {
    /// Start and end stops of the web front end's gradient for this scheme
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            Self::Success => ("#10B981", "#059669"),
            Self::Danger => ("#EF4444", "#DC2626"),
            Self::Warning => ("#F59E0B", "#D97706"),
            Self::Neutral => ("#6B7280", "#4B5563"),
        }
    }
}

/// How a status is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPresentation {
    pub title: Cow<'static, str>,
    pub subtitle: Option<&'static str>,
    pub color_scheme: ColorScheme,
    pub icon: Option<&'static str>,
    /// Whether the coloured banner is shown (known statuses only)
    pub banner: bool,
}

impl StatusPresentation {
    fn known(
        title: &'static str,
        subtitle: &'static str,
        color_scheme: ColorScheme,
        icon: &'static str,
    ) -> Self {
        Self {
            title: Cow::Borrowed(title),
            subtitle: Some(subtitle),
            color_scheme,
            icon: Some(icon),
            banner: true,
        }
    }

    fn plain(title: Cow<'static, str>) -> Self {
        Self {
            title,
            subtitle: None,
            color_scheme: ColorScheme::Neutral,
            icon: None,
            banner: false,
        }
    }
}

/// Classify a status. Total and deterministic.
pub fn classify(status: &StatusCode) -> StatusPresentation {
    match status {
        StatusCode::LikelyCorrect => StatusPresentation::known(
            "Verified Correct",
            "AI response validated against reliable sources",
            ColorScheme::Success,
            "✓",
        ),
        StatusCode::PossibleHallucination => StatusPresentation::known(
            "Hallucination Detected",
            "Response may contain inaccurate information",
            ColorScheme::Danger,
            "⚠",
        ),
        StatusCode::NoReferenceFound => StatusPresentation::known(
            "No Reference Found",
            "Unable to verify against available sources",
            ColorScheme::Warning,
            "ℹ",
        ),
        StatusCode::Unrecognized(raw) => StatusPresentation::plain(Cow::Owned(raw.clone())),
        StatusCode::Missing => StatusPresentation::plain(Cow::Borrowed(UNKNOWN_TITLE)),
    }
}
