//! Slide data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::SlideAttributes;

/// Content of the single slide emitted for an empty document.
pub const FALLBACK_CONTENT: &str = r#"<div class="slide-content"><h1>Welcome to Markdown to Slides</h1><p>Start writing your presentation in Markdown format.</p></div>"#;

/// Positional slide identifier.
///
/// One-based index of the slide unit in the split document, counted before
/// empty units are dropped. Serialized as a decimal string (`"1"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SlideId(usize);

impl SlideId {
    /// Identifier for the slide unit at a zero-based split index.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// One-based position.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SlideId> for String {
    fn from(id: SlideId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SlideId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(format!("invalid slide id: {value:?}")),
        }
    }
}

/// A compiled slide.
///
/// Created fresh on every compilation and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Positional identifier.
    pub id: SlideId,
    /// Sanitized HTML wrapped in `<div class="slide-content">`.
    pub content: String,
    /// Directives extracted from the slide source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SlideAttributes>,
    /// Plain text of the first heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Slide {
    /// The welcome slide returned for an empty document.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: SlideId(1),
            content: FALLBACK_CONTENT.to_owned(),
            attributes: None,
            title: Some("Welcome to Markdown to Slides".to_owned()),
        }
    }
}
