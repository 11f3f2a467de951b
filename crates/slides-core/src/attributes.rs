//! Per-slide rendering attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rendering directives attached to a slide.
///
/// The reserved keys have typed fields; every other `key=value` pair is kept
/// verbatim in [`extra`](Self::extra). Serialized as one flat camelCase object:
///
/// ```
/// use slides_core::SlideAttributes;
///
/// let mut attrs = SlideAttributes::default();
/// attrs.insert("background-color", "#3b82f6");
/// attrs.insert("transition", "fade");
/// attrs.insert("autoslide", "5000");
///
/// let json = serde_json::to_string(&attrs).unwrap();
/// assert_eq!(json, r##"{"backgroundColor":"#3b82f6","transition":"fade","autoslide":"5000"}"##);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideAttributes {
    /// `background-color` directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// `background-image` directive (image URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// `background-video` directive (video URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,
    /// `transition` directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    /// Any other directive, keyed by its name without the `data-` prefix.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SlideAttributes {
    /// Store a value under a normalized key, overwriting any previous value.
    ///
    /// Reserved keys are accepted in both their directive spelling
    /// (`background-color`) and their attribute spelling (`backgroundColor`).
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key {
            "background-color" | "backgroundColor" => self.background_color = Some(value),
            "background-image" | "backgroundImage" => self.background_image = Some(value),
            "background-video" | "backgroundVideo" => self.background_video = Some(value),
            "transition" => self.transition = Some(value),
            _ => {
                self.extra.insert(key.to_owned(), value);
            }
        }
    }

    /// Look up a value by attribute name (`backgroundColor`, `transition`, or a free-form key).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "backgroundColor" => self.background_color.as_deref(),
            "backgroundImage" => self.background_image.as_deref(),
            "backgroundVideo" => self.background_video.as_deref(),
            "transition" => self.transition.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// Whether no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none()
            && self.background_image.is_none()
            && self.background_video.is_none()
            && self.transition.is_none()
            && self.extra.is_empty()
    }

    /// Number of attributes set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over all attributes as `(name, value)`, reserved names first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let reserved = [
            ("backgroundColor", self.background_color.as_deref()),
            ("backgroundImage", self.background_image.as_deref()),
            ("backgroundVideo", self.background_video.as_deref()),
            ("transition", self.transition.as_deref()),
        ];
        reserved
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}
