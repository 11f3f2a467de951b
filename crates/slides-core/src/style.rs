//! Style resolution for slide backgrounds.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::attributes::SlideAttributes;

/// A cover-fit, centered, non-repeating background image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundImage {
    /// Image URL as written in the directive.
    pub url: String,
}

impl BackgroundImage {
    pub const SIZE: &'static str = "cover";
    pub const POSITION: &'static str = "center";
    pub const REPEAT: &'static str = "no-repeat";

    /// CSS `url(...)` reference.
    ///
    /// Plain URLs are written bare. URLs with quotes, parentheses, whitespace
    /// or backslashes are written as an escaped quoted string.
    ///
    /// ```
    /// use slides_core::BackgroundImage;
    ///
    /// let bare = BackgroundImage { url: "bg.png".to_owned() };
    /// assert_eq!(bare.css_url(), "url(bg.png)");
    ///
    /// let quoted = BackgroundImage { url: "my (1).png".to_owned() };
    /// assert_eq!(quoted.css_url(), r#"url("my (1).png")"#);
    /// ```
    #[must_use]
    pub fn css_url(&self) -> String {
        if self.url.chars().all(is_bare_url_char) {
            return format!("url({})", self.url);
        }

        let mut out = String::with_capacity(self.url.len() + 8);
        out.push_str("url(\"");
        for c in self.url.chars() {
            match c {
                '"' | '\\' => {
                    out.push('\\');
                    out.push(c);
                }
                '\n' => out.push_str("\\a "),
                '\r' => out.push_str("\\d "),
                c => out.push(c),
            }
        }
        out.push_str("\")");
        out
    }
}

/// Renderable style declaration derived from slide attributes.
///
/// Only background color and image are translated; other attributes are left
/// to their consumers. Serializes as a camelCase CSS property map:
///
/// ```
/// use slides_core::{SlideAttributes, resolve};
///
/// let mut attrs = SlideAttributes::default();
/// attrs.insert("background-image", "bg.png");
///
/// let json = serde_json::to_string(&resolve(Some(&attrs))).unwrap();
/// assert_eq!(
///     json,
///     r#"{"backgroundImage":"url(bg.png)","backgroundSize":"cover","backgroundPosition":"center","backgroundRepeat":"no-repeat"}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideStyle {
    pub background_color: Option<String>,
    pub background_image: Option<BackgroundImage>,
}

impl SlideStyle {
    /// Whether the style declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.background_image.is_none()
    }

    /// Inline CSS declaration (`background-color: ...; background-image: url(...); ...`).
    ///
    /// Colors that could escape the declaration are dropped. Image URLs are
    /// quoted as needed by [`BackgroundImage::css_url`].
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();

        if let Some(color) = self.background_color.as_deref() {
            if is_safe_css_value(color) {
                decls.push(format!("background-color: {color}"));
            } else {
                tracing::debug!(value = color, "Skipping unsafe background color");
            }
        }

        if let Some(image) = &self.background_image {
            if !image.url.is_empty() && !image.url.contains(['<', '>']) {
                decls.push(format!("background-image: {}", image.css_url()));
                decls.push(format!("background-size: {}", BackgroundImage::SIZE));
                decls.push(format!("background-position: {}", BackgroundImage::POSITION));
                decls.push(format!("background-repeat: {}", BackgroundImage::REPEAT));
            } else {
                tracing::debug!(value = %image.url, "Skipping unsafe background image");
            }
        }

        decls.join("; ")
    }
}

impl Serialize for SlideStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(color) = &self.background_color {
            map.serialize_entry("backgroundColor", color)?;
        }
        if let Some(image) = &self.background_image {
            map.serialize_entry("backgroundImage", &image.css_url())?;
            map.serialize_entry("backgroundSize", BackgroundImage::SIZE)?;
            map.serialize_entry("backgroundPosition", BackgroundImage::POSITION)?;
            map.serialize_entry("backgroundRepeat", BackgroundImage::REPEAT)?;
        }
        map.end()
    }
}

fn is_bare_url_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '(' | ')' | '\\' | ';')
}

fn is_safe_css_value(value: &str) -> bool {
    !value.is_empty() && !value.contains([';', '{', '}', '<', '>'])
}

/// Map slide attributes to a style declaration.
///
/// Absent attributes yield an empty style.
#[must_use]
pub fn resolve(attributes: Option<&SlideAttributes>) -> SlideStyle {
    let Some(attrs) = attributes else {
        return SlideStyle::default();
    };

    SlideStyle {
        background_color: attrs.background_color.clone(),
        background_image: attrs
            .background_image
            .as_ref()
            .map(|url| BackgroundImage { url: url.clone() }),
    }
}
