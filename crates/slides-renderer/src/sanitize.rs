//! HTML sanitization for rendered slide bodies.
//!
//! Rendered markdown may contain raw HTML from the source document, so the
//! output is cleaned with a whitelist before it is trusted for direct DOM
//! injection.

use std::collections::HashSet;

use ammonia::Builder;

/// CSS properties kept in `style` attributes. Everything else, including
/// positioning and `url(...)`-bearing properties, is dropped.
const STYLE_PROPERTIES: [&str; 22] = [
    "color",
    "background-color",
    "text-align",
    "vertical-align",
    "font-size",
    "font-weight",
    "font-style",
    "font-family",
    "text-decoration",
    "text-transform",
    "line-height",
    "letter-spacing",
    "white-space",
    "margin",
    "margin-top",
    "margin-bottom",
    "padding",
    "border",
    "border-radius",
    "width",
    "max-width",
    "opacity",
];

/// Whitelist-based HTML sanitizer.
///
/// Starts from `ammonia`'s default safe whitelist and additionally keeps:
/// - `class` and `style` on any element (`style` limited to `STYLE_PROPERTIES`)
/// - task list checkboxes (`<input type="checkbox" checked disabled>`)
///
/// Scripts, event handler attributes, `javascript:` URLs and comments are removed.
pub struct HtmlSanitizer {
    builder: Builder<'static>,
}

impl HtmlSanitizer {
    /// Create a sanitizer with the slide whitelist.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .add_tags(["input"])
            .add_tag_attributes("input", ["type", "checked", "disabled"])
            .add_generic_attributes(["class", "style"])
            .filter_style_properties(STYLE_PROPERTIES.into_iter().collect::<HashSet<_>>())
            .strip_comments(true);
        Self { builder }
    }

    /// Sanitize an HTML fragment.
    ///
    /// Never fails: malformed markup is repaired by the HTML5 parser.
    #[must_use]
    pub fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
