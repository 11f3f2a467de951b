//! Slide directive comments.
//!
//! A slide unit may carry any number of directive comments:
//!
//! ```text
//! <!-- .slide: data-background-color="#3b82f6" data-background-image="bg.png" -->
//! ```
//!
//! [`extract_attributes`] turns them into [`SlideAttributes`];
//! [`strip_directives`] removes them from the text that gets rendered.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::attributes::SlideAttributes;

/// Directive comment with a non-empty body, captured in group 1.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*\.slide:\s*(.+?)\s*-->").unwrap());

/// Any directive comment, including ones with an empty body.
static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*\.slide:.*?-->").unwrap());

/// Collect attributes from every directive comment in a slide unit.
///
/// Comments are processed in source order, so a later value for the same key
/// wins. Returns `None` when no comment yields a usable `key=value` pair.
///
/// # Example
///
/// ```
/// use slides_core::extract_attributes;
///
/// let attrs = extract_attributes(r##"<!-- .slide: data-background-color="#ff0000" -->"##).unwrap();
/// assert_eq!(attrs.background_color.as_deref(), Some("#ff0000"));
///
/// assert!(extract_attributes("# No directives").is_none());
/// ```
#[must_use]
pub fn extract_attributes(text: &str) -> Option<SlideAttributes> {
    let mut attrs = SlideAttributes::default();

    for caps in DIRECTIVE_RE.captures_iter(text) {
        for (key, value) in Pairs::new(&caps[1]) {
            attrs.insert(key, value);
        }
    }

    if attrs.is_empty() { None } else { Some(attrs) }
}

/// Remove every directive comment and trim surrounding whitespace.
#[must_use]
pub fn strip_directives(text: &str) -> Cow<'_, str> {
    match STRIP_RE.replace_all(text, "") {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_owned()),
    }
}

/// Iterator over the `key=value` pairs of a directive body.
///
/// Supports `key="value"`, `key='value'` and `key=value`. Keys lose a leading
/// `data-`. Tokens without `=`, empty keys and unquoted empty values are skipped.
struct Pairs<'a> {
    remaining: &'a str,
}

impl<'a> Pairs<'a> {
    fn new(body: &'a str) -> Self {
        Self { remaining: body }
    }

    /// Consume one whitespace-delimited token, returning `(key, value)` if it is a valid pair.
    fn next_token(&mut self) -> Option<Option<(&'a str, &'a str)>> {
        let s = self.remaining.trim_start();
        if s.is_empty() {
            self.remaining = s;
            return None;
        }

        let key_end = s
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(s.len());
        let raw_key = &s[..key_end];
        let after_key = &s[key_end..];

        let Some(after_eq) = after_key.strip_prefix('=') else {
            // Bare word without `=`
            self.remaining = after_key;
            return Some(None);
        };

        let (value, rest, quoted) = split_value(after_eq);
        self.remaining = rest;

        let key = raw_key.strip_prefix("data-").unwrap_or(raw_key);
        if key.is_empty() || (value.is_empty() && !quoted) {
            return Some(None);
        }
        Some(Some((key, value)))
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.next_token()? {
                return Some(pair);
            }
        }
    }
}

/// Split a value off the front of `s`. Returns `(value, rest, was_quoted)`.
fn split_value(s: &str) -> (&str, &str, bool) {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote) {
            if let Some(end) = inner.find(quote) {
                return (&inner[..end], &inner[end + 1..], true);
            }
            // Unterminated: value runs to the next whitespace, quote dropped
            let end = inner.find(char::is_whitespace).unwrap_or(inner.len());
            return (&inner[..end], &inner[end..], true);
        }
    }

    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    let value = s[..end].trim_matches(|c| c == '"' || c == '\'');
    (value, &s[end..], false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(body: &str) -> Vec<(&str, &str)> {
        Pairs::new(body).collect()
    }

    #[test]
    fn test_pairs_quoted_and_unquoted() {
        assert_eq!(
            pairs(r#"a="x y" b='z' c=w"#),
            vec![("a", "x y"), ("b", "z"), ("c", "w")]
        );
    }

    #[test]
    fn test_pairs_strip_data_prefix() {
        assert_eq!(
            pairs(r#"data-background-color="red" data-x=1"#),
            vec![("background-color", "red"), ("x", "1")]
        );
    }

    #[test]
    fn test_pairs_skip_malformed() {
        assert_eq!(pairs("loose =x y= z=1 data-=2"), vec![("z", "1")]);
    }

    #[test]
    fn test_pairs_empty_quoted_value_kept() {
        assert_eq!(pairs(r#"a="" b="#), vec![("a", "")]);
    }

    #[test]
    fn test_pairs_unterminated_quote() {
        assert_eq!(pairs(r#"a="open b=2"#), vec![("a", "open"), ("b", "2")]);
    }

    #[test]
    fn test_extract_reserved_keys() {
        let attrs = extract_attributes(
            r##"<!-- .slide: data-background-color="#3b82f6" data-background-image="https://x/bg.png" data-background-video="v.mp4" -->"##,
        )
        .unwrap();
        assert_eq!(attrs.background_color.as_deref(), Some("#3b82f6"));
        assert_eq!(attrs.background_image.as_deref(), Some("https://x/bg.png"));
        assert_eq!(attrs.background_video.as_deref(), Some("v.mp4"));
    }

    #[test]
    fn test_extract_unknown_key_preserved() {
        let attrs = extract_attributes(r#"<!-- .slide: data-transition="fade" state=intro -->"#)
            .unwrap();
        assert_eq!(attrs.transition.as_deref(), Some("fade"));
        assert_eq!(attrs.get("state"), Some("intro"));
        assert_eq!(attrs.background_color, None);
    }

    #[test]
    fn test_extract_last_write_wins() {
        let text = "<!-- .slide: data-background-color=\"red\" -->\n# T\n<!-- .slide: data-background-color=\"blue\" -->";
        let attrs = extract_attributes(text).unwrap();
        assert_eq!(attrs.background_color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_extract_merges_multiple_comments() {
        let text = "<!-- .slide: data-background-color=\"red\" -->\n<!-- .slide: data-transition=\"zoom\" -->";
        let attrs = extract_attributes(text).unwrap();
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_extract_none_without_pairs() {
        assert!(extract_attributes("<!-- .slide: nothing here -->").is_none());
        assert!(extract_attributes("<!-- regular comment -->").is_none());
        assert!(extract_attributes("").is_none());
    }

    #[test]
    fn test_extract_compact_comment() {
        let attrs = extract_attributes("<!--.slide:a=1-->").unwrap();
        assert_eq!(attrs.get("a"), Some("1"));
    }

    #[test]
    fn test_strip_directives() {
        let text = "<!-- .slide: data-background-color=\"red\" -->\n# Title\n\ntext <!-- .slide: -->";
        assert_eq!(strip_directives(text), "# Title\n\ntext");
    }

    #[test]
    fn test_strip_keeps_regular_comments() {
        assert_eq!(strip_directives("<!-- note -->\nbody"), "<!-- note -->\nbody");
    }

    #[test]
    fn test_strip_borrows_when_unchanged() {
        assert!(matches!(strip_directives("  plain  "), Cow::Borrowed("plain")));
    }
}
