//! Slide compiler.
//!
//! Splits a markdown document into slide units on `---` lines and runs each
//! unit through directive extraction, markdown rendering and sanitization.

use rayon::prelude::*;
use slides_renderer::{HtmlSanitizer, escape_html};

use crate::directive::{extract_attributes, strip_directives};
use crate::error::CompileError;
use crate::pipeline::{HtmlSanitize, MarkdownRender, PulldownMarkdown};
use crate::slide::{Slide, SlideId};

/// Line content that separates two slide units.
pub const SLIDE_DELIMITER: &str = "---";

/// Split a document into slide units.
///
/// A line separates units when its content, ignoring surrounding whitespace,
/// is exactly [`SLIDE_DELIMITER`]. Delimiter lines are not part of any unit.
/// Empty units are kept so that positions stay stable.
///
/// ```
/// use slides_core::split_units;
///
/// assert_eq!(split_units("a\n---\nb"), vec!["a\n", "b"]);
/// assert_eq!(split_units("a --- b"), vec!["a --- b"]);
/// ```
#[must_use]
pub fn split_units(markdown: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in markdown.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim() == SLIDE_DELIMITER {
            units.push(&markdown[start..offset]);
            start = end;
        }
        offset = end;
    }
    units.push(&markdown[start..]);

    units
}

/// Compile a document with the default renderer and sanitizer.
#[must_use]
pub fn compile(markdown: &str) -> Vec<Slide> {
    SlideCompiler::new().compile(markdown)
}

/// Markdown-to-slides compiler.
///
/// Holds no state between calls: every [`compile`](Self::compile) is a full,
/// independent recompilation.
pub struct SlideCompiler {
    renderer: Box<dyn MarkdownRender>,
    sanitizer: Box<dyn HtmlSanitize>,
}

impl SlideCompiler {
    /// Compiler using [`PulldownMarkdown`] and [`HtmlSanitizer`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: Box::new(PulldownMarkdown::new()),
            sanitizer: Box::new(HtmlSanitizer::new()),
        }
    }

    /// Replace the markdown renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl MarkdownRender + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Replace the HTML sanitizer.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: impl HtmlSanitize + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Compile a document into slides, in source order.
    ///
    /// Always returns at least one slide: a blank document yields the
    /// [fallback slide](Slide::fallback). Units are compiled in parallel.
    #[must_use]
    pub fn compile(&self, markdown: &str) -> Vec<Slide> {
        if markdown.trim().is_empty() {
            return vec![Slide::fallback()];
        }

        let units = split_units(markdown);
        let slides: Vec<Slide> = units
            .par_iter()
            .enumerate()
            .filter_map(|(index, unit)| self.compile_unit(index, unit))
            .collect();

        tracing::debug!(units = units.len(), slides = slides.len(), "Compiled slides");

        if slides.is_empty() {
            // Only delimiters and whitespace
            return vec![Slide::fallback()];
        }
        slides
    }

    fn compile_unit(&self, index: usize, unit: &str) -> Option<Slide> {
        if unit.trim().is_empty() {
            return None;
        }

        let id = SlideId::from_index(index);
        let attributes = extract_attributes(unit);
        let body = strip_directives(unit);

        let slide = match self.render_body(&body) {
            Ok((html, title)) => Slide {
                id,
                content: format!(r#"<div class="slide-content">{html}</div>"#),
                attributes,
                title,
            },
            Err(e) => {
                tracing::warn!(slide = %id, error = %e, "Failed to compile slide");
                Slide {
                    id,
                    content: format!(
                        r#"<div class="slide-content slide-error"><p>{}</p></div>"#,
                        escape_html(&e.to_string())
                    ),
                    attributes,
                    title: None,
                }
            }
        };
        Some(slide)
    }

    fn render_body(&self, body: &str) -> Result<(String, Option<String>), CompileError> {
        let rendered = self.renderer.render(body)?;
        let html = self.sanitizer.sanitize(&rendered.html)?;
        Ok((html, rendered.title))
    }
}

impl Default for SlideCompiler {
    fn default() -> Self {
        Self::new()
    }
}
