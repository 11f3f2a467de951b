//! Rendering and sanitization seams used by the compiler.

use slides_renderer::{HtmlBackend, HtmlSanitizer, MarkdownRenderer};

use crate::error::CompileError;

/// Output of a [`MarkdownRender`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    /// Unsanitized HTML.
    pub html: String,
    /// Plain text of the first heading, if any.
    pub title: Option<String>,
}

/// Markdown-to-HTML conversion capability.
///
/// Implementations are shared across the rayon pool, hence `Send + Sync`.
pub trait MarkdownRender: Send + Sync {
    /// Render one slide unit.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Render`] if the underlying renderer fails.
    fn render(&self, markdown: &str) -> Result<RenderedMarkdown, CompileError>;
}

/// HTML sanitization capability.
pub trait HtmlSanitize: Send + Sync {
    /// Remove executable content from an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Sanitize`] if the underlying sanitizer fails.
    fn sanitize(&self, html: &str) -> Result<String, CompileError>;
}

/// Default renderer backed by `pulldown-cmark`.
///
/// A fresh [`MarkdownRenderer`] is created per call, so one instance can be
/// used from many threads at once.
#[derive(Clone, Copy, Debug)]
pub struct PulldownMarkdown {
    gfm: bool,
    wrap_code_blocks: bool,
}

impl PulldownMarkdown {
    /// GFM extensions and code-block wrappers enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            wrap_code_blocks: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable the `<div class="code-wrapper">` around code blocks.
    #[must_use]
    pub fn with_code_wrapper(mut self, enabled: bool) -> Self {
        self.wrap_code_blocks = enabled;
        self
    }
}

impl Default for PulldownMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRender for PulldownMarkdown {
    fn render(&self, markdown: &str) -> Result<RenderedMarkdown, CompileError> {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(self.gfm)
            .with_code_wrapper(self.wrap_code_blocks)
            .render_markdown(markdown);
        Ok(RenderedMarkdown {
            html: result.html,
            title: result.title,
        })
    }
}

impl HtmlSanitize for HtmlSanitizer {
    fn sanitize(&self, html: &str) -> Result<String, CompileError> {
        Ok(HtmlSanitizer::sanitize(self, html))
    }
}
