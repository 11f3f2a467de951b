//! Per-element state tracked while walking markdown events.

use pulldown_cmark::Alignment;

/// Escape text for inclusion in HTML content or double-quoted attributes.
///
/// # Example
///
/// ```
/// use slides_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Code block capture.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.buffer.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Finish the block, returning its language and raw content.
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.buffer))
    }
}

/// Table position tracking for header cells and column alignment.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn current_alignment(&self) -> Option<&Alignment> {
        self.alignments.get(self.cell)
    }
}

/// Alt text capture for images.
///
/// Nested images are flattened: only the outermost image is emitted.
#[derive(Debug, Default)]
pub(crate) struct ImageState {
    depth: usize,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt.clear();
        }
        self.depth += 1;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    /// Close one image level. Returns the alt text when the outermost image closes.
    pub(crate) fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        (self.depth == 0).then(|| std::mem::take(&mut self.alt))
    }
}

/// First-heading capture used as the slide title.
#[derive(Debug, Default)]
pub(crate) struct TitleState {
    capturing: bool,
    text: String,
    title: Option<String>,
}

impl TitleState {
    /// Begin a heading. Only the first heading of the document is captured.
    pub(crate) fn start_heading(&mut self) {
        if self.title.is_none() {
            self.capturing = true;
            self.text.clear();
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        if self.capturing {
            self.text.push_str(text);
        }
    }

    pub(crate) fn end_heading(&mut self) {
        if self.capturing {
            self.capturing = false;
            let text = self.text.trim();
            if !text.is_empty() {
                self.title = Some(text.to_owned());
            }
        }
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }
}
