//! Render backend trait.

/// Format-specific rendering hooks used by [`MarkdownRenderer`](crate::MarkdownRenderer).
///
/// Backends write directly into the output buffer. Every hook must accept
/// arbitrary input: rendering never fails.
pub trait RenderBackend {
    /// Render a fenced or indented code block.
    ///
    /// `wrap` is set when the renderer was configured to wrap code blocks
    /// in a centering container.
    fn code_block(lang: Option<&str>, content: &str, wrap: bool, out: &mut String);

    /// Render an image with its collected alt text.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a thematic break.
    ///
    /// Slide delimiters are consumed before rendering, so only rules that
    /// survive splitting (e.g. `***`) reach this hook.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a hard line break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a task list checkbox.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
