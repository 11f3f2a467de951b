//! Compilation error types.

/// Failure reported by a rendering or sanitization collaborator.
///
/// The compiler never surfaces these to callers: a failing slide unit is
/// replaced by an error-marker slide and compilation continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Markdown-to-HTML rendering failed.
    #[error("Markdown rendering failed: {0}")]
    Render(String),
    /// HTML sanitization failed.
    #[error("HTML sanitization failed: {0}")]
    Sanitize(String),
}
