//! Error types for PDF export.

/// Error during slide export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Slide HTML could not be parsed.
    #[error("HTML parse error: {0}")]
    Html(#[from] quick_xml::Error),

    /// Slide HTML contained invalid text encoding.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// PDF object or content stream could not be written.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the PDF bytes failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No slide had printable content.
    #[error("nothing to export: all slides are empty")]
    Empty,
}
