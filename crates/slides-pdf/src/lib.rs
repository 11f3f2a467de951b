//! PDF export for compiled slides.
//!
//! Slides are exported through the [`SlideExporter`] interface. The single
//! implementation, [`PdfExporter`], flattens each slide's sanitized HTML into
//! text blocks, lays them out on an A4 landscape page and writes a PDF with
//! the standard Helvetica and Courier fonts.
//!
//! # Example
//!
//! ```
//! use slides_core::compile;
//! use slides_pdf::{PdfExporter, SlideExporter, pdf_filename};
//!
//! let slides = compile("# Hello\n\n---\n\n- one\n- two");
//! let bytes = PdfExporter::new().with_title("Demo").export(&slides).unwrap();
//!
//! assert!(bytes.starts_with(b"%PDF"));
//! assert_eq!(pdf_filename(Some("Demo")), "Demo.pdf");
//! ```

mod color;
mod error;
mod flatten;
mod layout;
mod pdf;

pub use color::Rgb;
pub use error::ExportError;
pub use flatten::{Block, BlockKind, flatten_html};
pub use layout::{DARK_PAGE, DrawOp, Font, MIN_FONT_SIZE, PageLayout, layout_slide};
pub use pdf::{PdfExporter, pdf_filename};

use slides_core::Slide;

/// Turns a compiled deck into a downloadable document.
pub trait SlideExporter {
    /// Export slides in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a slide cannot be converted or the output cannot
    /// be written.
    fn export(&self, slides: &[Slide]) -> Result<Vec<u8>, ExportError>;
}
