//! Trait-based markdown renderer for slide bodies.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! through the [`RenderBackend`] trait, and an [`HtmlSanitizer`] that makes
//! the rendered markup safe for direct DOM injection.
//!
//! # Architecture
//!
//! - [`HtmlBackend`]: Produces semantic HTML5 for slide preview and presentation
//! - [`HtmlSanitizer`]: Whitelist-based cleanup built on `ammonia`
//!
//! Shared functionality (tables, lists, inline formatting) is handled by the
//! generic renderer, while format-specific elements (code blocks, images,
//! rules) are delegated to the backend.
//!
//! # Example
//!
//! ```
//! use slides_renderer::{HtmlBackend, HtmlSanitizer, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown("# Hello\n\n**Bold** text");
//! let safe = HtmlSanitizer::new().sanitize(&result.html);
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(safe.contains("<strong>Bold</strong>"));
//! ```

mod backend;
mod html;
mod renderer;
mod sanitize;
mod state;
mod util;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use sanitize::HtmlSanitizer;
pub use state::escape_html;
