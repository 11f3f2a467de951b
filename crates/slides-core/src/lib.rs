//! Markdown-to-slide compilation pipeline.
//!
//! This crate provides:
//! - [`SlideCompiler`]: splits a markdown document into slides and renders each one
//! - [`extract_attributes`] / [`strip_directives`]: `<!-- .slide: ... -->` directive handling
//! - [`resolve`]: maps slide attributes to a renderable [`SlideStyle`]
//! - [`Presentation`]: explicit application state (source, slides, current position)
//!
//! # Quick Start
//!
//! ```
//! use slides_core::{compile, resolve};
//!
//! let slides = compile("<!-- .slide: data-background-color=\"#ff0000\" -->\n# Title\n\n---\n\n# Next");
//! assert_eq!(slides.len(), 2);
//! assert_eq!(slides[0].id.to_string(), "1");
//!
//! let style = resolve(slides[0].attributes.as_ref());
//! assert_eq!(style.to_css(), "background-color: #ff0000");
//! ```

mod attributes;
mod compiler;
mod directive;
mod error;
mod pipeline;
mod presentation;
mod slide;
mod style;

pub use attributes::SlideAttributes;
pub use compiler::{SLIDE_DELIMITER, SlideCompiler, compile, split_units};
pub use directive::{extract_attributes, strip_directives};
pub use error::CompileError;
pub use pipeline::{HtmlSanitize, MarkdownRender, PulldownMarkdown, RenderedMarkdown};
pub use presentation::{NavCommand, Presentation, PresentationSettings, Theme};
pub use slide::{FALLBACK_CONTENT, Slide, SlideId};
pub use style::{BackgroundImage, SlideStyle, resolve};
