//! Deck assembly shared by the `build`, `watch` and `export` commands.

use std::fmt::Write;

use slides_config::{Config, Theme as ConfigTheme};
use slides_core::{PresentationSettings, PulldownMarkdown, Slide, SlideCompiler, Theme, resolve};
use slides_pdf::PageLayout;
use slides_renderer::escape_html;

const DECK_CSS: &str = "\
body{margin:0;font-family:system-ui,sans-serif}\
body.theme-light{background:#f3f4f6;color:#111827}\
body.theme-dark{background:#111827;color:#f9fafb}\
.slide{position:relative;box-sizing:border-box;aspect-ratio:16/9;margin:2rem auto;max-width:960px;\
padding:3rem;display:flex;align-items:center;justify-content:center;text-align:center;\
background:#fff;color:#111827;box-shadow:0 1px 3px rgba(0,0,0,.2)}\
.theme-dark .slide{background:#1f2937;color:#f9fafb}\
.code-wrapper{display:flex;justify-content:center}\
.code-wrapper pre{text-align:left}\
.slide-error{color:#b91c1c}\
.slide-number{position:absolute;right:1rem;bottom:.5rem;font-size:.8rem;opacity:.6}";

/// Slide compiler configured from the `[render]` section.
pub(crate) fn compiler(config: &Config) -> SlideCompiler {
    SlideCompiler::new().with_renderer(
        PulldownMarkdown::new()
            .with_gfm(config.render.gfm)
            .with_code_wrapper(config.render.wrap_code_blocks),
    )
}

pub(crate) fn presentation_settings(config: &Config) -> PresentationSettings {
    PresentationSettings {
        theme: match config.presentation.theme {
            ConfigTheme::Light => Theme::Light,
            ConfigTheme::Dark => Theme::Dark,
        },
        auto_advance: config.presentation.auto_advance,
        show_slide_numbers: config.presentation.show_slide_numbers,
    }
}

pub(crate) fn page_layout(config: &Config) -> PageLayout {
    PageLayout {
        width: config.export.page_width,
        height: config.export.page_height,
        margin: config.export.margin,
    }
}

/// Deck title: the first slide title found, in slide order.
pub(crate) fn deck_title(slides: &[Slide]) -> Option<&str> {
    slides.iter().find_map(|slide| slide.title.as_deref())
}

/// Render compiled slides as a standalone HTML page.
///
/// Each slide becomes a `<section class="slide">` carrying its id and
/// resolved background style. Slide content is already sanitized and is
/// inserted as is.
pub(crate) fn render_html(slides: &[Slide], settings: &PresentationSettings) -> String {
    let title = deck_title(slides).unwrap_or("Presentation");
    let theme = match settings.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };

    let mut html = String::with_capacity(slides.iter().map(|s| s.content.len() + 128).sum());
    write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{DECK_CSS}</style></head>\
         <body class=\"theme-{theme}\" data-auto-advance=\"{}\"><main class=\"deck\">",
        escape_html(title),
        settings.auto_advance,
    )
    .unwrap();

    let total = slides.len();
    for (index, slide) in slides.iter().enumerate() {
        write!(html, "<section class=\"slide\" data-slide-id=\"{}\"", slide.id).unwrap();
        let css = resolve(slide.attributes.as_ref()).to_css();
        if !css.is_empty() {
            write!(html, " style=\"{}\"", escape_html(&css)).unwrap();
        }
        html.push('>');
        html.push_str(&slide.content);
        if settings.show_slide_numbers {
            write!(html, "<footer class=\"slide-number\">{} / {total}</footer>", index + 1).unwrap();
        }
        html.push_str("</section>");
    }

    html.push_str("</main></body></html>\n");
    html
}
