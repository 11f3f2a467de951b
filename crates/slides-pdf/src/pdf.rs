//! PDF document assembly with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use slides_core::{Slide, Theme};

use crate::SlideExporter;
use crate::color::Rgb;
use crate::error::ExportError;
use crate::flatten::flatten_html;
use crate::layout::{DrawOp, Font, PageLayout, layout_slide};

/// Exports slides as a PDF with one page per non-empty slide.
#[derive(Clone, Debug, Default)]
pub struct PdfExporter {
    page: PageLayout,
    title: Option<String>,
    theme: Theme,
}

impl PdfExporter {
    /// Exporter with A4 landscape pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    #[must_use]
    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.page = page;
        self
    }

    /// Set the page theme. Dark pages are painted black and ignore slide
    /// background colors.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the document title written to the PDF info dictionary.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn add_fonts(doc: &mut Document) -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), id);
        }
        fonts
    }

    fn add_page(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        slide: &Slide,
    ) -> Result<Option<ObjectId>, ExportError> {
        let blocks = flatten_html(&slide.content)?;
        if blocks.is_empty() {
            tracing::debug!(slide = %slide.id, "Skipping empty slide");
            return Ok(None);
        }

        let background = slide
            .attributes
            .as_ref()
            .filter(|_| self.theme == Theme::Light)
            .and_then(|attrs| attrs.background_color.as_deref())
            .and_then(|value| {
                let color = Rgb::parse(value);
                if color.is_none() {
                    tracing::debug!(slide = %slide.id, value, "Ignoring unsupported background color");
                }
                color
            });

        let ops = layout_slide(&blocks, background, &self.page, self.theme);
        let content = Content {
            operations: ops.iter().flat_map(encode_op).collect::<Vec<_>>(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        Ok(Some(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        })))
    }
}

impl SlideExporter for PdfExporter {
    fn export(&self, slides: &[Slide]) -> Result<Vec<u8>, ExportError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let fonts = Self::add_fonts(&mut doc);
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids: Vec<Object> = Vec::new();
        for slide in slides {
            if let Some(page_id) = self.add_page(&mut doc, pages_id, slide)? {
                kids.push(page_id.into());
            }
        }
        if kids.is_empty() {
            return Err(ExportError::Empty);
        }

        let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.0_f32.into(), 0.0_f32.into(), self.page.width.into(), self.page.height.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(encode_win_ansi(title)),
                "Producer" => Object::string_literal("slides"),
            });
            doc.trailer.set("Info", info_id);
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf)?;
        tracing::debug!(slides = slides.len(), bytes = buf.len(), "Exported PDF");
        Ok(buf)
    }
}

fn encode_op(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::Fill {
            x,
            y,
            width,
            height,
            color,
        } => vec![
            Operation::new("q", vec![]),
            fill_color(*color),
            Operation::new("re", vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Text {
            font,
            size,
            x,
            y,
            color,
            text,
        } => vec![
            Operation::new("BT", vec![]),
            fill_color(*color),
            Operation::new("Tf", vec![font.resource_name().into(), (*size).into()]),
            Operation::new("Td", vec![(*x).into(), (*y).into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ],
    }
}

fn fill_color(color: Rgb) -> Operation {
    Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()])
}

/// Encode text for the standard fonts' `WinAnsiEncoding`.
///
/// Latin-1 maps directly; common typographic characters use their CP1252
/// slots; anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            c => match u8::try_from(u32::from(c)) {
                Ok(b) if b >= 0x20 && !(0x7f..0xa0).contains(&b) => b,
                _ => b'?',
            },
        })
        .collect()
}

/// Download filename for an exported deck: `<title>.pdf`, or `presentation.pdf`.
///
/// Path separators in the title are replaced.
#[must_use]
pub fn pdf_filename(title: Option<&str>) -> String {
    let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("presentation");
    let safe: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{safe}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slides_core::compile;

    fn pages(bytes: &[u8]) -> Vec<Content> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| Content::decode(&doc.get_page_content(*id).unwrap()).unwrap())
            .collect()
    }

    fn strings(content: &Content) -> Vec<Vec<u8>> {
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect()
    }

    fn has_fill(content: &Content) -> bool {
        content.operations.iter().any(|op| op.operator == "re")
    }

    #[test]
    fn test_export_one_page_per_slide() {
        let slides = compile("# One\n\ntext\n---\n# Two\n---\n<!-- .slide: data-background-color=\"#fff\" -->");
        assert_eq!(slides.len(), 3);

        let bytes = PdfExporter::new().export(&slides).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let pages = pages(&bytes);
        assert_eq!(pages.len(), 2);
        assert_eq!(strings(&pages[0]), vec![b"One".to_vec(), b"text".to_vec()]);
        assert_eq!(strings(&pages[1]), vec![b"Two".to_vec()]);
    }

    #[test]
    fn test_background_color_filled() {
        let slides = compile("<!-- .slide: data-background-color=\"#ff0000\" -->\n# Red");
        let pages = pages(&PdfExporter::new().export(&slides).unwrap());
        assert!(has_fill(&pages[0]));

        let first_rg = pages[0]
            .operations
            .iter()
            .find(|op| op.operator == "rg")
            .unwrap();
        let components: Vec<f32> = first_rg
            .operands
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(components, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unparseable_background_ignored() {
        let slides = compile("<!-- .slide: data-background-color=\"tomato\" -->\n# T");
        let pages = pages(&PdfExporter::new().export(&slides).unwrap());
        assert!(!has_fill(&pages[0]));
    }

    #[test]
    fn test_dark_theme_page_ignores_slide_background() {
        let slides = compile("<!-- .slide: data-background-color=\"#ff0000\" -->\n# Dark");
        let bytes = PdfExporter::new().with_theme(Theme::Dark).export(&slides).unwrap();
        let pages = pages(&bytes);

        let fills: Vec<Vec<f32>> = pages[0]
            .operations
            .iter()
            .filter(|op| op.operator == "rg")
            .map(|op| op.operands.iter().map(|o| o.as_float().unwrap()).collect())
            .collect();
        // Black page, then white heading text; no red anywhere
        assert_eq!(fills, vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]]);
        assert_eq!(strings(&pages[0]), vec![b"Dark".to_vec()]);
    }

    #[test]
    fn test_code_block_exported_in_mono() {
        let slides = compile("```\nlet x = 1;\n```");
        let pages = pages(&PdfExporter::new().export(&slides).unwrap());
        assert!(has_fill(&pages[0]));
        assert_eq!(strings(&pages[0]), vec![b"let x = 1;".to_vec()]);
        assert!(pages[0].operations.iter().any(|op| {
            op.operator == "Tf" && op.operands[0].as_name().ok() == Some(b"F3".as_slice())
        }));
    }

    #[test]
    fn test_all_empty_is_error() {
        let slides = compile("<!-- .slide: data-transition=\"fade\" -->");
        let err = PdfExporter::new().export(&slides).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }

    #[test]
    fn test_custom_page_size() {
        let page = PageLayout {
            width: 600.0,
            height: 400.0,
            margin: 20.0,
        };
        let bytes = PdfExporter::new()
            .with_page(page)
            .export(&compile("# A"))
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let pages_id = doc.catalog().unwrap().get(b"Pages").unwrap().as_reference().unwrap();
        let media_box = doc
            .get_dictionary(pages_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(media_box, vec![0.0, 0.0, 600.0, 400.0]);
    }

    #[test]
    fn test_title_in_info() {
        let bytes = PdfExporter::new()
            .with_title("Quarterly Review")
            .export(&compile("# A"))
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let title = doc.get_dictionary(info_id).unwrap().get(b"Title").unwrap();
        assert_eq!(title.as_str().unwrap(), b"Quarterly Review");
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} caf\u{e9}"), vec![0x95, b' ', b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("\u{4e2d}\t"), b"??".to_vec());
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename(Some("My Talk")), "My Talk.pdf");
        assert_eq!(pdf_filename(Some("  ")), "presentation.pdf");
        assert_eq!(pdf_filename(None), "presentation.pdf");
        assert_eq!(pdf_filename(Some("a/b\\c")), "a-b-c.pdf");
    }
}
