//! Page layout: turns printable blocks into positioned drawing operations.
//!
//! Text metrics are estimated from an average glyph width per font, which is
//! close enough for centering and wrapping with the standard PDF fonts.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Glyph counts and point sizes are small

use slides_core::Theme;

use crate::color::Rgb;
use crate::flatten::{Block, BlockKind};

/// Smallest font size used when a slide is scaled to fit.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Line height as a multiple of font size.
const LINE_HEIGHT: f32 = 1.3;
/// Space after a block as a multiple of its font size.
const BLOCK_GAP: f32 = 0.6;
/// Inner padding of code block backgrounds, in points.
const CODE_PADDING: f32 = 8.0;

/// Page geometry in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageLayout {
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

impl Default for PageLayout {
    /// A4 landscape with 40pt margins.
    fn default() -> Self {
        Self {
            width: 842.0,
            height: 595.0,
            margin: 40.0,
        }
    }
}

/// Standard PDF fonts used by the exporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Mono,
}

impl Font {
    pub const ALL: [Self; 3] = [Self::Regular, Self::Bold, Self::Mono];

    /// Name in the page resource dictionary.
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Mono => "F3",
        }
    }

    /// Base-14 font name.
    #[must_use]
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Mono => "Courier",
        }
    }

    /// Average glyph advance as a fraction of the font size.
    fn glyph_width(self) -> f32 {
        match self {
            Self::Regular => 0.5,
            Self::Bold => 0.55,
            Self::Mono => 0.6,
        }
    }

    /// Estimated width of `text` at `size`.
    #[must_use]
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.glyph_width()
    }
}

/// Visual style of a block kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
    pub background: Option<Rgb>,
}

/// Page color painted behind dark-theme slides.
pub const DARK_PAGE: Rgb = Rgb::from_hex(0x0000_0000);

/// Style for a block kind at full size.
#[must_use]
pub fn block_style(kind: BlockKind, theme: Theme) -> BlockStyle {
    let (font, size, color, background) = match (theme, kind) {
        (Theme::Light, BlockKind::Heading(1)) => (Font::Bold, 28.0, 0x000f_172a, None),
        (Theme::Light, BlockKind::Heading(2)) => (Font::Bold, 22.0, 0x001e_293b, None),
        (Theme::Light, BlockKind::Heading(_)) => (Font::Bold, 18.0, 0x0033_4155, None),
        (Theme::Light, BlockKind::Paragraph) => (Font::Regular, 12.0, 0x0047_5569, None),
        (Theme::Light, BlockKind::ListItem) => (Font::Regular, 12.0, 0x0037_4151, None),
        (Theme::Light, BlockKind::Code) => {
            (Font::Mono, 11.0, 0x00e2_e8f0, Some(Rgb::from_hex(0x001e_293b)))
        }
        (Theme::Dark, BlockKind::Heading(1)) => (Font::Bold, 28.0, 0x00ff_ffff, None),
        (Theme::Dark, BlockKind::Heading(2)) => (Font::Bold, 22.0, 0x00ff_ffff, None),
        (Theme::Dark, BlockKind::Heading(_)) => (Font::Bold, 18.0, 0x00ff_ffff, None),
        (Theme::Dark, BlockKind::Paragraph | BlockKind::ListItem) => {
            (Font::Regular, 12.0, 0x00e2_e8f0, None)
        }
        (Theme::Dark, BlockKind::Code) => {
            (Font::Mono, 11.0, 0x00e2_e8f0, Some(Rgb::from_hex(0x001a_1a1a)))
        }
    };
    BlockStyle {
        font,
        size,
        color: Rgb::from_hex(color),
        background,
    }
}

/// A positioned drawing operation in PDF user space (origin bottom-left).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle; `y` is the bottom edge.
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// One line of text; `y` is the baseline.
    Text {
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        color: Rgb,
        text: String,
    },
}

/// Wrap text into lines no wider than `max_width`.
///
/// Prose wraps at word boundaries; code (`Font::Mono`) keeps its own line
/// breaks and hard-wraps long lines.
#[must_use]
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let max_chars = ((max_width / (size * font.glyph_width())).floor() as usize).max(1);

    if font == Font::Mono {
        return text
            .lines()
            .flat_map(|line| {
                let chars: Vec<char> = line.chars().collect();
                if chars.is_empty() {
                    return vec![String::new()];
                }
                chars
                    .chunks(max_chars)
                    .map(|chunk| chunk.iter().collect())
                    .collect()
            })
            .collect();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

struct LaidBlock {
    style: BlockStyle,
    lines: Vec<String>,
}

impl LaidBlock {
    fn height(&self) -> f32 {
        let text = self.lines.len() as f32 * self.style.size * LINE_HEIGHT;
        if self.style.background.is_some() {
            text + 2.0 * CODE_PADDING
        } else {
            text
        }
    }
}

fn lay_out_blocks(blocks: &[Block], scale: f32, page: &PageLayout, theme: Theme) -> Vec<LaidBlock> {
    blocks
        .iter()
        .map(|block| {
            let mut style = block_style(block.kind, theme);
            style.size = (style.size * scale).max(MIN_FONT_SIZE);
            let width = if style.background.is_some() {
                page.content_width() - 2.0 * CODE_PADDING
            } else {
                page.content_width()
            };
            LaidBlock {
                style,
                lines: wrap_text(&block.text, style.font, style.size, width),
            }
        })
        .collect()
}

fn total_height(laid: &[LaidBlock]) -> f32 {
    let gaps: f32 = laid
        .iter()
        .rev()
        .skip(1)
        .map(|b| b.style.size * BLOCK_GAP)
        .sum();
    laid.iter().map(LaidBlock::height).sum::<f32>() + gaps
}

/// Scale factor applied to font sizes so that `blocks` fit the content area.
///
/// `1.0` when the content already fits.
#[must_use]
pub fn fit_scale(blocks: &[Block], page: &PageLayout) -> f32 {
    // Sizes are theme independent
    let natural = total_height(&lay_out_blocks(blocks, 1.0, page, Theme::Light));
    let available = page.content_height();
    if natural > available && natural > 0.0 {
        available / natural
    } else {
        1.0
    }
}

/// Lay out one slide.
///
/// With the light theme the background color fills the content area. The
/// dark theme paints the whole page [`DARK_PAGE`] and ignores the slide
/// background. Blocks are stacked and centered vertically; prose is centered
/// horizontally, code is left-aligned on a filled background.
#[must_use]
pub fn layout_slide(
    blocks: &[Block],
    background: Option<Rgb>,
    page: &PageLayout,
    theme: Theme,
) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    match (theme, background) {
        (Theme::Dark, _) => ops.push(DrawOp::Fill {
            x: 0.0,
            y: 0.0,
            width: page.width,
            height: page.height,
            color: DARK_PAGE,
        }),
        (Theme::Light, Some(color)) => ops.push(DrawOp::Fill {
            x: page.margin,
            y: page.margin,
            width: page.content_width(),
            height: page.content_height(),
            color,
        }),
        (Theme::Light, None) => {}
    }

    let laid = lay_out_blocks(blocks, fit_scale(blocks, page), page, theme);
    let slack = (page.content_height() - total_height(&laid)).max(0.0);
    let mut cursor = page.height - page.margin - slack / 2.0;

    for block in &laid {
        let style = block.style;
        let line_height = style.size * LINE_HEIGHT;

        if let Some(color) = style.background {
            let height = block.height();
            ops.push(DrawOp::Fill {
                x: page.margin,
                y: cursor - height,
                width: page.content_width(),
                height,
                color,
            });
            cursor -= CODE_PADDING;
        }

        for line in &block.lines {
            let x = if style.background.is_some() {
                page.margin + CODE_PADDING
            } else {
                let width = style.font.text_width(line, style.size);
                page.margin + ((page.content_width() - width) / 2.0).max(0.0)
            };
            ops.push(DrawOp::Text {
                font: style.font,
                size: style.size,
                x,
                y: cursor - style.size,
                color: style.color,
                text: line.clone(),
            });
            cursor -= line_height;
        }

        if style.background.is_some() {
            cursor -= CODE_PADDING;
        }
        cursor -= style.size * BLOCK_GAP;
    }

    ops
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(kind: BlockKind, text: &str) -> Block {
        Block {
            kind,
            text: text.to_owned(),
        }
    }

    fn texts(ops: &[DrawOp]) -> Vec<(&str, f32)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, size, .. } => Some((text.as_str(), *size)),
                DrawOp::Fill { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_default_page() {
        let page = PageLayout::default();
        assert_eq!(page.content_width(), 762.0);
        assert_eq!(page.content_height(), 515.0);
    }

    #[test]
    fn test_block_styles() {
        let h1 = block_style(BlockKind::Heading(1), Theme::Light);
        assert_eq!((h1.font, h1.size), (Font::Bold, 28.0));
        assert_eq!(h1.color, Rgb::from_hex(0x000f_172a));
        assert_eq!(block_style(BlockKind::Heading(5), Theme::Light).size, 18.0);
        assert_eq!(block_style(BlockKind::ListItem, Theme::Light).color, Rgb::from_hex(0x0037_4151));
        let code = block_style(BlockKind::Code, Theme::Light);
        assert_eq!((code.font, code.size), (Font::Mono, 11.0));
        assert_eq!(code.background, Some(Rgb::from_hex(0x001e_293b)));
    }

    #[test]
    fn test_wrap_words() {
        // 12pt regular: 6pt per glyph, 60pt fits 10 glyphs
        let lines = wrap_text("alpha beta gamma delta", Font::Regular, 12.0, 60.0);
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn test_wrap_long_word_kept_whole() {
        let lines = wrap_text("supercalifragilistic ok", Font::Regular, 12.0, 60.0);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn test_wrap_code_hard_breaks() {
        // 10pt mono: 6pt per glyph, 25pt fits 4 glyphs
        let lines = wrap_text("abcdefgh\n\nxy", Font::Mono, 10.0, 25.0);
        assert_eq!(lines, vec!["abcd", "efgh", "", "xy"]);
    }

    #[test]
    fn test_layout_centers_prose() {
        let page = PageLayout::default();
        let ops = layout_slide(&[block(BlockKind::Paragraph, "abcd")], None, &page, Theme::Light);
        assert_eq!(ops.len(), 1);
        let DrawOp::Text { x, .. } = &ops[0] else {
            panic!("expected text");
        };
        // 4 glyphs * 6pt = 24pt wide
        assert_eq!(*x, 40.0 + (762.0 - 24.0) / 2.0);
    }

    #[test]
    fn test_layout_background_fill_first() {
        let page = PageLayout::default();
        let color = Rgb::from_hex(0x00ff_0000);
        let ops = layout_slide(&[block(BlockKind::Heading(1), "T")], Some(color), &page, Theme::Light);
        assert_eq!(
            ops[0],
            DrawOp::Fill {
                x: 40.0,
                y: 40.0,
                width: 762.0,
                height: 515.0,
                color,
            }
        );
    }

    #[test]
    fn test_dark_theme_paints_page_and_ignores_background() {
        let page = PageLayout::default();
        let ops = layout_slide(
            &[block(BlockKind::Heading(1), "T")],
            Some(Rgb::from_hex(0x00ff_0000)),
            &page,
            Theme::Dark,
        );

        let fills: Vec<&DrawOp> = ops.iter().filter(|op| matches!(op, DrawOp::Fill { .. })).collect();
        assert_eq!(
            fills,
            vec![&DrawOp::Fill {
                x: 0.0,
                y: 0.0,
                width: 842.0,
                height: 595.0,
                color: DARK_PAGE,
            }]
        );
        assert!(matches!(&ops[1], DrawOp::Text { color, .. } if *color == Rgb::from_hex(0x00ff_ffff)));
    }

    #[test]
    fn test_dark_theme_keeps_sizes() {
        for kind in [BlockKind::Heading(1), BlockKind::Heading(3), BlockKind::Paragraph, BlockKind::Code] {
            let light = block_style(kind, Theme::Light);
            let dark = block_style(kind, Theme::Dark);
            assert_eq!((light.font, light.size), (dark.font, dark.size));
        }
        assert_eq!(block_style(BlockKind::Paragraph, Theme::Dark).color, Rgb::from_hex(0x00e2_e8f0));
    }

    #[test]
    fn test_layout_code_block_background_and_alignment() {
        let page = PageLayout::default();
        let ops = layout_slide(&[block(BlockKind::Code, "let x = 1;\nlet y = 2;")], None, &page, Theme::Light);
        assert!(matches!(ops[0], DrawOp::Fill { x, .. } if x == 40.0));
        assert_eq!(texts(&ops), vec![("let x = 1;", 11.0), ("let y = 2;", 11.0)]);
        for op in &ops[1..] {
            assert!(matches!(op, DrawOp::Text { x, font: Font::Mono, .. } if *x == 48.0));
        }
    }

    #[test]
    fn test_layout_stacks_top_to_bottom() {
        let page = PageLayout::default();
        let ops = layout_slide(
            &[block(BlockKind::Heading(1), "A"), block(BlockKind::Paragraph, "B")],
            None,
            &page,
            Theme::Light,
        );
        let ys: Vec<f32> = ops
            .iter()
            .map(|op| match op {
                DrawOp::Text { y, .. } | DrawOp::Fill { y, .. } => *y,
            })
            .collect();
        assert!(ys[0] > ys[1]);
    }

    #[test]
    fn test_fit_scale_small_slide() {
        let page = PageLayout::default();
        assert_eq!(fit_scale(&[block(BlockKind::Paragraph, "x")], &page), 1.0);
        assert_eq!(fit_scale(&[], &page), 1.0);
    }

    #[test]
    fn test_overflowing_slide_scales_down() {
        let page = PageLayout::default();
        let blocks: Vec<Block> = (0..40)
            .map(|i| block(BlockKind::Paragraph, &format!("line {i}")))
            .collect();
        let scale = fit_scale(&blocks, &page);
        assert!(scale < 1.0);

        let ops = layout_slide(&blocks, None, &page, Theme::Light);
        for (_, size) in texts(&ops) {
            assert!(size < 12.0);
            assert!(size >= MIN_FONT_SIZE);
        }
    }

    #[test]
    fn test_scaling_never_below_minimum() {
        let page = PageLayout::default();
        let blocks: Vec<Block> = (0..400)
            .map(|i| block(BlockKind::Heading(1), &format!("h {i}")))
            .collect();
        let ops = layout_slide(&blocks, None, &page, Theme::Light);
        assert!(texts(&ops).iter().all(|(_, size)| *size == MIN_FONT_SIZE));
    }
}
