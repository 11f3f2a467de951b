//! Flatten sanitized slide HTML into printable text blocks.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ExportError;

/// Kind of a printable block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading with level 1-6.
    Heading(u8),
    Paragraph,
    ListItem,
    /// Preformatted code; text keeps its line breaks.
    Code,
}

/// A run of text printed with a single style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

/// List nesting entry: `None` for bullets, `Some(n)` for the next ordinal.
type ListFrame = Option<u32>;

#[derive(Default)]
struct Flattener {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<ListFrame>,
}

impl Flattener {
    fn flush(&mut self) {
        let Some(mut block) = self.current.take() else {
            return;
        };
        if block.kind == BlockKind::Code {
            let trimmed = block.text.trim_end_matches('\n').len();
            block.text.truncate(trimmed);
        } else {
            block.text = block.text.split_whitespace().collect::<Vec<_>>().join(" ");
        }
        if !block.text.trim().is_empty() {
            self.blocks.push(block);
        }
    }

    fn begin(&mut self, kind: BlockKind, prefix: String) {
        self.flush();
        self.current = Some(Block { kind, text: prefix });
    }

    fn push_text(&mut self, text: &str) {
        match &mut self.current {
            Some(block) => block.text.push_str(text),
            None if text.trim().is_empty() => {}
            None => {
                self.current = Some(Block {
                    kind: BlockKind::Paragraph,
                    text: text.to_owned(),
                });
            }
        }
    }

    fn in_code(&self) -> bool {
        matches!(&self.current, Some(b) if b.kind == BlockKind::Code)
    }

    fn start_tag(&mut self, name: &[u8], e: &BytesStart) {
        match name {
            b"h1" | b"h2" | b"h3" | b"h4" | b"h5" | b"h6" => {
                self.begin(BlockKind::Heading(name[1] - b'0'), String::new());
            }
            b"p" => {
                // Paragraphs inside list items continue the item
                if matches!(&self.current, Some(b) if b.kind == BlockKind::ListItem) {
                    self.push_text(" ");
                } else {
                    self.begin(BlockKind::Paragraph, String::new());
                }
            }
            b"ul" => {
                self.flush();
                self.lists.push(None);
            }
            b"ol" => {
                self.flush();
                self.lists.push(Some(ordered_start(e)));
            }
            b"li" => {
                let prefix = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let prefix = format!("{n}. ");
                        *n += 1;
                        prefix
                    }
                    _ => "\u{2022} ".to_owned(),
                };
                self.begin(BlockKind::ListItem, prefix);
            }
            b"pre" => self.begin(BlockKind::Code, String::new()),
            b"tr" => self.begin(BlockKind::Paragraph, String::new()),
            b"td" | b"th" => self.push_text(" "),
            b"br" => {
                let sep = if self.in_code() { "\n" } else { " " };
                self.push_text(sep);
            }
            b"input" => {
                let checked = e
                    .html_attributes()
                    .flatten()
                    .any(|attr| attr.key.as_ref() == b"checked");
                self.push_text(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &[u8]) {
        match name {
            b"h1" | b"h2" | b"h3" | b"h4" | b"h5" | b"h6" | b"li" | b"pre" | b"tr" => self.flush(),
            b"p" => {
                if matches!(&self.current, Some(b) if b.kind == BlockKind::Paragraph) {
                    self.flush();
                }
            }
            b"ul" | b"ol" => {
                self.flush();
                self.lists.pop();
            }
            _ => {}
        }
    }
}

/// First ordinal of an `<ol>`, from its `start` attribute.
fn ordered_start(e: &BytesStart) -> u32 {
    e.html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"start")
        .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.trim().parse().ok())
        .unwrap_or(1)
}

/// Flatten an HTML fragment into printable blocks, in document order.
///
/// Inline markup is dropped and its text kept. Whitespace is collapsed in
/// everything but code blocks. Empty blocks are omitted.
pub fn flatten_html(html: &str) -> Result<Vec<Block>, ExportError> {
    let wrapped = format!("<root>{html}</root>");
    let mut reader = Reader::from_str(&wrapped);
    // HTML void elements (`<br>`, `<input>`) never close
    reader.config_mut().check_end_names = false;
    reader.config_mut().trim_text(false);

    let mut state = Flattener::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = e.name();
                state.start_tag(&name.as_ref().to_ascii_lowercase(), &e);
            }
            Event::End(e) => {
                state.end_tag(&e.name().as_ref().to_ascii_lowercase());
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                state.push_text(&text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                state.push_text(&decode_entity(&entity));
            }
            Event::CData(e) => {
                state.push_text(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    state.flush();
    Ok(state.blocks)
}

/// Decode an entity reference name (without `&` and `;`).
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        "nbsp" => "\u{00a0}".to_owned(),
        s if s.starts_with('#') => {
            let code = match s.strip_prefix("#x").or_else(|| s.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => s[1..].parse().ok(),
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), String::from)
        }
        _ => format!("&{entity};"),
    }
}
