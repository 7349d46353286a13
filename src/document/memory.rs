//! Serializable text-layer document.
//!
//! `MemoryDocument` keeps each page as its text geometry dictionary plus the solid
//! fills painted over it, and persists as JSON (zlib-compressed when saving with
//! [`SaveOptions::compress`]). Glyph boxes are uniform subdivisions of their span's
//! box, which is all the precision redaction and search need here.
//!
//! ## Fonts
//!
//! A page can write new text in a base-14 font (or one of its short aliases such as
//! `helv`) or in any font listed in the page's `fonts` resources. Subset fonts
//! (`ABCDEF+Calibri`) only carry the glyphs the original text used, so they can be
//! read from but never written with.

use crate::document::{DocumentModel, PageModel, RedactionText, SaveOptions};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layout::{Color, StyleSample, TextBlock, TextLine, TextSpan};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Fonts every page can write with.
pub const BASE_FONTS: &[&str] = &[
    "helv",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "tiro",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "cour",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "symb",
    "Symbol",
    "zadb",
    "ZapfDingbats",
];

/// Average glyph advance as a fraction of the font size.
const AVERAGE_ADVANCE: f32 = 0.5;

/// Baselines closer than this (in points) belong to the same visual line.
const BASELINE_TOLERANCE: f32 = 1.0;

/// A solid rectangle painted over page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledRect {
    /// Painted area
    pub rect: Rect,
    /// Fill color
    pub color: Color,
}

#[derive(Debug, Clone)]
struct PendingRedaction {
    region: Rect,
    fill: Color,
    replacement: Option<RedactionText>,
}

/// One page of a [`MemoryDocument`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryPage {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Font resources available for writing
    #[serde(default)]
    pub fonts: Vec<String>,
    /// Text geometry in reading order
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
    /// Fills painted over the page, in paint order
    #[serde(default)]
    pub fills: Vec<FilledRect>,
    #[serde(skip)]
    pending: Vec<PendingRedaction>,
}

impl MemoryPage {
    /// Create an empty page.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            fonts: Vec::new(),
            blocks: Vec::new(),
            fills: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Create an empty US Letter page (612 x 792 pt).
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Add a font to the page resources.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        let font_name = font_name.into();
        if !self.fonts.contains(&font_name) {
            self.fonts.push(font_name);
        }
        self
    }

    /// Place a run of text with its baseline starting at `origin`.
    ///
    /// The span's font is registered as a page resource.
    pub fn with_text(mut self, origin: Point, text: &str, style: &StyleSample) -> Self {
        self = self.with_font(style.font_name.clone());
        self.place_span(layout_span(origin, text, style));
        self
    }

    /// Every span on the page in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
    }

    /// Extracted text: one line per visual line, top to bottom.
    pub fn text(&self) -> String {
        let mut lines: Vec<&TextLine> = self
            .blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .filter(|l| !l.spans.is_empty())
            .collect();
        lines.sort_by(|a, b| {
            a.bbox
                .bottom()
                .total_cmp(&b.bbox.bottom())
                .then(a.bbox.left().total_cmp(&b.bbox.left()))
        });
        lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Fills painted so far.
    pub fn fills(&self) -> &[FilledRect] {
        &self.fills
    }

    fn can_write_with(&self, font_name: &str) -> bool {
        if font_name.contains('+') {
            return false;
        }
        BASE_FONTS.contains(&font_name) || self.fonts.iter().any(|f| f == font_name)
    }

    /// Merge a span into the visual line sharing its baseline, or start a new block.
    fn place_span(&mut self, span: TextSpan) {
        let baseline = span.bbox.bottom();
        let target = self
            .blocks
            .iter_mut()
            .flat_map(|b| b.lines.iter_mut())
            .find(|l| {
                !l.spans.is_empty() && (l.bbox.bottom() - baseline).abs() < BASELINE_TOLERANCE
            });

        match target {
            Some(line) => {
                let at = line
                    .spans
                    .iter()
                    .position(|s| s.bbox.left() > span.bbox.left())
                    .unwrap_or(line.spans.len());
                line.spans.insert(at, span);
            },
            None => {
                self.blocks
                    .push(TextBlock::new(vec![TextLine::new(vec![span])]));
            },
        }
        for block in &mut self.blocks {
            block.refresh_bbox();
        }
    }

    fn collect_garbage(&mut self) {
        for block in &mut self.blocks {
            block.lines.retain(|l| !l.spans.is_empty());
        }
        self.blocks.retain(|b| !b.lines.is_empty());

        let used: Vec<String> = self.spans().map(|s| s.font_name.clone()).collect();
        self.fonts.retain(|f| used.contains(f));
    }
}

impl PageModel for MemoryPage {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn search_text(&self, needle: &str) -> Vec<Rect> {
        if needle.is_empty() {
            return Vec::new();
        }
        let pattern = match Regex::new(&regex::escape(needle)) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Cannot build search pattern for {:?}: {}", needle, e);
                return Vec::new();
            },
        };

        let mut hits = Vec::new();
        for line in self.blocks.iter().flat_map(|b| b.lines.iter()) {
            // Character boxes in line order, indexed by byte offset into the line text
            let mut text = String::new();
            let mut boxes: Vec<(usize, Rect)> = Vec::new();
            for span in &line.spans {
                for (i, c) in span.text.chars().enumerate() {
                    boxes.push((text.len(), span.char_box(i)));
                    text.push(c);
                }
            }

            for m in pattern.find_iter(&text) {
                let covered = boxes
                    .iter()
                    .filter(|(offset, _)| *offset >= m.start() && *offset < m.end())
                    .map(|(_, r)| *r);
                if let Some(region) = covered.reduce(|acc, r| acc.union(&r)) {
                    hits.push(region);
                }
            }
        }

        hits.sort_by(|a, b| {
            a.top()
                .total_cmp(&b.top())
                .then(a.left().total_cmp(&b.left()))
        });
        hits
    }

    fn text_dict(&self) -> Vec<TextBlock> {
        self.blocks.clone()
    }

    fn add_redaction(&mut self, region: Rect, fill: Color, replacement: Option<RedactionText>) {
        self.pending.push(PendingRedaction {
            region,
            fill,
            replacement,
        });
    }

    fn apply_redactions(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let pending = std::mem::take(&mut self.pending);
        let regions: Vec<Rect> = pending.iter().map(|p| p.region).collect();

        for block in &mut self.blocks {
            for line in &mut block.lines {
                line.spans = std::mem::take(&mut line.spans)
                    .into_iter()
                    .flat_map(|s| remove_glyphs(s, &regions))
                    .collect();
            }
            block.refresh_bbox();
        }

        for redaction in &pending {
            self.fills.push(FilledRect {
                rect: redaction.region,
                color: redaction.fill,
            });
        }

        for redaction in &pending {
            let Some(replacement) = &redaction.replacement else {
                continue;
            };
            if replacement.text.is_empty() {
                continue;
            }
            let style = if self.can_write_with(&replacement.style.font_name) {
                replacement.style.clone()
            } else if self.can_write_with(&replacement.fallback_font) {
                replacement.style.with_font(replacement.fallback_font.as_str())
            } else {
                log::warn!(
                    "No writable font for redaction text {:?}; region stays blank",
                    replacement.text
                );
                continue;
            };
            self.place_span(layout_span(
                redaction.region.bottom_left(),
                &replacement.text,
                &style,
            ));
        }

        pending.len()
    }

    fn insert_text(&mut self, origin: Point, text: &str, style: &StyleSample) -> Result<()> {
        if !self.can_write_with(&style.font_name) {
            return Err(Error::TextInsert {
                font: style.font_name.clone(),
                reason: "font is not available for writing on this page".to_string(),
            });
        }
        if !text.is_empty() {
            self.place_span(layout_span(origin, text, style));
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, fill: Color) {
        self.fills.push(FilledRect { rect, color: fill });
    }
}

/// A document made of [`MemoryPage`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    /// Pages in document order
    pub pages: Vec<MemoryPage>,
}

impl MemoryDocument {
    /// Create a document from pages.
    pub fn from_pages(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    /// Decode a document from plain or zlib-compressed JSON.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let json = if is_zlib(bytes) {
            let mut decoded = Vec::new();
            ZlibDecoder::new(bytes).read_to_end(&mut decoded)?;
            decoded
        } else {
            bytes.to_vec()
        };
        Ok(serde_json::from_slice(&json)?)
    }

    /// Encode the document the way [`DocumentModel::save`] writes it.
    pub fn to_bytes(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        if !options.compress {
            return Ok(serde_json::to_vec_pretty(self)?);
        }
        let json = serde_json::to_vec(self)?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        Ok(encoder.finish()?)
    }
}

impl DocumentModel for MemoryDocument {
    type Page = MemoryPage;

    fn open(path: &Path) -> Result<Self> {
        let open_error = |reason: String| Error::DocumentOpen {
            path: path.display().to_string(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| open_error(e.to_string()))?;
        let doc = Self::from_bytes(&bytes).map_err(|e| open_error(e.to_string()))?;

        if doc.pages.is_empty() {
            return Err(open_error("document has no pages".to_string()));
        }
        if let Some(index) = doc
            .pages
            .iter()
            .position(|p| p.width <= 0.0 || p.height <= 0.0)
        {
            return Err(open_error(format!("page {} has an empty media box", index + 1)));
        }

        log::debug!("Opened {} ({} pages)", path.display(), doc.pages.len());
        Ok(doc)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Option<&MemoryPage> {
        self.pages.get(index)
    }

    fn page_mut(&mut self, index: usize) -> Option<&mut MemoryPage> {
        self.pages.get_mut(index)
    }

    fn save(&mut self, path: &Path, options: &SaveOptions) -> Result<()> {
        let save_error = |reason: String| Error::DocumentSave {
            path: path.display().to_string(),
            reason,
        };

        if options.garbage_collect {
            for page in &mut self.pages {
                page.collect_garbage();
            }
        }
        let bytes = self
            .to_bytes(options)
            .map_err(|e| save_error(e.to_string()))?;
        std::fs::write(path, &bytes).map_err(|e| save_error(e.to_string()))?;

        log::debug!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Lay out `text` as a single span whose baseline starts at `origin`.
fn layout_span(origin: Point, text: &str, style: &StyleSample) -> TextSpan {
    let width = text.chars().count() as f32 * style.font_size * AVERAGE_ADVANCE;
    TextSpan {
        text: text.to_string(),
        bbox: Rect::new(origin.x, origin.y - style.font_size, width, style.font_size),
        font_name: style.font_name.clone(),
        font_size: style.font_size,
        color: style.color,
    }
}

/// Drop every glyph whose center lies in one of `regions`, splitting the span
/// around the removed glyphs.
fn remove_glyphs(span: TextSpan, regions: &[Rect]) -> Vec<TextSpan> {
    let chars: Vec<char> = span.text.chars().collect();
    let keep: Vec<bool> = (0..chars.len())
        .map(|i| {
            let center = span.char_box(i).center();
            !regions.iter().any(|r| r.contains_point(&center))
        })
        .collect();

    if keep.iter().all(|k| *k) {
        return vec![span];
    }

    let mut pieces = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !keep[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && keep[i] {
            i += 1;
        }
        pieces.push(TextSpan {
            text: chars[start..i].iter().collect(),
            bbox: span.char_box(start).union(&span.char_box(i - 1)),
            ..span.clone()
        });
    }
    pieces
}

fn is_zlib(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x78 && (u16::from(bytes[0]) << 8 | u16::from(bytes[1])) % 31 == 0
}
