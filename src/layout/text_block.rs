//! Text geometry dictionary: blocks of lines of style-tagged spans.
//!
//! This is the shape a page reports through its text dictionary and the shape
//! the text-layer backend persists.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color, clamping each channel into `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retext::layout::Color;
    ///
    /// let red = Color::new(1.0, 0.0, 0.0);
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(Color::new(2.0, -1.0, 0.5), Color::new(1.0, 0.0, 0.5));
    /// ```
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a white color.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Font, size and color read from a span before it is destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSample {
    /// Font name as the page reports it
    pub font_name: String,
    /// Font size in points (positive)
    pub font_size: f32,
    /// Fill color of the glyphs
    pub color: Color,
}

impl StyleSample {
    /// Create a style sample. Non-positive sizes fall back to 1pt.
    pub fn new(font_name: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            font_name: font_name.into(),
            font_size: if font_size > 0.0 { font_size } else { 1.0 },
            color,
        }
    }

    /// Same size and color, different font.
    pub fn with_font(&self, font_name: impl Into<String>) -> Self {
        Self {
            font_name: font_name.into(),
            ..self.clone()
        }
    }
}

/// A run of text sharing one font, size and color within a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The span's text
    pub text: String,
    /// Bounding box of the entire span
    pub bbox: Rect,
    /// Font name/family
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text color
    #[serde(default)]
    pub color: Color,
}

impl TextSpan {
    /// Capture this span's style.
    pub fn style(&self) -> StyleSample {
        StyleSample::new(self.font_name.clone(), self.font_size, self.color)
    }

    /// Number of characters (not bytes) in the span.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Box of the `index`-th character, assuming uniform advance across the span.
    pub fn char_box(&self, index: usize) -> Rect {
        let count = self.char_count().max(1);
        let advance = self.bbox.width / count as f32;
        Rect::new(
            self.bbox.x + advance * index as f32,
            self.bbox.y,
            advance,
            self.bbox.height,
        )
    }
}

/// A line of spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Spans in left-to-right order
    pub spans: Vec<TextSpan>,
    /// Bounding box of all spans
    pub bbox: Rect,
}

impl TextLine {
    /// Build a line whose box covers `spans`.
    pub fn new(spans: Vec<TextSpan>) -> Self {
        let bbox = union_all(spans.iter().map(|s| s.bbox));
        Self { spans, bbox }
    }

    /// Concatenated span text.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Recompute the box after spans were edited.
    pub fn refresh_bbox(&mut self) {
        self.bbox = union_all(self.spans.iter().map(|s| s.bbox));
    }
}

/// A block of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines in top-to-bottom order
    pub lines: Vec<TextLine>,
    /// Bounding box of all lines
    pub bbox: Rect,
}

impl TextBlock {
    /// Build a block whose box covers `lines`.
    pub fn new(lines: Vec<TextLine>) -> Self {
        let bbox = union_all(lines.iter().map(|l| l.bbox));
        Self { lines, bbox }
    }

    /// Recompute line and block boxes after spans were edited.
    pub fn refresh_bbox(&mut self) {
        for line in &mut self.lines {
            line.refresh_bbox();
        }
        self.bbox = union_all(self.lines.iter().map(|l| l.bbox));
    }
}

fn union_all(mut rects: impl Iterator<Item = Rect>) -> Rect {
    let first = rects.next().unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
    rects.fold(first, |acc, r| acc.union(&r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, width: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            bbox: Rect::new(x, 100.0, width, 12.0),
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            color: Color::black(),
        }
    }

    #[test]
    fn test_char_box_uniform_advance() {
        let s = span("abcd", 10.0, 40.0);
        assert_eq!(s.char_box(0), Rect::new(10.0, 100.0, 10.0, 12.0));
        assert_eq!(s.char_box(3), Rect::new(40.0, 100.0, 10.0, 12.0));
    }

    #[test]
    fn test_char_count_is_unicode_aware() {
        let s = span("Größe", 0.0, 50.0);
        assert_eq!(s.char_count(), 5);
        assert_eq!(s.char_box(4).x, 40.0);
    }

    #[test]
    fn test_line_text_and_bbox() {
        let line = TextLine::new(vec![span("Hello ", 0.0, 30.0), span("World", 30.0, 25.0)]);
        assert_eq!(line.text(), "Hello World");
        assert_eq!(line.bbox, Rect::new(0.0, 100.0, 55.0, 12.0));
    }

    #[test]
    fn test_style_sample_rejects_non_positive_size() {
        let style = StyleSample::new("Courier", 0.0, Color::white());
        assert_eq!(style.font_size, 1.0);
        let swapped = style.with_font("helv");
        assert_eq!(swapped.font_name, "helv");
        assert_eq!(swapped.color, Color::white());
    }

    #[test]
    fn test_span_style_capture() {
        let mut s = span("x", 0.0, 6.0);
        s.color = Color::new(0.2, 0.4, 0.6);
        let style = s.style();
        assert_eq!(style.font_name, "Helvetica");
        assert_eq!(style.font_size, 12.0);
        assert_eq!(style.color, Color::new(0.2, 0.4, 0.6));
    }
}
