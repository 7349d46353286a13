//! Span capture.
//!
//! Flattens a page's text geometry dictionary (block → line → span) into one
//! ordered sequence of spans. Each span keeps its box, font, size and color, so
//! its style survives the redaction that follows.

use crate::document::PageModel;
use crate::layout::TextSpan;

/// Reads a page's spans in reading order.
pub struct SpanCapture;

impl SpanCapture {
    /// Capture every span on `page`, blocks first, then lines, then spans.
    ///
    /// Spans with no text carry no style worth keeping and are skipped.
    pub fn capture<P: PageModel + ?Sized>(page: &P) -> Vec<TextSpan> {
        page.text_dict()
            .into_iter()
            .flat_map(|block| block.lines)
            .flat_map(|line| line.spans)
            .filter(|span| !span.text.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryPage;
    use crate::geometry::Point;
    use crate::layout::{Color, StyleSample};

    #[test]
    fn test_capture_reading_order() {
        let body = StyleSample::new("Times-Roman", 11.0, Color::black());
        let heading = StyleSample::new("Helvetica-Bold", 18.0, Color::new(0.0, 0.0, 0.5));
        let page = MemoryPage::letter()
            .with_text(Point::new(72.0, 90.0), "Quarterly Report", &heading)
            .with_text(Point::new(72.0, 120.0), "Revenue grew ", &body)
            .with_text(Point::new(143.5, 120.0), "12%", &heading)
            .with_text(Point::new(72.0, 140.0), "year over year.", &body);

        let spans = SpanCapture::capture(&page);
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Quarterly Report", "Revenue grew ", "12%", "year over year."]
        );
        assert_eq!(spans[0].style(), heading);
        assert_eq!(spans[1].font_size, 11.0);
        assert_eq!(spans[2].color, Color::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_capture_empty_page() {
        let page = MemoryPage::letter();
        assert!(SpanCapture::capture(&page).is_empty());
    }
}
