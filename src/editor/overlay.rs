//! Overlay writer: blank the page interior and write new text over it.
//!
//! This is the lossy fallback for content that cannot be mapped onto existing
//! spans. Nothing under the blanked area is preserved, lines are written top-down
//! at a fixed size and pitch, and lines that do not fit above the bottom margin are
//! dropped rather than continued on another page.

use crate::config::OverlayLayout;
use crate::document::PageModel;
use crate::editor::applicator::insert_with_fallback;
use crate::geometry::Point;
use crate::layout::StyleSample;

/// Lines written to one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    /// Lines written
    pub lines_written: usize,
    /// Lines that did not fit
    pub lines_dropped: usize,
}

/// Writes text over a blanked page.
pub struct OverlayWriter<'c> {
    layout: &'c OverlayLayout,
    fallback_font: &'c str,
}

impl<'c> OverlayWriter<'c> {
    /// Create an overlay writer.
    pub fn new(layout: &'c OverlayLayout, fallback_font: &'c str) -> Self {
        Self {
            layout,
            fallback_font,
        }
    }

    /// Blank the interior of `page` and write `text` over it.
    pub fn overlay<P: PageModel + ?Sized>(&self, page: &mut P, text: &str) -> OverlayStats {
        let bounds = page.bounds();
        page.draw_rect(bounds.inset(self.layout.margin), self.layout.fill);

        let style = StyleSample::new(
            self.layout.font_name.clone(),
            self.layout.font_size,
            self.layout.text_color,
        );
        let limit = bounds.bottom() - self.layout.bottom_margin;
        let mut baseline = self.layout.first_baseline;
        let mut stats = OverlayStats::default();

        let lines: Vec<&str> = text.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            if baseline > limit {
                stats.lines_dropped = lines.len() - i;
                log::warn!(
                    "Overlay full at y={}: dropping {} lines",
                    baseline,
                    stats.lines_dropped
                );
                break;
            }
            let origin = Point::new(self.layout.text_left, baseline);
            match insert_with_fallback(&mut *page, origin, line, &style, self.fallback_font) {
                Ok(()) => stats.lines_written += 1,
                Err(e) => log::warn!("Could not write overlay line {:?}: {}", line, e),
            }
            baseline += self.layout.line_pitch;
        }

        stats
    }
}
