//! Redaction and reinsertion of replaced text.
//!
//! Replacing text is destructive: the old glyphs are redacted, then the new text is
//! written where they were. Redaction erases style along with the glyphs, so a
//! [`PageRedactionPass`] samples the style of every region while it is being
//! marked and only then commits. Marking after commit is impossible because
//! [`PageRedactionPass::commit`] consumes the pass.
//!
//! A committed redaction is never rolled back. If writing the new text fails even
//! with the fallback font, the region stays blank and counts as zero.

use crate::config::EditorConfig;
use crate::document::{PageModel, RedactionText};
use crate::editor::Replacement;
use crate::error::Result;
use crate::extractors::SpanCapture;
use crate::geometry::{Point, Rect};
use crate::layout::{Color, StyleSample, TextSpan};
use crate::search::TextLocator;

/// How new text reaches the page after its region is redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionMode {
    /// The text rides on the redaction itself and is placed by the page when
    /// redactions are applied.
    #[default]
    RedactionHint,
    /// The text is inserted separately after the commit, at the region's
    /// bottom-left, with the fallback-font retry.
    Reinsert,
}

#[derive(Debug, Clone)]
struct PendingInsertion {
    origin: Point,
    text: String,
    style: StyleSample,
}

/// Marks redactions on one page, then commits them all at once.
pub struct PageRedactionPass<'p, P: PageModel + ?Sized> {
    page: &'p mut P,
    mode: InsertionMode,
    fill: Color,
    fallback_font: &'p str,
    spans: Vec<TextSpan>,
    pending: Vec<PendingInsertion>,
    marked: usize,
}

impl<'p, P: PageModel + ?Sized> PageRedactionPass<'p, P> {
    /// Start a pass. The page's spans are captured here, before anything is
    /// redacted.
    pub fn begin(page: &'p mut P, mode: InsertionMode, config: &'p EditorConfig) -> Self {
        let spans = SpanCapture::capture(&*page);
        Self {
            page,
            mode,
            fill: config.redaction_fill,
            fallback_font: &config.fallback_font,
            spans,
            pending: Vec::new(),
            marked: 0,
        }
    }

    /// Mark `region` for replacement by `new_fragment`.
    pub fn mark(&mut self, region: Rect, new_fragment: &str) {
        let style = self.style_at(region);
        match self.mode {
            InsertionMode::RedactionHint => {
                let hint = RedactionText {
                    text: new_fragment.to_string(),
                    style,
                    fallback_font: self.fallback_font.to_string(),
                };
                self.page.add_redaction(region, self.fill, Some(hint));
            },
            InsertionMode::Reinsert => {
                self.page.add_redaction(region, self.fill, None);
                self.pending.push(PendingInsertion {
                    origin: region.bottom_left(),
                    text: new_fragment.to_string(),
                    style,
                });
            },
        }
        self.marked += 1;
    }

    /// Locate every occurrence of the replacement's old fragment and mark it.
    ///
    /// Returns the number of regions marked.
    pub fn mark_replacement(&mut self, replacement: &Replacement) -> usize {
        let regions = TextLocator::locate(&*self.page, &replacement.old_fragment);
        for region in &regions {
            self.mark(*region, &replacement.new_fragment);
        }
        regions.len()
    }

    /// Number of regions marked so far.
    pub fn marked(&self) -> usize {
        self.marked
    }

    /// Commit all marked redactions in one batch, then write pending text.
    ///
    /// Returns the number of regions whose replacement made it onto the page.
    pub fn commit(self) -> usize {
        if self.marked == 0 {
            return 0;
        }
        self.page.apply_redactions();

        match self.mode {
            InsertionMode::RedactionHint => self.marked,
            InsertionMode::Reinsert => {
                let mut written = 0;
                for insertion in &self.pending {
                    if insertion.text.is_empty() {
                        written += 1;
                        continue;
                    }
                    match insert_with_fallback(
                        &mut *self.page,
                        insertion.origin,
                        &insertion.text,
                        &insertion.style,
                        self.fallback_font,
                    ) {
                        Ok(()) => written += 1,
                        Err(e) => log::warn!(
                            "Skipping replacement {:?}; region stays blank: {}",
                            insertion.text,
                            e
                        ),
                    }
                }
                written
            },
        }
    }

    /// Style of the span covering most of `region`, or a plain default sized to it.
    fn style_at(&self, region: Rect) -> StyleSample {
        self.spans
            .iter()
            .filter_map(|span| span.bbox.intersection(&region).map(|r| (r.area(), span)))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, span)| span.style())
            .unwrap_or_else(|| StyleSample::new(self.fallback_font, region.height, Color::black()))
    }
}

/// Redaction-reinsertion applicator.
pub struct RedactionApplicator<'c> {
    config: &'c EditorConfig,
    mode: InsertionMode,
}

impl<'c> RedactionApplicator<'c> {
    /// Create an applicator.
    pub fn new(config: &'c EditorConfig, mode: InsertionMode) -> Self {
        Self { config, mode }
    }

    /// Replace the text in one region. Returns 0 or 1.
    pub fn apply<P: PageModel + ?Sized>(
        &self,
        page: &mut P,
        region: Rect,
        old_fragment: &str,
        new_fragment: &str,
    ) -> usize {
        if old_fragment.is_empty() {
            return 0;
        }
        let mut pass = PageRedactionPass::begin(page, self.mode, self.config);
        pass.mark(region, new_fragment);
        pass.commit()
    }

    /// Apply every replacement to `page` with a single redaction commit.
    ///
    /// Empty old fragments are skipped. Returns the number of replaced regions.
    pub fn apply_all<P: PageModel + ?Sized>(
        &self,
        page: &mut P,
        replacements: &[Replacement],
    ) -> usize {
        let mut pass = PageRedactionPass::begin(page, self.mode, self.config);
        for replacement in replacements {
            if replacement.old_fragment.is_empty() {
                continue;
            }
            pass.mark_replacement(replacement);
        }
        pass.commit()
    }
}

/// Insert text, retrying once with `fallback_font` at the same size and color if the
/// requested font cannot be used.
pub(crate) fn insert_with_fallback<P: PageModel + ?Sized>(
    page: &mut P,
    origin: Point,
    text: &str,
    style: &StyleSample,
    fallback_font: &str,
) -> Result<()> {
    match page.insert_text(origin, text, style) {
        Err(e) if e.is_text_insert() && style.font_name != fallback_font => {
            log::debug!("{}; retrying with {}", e, fallback_font);
            page.insert_text(origin, text, &style.with_font(fallback_font))
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryPage;

    fn style(font: &str, size: f32) -> StyleSample {
        StyleSample::new(font, size, Color::new(0.1, 0.2, 0.3))
    }

    fn page() -> MemoryPage {
        MemoryPage::letter()
            .with_text(Point::new(72.0, 100.0), "Invoice #100", &style("Times-Roman", 12.0))
            .with_text(Point::new(72.0, 130.0), "Total: 100 USD", &style("Courier", 10.0))
    }

    #[test]
    fn test_apply_single_region() {
        let config = EditorConfig::default();
        let mut page = page();
        let region = TextLocator::locate(&page, "Total")[0];

        let applicator = RedactionApplicator::new(&config, InsertionMode::Reinsert);
        assert_eq!(applicator.apply(&mut page, region, "Total", "Sum"), 1);
        assert_eq!(page.text(), "Invoice #100\nSum: 100 USD");
        assert_eq!(page.fills().len(), 1);
        assert_eq!(page.fills()[0].color, Color::white());
    }

    #[test]
    fn test_apply_all_commits_once_and_fans_out() {
        let config = EditorConfig::default();
        let mut page = page();
        let applicator = RedactionApplicator::new(&config, InsertionMode::Reinsert);

        let count = applicator.apply_all(
            &mut page,
            &[Replacement::new("100", "250"), Replacement::new("", "ignored")],
        );
        assert_eq!(count, 2);
        assert_eq!(page.text(), "Invoice #250\nTotal: 250 USD");
    }

    #[test]
    fn test_reinsert_carries_captured_style() {
        let config = EditorConfig::default();
        let mut page = page();
        let applicator = RedactionApplicator::new(&config, InsertionMode::Reinsert);
        applicator.apply_all(&mut page, &[Replacement::new("USD", "EUR")]);

        let eur = page.spans().find(|s| s.text == "EUR").unwrap();
        assert_eq!(eur.font_name, "Courier");
        assert_eq!(eur.font_size, 10.0);
        assert_eq!(eur.color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_hint_mode_places_text_with_captured_style() {
        let config = EditorConfig::default();
        let mut page = page();
        let applicator = RedactionApplicator::new(&config, InsertionMode::RedactionHint);
        assert_eq!(applicator.apply_all(&mut page, &[Replacement::new("Invoice", "Bill")]), 1);

        assert_eq!(page.text(), "Bill #100\nTotal: 100 USD");
        let bill = page.spans().find(|s| s.text == "Bill").unwrap();
        assert_eq!(bill.font_name, "Times-Roman");
    }

    #[test]
    fn test_fallback_font_on_unwritable_font() {
        let config = EditorConfig::default();
        let mut page = MemoryPage::letter().with_text(
            Point::new(72.0, 100.0),
            "Hello Ann",
            &style("ABCDEF+Calibri", 12.0),
        );
        let applicator = RedactionApplicator::new(&config, InsertionMode::Reinsert);
        assert_eq!(applicator.apply_all(&mut page, &[Replacement::new("Ann", "Bob")]), 1);

        let bob = page.spans().find(|s| s.text == "Bob").unwrap();
        assert_eq!(bob.font_name, "helv");
        assert_eq!(bob.font_size, 12.0);
        assert_eq!(bob.color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_failed_fallback_skips_without_rollback() {
        let config = EditorConfig::default().with_fallback_font("NoSuchFont");
        let mut page = MemoryPage::letter().with_text(
            Point::new(72.0, 100.0),
            "Hello Ann",
            &style("ABCDEF+Calibri", 12.0),
        );
        let applicator = RedactionApplicator::new(&config, InsertionMode::Reinsert);
        assert_eq!(applicator.apply_all(&mut page, &[Replacement::new("Ann", "Bob")]), 0);

        // The redaction already happened and stays
        assert_eq!(page.text(), "Hello ");
    }

    #[test]
    fn test_deletion_counts_as_replaced() {
        let config = EditorConfig::default();
        let mut page = page();
        let applicator = RedactionApplicator::new(&config, InsertionMode::Reinsert);
        assert_eq!(applicator.apply_all(&mut page, &[Replacement::new(" USD", "")]), 1);
        assert_eq!(page.text(), "Invoice #100\nTotal: 100");
    }

    #[test]
    fn test_no_match_leaves_page_untouched() {
        let config = EditorConfig::default();
        let mut page = page();
        let before = page.text();
        let applicator = RedactionApplicator::new(&config, InsertionMode::RedactionHint);
        assert_eq!(applicator.apply_all(&mut page, &[Replacement::new("Missing", "x")]), 0);
        assert_eq!(page.text(), before);
        assert!(page.fills().is_empty());
    }

    #[test]
    fn test_styles_captured_before_commit() {
        let config = EditorConfig::default();
        let mut page = page();
        let mut pass = PageRedactionPass::begin(&mut page, InsertionMode::Reinsert, &config);
        assert_eq!(pass.mark_replacement(&Replacement::new("Invoice #100", "A")), 1);
        // Second region on the same page is found and styled from the original text
        assert_eq!(pass.mark_replacement(&Replacement::new("Total", "B")), 1);
        assert_eq!(pass.marked(), 2);
        assert_eq!(pass.commit(), 2);

        let a = page.spans().find(|s| s.text == "A").unwrap();
        let b = page.spans().find(|s| s.text == "B").unwrap();
        assert_eq!(a.font_name, "Times-Roman");
        assert_eq!(b.font_name, "Courier");
    }
}
