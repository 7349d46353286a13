//! Full content rewrite.
//!
//! Walks every span of the document in reading order and pairs it 1:1 with the
//! next line of the replacement text, continuing across pages. Each span is
//! redacted and its paired line written at the span's left edge on the original
//! baseline, in the span's own font, size and color.
//!
//! Count mismatches are not errors. Spans left over once the lines run out are
//! still redacted and stay blank; lines left over once the spans run out are
//! dropped.

use crate::config::EditorConfig;
use crate::document::{DocumentModel, PageModel};
use crate::editor::applicator::insert_with_fallback;
use crate::editor::PageMutationResult;
use crate::extractors::SpanCapture;

/// Totals of a full rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Replacement lines consumed by a span
    pub lines_processed: usize,
    /// Spans redacted without a line to replace them
    pub spans_blanked: usize,
    /// Lines whose text could not be written even with the fallback font
    pub lines_failed: usize,
    /// Per-page number of rewritten or blanked spans
    pub pages: Vec<PageMutationResult>,
}

/// Maps replacement lines onto existing spans.
pub struct ContentRewriter<'c> {
    config: &'c EditorConfig,
}

impl<'c> ContentRewriter<'c> {
    /// Create a rewriter.
    pub fn new(config: &'c EditorConfig) -> Self {
        Self { config }
    }

    /// Rewrite every page of `doc` with the lines of `new_content`.
    pub fn rewrite<D: DocumentModel>(&self, doc: &mut D, new_content: &str) -> RewriteStats {
        let mut lines = new_content.split('\n');
        let mut stats = RewriteStats::default();

        for index in 0..doc.page_count() {
            let Some(page) = doc.page_mut(index) else {
                continue;
            };
            let touched = self.rewrite_page(page, &mut lines, &mut stats);
            if touched > 0 {
                stats.pages.push(PageMutationResult {
                    page: index + 1,
                    replacements: touched,
                });
            }
        }

        log::info!(
            "Rewrote {} lines, blanked {} spans",
            stats.lines_processed,
            stats.spans_blanked
        );
        stats
    }

    /// Rewrite one page, pulling lines from `lines`. Returns the number of spans
    /// touched.
    fn rewrite_page<'t, P: PageModel + ?Sized>(
        &self,
        page: &mut P,
        lines: &mut impl Iterator<Item = &'t str>,
        stats: &mut RewriteStats,
    ) -> usize {
        // Capture every span (and its style) before the first redaction
        let spans = SpanCapture::capture(&*page);
        if spans.is_empty() {
            return 0;
        }

        let paired: Vec<_> = spans.into_iter().map(|span| (lines.next(), span)).collect();
        for (_, span) in &paired {
            page.add_redaction(span.bbox, self.config.redaction_fill, None);
        }
        page.apply_redactions();

        for (line, span) in &paired {
            let Some(line) = line else {
                stats.spans_blanked += 1;
                continue;
            };
            stats.lines_processed += 1;
            if line.is_empty() {
                continue;
            }
            if let Err(e) = insert_with_fallback(
                &mut *page,
                span.bbox.bottom_left(),
                line,
                &span.style(),
                &self.config.fallback_font,
            ) {
                log::warn!("Could not write line {:?}: {}", line, e);
                stats.lines_failed += 1;
            }
        }

        paired.len()
    }
}
