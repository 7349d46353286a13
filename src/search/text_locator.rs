//! Text locator implementation.

use crate::document::{DocumentModel, PageModel};
use crate::geometry::Rect;

/// A match with the page it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedRegion {
    /// Page number (0-indexed) where the match was found
    pub page: usize,
    /// Bounding box of the match on the page
    pub bbox: Rect,
}

/// Finds exact text occurrences.
pub struct TextLocator;

impl TextLocator {
    /// All regions on `page` containing `needle`, in the order the page reports
    /// them (top-to-bottom, then left-to-right).
    ///
    /// An empty needle matches nothing.
    pub fn locate<P: PageModel + ?Sized>(page: &P, needle: &str) -> Vec<Rect> {
        if needle.is_empty() {
            return Vec::new();
        }
        page.search_text(needle)
    }

    /// All regions containing `needle` across every page of `doc`.
    pub fn locate_in_document<D: DocumentModel>(doc: &D, needle: &str) -> Vec<LocatedRegion> {
        let mut results = Vec::new();
        for index in 0..doc.page_count() {
            let Some(page) = doc.page(index) else {
                continue;
            };
            results.extend(
                Self::locate(page, needle)
                    .into_iter()
                    .map(|bbox| LocatedRegion { page: index, bbox }),
            );
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, MemoryPage};
    use crate::geometry::Point;
    use crate::layout::{Color, StyleSample};

    fn page_with(lines: &[&str]) -> MemoryPage {
        let style = StyleSample::new("Helvetica", 10.0, Color::black());
        lines
            .iter()
            .enumerate()
            .fold(MemoryPage::letter(), |page, (i, line)| {
                page.with_text(Point::new(72.0, 100.0 + 20.0 * i as f32), line, &style)
            })
    }

    #[test]
    fn test_empty_needle_matches_nothing() {
        let page = page_with(&["anything at all"]);
        assert!(TextLocator::locate(&page, "").is_empty());
    }

    #[test]
    fn test_every_occurrence_in_visual_order() {
        let page = page_with(&["Total due", "Subtotal and Total"]);
        let regions = TextLocator::locate(&page, "Total");
        assert_eq!(regions.len(), 2);
        assert!(regions[0].top() < regions[1].top());
        // "Subtotal" is lowercase-t, only the last word matches on line two
        assert_eq!(regions[1].left(), 72.0 + 13.0 * 5.0);
    }

    #[test]
    fn test_matching_is_case_and_space_sensitive() {
        let page = page_with(&["TOTAL", "Tot al"]);
        assert!(TextLocator::locate(&page, "Total").is_empty());
    }

    #[test]
    fn test_locate_in_document() {
        let doc = MemoryDocument::from_pages(vec![
            page_with(&["Total: 4"]),
            page_with(&["nothing here"]),
            page_with(&["Total: 5", "Total: 6"]),
        ]);
        let found = TextLocator::locate_in_document(&doc, "Total");
        let pages: Vec<usize> = found.iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![0, 2, 2]);
    }
}
