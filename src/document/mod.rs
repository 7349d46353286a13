//! Document model collaborator.
//!
//! The engine never parses or serializes a container itself. It drives a document
//! through the [`DocumentModel`] and [`PageModel`] traits, which expose exactly the
//! primitives text mutation needs: search, the text geometry dictionary, redaction,
//! text insertion, rectangle fills and save.
//!
//! ## Destructive primitives
//!
//! [`PageModel::apply_redactions`] removes glyphs permanently. Nothing read from the
//! page after it runs can recover the removed text or its style, so callers must
//! sample everything they need first.
//!
//! [`memory::MemoryDocument`] implements the traits over a serializable text layer.

pub mod memory;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::layout::{Color, StyleSample, TextBlock};
use std::path::Path;

pub use memory::{MemoryDocument, MemoryPage};

/// Options for saving the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Compress the serialized output
    pub compress: bool,
    /// Remove unused objects (empty lines and blocks, unreferenced fonts)
    pub garbage_collect: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self::full_rewrite()
    }
}

impl SaveOptions {
    /// Full cleanup on save (default).
    pub fn full_rewrite() -> Self {
        Self {
            compress: true,
            garbage_collect: true,
        }
    }

    /// Write the document as-is, uncompressed.
    pub fn plain() -> Self {
        Self {
            compress: false,
            garbage_collect: false,
        }
    }

    /// Set compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set garbage collection.
    pub fn with_garbage_collect(mut self, garbage_collect: bool) -> Self {
        self.garbage_collect = garbage_collect;
        self
    }
}

/// Replacement text handed to the redaction call itself.
///
/// When a redaction carries one, the page writes the text into the cleared region
/// as part of [`PageModel::apply_redactions`], anchored at the region's bottom-left.
/// If the style's font cannot be written with, the page uses `fallback_font` at the
/// same size and color.
#[derive(Debug, Clone, PartialEq)]
pub struct RedactionText {
    /// Text to write into the cleared region
    pub text: String,
    /// Style to write it with
    pub style: StyleSample,
    /// Font used when the style's font is unavailable
    pub fallback_font: String,
}

/// One page of a document.
pub trait PageModel {
    /// Page bounds in page space.
    fn bounds(&self) -> Rect;

    /// All regions whose text contains `needle` verbatim, in visual order.
    fn search_text(&self, needle: &str) -> Vec<Rect>;

    /// The text geometry dictionary in reading order.
    fn text_dict(&self) -> Vec<TextBlock>;

    /// Queue a redaction. Nothing changes until [`PageModel::apply_redactions`].
    fn add_redaction(&mut self, region: Rect, fill: Color, replacement: Option<RedactionText>);

    /// Commit every queued redaction. Returns how many were applied.
    fn apply_redactions(&mut self) -> usize;

    /// Write `text` with its baseline starting at `origin`.
    ///
    /// Fails with [`crate::Error::TextInsert`] when the font cannot be resolved.
    fn insert_text(&mut self, origin: Point, text: &str, style: &StyleSample) -> Result<()>;

    /// Paint a solid rectangle over the page content.
    fn draw_rect(&mut self, rect: Rect, fill: Color);
}

/// An open, mutable document.
pub trait DocumentModel: Sized {
    /// Page type.
    type Page: PageModel;

    /// Open a document. Fails with [`crate::Error::DocumentOpen`].
    fn open(path: &Path) -> Result<Self>;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// The page at `index` (0-based).
    fn page(&self, index: usize) -> Option<&Self::Page>;

    /// Mutable access to the page at `index` (0-based).
    fn page_mut(&mut self, index: usize) -> Option<&mut Self::Page>;

    /// Serialize to `path`. Fails with [`crate::Error::DocumentSave`].
    fn save(&mut self, path: &Path, options: &SaveOptions) -> Result<()>;
}
