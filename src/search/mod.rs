//! Exact text location on pages.
//!
//! Maps a string to every page region whose text contains it verbatim. No case
//! folding and no whitespace normalization: `"Total"` does not match `"TOTAL"` or
//! `"Tot al"`.
//!
//! ## Example
//!
//! ```ignore
//! use pdf_retext::search::TextLocator;
//!
//! let regions = TextLocator::locate(page, "Total");
//! for region in regions {
//!     println!("Found at {:?}", region);
//! }
//! ```

mod text_locator;

pub use text_locator::{LocatedRegion, TextLocator};
