//! Text-level analysis that runs before any page is touched.

pub mod line_diff;

pub use line_diff::LineDiffer;
