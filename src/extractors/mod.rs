//! Extraction of style-tagged text runs from a page.

pub mod spans;

pub use spans::SpanCapture;
