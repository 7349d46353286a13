//! Text layout model shared by the page collaborator and the engine.

pub mod text_block;

// Re-export main types
pub use text_block::{Color, StyleSample, TextBlock, TextLine, TextSpan};
