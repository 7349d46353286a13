//! Text mutation of existing documents.
//!
//! Four operations, all built from the same redact-then-write primitive:
//!
//! - **replace_text**: every occurrence of each old fragment, on every page
//! - **smart_replace**: diff two versions of the text, replace only what changed
//! - **update_content**: map the lines of a new text onto the existing spans
//! - **overlay_text**: blank the page and write new text over it
//!
//! ## Architecture
//!
//! ```text
//! Command (JSON)
//!     ↓
//! [TextMutator] (open → mutate → save)
//!     ↓
//! per page:
//!   - PageRedactionPass   (capture style, mark, commit once, reinsert)
//!   - ContentRewriter     (span ↔ line pairing)
//!   - OverlayWriter       (blank + fixed layout)
//!     ↓
//! OperationResult (JSON)
//! ```
//!
//! Redaction is destructive and there is no undo. See [`mutator`] for what
//! happens when an operation fails part way.

pub(crate) mod applicator;
pub mod mutator;
mod overlay;
mod rewrite;
mod types;

pub use applicator::{InsertionMode, PageRedactionPass, RedactionApplicator};
pub use mutator::TextMutator;
pub use overlay::{OverlayStats, OverlayWriter};
pub use rewrite::{ContentRewriter, RewriteStats};
pub use types::{Command, OperationResult, PageMutationResult, Replacement, ResultKind};
