//! Requests and results of text mutation operations.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One old-fragment → new-fragment substitution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct Replacement {
    /// Text to find verbatim. Empty fragments are skipped.
    #[serde(rename = "old_text")]
    pub old_fragment: String,
    /// Text written in its place.
    #[serde(rename = "new_text", default)]
    pub new_fragment: String,
}

impl Replacement {
    /// Create a replacement.
    pub fn new(old_fragment: impl Into<String>, new_fragment: impl Into<String>) -> Self {
        Self {
            old_fragment: old_fragment.into(),
            new_fragment: new_fragment.into(),
        }
    }
}

/// Changes made to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PageMutationResult {
    /// Page number (1-based)
    pub page: usize,
    /// Number of replaced regions, rewritten spans or written lines
    pub replacements: usize,
}

/// Outcome of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// The document was saved
    Success,
    /// The operation failed; no valid output can be assumed
    Error,
}

/// Terminal result of an operation.
///
/// Serializes as
/// `{"type", "message", "total_replacements", "pages_modified", "page_details",
/// "lines_processed", "output_path"}`, omitting fields that do not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    /// Success or error
    pub kind: ResultKind,
    /// Human-readable summary or error message
    pub message: String,
    /// Replacements made across all pages
    pub total_replacements: Option<usize>,
    /// Pages with at least one change, in page order
    pub pages_modified: Vec<PageMutationResult>,
    /// Replacement lines consumed (full rewrite) or written (overlay)
    pub lines_processed: Option<usize>,
    /// Where the document was saved
    pub output_path: Option<PathBuf>,
}

impl OperationResult {
    /// A successful result saved at `output_path`.
    pub fn success(message: impl Into<String>, output_path: &Path) -> Self {
        Self {
            kind: ResultKind::Success,
            message: message.into(),
            total_replacements: None,
            pages_modified: Vec::new(),
            lines_processed: None,
            output_path: Some(output_path.to_path_buf()),
        }
    }

    /// An error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Error,
            message: message.into(),
            total_replacements: None,
            pages_modified: Vec::new(),
            lines_processed: None,
            output_path: None,
        }
    }

    /// Attach replacement totals and the modified pages.
    pub fn with_replacements(mut self, pages: Vec<PageMutationResult>) -> Self {
        self.total_replacements = Some(pages.iter().map(|p| p.replacements).sum());
        self.pages_modified = pages;
        self
    }

    /// Attach the modified pages without reporting replacement totals.
    pub fn with_pages(mut self, pages: Vec<PageMutationResult>) -> Self {
        self.pages_modified = pages;
        self
    }

    /// Attach the number of processed lines.
    pub fn with_lines_processed(mut self, lines: usize) -> Self {
        self.lines_processed = Some(lines);
        self
    }

    /// True if the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.kind == ResultKind::Success
    }
}

#[derive(serde::Serialize)]
struct WireResult<'a> {
    #[serde(rename = "type")]
    kind: ResultKind,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_replacements: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages_modified: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_details: Option<&'a [PageMutationResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines_processed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_path: Option<String>,
}

impl Serialize for OperationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Page counts only mean something for replacing operations
        let reports_pages = self.total_replacements.is_some();
        WireResult {
            kind: self.kind,
            message: &self.message,
            total_replacements: self.total_replacements,
            pages_modified: reports_pages.then_some(self.pages_modified.len()),
            page_details: reports_pages.then_some(self.pages_modified.as_slice()),
            lines_processed: self.lines_processed,
            output_path: self.output_path.as_ref().map(|p| p.display().to_string()),
        }
        .serialize(serializer)
    }
}

/// An operation request, tagged by `"command"`.
///
/// ```
/// use pdf_retext::editor::Command;
///
/// let cmd: Command = serde_json::from_str(
///     r#"{"command": "overlay_text", "input": "a.pdf", "output": "b.pdf", "new_content": "Hi"}"#,
/// ).unwrap();
/// assert_eq!(cmd.name(), "overlay_text");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Replace every occurrence of each old fragment.
    ReplaceText {
        /// Input document
        input: PathBuf,
        /// Output document
        output: PathBuf,
        /// Substitutions, applied in order on every page
        replacements: Vec<Replacement>,
    },
    /// Map lines of `new_content` onto the document's spans.
    UpdateContent {
        /// Input document
        input: PathBuf,
        /// Output document
        output: PathBuf,
        /// Newline-separated replacement text
        new_content: String,
    },
    /// Diff two versions of the text and replace only what changed.
    SmartReplace {
        /// Input document
        input: PathBuf,
        /// Output document
        output: PathBuf,
        /// Text as the document currently reads
        old_content: String,
        /// Desired text
        new_content: String,
    },
    /// Blank each page and write `new_content` over it.
    OverlayText {
        /// Input document
        input: PathBuf,
        /// Output document
        output: PathBuf,
        /// Newline-separated text to write
        new_content: String,
    },
}

impl Command {
    /// The wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ReplaceText { .. } => "replace_text",
            Command::UpdateContent { .. } => "update_content",
            Command::SmartReplace { .. } => "smart_replace",
            Command::OverlayText { .. } => "overlay_text",
        }
    }
}
