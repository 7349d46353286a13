//! Mutation orchestrator: the four operation entry points.
//!
//! Every entry point opens the input, mutates it in place page by page, saves it to
//! the output path and reports what changed. Failures become an error
//! [`OperationResult`]; no entry point returns a partial success.
//!
//! ## No automatic rollback
//!
//! Redactions are committed page by page and cannot be undone. If an operation
//! fails halfway, pages already processed stay mutated in memory and the output
//! file may be missing or stale. Callers that need all-or-nothing behaviour should
//! write to a scratch path and move it over the original only on success.

use crate::config::EditorConfig;
use crate::document::DocumentModel;
use crate::editor::applicator::{InsertionMode, RedactionApplicator};
use crate::editor::overlay::OverlayWriter;
use crate::editor::rewrite::{ContentRewriter, RewriteStats};
use crate::editor::{Command, OperationResult, PageMutationResult, Replacement};
use crate::error::Result;
use crate::text::LineDiffer;
use std::marker::PhantomData;
use std::path::Path;

/// Replace text on every page. Returns the pages that changed.
pub fn replace_in_document<D: DocumentModel>(
    doc: &mut D,
    replacements: &[Replacement],
    mode: InsertionMode,
    config: &EditorConfig,
) -> Vec<PageMutationResult> {
    let applicator = RedactionApplicator::new(config, mode);
    let mut modified = Vec::new();

    for index in 0..doc.page_count() {
        let Some(page) = doc.page_mut(index) else {
            continue;
        };
        let count = applicator.apply_all(page, replacements);
        if count > 0 {
            log::debug!("Page {}: {} replacements", index + 1, count);
            modified.push(PageMutationResult {
                page: index + 1,
                replacements: count,
            });
        }
    }
    modified
}

/// Diff two versions of the text and replace only the changed fragments.
pub fn smart_replace_in_document<D: DocumentModel>(
    doc: &mut D,
    old_content: &str,
    new_content: &str,
    config: &EditorConfig,
) -> Vec<PageMutationResult> {
    let replacements = LineDiffer::new().diff(old_content, new_content);
    if replacements.is_empty() {
        return Vec::new();
    }
    replace_in_document(doc, &replacements, InsertionMode::Reinsert, config)
}

/// Map the lines of `new_content` onto the document's spans.
pub fn rewrite_document<D: DocumentModel>(
    doc: &mut D,
    new_content: &str,
    config: &EditorConfig,
) -> RewriteStats {
    ContentRewriter::new(config).rewrite(doc, new_content)
}

/// Blank every page and write the same text over each. Returns the pages written to.
pub fn overlay_document<D: DocumentModel>(
    doc: &mut D,
    new_content: &str,
    config: &EditorConfig,
) -> Vec<PageMutationResult> {
    let writer = OverlayWriter::new(&config.overlay, &config.fallback_font);
    let mut written = Vec::new();
    for index in 0..doc.page_count() {
        let Some(page) = doc.page_mut(index) else {
            continue;
        };
        let stats = writer.overlay(page, new_content);
        written.push(PageMutationResult {
            page: index + 1,
            replacements: stats.lines_written,
        });
    }
    written
}

/// Runs text mutation operations against documents of type `D`.
pub struct TextMutator<D: DocumentModel> {
    config: EditorConfig,
    _document: PhantomData<fn() -> D>,
}

impl<D: DocumentModel> Default for TextMutator<D> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<D: DocumentModel> TextMutator<D> {
    /// Create a mutator.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            _document: PhantomData,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Run a command.
    pub fn execute(&self, command: Command) -> OperationResult {
        match command {
            Command::ReplaceText {
                input,
                output,
                replacements,
            } => self.replace_text(&input, &output, &replacements),
            Command::UpdateContent {
                input,
                output,
                new_content,
            } => self.update_content(&input, &output, &new_content),
            Command::SmartReplace {
                input,
                output,
                old_content,
                new_content,
            } => self.smart_replace(&input, &output, &old_content, &new_content),
            Command::OverlayText {
                input,
                output,
                new_content,
            } => self.overlay_text(&input, &output, &new_content),
        }
    }

    /// Replace every occurrence of each old fragment, on every page.
    pub fn replace_text(
        &self,
        input: &Path,
        output: &Path,
        replacements: &[Replacement],
    ) -> OperationResult {
        self.run("replace_text", input, output, |doc, config| {
            let pages =
                replace_in_document(doc, replacements, InsertionMode::RedactionHint, config);
            let total: usize = pages.iter().map(|p| p.replacements).sum();
            Ok(OperationResult::success(
                format!("Text replaced successfully. Total replacements: {}", total),
                output,
            )
            .with_replacements(pages))
        })
    }

    /// Map the lines of `new_content` onto the document's spans.
    pub fn update_content(&self, input: &Path, output: &Path, new_content: &str) -> OperationResult {
        self.run("update_content", input, output, |doc, config| {
            let stats = rewrite_document(doc, new_content, config);
            let mut message = "Document content updated successfully".to_string();
            if stats.spans_blanked > 0 {
                message.push_str(&format!(". {} spans left blank", stats.spans_blanked));
            }
            if stats.lines_failed > 0 {
                log::warn!("{} lines could not be written", stats.lines_failed);
                message.push_str(&format!(". {} lines could not be written", stats.lines_failed));
            }
            Ok(OperationResult::success(message, output)
                .with_pages(stats.pages)
                .with_lines_processed(stats.lines_processed))
        })
    }

    /// Replace only the fragments that differ between `old_content` and `new_content`.
    pub fn smart_replace(
        &self,
        input: &Path,
        output: &Path,
        old_content: &str,
        new_content: &str,
    ) -> OperationResult {
        self.run("smart_replace", input, output, |doc, config| {
            let pages = smart_replace_in_document(doc, old_content, new_content, config);
            let total: usize = pages.iter().map(|p| p.replacements).sum();
            let message = if total == 0 {
                "No changes detected".to_string()
            } else {
                format!("Document updated successfully. {} replacements made.", total)
            };
            Ok(OperationResult::success(message, output).with_replacements(pages))
        })
    }

    /// Blank every page and write `new_content` over it.
    pub fn overlay_text(&self, input: &Path, output: &Path, new_content: &str) -> OperationResult {
        self.run("overlay_text", input, output, |doc, config| {
            let pages = overlay_document(doc, new_content, config);
            // Every page gets the same text, so the first page's count stands for all
            let lines = pages.first().map_or(0, |p| p.replacements);
            Ok(
                OperationResult::success("Text overlay applied successfully", output)
                    .with_pages(pages)
                    .with_lines_processed(lines),
            )
        })
    }

    /// Open, mutate, save; any error becomes an error result.
    fn run<F>(&self, operation: &str, input: &Path, output: &Path, mutate: F) -> OperationResult
    where
        F: FnOnce(&mut D, &EditorConfig) -> Result<OperationResult>,
    {
        log::info!(
            "{}: {} -> {}",
            operation,
            input.display(),
            output.display()
        );
        let outcome = D::open(input).and_then(|mut doc| {
            let result = mutate(&mut doc, &self.config)?;
            doc.save(output, &self.config.save_options)?;
            Ok(result)
        });

        match outcome {
            Ok(result) => {
                log::info!("{}: {}", operation, result.message);
                result
            },
            Err(e) => {
                log::error!("{} failed: {}", operation, e);
                OperationResult::error(format!("{} failed: {}", operation, e))
            },
        }
    }
}
