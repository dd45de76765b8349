use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{ExtractError, SplitError};
use crate::naming::sanitize;
use crate::pdf::PdfDocument;
use crate::toc::{Toc, TocNode};

/// TOC trees nested deeper than this stop being walked; deeper nodes are
/// reported as skipped instead of risking call-stack exhaustion.
const MAX_WALK_DEPTH: u32 = 64;

/// What a split produced: the book directory, every section file written,
/// and every node that had to be skipped.
#[derive(Debug, Serialize)]
pub struct SplitReport {
    pub book_dir: PathBuf,
    pub written: Vec<SectionFile>,
    pub warnings: Vec<SectionWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionFile {
    pub number: String,
    pub title: String,
    pub path: PathBuf,
    pub start_page: u32,
    pub end_page: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionWarning {
    pub number: String,
    pub title: String,
    pub reason: String,
}

/// Materialize every page-bearing TOC node as a PDF under `output_root`,
/// mirroring the tree as nested directories.
///
/// Fails only before anything is written (empty tree, book directory not
/// creatable). Once the walk starts, a node that cannot be materialized is
/// skipped, logged, and aggregated into the report's warnings while its
/// siblings continue.
pub fn split(doc: &PdfDocument, toc: &Toc, output_root: &Path) -> Result<SplitReport, SplitError> {
    if toc.is_empty() {
        return Err(SplitError::EmptyToc);
    }

    let book_dir = output_root.join(sanitize(doc.stem()));
    std::fs::create_dir_all(&book_dir).map_err(|source| SplitError::BookDir {
        path: book_dir.clone(),
        source,
    })?;

    let mut report = SplitReport {
        book_dir: book_dir.clone(),
        written: Vec::new(),
        warnings: Vec::new(),
    };
    walk(doc, &toc.chapters, &book_dir, None, 1, &mut report);

    info!(
        "split {} into {} section file(s) under {}",
        doc.path().display(),
        report.written.len(),
        report.book_dir.display()
    );
    Ok(report)
}

/// One sibling sequence, in source order. `parent_end` is the resolved end
/// page of the enclosing node; children always stay within it.
fn walk(
    doc: &PdfDocument,
    nodes: &[TocNode],
    parent_dir: &Path,
    parent_end: Option<u32>,
    depth: u32,
    report: &mut SplitReport,
) {
    let page_count = doc.page_count();

    for (idx, node) in nodes.iter().enumerate() {
        let start = node.page.unwrap_or(1);

        // End page, by priority: the next sibling's start page, then the
        // ancestor bound, then the last page of the document. A sibling
        // without a start page stands in for the document end.
        let mut end = match nodes.get(idx + 1) {
            Some(next) => next.page.unwrap_or(page_count).saturating_sub(1),
            None => match parent_end {
                Some(bound) => bound.saturating_sub(1),
                None => page_count,
            },
        };

        // Out-of-order or duplicate sibling pages produce an inverted range;
        // clamp to a single page rather than failing the walk.
        if end < start {
            debug!(
                "adjusting end page {} up to start page {} for '{}'",
                end, start, node.title
            );
            end = start;
        }

        let safe = sanitize(&format!("{}_{}", node.number, node.title));
        let has_children = !node.subtopics.is_empty();
        let node_dir = if has_children {
            parent_dir.join(&safe)
        } else {
            parent_dir.to_path_buf()
        };

        if has_children {
            if let Err(source) = std::fs::create_dir_all(&node_dir) {
                let err = ExtractError::Dir {
                    path: node_dir.clone(),
                    source,
                };
                skip(node, err, report);
                continue;
            }
        }

        if node.page.is_some() {
            let out_path = node_dir.join(format!("{safe}.pdf"));
            match emit(doc, start, end, &out_path) {
                Ok(()) => {
                    info!(
                        "saved {} (pages {} to {})",
                        out_path.display(),
                        start,
                        end
                    );
                    report.written.push(SectionFile {
                        number: node.number.clone(),
                        title: node.title.clone(),
                        path: out_path,
                        start_page: start,
                        end_page: end,
                    });
                }
                Err(err) => skip(node, err, report),
            }
        }

        if has_children {
            if depth >= MAX_WALK_DEPTH {
                warn!(
                    "'{}' is nested deeper than {MAX_WALK_DEPTH} levels; skipping its subtopics",
                    node.title
                );
                report.warnings.push(SectionWarning {
                    number: node.number.clone(),
                    title: node.title.clone(),
                    reason: format!("subtopics nested deeper than {MAX_WALK_DEPTH} levels"),
                });
            } else {
                walk(doc, &node.subtopics, &node_dir, Some(end), depth + 1, report);
            }
        }
    }
}

fn emit(doc: &PdfDocument, start: u32, end: u32, path: &Path) -> Result<(), ExtractError> {
    let mut section = doc.extract_range(start, end)?;
    PdfDocument::save(&mut section, path)
}

fn skip(node: &TocNode, err: ExtractError, report: &mut SplitReport) {
    error!("skipping '{}': {}", node.title, err);
    report.warnings.push(SectionWarning {
        number: node.number.clone(),
        title: node.title.clone(),
        reason: err.to_string(),
    });
}
