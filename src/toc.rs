use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pdf::outline::OutlineEntry;
use crate::pdf::PdfDocument;

/// One section of the table of contents.
///
/// `page` is 1-based; a node without one is a pure grouping container and
/// emits no file of its own. `subtopics` preserves source order, which
/// drives range resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    pub title: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default)]
    pub subtopics: Vec<TocNode>,
}

/// A TOC tree: the ordered sequence of root-level sections.
///
/// The wire format matches what callers supply as edited JSON:
/// `{"chapters": [{"title": ..., "number": ..., "page": ..., "subtopics": [...]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toc {
    pub chapters: Vec<TocNode>,
}

impl Toc {
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Build a tree from a flat, level-tagged bookmark list.
    ///
    /// Numbering is synthesized from entry positions as `1`, `1.1`, `1.2`,
    /// `2`, ... A counter is kept per depth; a shallower entry invalidates
    /// all deeper counters, so sibling numbering restarts whenever the
    /// parent context changes. Entries with a non-positive level are
    /// malformed and skipped. A level that jumps past its parent (1 straight
    /// to 3) attaches to whatever shallower ancestor is open.
    pub fn from_outline(entries: &[OutlineEntry]) -> Toc {
        let mut chapters: Vec<TocNode> = Vec::new();
        // Open ancestor chain; strictly increasing in level.
        let mut stack: Vec<(u32, TocNode)> = Vec::new();
        let mut counters: BTreeMap<u32, u32> = BTreeMap::new();

        for entry in entries {
            if entry.level == 0 {
                continue;
            }

            *counters.entry(entry.level).or_insert(0) += 1;
            counters.retain(|level, _| *level <= entry.level);
            let number = counters
                .values()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(".");

            let node = TocNode {
                title: entry.title.trim().to_string(),
                number,
                page: entry.page,
                subtopics: Vec::new(),
            };

            while stack.last().is_some_and(|(level, _)| *level >= entry.level) {
                let (_, done) = stack.pop().expect("last() was Some");
                attach(done, &mut stack, &mut chapters);
            }
            stack.push((entry.level, node));
        }

        while let Some((_, node)) = stack.pop() {
            attach(node, &mut stack, &mut chapters);
        }

        Toc { chapters }
    }

    /// Single chapter covering the whole document, used when a PDF carries
    /// no builtin bookmarks.
    pub fn fallback() -> Toc {
        Toc {
            chapters: vec![TocNode {
                title: "Document".to_string(),
                number: "1".to_string(),
                page: Some(1),
                subtopics: Vec::new(),
            }],
        }
    }
}

fn attach(node: TocNode, stack: &mut Vec<(u32, TocNode)>, chapters: &mut Vec<TocNode>) {
    match stack.last_mut() {
        Some((_, parent)) => parent.subtopics.push(node),
        None => chapters.push(node),
    }
}

/// Read the builtin bookmarks of an open document into a TOC tree.
///
/// Empty when the document has no outline; callers decide whether to fall
/// back to [`Toc::fallback`].
pub fn parse_builtin_toc(doc: &PdfDocument) -> Toc {
    let entries = crate::pdf::outline::read_outline(&doc.doc);
    Toc::from_outline(&entries)
}
