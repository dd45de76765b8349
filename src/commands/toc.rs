use crate::pdf::PdfDocument;
use crate::toc::{parse_builtin_toc, Toc, TocNode};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn run<P: AsRef<Path>>(path: P, json: bool) -> Result<()> {
    let doc = PdfDocument::open(&path)?;

    let mut toc = parse_builtin_toc(&doc);
    if toc.is_empty() {
        info!("no builtin bookmarks; using the single-chapter fallback");
        toc = Toc::fallback();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&toc)?);
    } else {
        print_nodes(&toc.chapters, 0);
    }

    Ok(())
}

fn print_nodes(nodes: &[TocNode], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        let page = node
            .page
            .map(|p| format!(" (p. {})", p))
            .unwrap_or_default();
        println!("{}{} {}{}", indent, node.number, node.title, page);
        print_nodes(&node.subtopics, depth + 1);
    }
}
