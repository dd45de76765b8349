use crate::pdf::PdfDocument;
use crate::toc::{parse_builtin_toc, Toc};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    toc_file: Option<&Path>,
) -> Result<()> {
    let doc = PdfDocument::open(&input)?;

    let toc = match toc_file {
        Some(path) => load_toc_file(path)?,
        None => {
            let builtin = parse_builtin_toc(&doc);
            if builtin.is_empty() {
                info!("no builtin bookmarks; using the single-chapter fallback");
                Toc::fallback()
            } else {
                builtin
            }
        }
    };

    let report = crate::split::split(&doc, &toc, output_dir.as_ref())?;

    println!(
        "Wrote {} section file(s) under {}",
        report.written.len(),
        report.book_dir.display()
    );
    for warning in &report.warnings {
        println!(
            "warning: skipped {} {}: {}",
            warning.number, warning.title, warning.reason
        );
    }

    Ok(())
}

fn load_toc_file(path: &Path) -> Result<Toc> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read TOC file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse TOC file: {}", path.display()))
}
