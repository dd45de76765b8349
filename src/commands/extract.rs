use crate::page_span::PageSpan;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;

    let span = PageSpan::parse(pages)?;
    let (start, end) = span.resolve(doc.page_count())?;

    let mut section = doc.extract_range(start, end)?;
    PdfDocument::save(&mut section, &output)?;

    println!(
        "Extracted pages {}-{} to {}",
        start,
        end,
        output.as_ref().display()
    );

    Ok(())
}
