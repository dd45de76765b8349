use anyhow::{anyhow, Result};

/// A contiguous run of pages, 1-based and inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    start: u32,
    end: SpanEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanEnd {
    Page(u32),
    Last,
}

impl PageSpan {
    /// Parse a span like "7", "3-9" or "4-end".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("empty page span"));
        }

        let (start_str, end_str) = match s.split_once('-') {
            Some((start, end)) => (start, Some(end)),
            None => (s, None),
        };

        let start = parse_page(start_str)?;
        let end = match end_str {
            None => SpanEnd::Page(start),
            Some(e) if e.trim().eq_ignore_ascii_case("end") => SpanEnd::Last,
            Some(e) => SpanEnd::Page(parse_page(e)?),
        };

        Ok(PageSpan { start, end })
    }

    /// Resolve against a document's page count into concrete bounds.
    pub fn resolve(&self, page_count: u32) -> Result<(u32, u32)> {
        let end = match self.end {
            SpanEnd::Page(p) => p,
            SpanEnd::Last => page_count,
        };

        if self.start > end {
            return Err(anyhow!("span starts at {} but ends at {}", self.start, end));
        }
        if end > page_count {
            return Err(anyhow!(
                "page {} exceeds the document's {} pages",
                end,
                page_count
            ));
        }

        Ok((self.start, end))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    let s = s.trim();
    let page: u32 = s.parse().map_err(|_| anyhow!("invalid page number: {s}"))?;
    if page == 0 {
        return Err(anyhow!("page numbers start at 1"));
    }
    Ok(page)
}
