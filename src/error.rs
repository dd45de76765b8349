use std::path::PathBuf;
use thiserror::Error;

/// The document could not be opened at all. Fatal: nothing is written.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("document has no pages: {0}")]
    Empty(PathBuf),
}

/// A split could not start. Raised before any file is written; once the walk
/// begins, per-node failures are downgraded to report warnings instead.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("table of contents has no chapters")]
    EmptyToc,

    #[error("failed to create output directory {path}: {source}")]
    BookDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single section could not be materialized. Recovered locally: the node
/// is skipped and its siblings continue.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("start page {start} is out of range (document has {page_count} pages)")]
    PageOutOfBounds { start: u32, page_count: u32 },

    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    Dir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
