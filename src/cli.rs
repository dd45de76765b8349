use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tocsplit")]
#[command(about = "Split PDFs into per-chapter files driven by their table of contents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace/debug/info/warn/error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display PDF metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Print the table of contents (builtin bookmarks, or a single-chapter
    /// fallback when the document has none)
    Toc {
        /// PDF file to inspect
        path: PathBuf,

        /// Emit the tree as JSON instead of an indented listing
        #[arg(long)]
        json: bool,
    },

    /// Split a PDF into one file per TOC section, chapters as nested folders
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Directory the book's folder tree is created under
        #[arg(short, long)]
        output_dir: PathBuf,

        /// JSON file with an edited TOC tree to use instead of the
        /// document's builtin bookmarks
        #[arg(long)]
        toc: Option<PathBuf>,
    },

    /// Extract a contiguous page span to a new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Page span (e.g. "3-9", "7", "4-end")
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}
