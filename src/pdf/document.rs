use lopdf::{Document, Object};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ExtractError, LoadError};

pub struct PdfDocument {
    pub doc: Document,
    path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let doc = Document::load(path).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = PdfDocument {
            doc,
            path: path.to_path_buf(),
        };
        let pages = loaded.page_count();
        if pages == 0 {
            return Err(LoadError::Empty(path.to_path_buf()));
        }
        info!("loaded {} ({} pages)", path.display(), pages);
        Ok(loaded)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stem of the source file name, used to name the output book directory.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract pages `start..=end` (1-based, inclusive) into a new document.
    ///
    /// `end` is clamped to the last page; `start` must land on an existing
    /// page. The extract is built by deleting the complement and pruning
    /// objects the kept pages no longer reference.
    pub fn extract_range(&self, start: u32, end: u32) -> Result<Document, ExtractError> {
        let total = self.page_count();
        if start == 0 || start > total {
            return Err(ExtractError::PageOutOfBounds {
                start,
                page_count: total,
            });
        }
        let end = end.min(total);

        let mut new_doc = self.doc.clone();
        let pages_to_delete: Vec<u32> = (1..=total).filter(|p| *p < start || *p > end).collect();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();
        Ok(new_doc)
    }

    /// Save a document to a file.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<(), ExtractError> {
        let path = path.as_ref();
        doc.save(path).map_err(|source| ExtractError::Save {
            path: path.to_path_buf(),
            source: lopdf::Error::IO(source),
        })?;
        Ok(())
    }

    /// Metadata from the document info dictionary.
    pub fn info(&self) -> PdfInfo {
        let mut info = PdfInfo::default();

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = get_string_from_dict(dict, b"Title");
                info.author = get_string_from_dict(dict, b"Author");
                info.subject = get_string_from_dict(dict, b"Subject");
                info.keywords = get_string_from_dict(dict, b"Keywords");
            }
        }

        info.page_count = self.page_count();
        info
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => Some(super::decode_pdf_string(bytes)),
        _ => None,
    })
}
