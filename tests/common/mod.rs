#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flat outline description: nesting level (1-based), title, target page
/// (1-based; 0 means the bookmark carries no destination).
pub type OutlineSpec<'a> = (u32, &'a str, u32);

/// Build a minimal PDF with `num_pages` pages and an optional outline tree.
pub fn build_pdf(num_pages: u32, outline: &[OutlineSpec]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);

    if !outline.is_empty() {
        let outlines_id = attach_outline(&mut doc, &page_ids, outline);
        catalog.set("Outlines", Object::Reference(outlines_id));
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Turn a flat level-tagged list into linked outline dictionaries.
fn attach_outline(doc: &mut Document, page_ids: &[ObjectId], outline: &[OutlineSpec]) -> ObjectId {
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = (0..outline.len()).map(|_| doc.new_object_id()).collect();

    // Parent of each item, derived from the level sequence the same way a
    // reader would nest it.
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(outline.len());
    let mut stack: Vec<(u32, usize)> = Vec::new();
    let mut dicts: Vec<Dictionary> = Vec::with_capacity(outline.len());

    for (i, (level, title, page)) in outline.iter().enumerate() {
        while stack.last().is_some_and(|(l, _)| *l >= *level) {
            stack.pop();
        }
        parents.push(stack.last().map(|(_, idx)| *idx));
        stack.push((*level, i));

        let mut dict = Dictionary::from_iter(vec![(
            "Title",
            Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
        )]);
        if *page > 0 {
            let page_ref = page_ids[(*page as usize) - 1];
            dict.set(
                "Dest",
                Object::Array(vec![
                    Object::Reference(page_ref),
                    Object::Name(b"XYZ".to_vec()),
                    Object::Null,
                    Object::Null,
                    Object::Null,
                ]),
            );
        }
        dicts.push(dict);
    }

    let mut children: BTreeMap<Option<usize>, Vec<usize>> = BTreeMap::new();
    for (i, parent) in parents.iter().enumerate() {
        children.entry(*parent).or_default().push(i);
    }

    for (parent, kids) in &children {
        let parent_ref = match parent {
            Some(idx) => item_ids[*idx],
            None => outlines_id,
        };
        for (k, &i) in kids.iter().enumerate() {
            dicts[i].set("Parent", Object::Reference(parent_ref));
            if k > 0 {
                dicts[i].set("Prev", Object::Reference(item_ids[kids[k - 1]]));
            }
            if k + 1 < kids.len() {
                dicts[i].set("Next", Object::Reference(item_ids[kids[k + 1]]));
            }
        }
        if let Some(idx) = parent {
            dicts[*idx].set("First", Object::Reference(item_ids[kids[0]]));
            dicts[*idx].set("Last", Object::Reference(item_ids[*kids.last().unwrap()]));
        }
    }

    let mut outlines = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Outlines".to_vec())),
        ("Count", Object::Integer(outline.len() as i64)),
    ]);
    if let Some(roots) = children.get(&None) {
        outlines.set("First", Object::Reference(item_ids[roots[0]]));
        outlines.set("Last", Object::Reference(item_ids[*roots.last().unwrap()]));
    }

    for (i, dict) in dicts.into_iter().enumerate() {
        doc.objects.insert(item_ids[i], Object::Dictionary(dict));
    }
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));

    outlines_id
}

/// Write PDF bytes into a scratch directory under the given file name.
pub fn write_pdf(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Page count of a saved PDF file.
pub fn page_count_of(path: &Path) -> u32 {
    Document::load(path).unwrap().get_pages().len() as u32
}
