use lopdf::{Document, Object, ObjectId};
use tracing::warn;

/// One bookmark as the document outline exposes it: nesting level (1 =
/// outermost), title, and destination page (1-based) when resolvable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u32,
    pub title: String,
    pub page: Option<u32>,
}

/// Outline items nested deeper than this are dropped rather than recursed
/// into, so a crafted document cannot exhaust the call stack.
const MAX_OUTLINE_DEPTH: u32 = 64;

/// Read the document outline (bookmarks) as a flat list in document order.
///
/// Returns an empty list when the catalog has no usable `Outlines` entry.
pub fn read_outline(doc: &Document) -> Vec<OutlineEntry> {
    let Ok(catalog) = doc.catalog() else {
        return Vec::new();
    };

    let outlines_ref = match catalog.get(b"Outlines") {
        Ok(Object::Reference(r)) => *r,
        _ => return Vec::new(),
    };

    let outlines = match doc.get_dictionary(outlines_ref) {
        Ok(d) => d,
        Err(_) => return Vec::new(),
    };

    let first_ref = match outlines.get(b"First") {
        Ok(Object::Reference(r)) => *r,
        _ => return Vec::new(),
    };

    let page_map = build_page_map(doc);
    let mut entries = Vec::new();
    collect_outline_items(doc, first_ref, &page_map, 1, &mut entries);
    entries
}

fn collect_outline_items(
    doc: &Document,
    first_id: ObjectId,
    page_map: &[(ObjectId, u32)],
    level: u32,
    out: &mut Vec<OutlineEntry>,
) {
    if level > MAX_OUTLINE_DEPTH {
        warn!("outline nested deeper than {MAX_OUTLINE_DEPTH} levels; dropping deeper items");
        return;
    }

    let mut current_id = Some(first_id);

    while let Some(id) = current_id {
        let dict = match doc.get_dictionary(id) {
            Ok(d) => d,
            Err(_) => break,
        };

        let title = match dict.get(b"Title") {
            Ok(Object::String(bytes, _)) => super::decode_pdf_string(bytes),
            _ => "Untitled".to_string(),
        };

        let page = destination_page(doc, dict, page_map);
        out.push(OutlineEntry { level, title, page });

        if let Ok(Object::Reference(child_ref)) = dict.get(b"First") {
            collect_outline_items(doc, *child_ref, page_map, level + 1, out);
        }

        current_id = match dict.get(b"Next") {
            Ok(Object::Reference(r)) => Some(*r),
            _ => None,
        };
    }
}

fn destination_page(
    doc: &Document,
    dict: &lopdf::Dictionary,
    page_map: &[(ObjectId, u32)],
) -> Option<u32> {
    // Direct destination
    if let Ok(dest) = dict.get(b"Dest") {
        return resolve_destination(doc, dest, page_map);
    }

    // GoTo action behind a reference
    if let Ok(Object::Reference(action_ref)) = dict.get(b"A") {
        if let Ok(action_dict) = doc.get_dictionary(*action_ref) {
            if let Ok(Object::Name(action_type)) = action_dict.get(b"S") {
                if action_type == b"GoTo" {
                    if let Ok(dest) = action_dict.get(b"D") {
                        return resolve_destination(doc, dest, page_map);
                    }
                }
            }
        }
    }

    // Inline GoTo action dictionary
    if let Ok(Object::Dictionary(action_dict)) = dict.get(b"A") {
        if let Ok(Object::Name(action_type)) = action_dict.get(b"S") {
            if action_type == b"GoTo" {
                if let Ok(dest) = action_dict.get(b"D") {
                    return resolve_destination(doc, dest, page_map);
                }
            }
        }
    }

    None
}

fn resolve_destination(doc: &Document, dest: &Object, page_map: &[(ObjectId, u32)]) -> Option<u32> {
    match dest {
        Object::String(name, _) | Object::Name(name) => {
            resolve_named_destination(doc, name, page_map)
        }
        Object::Array(arr) => page_from_dest_array(arr, page_map),
        Object::Reference(r) => {
            if let Ok(obj) = doc.get_object(*r) {
                resolve_destination(doc, obj, page_map)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn resolve_named_destination(
    doc: &Document,
    name: &[u8],
    page_map: &[(ObjectId, u32)],
) -> Option<u32> {
    if let Ok(catalog) = doc.catalog() {
        // Names/Dests name tree
        if let Ok(Object::Reference(names_ref)) = catalog.get(b"Names") {
            if let Ok(names_dict) = doc.get_dictionary(*names_ref) {
                if let Ok(Object::Reference(dests_ref)) = names_dict.get(b"Dests") {
                    if let Some(page) = search_name_tree(doc, *dests_ref, name, page_map) {
                        return Some(page);
                    }
                }
            }
        }

        // Older-style Dests dictionary
        if let Ok(Object::Reference(dests_ref)) = catalog.get(b"Dests") {
            if let Ok(dests_dict) = doc.get_dictionary(*dests_ref) {
                if let Ok(dest) = dests_dict.get(name) {
                    return resolve_destination(doc, dest, page_map);
                }
            }
        }
    }

    None
}

fn search_name_tree(
    doc: &Document,
    node_id: ObjectId,
    name: &[u8],
    page_map: &[(ObjectId, u32)],
) -> Option<u32> {
    let dict = doc.get_dictionary(node_id).ok()?;

    // Leaf node
    if let Ok(Object::Array(names)) = dict.get(b"Names") {
        for chunk in names.chunks(2) {
            if chunk.len() == 2 {
                if let Object::String(key, _) = &chunk[0] {
                    if key == name {
                        return resolve_destination(doc, &chunk[1], page_map);
                    }
                }
            }
        }
    }

    // Intermediate node
    if let Ok(Object::Array(kids)) = dict.get(b"Kids") {
        for kid in kids {
            if let Object::Reference(kid_ref) = kid {
                if let Some(page) = search_name_tree(doc, *kid_ref, name, page_map) {
                    return Some(page);
                }
            }
        }
    }

    None
}

fn page_from_dest_array(arr: &[Object], page_map: &[(ObjectId, u32)]) -> Option<u32> {
    // Destination array format: [page_ref, /XYZ, left, top, zoom] or similar
    if let Some(Object::Reference(page_ref)) = arr.first() {
        for (id, page_num) in page_map {
            if id == page_ref {
                return Some(*page_num);
            }
        }
    }
    None
}

fn build_page_map(doc: &Document) -> Vec<(ObjectId, u32)> {
    let mut pages: Vec<_> = doc.get_pages().into_iter().collect();
    pages.sort_by_key(|(num, _)| *num);
    pages.into_iter().map(|(num, id)| (id, num)).collect()
}
