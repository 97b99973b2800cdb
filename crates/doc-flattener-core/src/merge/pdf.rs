use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::path::Path;

use crate::error::Error;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against malformed page trees whose `Parent` links loop.
const MAX_TREE_DEPTH: usize = 64;

/// Builds one fresh document out of the pages of several others.
///
/// Each imported document is renumbered above everything imported before it,
/// its pages are detached from their original page tree (copying down any
/// inherited attributes), and its remaining objects are moved in. The source
/// catalog, page tree nodes and outlines are dropped; [`PdfAssembler::finish`]
/// writes a new catalog and a flat page tree.
pub struct PdfAssembler {
    document: Document,
    pages: Vec<(ObjectId, Dictionary)>,
    next_id: u32,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAssembler {
    pub fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            pages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn import_file(&mut self, path: &Path) -> Result<usize, Error> {
        let document = Document::load(path)?;
        self.import(document)
    }

    /// Append every page of `source`. On error nothing from `source` is kept.
    pub fn import(&mut self, mut source: Document) -> Result<usize, Error> {
        if source.is_encrypted() {
            return Err(Error::Other("document is encrypted".to_string()));
        }

        source.renumber_objects_with(self.next_id);

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(Error::Other("document has no pages".to_string()));
        }

        let mut pages = Vec::with_capacity(page_ids.len());
        for page_id in &page_ids {
            let page = source.get_dictionary(*page_id)?.clone();
            pages.push((*page_id, with_inherited_attributes(&source, page)));
        }

        self.next_id = source.max_id + 1;
        for (id, object) in source.objects {
            let structural = is_structural(&object);
            if !structural {
                self.document.objects.insert(id, object);
            }
        }

        let imported = pages.len();
        self.pages.extend(pages);
        Ok(imported)
    }

    /// Write the page tree and catalog. Returns the document and its page count.
    pub fn finish(mut self) -> Result<(Document, usize), Error> {
        if self.pages.is_empty() {
            return Err(Error::Other("no pages were imported".to_string()));
        }

        let pages_id: ObjectId = (self.next_id, 0);
        let catalog_id: ObjectId = (self.next_id + 1, 0);
        let page_count = self.pages.len();

        let mut kids = Vec::with_capacity(page_count);
        for (id, mut page) in self.pages {
            page.set("Parent", pages_id);
            self.document.objects.insert(id, Object::Dictionary(page));
            kids.push(Object::Reference(id));
        }

        self.document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );
        self.document.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_id,
            }),
        );
        self.document.trailer.set("Root", catalog_id);
        self.document.max_id = catalog_id.0;

        Ok((self.document, page_count))
    }
}

/// Objects that belong to a source's document structure rather than its content.
fn is_structural(object: &Object) -> bool {
    matches!(
        object.type_name().unwrap_or(""),
        "Catalog" | "Pages" | "Page" | "Outlines" | "Outline"
    )
}

fn with_inherited_attributes(source: &Document, mut page: Dictionary) -> Dictionary {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = source.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    page
}
