//! PDF document backed by lopdf.
//!
//! On load the page tree is flattened into an ordered list of page object
//! references. Reordering works on that list only; the tree in the
//! underlying `lopdf::Document` is rewritten from it when the document is
//! saved.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

use super::sequence::PageSequence;

/// Page identifier: (object number, generation number).
pub type PageId = ObjectId;

/// Page attributes a `Page` may inherit from its `Pages` ancestors.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Nesting limit for `Pages` nodes.
const MAX_TREE_DEPTH: usize = 256;

/// An open PDF document with a flat, mutable page order.
///
/// A page reference may occur at more than one position. That is the state
/// an interleaved document is in until it gets split.
pub struct PdfDocument {
    doc: LopdfDocument,
    pages_root: ObjectId,
    pages: Vec<PageId>,
}

impl PdfDocument {
    /// Load from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::from_lopdf(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_mem(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_lopdf(doc)
    }

    /// Wrap an already parsed `lopdf::Document`.
    ///
    /// Inheritable attributes are copied down onto every page so the page
    /// tree can later be rewritten as a single flat `Pages` node.
    ///
    /// Encrypted documents are rejected: their streams would be rewritten
    /// without being decrypted first.
    pub fn from_lopdf(mut doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages_root = pages_root_id(&doc)?;

        let mut pages = Vec::new();
        let mut visited = HashSet::new();
        collect_pages(
            &mut doc,
            pages_root,
            &Dictionary::new(),
            0,
            &mut visited,
            &mut pages,
        )?;

        log::debug!(
            "opened PDF {} with {} pages (root {:?})",
            doc.version,
            pages.len(),
            pages_root
        );

        Ok(Self {
            doc,
            pages_root,
            pages,
        })
    }

    /// Number of page positions.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page references in their current order.
    pub fn page_ids(&self) -> &[PageId] {
        &self.pages
    }

    /// PDF header version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Direct access to the underlying `lopdf::Document`.
    ///
    /// The page tree inside it reflects the last save, not pending reorders.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Compress all uncompressed streams before the next save.
    pub fn compress(&mut self) {
        self.doc.compress();
    }

    /// Write the current page order to `path`.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.sync_page_tree()?;
        self.doc.save(path)?;
        Ok(())
    }

    /// Write the current page order to any writer.
    pub fn save_to<W: Write>(&mut self, target: &mut W) -> Result<()> {
        self.sync_page_tree()?;
        self.doc.save_to(target)?;
        Ok(())
    }

    /// Close the document, releasing its objects.
    pub fn close(self) {
        log::debug!("closing document with {} pages", self.pages.len());
    }

    /// A copy of this document restricted to `pages`, in that order.
    pub(crate) fn with_pages(&self, pages: Vec<PageId>) -> Self {
        Self {
            doc: self.doc.clone(),
            pages_root: self.pages_root,
            pages,
        }
    }

    /// Rewrite the root `Pages` node from the flat page list and drop
    /// whatever is no longer reachable.
    fn sync_page_tree(&mut self) -> Result<()> {
        let kids: Vec<Object> = self.pages.iter().map(|id| Object::Reference(*id)).collect();
        let count = kids.len() as i64;

        let root = self.doc.get_dictionary_mut(self.pages_root)?;
        root.set("Kids", Object::Array(kids));
        root.set("Count", Object::Integer(count));

        let mut seen = HashSet::new();
        for id in &self.pages {
            if seen.insert(*id) {
                self.doc
                    .get_dictionary_mut(*id)?
                    .set("Parent", Object::Reference(self.pages_root));
            }
        }

        let pruned = self.doc.prune_objects();
        if !pruned.is_empty() {
            log::debug!("pruned {} unreachable objects", pruned.len());
        }
        Ok(())
    }
}

impl PageSequence for PdfDocument {
    type Page = PageId;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_at(&self, index: usize) -> Result<PageId> {
        self.pages
            .get(index)
            .copied()
            .ok_or(Error::PageOutOfRange(index, self.pages.len()))
    }

    fn insert_after(&mut self, page: PageId, position: usize) -> Result<()> {
        if position >= self.pages.len() {
            return Err(Error::PageOutOfRange(position, self.pages.len()));
        }
        self.pages.insert(position + 1, page);
        Ok(())
    }
}

/// Resolve `/Root /Pages` from the trailer.
fn pages_root_id(doc: &LopdfDocument) -> Result<ObjectId> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| Error::Corrupted("trailer has no /Root reference".to_string()))?;

    let catalog = doc
        .get_dictionary(catalog_id)
        .map_err(|e| Error::Corrupted(format!("catalog {:?}: {}", catalog_id, e)))?;

    catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| Error::Corrupted("catalog has no /Pages reference".to_string()))
}

/// Depth-first walk of the page tree, appending leaves in document order.
///
/// Leaves may repeat; interior nodes may not.
fn collect_pages(
    doc: &mut LopdfDocument,
    node_id: ObjectId,
    inherited: &Dictionary,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<PageId>,
) -> Result<()> {
    if depth > MAX_TREE_DEPTH {
        return Err(Error::Corrupted(format!(
            "page tree deeper than {} levels",
            MAX_TREE_DEPTH
        )));
    }

    let node = doc
        .get_dictionary(node_id)
        .map_err(|e| Error::Corrupted(format!("page tree node {:?}: {}", node_id, e)))?;

    if !node.has(b"Kids") {
        if !inherited.is_empty() {
            let page = doc.get_dictionary_mut(node_id)?;
            for (key, value) in inherited.iter() {
                if !page.has(key) {
                    page.set(key.clone(), value.clone());
                }
            }
        }
        out.push(node_id);
        return Ok(());
    }

    if !visited.insert(node_id) {
        return Err(Error::Corrupted(format!(
            "page tree node {:?} is reachable twice",
            node_id
        )));
    }

    let mut scope = inherited.clone();
    for key in INHERITABLE_KEYS {
        if let Ok(value) = node.get(key) {
            scope.set(key.to_vec(), value.clone());
        }
    }

    let kids = node
        .get(b"Kids")
        .and_then(Object::as_array)
        .map_err(|e| Error::Corrupted(format!("page tree node {:?}: {}", node_id, e)))?
        .iter()
        .map(|kid| {
            kid.as_reference().map_err(|_| {
                Error::Corrupted(format!(
                    "page tree node {:?} has a non-reference kid",
                    node_id
                ))
            })
        })
        .collect::<Result<Vec<ObjectId>>>()?;

    for kid in kids {
        collect_pages(doc, kid, &scope, depth + 1, visited, out)?;
    }
    Ok(())
}
