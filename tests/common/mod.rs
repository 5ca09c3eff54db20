//! Synthetic PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use pdfriffle::PdfDocument;

/// MediaBox width given to the page at `index`, used to tell pages apart.
pub fn page_width(index: usize) -> i64 {
    600 + index as i64
}

fn add_page(doc: &mut Document, parent: ObjectId, index: usize) -> ObjectId {
    let content = format!("BT /F1 24 Tf 72 720 Td (Page {}) Tj ET", index);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(page_width(index)),
            Object::Integer(792),
        ]),
    })
}

fn finish(mut doc: Document, pages_id: ObjectId, pages: lopdf::Dictionary) -> Document {
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn font_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    })
}

/// A document with `page_count` pages under a single `Pages` node.
pub fn sample_pdf(page_count: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = font_resources(&mut doc);

    let kids: Vec<Object> = (0..page_count)
        .map(|i| Object::Reference(add_page(&mut doc, pages_id, i)))
        .collect();

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
    };
    finish(doc, pages_id, pages)
}

/// A document whose pages hang off two intermediate `Pages` nodes. The
/// first node carries `/Rotate 90` for its pages to inherit.
pub fn nested_pdf(page_count: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let resources_id = font_resources(&mut doc);
    let split = page_count / 2;

    let mut branches = Vec::new();
    for (range, rotate) in [(0..split, Some(90)), (split..page_count, None)] {
        let branch_id = doc.new_object_id();
        let kids: Vec<Object> = range
            .clone()
            .map(|i| Object::Reference(add_page(&mut doc, branch_id, i)))
            .collect();
        let mut branch = dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => kids,
            "Count" => range.len() as i64,
        };
        if let Some(angle) = rotate {
            branch.set("Rotate", Object::Integer(angle));
        }
        doc.objects.insert(branch_id, Object::Dictionary(branch));
        branches.push(Object::Reference(branch_id));
    }

    let root = dictionary! {
        "Type" => "Pages",
        "Kids" => branches,
        "Count" => page_count as i64,
        "Resources" => resources_id,
    };
    finish(doc, root_id, root)
}

/// Write a flat sample document to `path`.
pub fn write_sample_pdf(path: &Path, page_count: usize) {
    sample_pdf(page_count).save(path).unwrap();
}

/// MediaBox widths of `doc`'s pages in their current order.
pub fn page_widths(doc: &PdfDocument) -> Vec<i64> {
    doc.page_ids()
        .iter()
        .map(|id| {
            let page = doc.raw_doc().get_dictionary(*id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// Widths the riffle of `page_count` pages should come out with.
pub fn riffled_widths(page_count: usize) -> Vec<i64> {
    pdfriffle::interleave::riffle_order(page_count)
        .unwrap()
        .into_iter()
        .map(page_width)
        .collect()
}
