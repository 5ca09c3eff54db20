//! Integration tests for the lopdf-backed document and the splitter.

mod common;

use common::{nested_pdf, page_width, page_widths, sample_pdf};
use lopdf::Object;
use pdfriffle::{interleave, Error, PageSequence, PdfDocument, Splitter};

fn reload(doc: &mut PdfDocument) -> PdfDocument {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    PdfDocument::load_mem(&bytes).unwrap()
}

#[test]
fn test_load_flat_document() {
    let doc = PdfDocument::from_lopdf(sample_pdf(4)).unwrap();

    assert_eq!(doc.page_count(), 4);
    assert_eq!(page_widths(&doc), vec![600, 601, 602, 603]);
    assert_eq!(doc.version(), "1.5");
}

#[test]
fn test_nested_tree_is_flattened_with_inherited_attributes() {
    let mut doc = PdfDocument::from_lopdf(nested_pdf(6)).unwrap();
    assert_eq!(page_widths(&doc), (0..6).map(page_width).collect::<Vec<_>>());

    let rotations: Vec<Option<i64>> = doc
        .page_ids()
        .iter()
        .map(|id| {
            let page = doc.raw_doc().get_dictionary(*id).unwrap();
            page.get(b"Rotate").ok().and_then(|r| r.as_i64().ok())
        })
        .collect();
    assert_eq!(
        rotations,
        vec![Some(90), Some(90), Some(90), None, None, None]
    );

    let reloaded = reload(&mut doc);
    assert_eq!(reloaded.page_count(), 6);
    for id in reloaded.page_ids() {
        let page = reloaded.raw_doc().get_dictionary(*id).unwrap();
        assert!(page.has(b"Resources"));
    }
}

#[test]
fn test_insert_after_duplicates_reference() {
    let mut doc = PdfDocument::from_lopdf(sample_pdf(4)).unwrap();
    let page = doc.page_at(3).unwrap();
    doc.insert_after(page, 0).unwrap();

    assert_eq!(doc.page_count(), 5);
    assert_eq!(page_widths(&doc), vec![600, 603, 601, 602, 603]);
    assert_eq!(doc.page_ids()[1], doc.page_ids()[4]);
}

#[test]
fn test_insert_after_out_of_range() {
    let mut doc = PdfDocument::from_lopdf(sample_pdf(4)).unwrap();
    let page = doc.page_at(0).unwrap();

    assert!(matches!(
        doc.insert_after(page, 4),
        Err(Error::PageOutOfRange(4, 4))
    ));
    assert!(matches!(doc.page_at(9), Err(Error::PageOutOfRange(9, 4))));
}

#[test]
fn test_interleaved_document_survives_save_and_load() {
    let mut doc = PdfDocument::from_lopdf(sample_pdf(4)).unwrap();
    let report = interleave(&mut doc, 4).unwrap();
    assert_eq!(report.interleaved_count, 6);

    let reloaded = reload(&mut doc);

    assert_eq!(reloaded.page_count(), 6);
    assert_eq!(page_widths(&reloaded), vec![600, 602, 601, 603, 602, 603]);
}

#[test]
fn test_saved_tree_is_flat_with_correct_count() {
    let mut doc = PdfDocument::from_lopdf(nested_pdf(4)).unwrap();
    let reloaded = reload(&mut doc);

    let catalog_id = reloaded
        .raw_doc()
        .trailer
        .get(b"Root")
        .unwrap()
        .as_reference()
        .unwrap();
    let catalog = reloaded.raw_doc().get_dictionary(catalog_id).unwrap();
    let root_id = catalog.get(b"Pages").unwrap().as_reference().unwrap();
    let root = reloaded.raw_doc().get_dictionary(root_id).unwrap();

    assert_eq!(root.get(b"Count").unwrap().as_i64().unwrap(), 4);
    let kids = root.get(b"Kids").unwrap().as_array().unwrap();
    assert_eq!(kids.len(), 4);
    for kid in kids {
        let page = reloaded
            .raw_doc()
            .get_dictionary(kid.as_reference().unwrap())
            .unwrap();
        assert!(matches!(page.get(b"Parent"), Ok(Object::Reference(id)) if *id == root_id));
    }
}

#[test]
fn test_split_keeps_riffle_prefix() {
    let mut doc = PdfDocument::from_lopdf(sample_pdf(6)).unwrap();
    interleave(&mut doc, 6).unwrap();
    let interleaved = reload(&mut doc);

    let parts = Splitter::new()
        .with_start_page(1)
        .with_end_page(6)
        .with_split_at_page(7)
        .split(&interleaved)
        .unwrap();

    assert_eq!(parts.len(), 1);
    assert_eq!(page_widths(&parts[0]), vec![600, 603, 601, 604, 602, 605]);
}

#[test]
fn test_split_output_drops_unused_pages() {
    let doc = PdfDocument::from_lopdf(sample_pdf(6)).unwrap();
    let mut parts = Splitter::new().with_split_at_page(2).split(&doc).unwrap();
    assert_eq!(parts.len(), 3);

    let mut bytes = Vec::new();
    parts[1].save_to(&mut bytes).unwrap();
    let written = lopdf::Document::load_mem(&bytes).unwrap();

    assert_eq!(written.get_pages().len(), 2);
    let page_objects = written
        .objects
        .values()
        .filter(|obj| {
            obj.as_dict()
                .ok()
                .and_then(|d| d.get(b"Type").and_then(Object::as_name).ok())
                .map(|t| t == b"Page")
                .unwrap_or(false)
        })
        .count();
    assert_eq!(page_objects, 2);
}

#[test]
fn test_missing_pages_root_is_corrupted() {
    let mut doc = sample_pdf(4);
    doc.trailer.remove(b"Root");

    assert!(matches!(
        PdfDocument::from_lopdf(doc),
        Err(Error::Corrupted(_))
    ));
}

#[test]
fn test_encrypted_document_is_rejected() {
    let mut doc = sample_pdf(4);
    let encrypt_id = doc.add_object(lopdf::dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2
    });
    doc.trailer.set("Encrypt", encrypt_id);

    assert!(matches!(
        PdfDocument::from_lopdf(doc),
        Err(Error::Encrypted)
    ));
}

#[test]
fn test_non_reference_kid_is_corrupted() {
    let mut doc = sample_pdf(4);
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let root_id = doc
        .get_dictionary(catalog_id)
        .unwrap()
        .get(b"Pages")
        .unwrap()
        .as_reference()
        .unwrap();
    let root = doc.get_dictionary_mut(root_id).unwrap();
    let mut kids = root.get(b"Kids").unwrap().as_array().unwrap().clone();
    kids.push(Object::Integer(7));
    root.set("Kids", Object::Array(kids));

    assert!(matches!(
        PdfDocument::from_lopdf(doc),
        Err(Error::Corrupted(_))
    ));
}

#[test]
fn test_not_a_pdf() {
    assert!(PdfDocument::load_mem(b"definitely not a pdf").is_err());
}
