//! Shared helpers for pdfjoin integration tests.
//!
//! Fixtures are synthesized with lopdf rather than checked in: each page of
//! a generated document gets a distinct MediaBox width so tests can observe
//! page order in a joined output.

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};

/// Build an in-memory document with `pages` pages.
///
/// Page `i` (0-indexed) gets MediaBox width `width_base + i`.
pub fn sample_document(pages: usize, width_base: i64) -> Document {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..pages {
        let width = width_base + i as i64;
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated document to `dir/name` and return its path.
pub fn write_sample_pdf(dir: &Path, name: &str, pages: usize, width_base: i64) -> PathBuf {
    let path = dir.join(name);
    let mut doc = sample_document(pages, width_base);
    doc.save(&path).expect("failed to write sample PDF");
    path
}

/// MediaBox widths of a document's pages, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let Ok(Object::Dictionary(dict)) = doc.get_object(page_id) else {
                panic!("page is not a dictionary");
            };
            let Ok(Object::Array(media_box)) = dict.get(b"MediaBox") else {
                panic!("page has no MediaBox");
            };
            media_box[2].as_i64().expect("MediaBox width is not an integer")
        })
        .collect()
}

/// Load a written PDF back for inspection.
pub fn load_written(path: &Path) -> Document {
    Document::load(path).expect("failed to load written PDF")
}
