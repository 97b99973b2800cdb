#![allow(dead_code)]

use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};

use doc_flattener_core::model::{CandidateFile, DirectoryPath, EligibleFileSet};

/// Serialize a small PDF with `pages` pages. Each page draws
/// `"{label} page {n}"`; an unreferenced stream of `padding` bytes inflates
/// the file to a chosen size.
pub fn pdf_bytes(label: &str, pages: usize, padding: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td ({} page {}) Tj ET", label, n);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ],
        }),
    );

    if padding > 0 {
        doc.add_object(Stream::new(dictionary! {}, vec![b'x'; padding]));
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Write a PDF of at least `min_bytes` bytes and return its path.
pub fn write_pdf(path: &Path, label: &str, pages: usize, min_bytes: usize) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let bytes = pdf_bytes(label, pages, min_bytes);
    assert!(bytes.len() >= min_bytes);
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

pub fn write_garbage(path: &Path, len: usize) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0x5Au8; len]).unwrap();
    path.to_path_buf()
}

/// Text drawn on each page, in page order.
pub fn page_texts(path: &Path) -> Vec<String> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| String::from_utf8_lossy(&doc.get_page_content(*page_id).unwrap()).into_owned())
        .collect()
}

pub fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

pub fn file_set(paths: &[PathBuf]) -> EligibleFileSet {
    let files = paths
        .iter()
        .map(|path| CandidateFile {
            name: path.file_name().unwrap().to_string_lossy().into_owned(),
            path: path.clone(),
            size_bytes: fs::metadata(path).unwrap().len(),
        })
        .collect();
    EligibleFileSet::new(DirectoryPath::root(), files)
}

pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
