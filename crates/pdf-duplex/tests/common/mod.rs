#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;

/// Build a document whose page N has the content stream `% page N`
pub fn create_test_pdf(num_pages: usize) -> Document {
    create_test_pdf_with_box(num_pages, [0, 0, 612, 792])
}

pub fn create_test_pdf_with_box(num_pages: usize, media_box: [i64; 4]) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for page in 1..=num_pages {
        let content = format!("% page {}\nq Q", page);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(media_box.iter().map(|&v| Object::Integer(v)).collect()),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn write_test_pdf(path: &Path, num_pages: usize) {
    let mut doc = create_test_pdf(num_pages);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

/// Source page numbers placed on each output sheet, left to right
pub fn sheet_pages(doc: &Document) -> Vec<Vec<u32>> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let Ok(xobjects) = resources.get(b"XObject").and_then(Object::as_dict) else {
                return Vec::new();
            };

            ["P0", "P1"]
                .iter()
                .filter_map(|name| xobjects.get(name.as_bytes()).ok())
                .map(|obj| {
                    let id = obj.as_reference().unwrap();
                    let stream = doc.get_object(id).unwrap().as_stream().unwrap();
                    page_number_of(&stream.content)
                })
                .collect()
        })
        .collect()
}

fn page_number_of(content: &[u8]) -> u32 {
    let text = String::from_utf8_lossy(content);
    let line = text.lines().next().unwrap();
    line.trim_start_matches("% page ").trim().parse().unwrap()
}

/// MediaBox width and height of an output page
pub fn page_size(doc: &Document, page_number: u32) -> (f32, f32) {
    let page_id = doc.get_pages()[&page_number];
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    let number = |obj: &Object| match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("unexpected MediaBox entry {:?}", other),
    };
    (
        number(&media_box[2]) - number(&media_box[0]),
        number(&media_box[3]) - number(&media_box[1]),
    )
}

/// Decoded content stream of an output page
pub fn page_content(doc: &Document, page_number: u32) -> String {
    let page_id = doc.get_pages()[&page_number];
    let content = doc.get_page_content(page_id).unwrap();
    String::from_utf8(content).unwrap()
}
