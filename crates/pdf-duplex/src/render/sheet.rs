//! Landscape 2-up sheet rendering

use super::xobject::{PageBox, create_page_xobject, get_page_box};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};

/// Render imposed sheets into a new document, one landscape page per sheet.
///
/// Every sheet is `2 × width` by `height` of the source's first page. The
/// left page sits at the origin and the right page is shifted by one page
/// width. Blank halves and blank sheets carry no content.
pub fn render_sheets(source: &Document, sheets: &[ImposedSheet]) -> Result<Document> {
    let source_pages = source.get_pages();
    let reference = reference_page_box(source, &source_pages)?;

    let sheet_width = reference.width * 2.0;
    let sheet_height = reference.height;

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::with_capacity(sheets.len());
    let mut cache: HashMap<ObjectId, ObjectId> = HashMap::new();

    for sheet in sheets {
        let halves = [(sheet.left, 0.0), (sheet.right, reference.width)];
        let mut content_ops = String::new();
        let mut xobjects = Dictionary::new();

        for (slot, (page, offset_x)) in halves.into_iter().enumerate() {
            let Some(page_number) = page else {
                continue;
            };
            let page_id = *source_pages.get(&page_number).ok_or_else(|| {
                DuplexError::Render(format!(
                    "Page {} is not in the source document ({} pages)",
                    page_number,
                    source_pages.len()
                ))
            })?;

            let page_box = get_page_box(source, page_id)?;
            let xobject_id = create_page_xobject(&mut output, source, page_id, &mut cache)?;
            let name = format!("P{}", slot);
            xobjects.set(name.as_bytes(), Object::Reference(xobject_id));
            content_ops.push_str(&placement_command(&name, &page_box, offset_x));
        }

        let page_id = add_sheet_page(
            &mut output,
            pages_tree_id,
            sheet_width,
            sheet_height,
            content_ops,
            xobjects,
        );
        page_refs.push(Object::Reference(page_id));
    }

    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// The first page's box sizes every sheet of the document
fn reference_page_box(source: &Document, pages: &BTreeMap<u32, ObjectId>) -> Result<PageBox> {
    let (_, &first_id) = pages.iter().next().ok_or_else(|| {
        DuplexError::Render("Source document has no pages to size the sheets from".to_string())
    })?;
    let page_box = get_page_box(source, first_id)?;

    if !(page_box.width > 0.0 && page_box.height > 0.0) {
        return Err(DuplexError::Render(format!(
            "Unsupported page geometry {}x{}",
            page_box.width, page_box.height
        )));
    }
    Ok(page_box)
}

/// Content stream command placing a page XObject at `offset_x`.
///
/// The form's BBox is the source MediaBox, so its origin is moved onto the
/// sheet's half.
fn placement_command(name: &str, page_box: &PageBox, offset_x: f32) -> String {
    let tx = offset_x - page_box.x;
    // Subtract from zero so an origin at 0 prints as "0", not "-0"
    let ty = 0.0 - page_box.y;
    format!("q 1 0 0 1 {} {} cm /{} Do Q\n", tx, ty, name)
}

fn add_sheet_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    width: f32,
    height: f32,
    content: String,
    xobjects: Dictionary,
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width),
            Object::Real(height),
        ]),
    );

    let mut resources = Dictionary::new();
    if !xobjects.is_empty() {
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}
