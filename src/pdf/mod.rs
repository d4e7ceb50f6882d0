//! Minimal single-page PDF writer.
//!
//! No rendering library is involved: the five objects (catalog, page tree,
//! page, font, content stream) are serialized by hand and the xref table is
//! built from the real byte offsets while writing.

mod content;
mod object;
mod writer;

pub use content::PageLayout;
use content::build_content;
use object::{DocumentObject, ObjectId};
use writer::PdfWriter;

use crate::layout::DisplayLine;

pub const CONTENT_TYPE: &str = "application/pdf";

const FONT_RESOURCE: &str = "F1";
const BASE_FONT: &str = "Helvetica";

/// Hands out object numbers for one document, starting at 1.
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn new() -> IdAllocator {
        IdAllocator { next: 1 }
    }

    fn alloc(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }
}

/// Builds the object list for a page showing `lines`, in the order the
/// objects are to be written.
pub fn build_objects(lines: &[DisplayLine], layout: &PageLayout) -> Vec<(ObjectId, DocumentObject)> {
    let mut ids = IdAllocator::new();
    let catalog = ids.alloc();
    let pages = ids.alloc();
    let page = ids.alloc();
    let font = ids.alloc();
    let contents = ids.alloc();

    vec![
        (catalog, DocumentObject::Catalog { pages }),
        (pages, DocumentObject::PageTree { kids: vec![page] }),
        (
            page,
            DocumentObject::Page {
                parent: pages,
                media_box: [0, 0, layout.width, layout.height],
                font_name: FONT_RESOURCE.to_string(),
                font,
                contents,
            },
        ),
        (font, DocumentObject::Font { base_font: BASE_FONT.to_string() }),
        (
            contents,
            DocumentObject::ContentStream {
                data: build_content(lines, layout, FONT_RESOURCE),
            },
        ),
    ]
}

/// Encodes `lines` as a one-page PDF with the default page layout.
///
/// Never fails. Lines past the bottom margin are dropped.
pub fn encode(lines: &[DisplayLine]) -> Vec<u8> {
    encode_with_layout(lines, &PageLayout::default())
}

pub fn encode_with_layout(lines: &[DisplayLine], layout: &PageLayout) -> Vec<u8> {
    let objects = build_objects(lines, layout);
    let root = objects[0].0;

    let mut w = PdfWriter::new();
    for (id, obj) in &objects {
        w.write_object(*id, obj);
    }
    w.finish(root)
}
