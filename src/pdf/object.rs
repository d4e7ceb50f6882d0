//! The handful of PDF objects a one-page document needs.

use std::fmt;

/// 1-based indirect object number. Generation is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentObject {
    Catalog {
        pages: ObjectId,
    },
    PageTree {
        kids: Vec<ObjectId>,
    },
    Page {
        parent: ObjectId,
        media_box: [i32; 4],
        font_name: String,
        font: ObjectId,
        contents: ObjectId,
    },
    Font {
        base_font: String,
    },
    ContentStream {
        data: Vec<u8>,
    },
}

impl DocumentObject {
    /// Serializes the object as `N 0 obj ... endobj\n`.
    pub fn to_bytes(&self, id: ObjectId) -> Vec<u8> {
        let head = format!("{} 0 obj ", id.0);
        let mut out = head.into_bytes();
        match self {
            DocumentObject::Catalog { pages } => {
                out.extend_from_slice(format!("<< /Type /Catalog /Pages {pages} >>").as_bytes());
            }
            DocumentObject::PageTree { kids } => {
                let count = kids.len();
                let kids = kids.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
                out.extend_from_slice(
                    format!("<< /Type /Pages /Kids [{kids}] /Count {count} >>").as_bytes(),
                );
            }
            DocumentObject::Page {
                parent,
                media_box: [x0, y0, x1, y1],
                font_name,
                font,
                contents,
            } => {
                out.extend_from_slice(
                    format!(
                        "<< /Type /Page /Parent {parent} /MediaBox [{x0} {y0} {x1} {y1}] \
                         /Resources << /Font << /{font_name} {font} >> >> /Contents {contents} >>"
                    )
                    .as_bytes(),
                );
            }
            DocumentObject::Font { base_font } => {
                out.extend_from_slice(
                    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} >>").as_bytes(),
                );
            }
            DocumentObject::ContentStream { data } => {
                out.extend_from_slice(format!("<< /Length {} >> stream\n", data.len()).as_bytes());
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
        }
        out.extend_from_slice(b" endobj\n");
        out
    }
}
