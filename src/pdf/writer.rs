//! Assembles header, body, xref table and trailer into the final file.
//!
//! Offsets are taken from the buffer length at the moment each object is
//! appended, so the xref table always matches the emitted bytes.

use super::object::{DocumentObject, ObjectId};

pub const HEADER: &[u8] = b"%PDF-1.4\n";

/// Byte offset of every object, indexed by object number. Slot 0 is the free
/// head of the list and always holds offset 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: Vec<usize>,
}

impl OffsetTable {
    fn new() -> OffsetTable {
        OffsetTable { offsets: vec![0] }
    }

    fn record(&mut self, id: ObjectId, offset: usize) {
        debug_assert_eq!(id.0 as usize, self.offsets.len(), "objects must be written in id order");
        self.offsets.push(offset);
    }

    /// Entry count, including the free slot 0.
    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    #[cfg(test)]
    pub fn offset(&self, id: ObjectId) -> Option<usize> {
        match id.0 {
            0 => None,
            n => self.offsets.get(n as usize).copied(),
        }
    }
}

/// Append-only output buffer that keeps the offset table in step with it.
pub struct PdfWriter {
    buf: Vec<u8>,
    table: OffsetTable,
}

impl PdfWriter {
    pub fn new() -> PdfWriter {
        PdfWriter {
            buf: HEADER.to_vec(),
            table: OffsetTable::new(),
        }
    }

    pub fn write_object(&mut self, id: ObjectId, obj: &DocumentObject) {
        self.table.record(id, self.buf.len());
        self.buf.extend_from_slice(&obj.to_bytes(id));
    }

    /// Writes the xref section and trailer, and returns the complete file.
    pub fn finish(mut self, root: ObjectId) -> Vec<u8> {
        let xref_pos = self.buf.len();
        let size = self.table.size();

        let mut tail = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.table.offsets[1..] {
            tail.push_str(&format!("{offset:010} 00000 n \n"));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {size} /Root {root} >>\nstartxref\n{xref_pos}\n%%EOF"
        ));

        self.buf.extend_from_slice(tail.as_bytes());
        log::debug!("wrote PDF: {} objects, {} bytes", size - 1, self.buf.len());
        self.buf
    }

    #[cfg(test)]
    pub fn table(&self) -> &OffsetTable {
        &self.table
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
