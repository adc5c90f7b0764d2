//! Bag of Cells (BoC) serialization and deserialization
//!
//! Only the generic single-root format (`b5ee9c72`) is produced and accepted.
//! Cells are written root first; every reference points to a later index.

use crate::crc::CRC32C;
use crate::tvm::cell::{ArcCell, Cell};
use crate::tvm::error::CellError;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use std::collections::HashMap;
use std::sync::Arc;

const BOC_GENERIC_MAGIC: u32 = 0xb5ee9c72;

fn invalid(msg: impl Into<String>) -> CellError {
    CellError::InvalidBoc(msg.into())
}

/// Serializes `root` and everything reachable from it
pub fn serialize_boc(root: &ArcCell, has_crc32: bool) -> Result<Vec<u8>, CellError> {
    let cells = topological_order(root);
    let index: HashMap<[u8; 32], usize> = cells
        .iter()
        .enumerate()
        .map(|(i, c)| (c.hash(), i))
        .collect();

    let size_bytes = bytes_needed(cells.len());
    let mut body = Vec::new();
    for cell in &cells {
        body.extend_from_slice(&cell.descriptors());
        body.extend_from_slice(&cell.padded_data());
        for reference in cell.references() {
            let idx = index
                .get(&reference.hash())
                .ok_or_else(|| invalid("reference missing from cell index"))?;
            write_uint(&mut body, *idx, size_bytes);
        }
    }
    let offset_bytes = bytes_needed(body.len());

    let mut out = Vec::with_capacity(body.len() + 32);
    out.extend_from_slice(&BOC_GENERIC_MAGIC.to_be_bytes());
    let crc_flag = if has_crc32 { 0x40 } else { 0 };
    out.push(crc_flag | size_bytes as u8);
    out.push(offset_bytes as u8);
    write_uint(&mut out, cells.len(), size_bytes);
    write_uint(&mut out, 1, size_bytes);
    write_uint(&mut out, 0, size_bytes);
    write_uint(&mut out, body.len(), offset_bytes);
    write_uint(&mut out, 0, size_bytes);
    out.extend_from_slice(&body);

    if has_crc32 {
        let crc = CRC32C.checksum(&out);
        out.extend_from_slice(&crc.to_le_bytes());
    }
    Ok(out)
}

/// Parses a single-root BoC
pub fn deserialize_boc(data: &[u8]) -> Result<ArcCell, CellError> {
    let mut reader = ByteReader { data, pos: 0 };
    let magic = reader.uint(4)? as u32;
    if magic != BOC_GENERIC_MAGIC {
        return Err(invalid(format!("unsupported magic {magic:#010x}")));
    }

    let flags = reader.uint(1)? as u8;
    let has_idx = flags & 0x80 != 0;
    let has_crc32 = flags & 0x40 != 0;
    let size_bytes = (flags & 0x07) as usize;
    let offset_bytes = reader.uint(1)?;
    if size_bytes == 0 || size_bytes > 4 || offset_bytes == 0 || offset_bytes > 8 {
        return Err(invalid("bad size fields"));
    }

    let cell_count = reader.uint(size_bytes)?;
    let root_count = reader.uint(size_bytes)?;
    let _absent = reader.uint(size_bytes)?;
    let total_size = reader.uint(offset_bytes)?;
    if root_count != 1 {
        return Err(invalid(format!("expected one root, found {root_count}")));
    }
    let root_idx = reader.uint(size_bytes)?;
    if has_idx {
        let index_len = cell_count
            .checked_mul(offset_bytes)
            .ok_or_else(|| invalid("index size overflows"))?;
        reader.skip(index_len)?;
    }

    // header fields are untrusted until checked against the input length
    let body_start = reader.pos;
    let crc_len = if has_crc32 { 4 } else { 0 };
    if total_size > data.len() - body_start {
        return Err(invalid("total size exceeds input"));
    }
    let body_end = body_start + total_size;
    if data.len() != body_end + crc_len {
        return Err(invalid("length mismatch"));
    }
    if has_crc32 {
        let expected = u32::from_le_bytes([
            data[body_end],
            data[body_end + 1],
            data[body_end + 2],
            data[body_end + 3],
        ]);
        if CRC32C.checksum(&data[..body_end]) != expected {
            return Err(invalid("crc32c mismatch"));
        }
    }

    // every cell takes at least its two descriptor bytes
    if cell_count == 0 || cell_count > total_size / 2 {
        return Err(invalid(format!("cell count {cell_count} does not fit {total_size} bytes")));
    }
    if root_idx >= cell_count {
        return Err(invalid(format!("root index {root_idx} out of range")));
    }

    let mut raw = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        raw.push(RawCell::read(&mut reader, size_bytes)?);
    }
    if reader.pos != body_end {
        return Err(invalid("cell data does not match total size"));
    }

    let mut built: Vec<Option<ArcCell>> = vec![None; cell_count];
    for (i, cell) in raw.into_iter().enumerate().rev() {
        let mut refs = Vec::with_capacity(cell.refs.len());
        for r in cell.refs {
            if r <= i || r >= cell_count {
                return Err(invalid(format!("cell {i} has bad reference {r}")));
            }
            refs.push(built[r].clone().ok_or_else(|| invalid("unresolved reference"))?);
        }
        built[i] = Some(Arc::new(Cell::new(cell.data, cell.bit_len, refs)?));
    }

    built
        .get(root_idx)
        .cloned()
        .flatten()
        .ok_or_else(|| invalid(format!("root index {root_idx} out of range")))
}

pub fn boc_to_base64(cell: &ArcCell) -> Result<String, CellError> {
    Ok(STANDARD.encode(serialize_boc(cell, false)?))
}

/// Unpadded url-safe base64, suitable for query strings
pub fn boc_to_base64_url(cell: &ArcCell) -> Result<String, CellError> {
    Ok(URL_SAFE_NO_PAD.encode(serialize_boc(cell, false)?))
}

/// Accepts standard, url-safe and unpadded url-safe base64
pub fn base64_to_boc(b64: &str) -> Result<ArcCell, CellError> {
    let b64 = b64.trim();
    let bytes = STANDARD
        .decode(b64)
        .or_else(|_| URL_SAFE.decode(b64))
        .or_else(|_| URL_SAFE_NO_PAD.decode(b64))
        .map_err(|e| CellError::Encoding(e.to_string()))?;
    deserialize_boc(&bytes)
}

pub fn boc_to_hex(cell: &ArcCell) -> Result<String, CellError> {
    Ok(hex::encode(serialize_boc(cell, false)?))
}

pub fn hex_to_boc(s: &str) -> Result<ArcCell, CellError> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = hex::decode(cleaned).map_err(|e| CellError::Encoding(e.to_string()))?;
    deserialize_boc(&bytes)
}

struct RawCell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<usize>,
}

impl RawCell {
    fn read(reader: &mut ByteReader<'_>, size_bytes: usize) -> Result<Self, CellError> {
        let d1 = reader.uint(1)? as u8;
        let d2 = reader.uint(1)? as u8;
        if d1 & 0x08 != 0 {
            return Err(invalid("exotic cells are not supported"));
        }
        let ref_count = (d1 & 0x07) as usize;
        let byte_len = (d2 as usize).div_ceil(2);
        let mut data = reader.take(byte_len)?.to_vec();

        let bit_len = if d2 % 2 == 0 {
            byte_len * 8
        } else {
            let last = data[byte_len - 1];
            if last == 0 {
                return Err(invalid("missing completion tag"));
            }
            let trailing = last.trailing_zeros() as usize;
            data[byte_len - 1] &= !(1 << trailing);
            byte_len * 8 - trailing - 1
        };

        let mut refs = Vec::with_capacity(ref_count);
        for _ in 0..ref_count {
            refs.push(reader.uint(size_bytes)?);
        }
        Ok(Self { data, bit_len, refs })
    }
}

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CellError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| invalid("unexpected end of data"))?;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| invalid("unexpected end of data"))?;
        self.pos = end;
        Ok(slice)
    }

    fn uint(&mut self, n: usize) -> Result<usize, CellError> {
        Ok(self.take(n)?.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize))
    }

    fn skip(&mut self, n: usize) -> Result<(), CellError> {
        self.take(n).map(|_| ())
    }
}

// Reverse post-order: parents before children, shared cells once.
fn topological_order(root: &ArcCell) -> Vec<ArcCell> {
    fn visit(cell: &ArcCell, seen: &mut HashMap<[u8; 32], ()>, post: &mut Vec<ArcCell>) {
        if seen.insert(cell.hash(), ()).is_some() {
            return;
        }
        for reference in cell.references().iter().rev() {
            visit(reference, seen, post);
        }
        post.push(cell.clone());
    }

    let mut seen = HashMap::new();
    let mut post = Vec::new();
    visit(root, &mut seen, &mut post);
    post.reverse();
    post
}

fn bytes_needed(value: usize) -> usize {
    let bits = (usize::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(8).max(1)
}

fn write_uint(buf: &mut Vec<u8>, value: usize, size: usize) {
    let bytes = (value as u64).to_be_bytes();
    buf.extend_from_slice(&bytes[8 - size..]);
}
