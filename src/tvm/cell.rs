//! Cell representation for the TON virtual machine
//!
//! A cell stores up to 1023 bits of data and up to 4 references to other
//! cells. Cells are immutable once built; the representation hash and depth
//! are computed at construction so they can be read without locking.

use crate::tvm::error::CellError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Maximum number of bits a cell can store
pub const MAX_CELL_BITS: usize = 1023;

/// Maximum number of references a cell can have
pub const MAX_CELL_REFS: usize = 4;

pub type ArcCell = Arc<Cell>;

/// An ordinary (non-exotic) cell
#[derive(Clone, PartialEq, Eq)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<ArcCell>,
    hash: [u8; 32],
    depth: u16,
}

impl Cell {
    /// Creates a cell from raw bits and references.
    ///
    /// Bits past `bit_len` in the last byte are cleared so equal bit strings
    /// always produce equal cells.
    pub fn new(mut data: Vec<u8>, bit_len: usize, references: Vec<ArcCell>) -> Result<Self, CellError> {
        if bit_len > MAX_CELL_BITS {
            return Err(CellError::BitOverflow {
                requested: bit_len,
                available: MAX_CELL_BITS,
            });
        }
        if references.len() > MAX_CELL_REFS {
            return Err(CellError::RefOverflow);
        }

        let byte_len = bit_len.div_ceil(8);
        if data.len() < byte_len {
            return Err(CellError::Underflow {
                requested: bit_len,
                available: data.len() * 8,
            });
        }
        data.truncate(byte_len);
        if bit_len % 8 != 0 {
            let mask = 0xffu8 << (8 - bit_len % 8);
            data[byte_len - 1] &= mask;
        }

        let depth = references
            .iter()
            .map(|r| r.depth + 1)
            .max()
            .unwrap_or(0);

        let mut cell = Self {
            data,
            bit_len,
            references,
            hash: [0u8; 32],
            depth,
        };
        cell.hash = cell.compute_hash();
        Ok(cell)
    }

    /// An empty cell with no data and no references
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            bit_len: 0,
            references: Vec::new(),
            hash: Sha256::digest([0u8, 0u8]).into(),
            depth: 0,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn references(&self) -> &[ArcCell] {
        &self.references
    }

    pub fn reference(&self, index: usize) -> Option<&ArcCell> {
        self.references.get(index)
    }

    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Representation hash of the cell
    pub fn hash(&self) -> [u8; 32] {
        self.hash
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Descriptor bytes: `refs + 8*exotic + 32*level` and `floor(b/8) + ceil(b/8)`
    pub fn descriptors(&self) -> [u8; 2] {
        let d1 = self.references.len() as u8;
        let d2 = (self.bit_len / 8 + self.bit_len.div_ceil(8)) as u8;
        [d1, d2]
    }

    /// Data bytes with the completion tag appended to an incomplete last byte
    pub fn padded_data(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        let rem = self.bit_len % 8;
        if rem != 0 {
            let last = data.len() - 1;
            data[last] |= 1 << (7 - rem);
        }
        data
    }

    fn compute_hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.descriptors());
        hasher.update(self.padded_data());
        for reference in &self.references {
            hasher.update(reference.depth.to_be_bytes());
        }
        for reference in &self.references {
            hasher.update(reference.hash);
        }
        hasher.finalize().into()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell{{ bits: {}, data: {}, refs: {:?} }}",
            self.bit_len,
            hex::encode(&self.data),
            self.references
        )
    }
}
