//! Sequential reader over a cell
//!
//! Reads mirror the [`Builder`](crate::tvm::Builder) stores. A read that
//! runs past the end fails with [`CellError`] and does not advance.

use crate::tvm::address::Address;
use crate::tvm::cell::ArcCell;
use crate::tvm::error::CellError;

#[derive(Debug, Clone)]
pub struct CellSlice {
    cell: ArcCell,
    bit_pos: usize,
    ref_pos: usize,
}

impl CellSlice {
    pub fn new(cell: ArcCell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    pub fn remaining_refs(&self) -> usize {
        self.cell.references().len() - self.ref_pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0 && self.remaining_refs() == 0
    }

    fn ensure_bits(&self, bits: usize) -> Result<(), CellError> {
        if bits > self.remaining_bits() {
            return Err(CellError::Underflow {
                requested: bits,
                available: self.remaining_bits(),
            });
        }
        Ok(())
    }

    fn next_bit(&mut self) -> bool {
        let byte = self.cell.data()[self.bit_pos / 8];
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1 == 1;
        self.bit_pos += 1;
        bit
    }

    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        self.ensure_bits(1)?;
        Ok(self.next_bit())
    }

    /// Loads an unsigned big-endian integer of up to 128 bits
    pub fn load_uint(&mut self, bits: usize) -> Result<u128, CellError> {
        if bits > 128 {
            return Err(CellError::ValueTooWide { value: 0, bits });
        }
        self.ensure_bits(bits)?;
        let mut value = 0u128;
        for _ in 0..bits {
            value = (value << 1) | self.next_bit() as u128;
        }
        Ok(value)
    }

    pub fn load_int(&mut self, bits: usize) -> Result<i64, CellError> {
        if bits == 0 || bits > 64 {
            return Err(CellError::ValueTooWide { value: 0, bits });
        }
        let raw = self.load_uint(bits)? as u64;
        let shift = 64 - bits;
        Ok(((raw << shift) as i64) >> shift)
    }

    pub fn load_u8(&mut self) -> Result<u8, CellError> {
        Ok(self.load_uint(8)? as u8)
    }

    pub fn load_u32(&mut self) -> Result<u32, CellError> {
        Ok(self.load_uint(32)? as u32)
    }

    pub fn load_u64(&mut self) -> Result<u64, CellError> {
        Ok(self.load_uint(64)? as u64)
    }

    pub fn load_bytes(&mut self, len: usize) -> Result<Vec<u8>, CellError> {
        self.ensure_bits(len * 8)?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            let mut byte = 0u8;
            for _ in 0..8 {
                byte = (byte << 1) | self.next_bit() as u8;
            }
            out.push(byte);
        }
        Ok(out)
    }

    /// Loads `VarUInteger 16`
    pub fn load_coins(&mut self) -> Result<u128, CellError> {
        let start = self.bit_pos;
        let len = self.load_uint(4)? as usize;
        match self.load_uint(len * 8) {
            Ok(value) => Ok(value),
            Err(e) => {
                self.bit_pos = start;
                Err(e)
            }
        }
    }

    /// Loads a `MsgAddress`; `addr_none` yields `None`
    pub fn load_address(&mut self) -> Result<Option<Address>, CellError> {
        self.ensure_bits(2)?;
        let start = self.bit_pos;
        let tag = self.load_uint(2)? as u8;
        match tag {
            0b00 => Ok(None),
            0b10 => match self.load_std_address() {
                Ok(address) => Ok(Some(address)),
                Err(e) => {
                    self.bit_pos = start;
                    Err(e)
                }
            },
            other => {
                self.bit_pos = start;
                Err(CellError::UnsupportedAddressTag(other))
            }
        }
    }

    // anycast:(Maybe Anycast) workchain_id:int8 address:bits256
    fn load_std_address(&mut self) -> Result<Address, CellError> {
        if self.load_bit()? {
            return Err(CellError::UnsupportedAddressTag(0b10));
        }
        let workchain = self.load_int(8)? as i8;
        let mut hash_part = [0u8; 32];
        hash_part.copy_from_slice(&self.load_bytes(32)?);
        Ok(Address::new(workchain, hash_part))
    }

    pub fn load_ref(&mut self) -> Result<ArcCell, CellError> {
        let cell = self
            .cell
            .reference(self.ref_pos)
            .cloned()
            .ok_or(CellError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(cell)
    }

    pub fn load_maybe_ref(&mut self) -> Result<Option<ArcCell>, CellError> {
        if self.load_bit()? {
            self.load_ref().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads the remaining bytes of this cell and follows the snake chain.
    /// Every segment must hold a whole number of bytes.
    pub fn load_snake_bytes(&mut self) -> Result<Vec<u8>, CellError> {
        check_aligned(self.remaining_bits())?;
        let mut out = self.load_bytes(self.remaining_bits() / 8)?;
        let mut next = if self.remaining_refs() > 0 {
            Some(self.load_ref()?)
        } else {
            None
        };
        while let Some(cell) = next {
            let mut part = CellSlice::new(cell);
            check_aligned(part.remaining_bits())?;
            out.extend(part.load_bytes(part.remaining_bits() / 8)?);
            next = if part.remaining_refs() > 0 {
                Some(part.load_ref()?)
            } else {
                None
            };
        }
        Ok(out)
    }
}

fn check_aligned(bits: usize) -> Result<(), CellError> {
    if bits % 8 != 0 {
        return Err(CellError::UnalignedSnake { bits });
    }
    Ok(())
}

impl From<ArcCell> for CellSlice {
    fn from(cell: ArcCell) -> Self {
        Self::new(cell)
    }
}
