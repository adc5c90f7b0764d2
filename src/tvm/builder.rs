//! Bit-level cell builder
//!
//! `Builder` appends fields in order and finalises into an immutable
//! [`Cell`]. Every append checks the cell limits up front, so a failed store
//! leaves the builder unchanged.

use crate::tvm::address::Address;
use crate::tvm::cell::{ArcCell, Cell, MAX_CELL_BITS, MAX_CELL_REFS};
use crate::tvm::error::CellError;
use std::sync::Arc;

/// Largest amount representable as `VarUInteger 16` (15 value bytes)
pub const MAX_COINS: u128 = (1u128 << 120) - 1;

#[derive(Debug, Clone, Default)]
pub struct Builder {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<ArcCell>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn available_bits(&self) -> usize {
        MAX_CELL_BITS - self.bit_len
    }

    pub fn ref_count(&self) -> usize {
        self.references.len()
    }

    fn ensure_bits(&self, bits: usize) -> Result<(), CellError> {
        if bits > self.available_bits() {
            return Err(CellError::BitOverflow {
                requested: bits,
                available: self.available_bits(),
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Stores the first `bit_len` bits of `bits`, most significant bit first
    pub fn store_bits(&mut self, bits: &[u8], bit_len: usize) -> Result<&mut Self, CellError> {
        if bits.len() * 8 < bit_len {
            return Err(CellError::Underflow {
                requested: bit_len,
                available: bits.len() * 8,
            });
        }
        self.ensure_bits(bit_len)?;
        for i in 0..bit_len {
            self.push_bit((bits[i / 8] >> (7 - i % 8)) & 1 == 1);
        }
        Ok(self)
    }

    pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
        self.store_bits(bytes, bytes.len() * 8)
    }

    /// Stores the low `bits` bits of `value` big-endian
    pub fn store_uint(&mut self, value: u128, bits: usize) -> Result<&mut Self, CellError> {
        if bits > 128 || (bits < 128 && value >> bits != 0) {
            return Err(CellError::ValueTooWide { value, bits });
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Stores a two's complement signed integer in `bits` bits
    pub fn store_int(&mut self, value: i64, bits: usize) -> Result<&mut Self, CellError> {
        if bits == 0 || bits > 64 {
            return Err(CellError::ValueTooWide {
                value: value.unsigned_abs() as u128,
                bits,
            });
        }
        let min = -(1i128 << (bits - 1));
        let max = (1i128 << (bits - 1)) - 1;
        if (value as i128) < min || (value as i128) > max {
            return Err(CellError::ValueTooWide {
                value: value.unsigned_abs() as u128,
                bits,
            });
        }
        let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
        self.store_uint(((value as u64) & mask) as u128, bits)
    }

    pub fn store_u8(&mut self, value: u8) -> Result<&mut Self, CellError> {
        self.store_uint(value as u128, 8)
    }

    pub fn store_u32(&mut self, value: u32) -> Result<&mut Self, CellError> {
        self.store_uint(value as u128, 32)
    }

    pub fn store_u64(&mut self, value: u64) -> Result<&mut Self, CellError> {
        self.store_uint(value as u128, 64)
    }

    /// Stores coins as `VarUInteger 16`: a 4-bit byte length followed by the value
    pub fn store_coins(&mut self, amount: u128) -> Result<&mut Self, CellError> {
        if amount > MAX_COINS {
            return Err(CellError::CoinsOutOfRange(amount));
        }
        let byte_len = (128 - amount.leading_zeros() as usize).div_ceil(8);
        self.ensure_bits(4 + byte_len * 8)?;
        self.store_uint(byte_len as u128, 4)?;
        self.store_uint(amount, byte_len * 8)
    }

    /// Stores a `MsgAddress`: `addr_std$10` for `Some`, `addr_none$00` for `None`
    pub fn store_address(&mut self, address: Option<&Address>) -> Result<&mut Self, CellError> {
        match address {
            None => self.store_uint(0, 2),
            Some(addr) => {
                self.ensure_bits(267)?;
                self.store_uint(0b10, 2)?;
                self.store_bit(false)?;
                self.store_int(addr.workchain as i64, 8)?;
                self.store_bytes(&addr.hash_part)
            }
        }
    }

    /// Stores a string inline; it must fit in the current cell
    pub fn store_string(&mut self, s: &str) -> Result<&mut Self, CellError> {
        self.store_bytes(s.as_bytes())
    }

    /// Stores bytes as a snake chain, continuing into references when full
    pub fn store_snake_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
        let fit = self.available_bits() / 8;
        if bytes.len() <= fit {
            return self.store_bytes(bytes);
        }
        if self.ref_count() >= MAX_CELL_REFS {
            return Err(CellError::RefOverflow);
        }
        let mut tail = Builder::new();
        tail.store_snake_bytes(&bytes[fit..])?;
        self.store_bytes(&bytes[..fit])?;
        self.store_ref(tail.build()?)
    }

    pub fn store_ref(&mut self, cell: ArcCell) -> Result<&mut Self, CellError> {
        if self.references.len() >= MAX_CELL_REFS {
            return Err(CellError::RefOverflow);
        }
        self.references.push(cell);
        Ok(self)
    }

    /// Stores `Maybe ^Cell`
    pub fn store_maybe_ref(&mut self, cell: Option<ArcCell>) -> Result<&mut Self, CellError> {
        match cell {
            Some(cell) => {
                if self.references.len() >= MAX_CELL_REFS {
                    return Err(CellError::RefOverflow);
                }
                self.store_bit(true)?;
                self.store_ref(cell)
            }
            None => self.store_bit(false),
        }
    }

    pub fn build(self) -> Result<ArcCell, CellError> {
        Ok(Arc::new(Cell::new(self.data, self.bit_len, self.references)?))
    }
}
