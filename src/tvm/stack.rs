//! TVM stack values exchanged with get methods
//!
//! `StackReader` consumes a result stack front to back in the order the
//! contract pushed its return values. Every read checks the entry type;
//! nothing is ever defaulted.

use crate::tvm::address::Address;
use crate::tvm::builder::Builder;
use crate::tvm::cell::ArcCell;
use crate::tvm::error::{CellError, StackError};
use crate::tvm::slice::CellSlice;
use num_bigint::BigInt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEntry {
    Num(BigInt),
    Cell(ArcCell),
    Slice(ArcCell),
}

impl StackEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            StackEntry::Num(_) => "num",
            StackEntry::Cell(_) => "cell",
            StackEntry::Slice(_) => "slice",
        }
    }

    /// A slice entry holding a single `MsgAddress`
    pub fn address_slice(address: &Address) -> Result<Self, CellError> {
        let mut builder = Builder::new();
        builder.store_address(Some(address))?;
        Ok(StackEntry::Slice(builder.build()?))
    }
}

#[derive(Debug)]
pub struct StackReader {
    entries: Vec<StackEntry>,
    pos: usize,
}

impl StackReader {
    pub fn new(entries: Vec<StackEntry>) -> Self {
        Self { entries, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.pos
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &StackEntry), StackError> {
        let index = self.pos;
        let len = self.entries.len();
        let entry = self.entries.get(index).ok_or(StackError::Underflow {
            index,
            expected,
            len,
        })?;
        self.pos += 1;
        Ok((index, entry))
    }

    pub fn read_num(&mut self) -> Result<BigInt, StackError> {
        match self.next("num")? {
            (_, StackEntry::Num(n)) => Ok(n.clone()),
            (index, other) => Err(StackError::UnexpectedEntry {
                index,
                expected: "num",
                found: other.kind(),
            }),
        }
    }

    pub fn read_u128(&mut self) -> Result<u128, StackError> {
        let index = self.pos;
        let num = self.read_num()?;
        u128::try_from(&num).map_err(|_| StackError::NumOutOfRange {
            index,
            value: num.to_string(),
        })
    }

    pub fn read_cell(&mut self) -> Result<ArcCell, StackError> {
        match self.next("cell")? {
            (_, StackEntry::Cell(c)) => Ok(c.clone()),
            (index, other) => Err(StackError::UnexpectedEntry {
                index,
                expected: "cell",
                found: other.kind(),
            }),
        }
    }

    /// Reads a slice entry and parses a `MsgAddress` from its start
    pub fn read_address(&mut self) -> Result<Option<Address>, StackError> {
        let (index, cell) = match self.next("slice")? {
            (index, StackEntry::Slice(c)) => (index, c.clone()),
            (index, other) => {
                return Err(StackError::UnexpectedEntry {
                    index,
                    expected: "slice",
                    found: other.kind(),
                });
            }
        };
        CellSlice::new(cell)
            .load_address()
            .map_err(|source| StackError::Cell { index, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::new(0, [7u8; 32])
    }

    #[test]
    fn test_reads_in_order() {
        let code = Builder::new().build().unwrap();
        let mut reader = StackReader::new(vec![
            StackEntry::Num(BigInt::from(42)),
            StackEntry::address_slice(&addr()).unwrap(),
            StackEntry::Cell(code.clone()),
        ]);

        assert_eq!(reader.read_u128().unwrap(), 42);
        assert_eq!(reader.read_address().unwrap(), Some(addr()));
        assert_eq!(reader.read_cell().unwrap(), code);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_underflow() {
        let mut reader = StackReader::new(vec![]);
        assert_eq!(
            reader.read_cell().unwrap_err(),
            StackError::Underflow {
                index: 0,
                expected: "cell",
                len: 0
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let mut reader = StackReader::new(vec![StackEntry::address_slice(&addr()).unwrap()]);
        assert_eq!(
            reader.read_num().unwrap_err(),
            StackError::UnexpectedEntry {
                index: 0,
                expected: "num",
                found: "slice"
            }
        );

        let mut reader = StackReader::new(vec![StackEntry::address_slice(&addr()).unwrap()]);
        assert!(matches!(
            reader.read_cell(),
            Err(StackError::UnexpectedEntry { found: "slice", .. })
        ));

        let code = Builder::new().build().unwrap();
        let mut reader = StackReader::new(vec![StackEntry::Cell(code)]);
        assert!(matches!(
            reader.read_address(),
            Err(StackError::UnexpectedEntry { expected: "slice", found: "cell", .. })
        ));
    }

    #[test]
    fn test_negative_num_is_out_of_range() {
        let mut reader = StackReader::new(vec![StackEntry::Num(BigInt::from(-5))]);
        assert!(matches!(
            reader.read_u128(),
            Err(StackError::NumOutOfRange { index: 0, .. })
        ));
    }
}
