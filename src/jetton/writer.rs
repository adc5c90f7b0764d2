use crate::tvm::{Address, Builder, CellError};

/// Append-only sink for message fields.
///
/// Message encoding is written against this trait; `Builder` is the real
/// implementation, tests substitute a recorder.
pub trait PayloadWriter {
    fn write_uint(&mut self, value: u64, bits: usize) -> Result<(), CellError>;
    fn write_coins(&mut self, amount: u128) -> Result<(), CellError>;
    fn write_address(&mut self, address: &Address) -> Result<(), CellError>;
}

impl PayloadWriter for Builder {
    fn write_uint(&mut self, value: u64, bits: usize) -> Result<(), CellError> {
        self.store_uint(value as u128, bits).map(|_| ())
    }

    fn write_coins(&mut self, amount: u128) -> Result<(), CellError> {
        self.store_coins(amount).map(|_| ())
    }

    fn write_address(&mut self, address: &Address) -> Result<(), CellError> {
        self.store_address(Some(address)).map(|_| ())
    }
}
