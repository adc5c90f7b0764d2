use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellError {
    #[error("cell overflow: cannot store {requested} bits, {available} available")]
    BitOverflow { requested: usize, available: usize },
    #[error("cell overflow: maximum of 4 references reached")]
    RefOverflow,
    #[error("cell underflow: requested {requested} bits, {available} remaining")]
    Underflow { requested: usize, available: usize },
    #[error("cell underflow: no references left")]
    RefUnderflow,
    #[error("value {value} does not fit in {bits} bits")]
    ValueTooWide { value: u128, bits: usize },
    #[error("coins value {0} exceeds VarUInteger 16 range")]
    CoinsOutOfRange(u128),
    #[error("snake segment of {bits} bits is not byte-aligned")]
    UnalignedSnake { bits: usize },
    #[error("unsupported address tag {0:#04b}")]
    UnsupportedAddressTag(u8),
    #[error("invalid BoC: {0}")]
    InvalidBoc(String),
    #[error("failed to decode BoC text: {0}")]
    Encoding(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid raw address {0:?}")]
    InvalidRaw(String),
    #[error("invalid user-friendly address {0:?}")]
    InvalidFriendly(String),
    #[error("address checksum mismatch in {0:?}")]
    Checksum(String),
}

/// A get-method result stack that does not have the expected shape
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("stack underflow: expected {expected} at index {index}, stack has {len} entries")]
    Underflow {
        index: usize,
        expected: &'static str,
        len: usize,
    },
    #[error("unexpected stack entry at index {index}: expected {expected}, found {found}")]
    UnexpectedEntry {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("number at index {index} does not fit the target type: {value}")]
    NumOutOfRange { index: usize, value: String },
    #[error("malformed cell at index {index}: {source}")]
    Cell {
        index: usize,
        #[source]
        source: CellError,
    },
}
