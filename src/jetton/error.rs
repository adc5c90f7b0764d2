use crate::provider::ProviderError;
use crate::tvm::{AddressError, CellError, StackError};
use std::path::PathBuf;
use thiserror::Error;

/// Invalid input, detected before any cell is built
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error("notify comment {0:?} is not an address")]
    InvalidComment(String),
    #[error("amount {0:?} is negative")]
    NegativeAmount(String),
    #[error("amount {0:?} is not an integer")]
    InvalidAmount(String),
    #[error("amount {0} does not fit the coin encoding (max 2^120 - 1)")]
    AmountOutOfRange(String),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Cell(#[from] CellError),
}

/// A response or message body that does not have the expected shape
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed get-method response: {0}")]
    MalformedResponse(#[from] StackError),
    #[error("`{0}` returned addr_none where an address is required")]
    MissingAddress(&'static str),
    #[error("unknown opcode {0:#010x}")]
    UnknownOpcode(u32),
    #[error("malformed message body: {0}")]
    Body(#[from] CellError),
    #[error("message body has {bits} unread bits and {refs} unread references")]
    TrailingData { bits: usize, refs: usize },
    #[error("metadata uri is not valid UTF-8")]
    InvalidContent,
}

#[derive(Debug, Error)]
pub enum CodeLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not contain a valid BoC: {source}", path.display())]
    Boc {
        path: PathBuf,
        #[source]
        source: CellError,
    },
}

#[derive(Debug, Error)]
pub enum JettonError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("transport error: {0}")]
    Transport(#[from] ProviderError),
    #[error(transparent)]
    CodeLoad(#[from] CodeLoadError),
}
