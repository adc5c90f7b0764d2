//! TVM data structures used to build and read minter messages
//!
//! - Cell: immutable node of up to 1023 bits and 4 references
//! - Builder / CellSlice: sequential writer and reader over cells
//! - Address: `addr_std` account identifiers
//! - BoC: Bag of Cells byte encoding
//! - StateInit: code + data pair that determines a contract address
//! - Stack: get-method arguments and results

pub mod address;
pub mod boc;
pub mod builder;
pub mod cell;
pub mod error;
pub mod slice;
pub mod stack;
pub mod state_init;

pub use address::Address;
pub use boc::{
    base64_to_boc, boc_to_base64, boc_to_base64_url, boc_to_hex, deserialize_boc, hex_to_boc,
    serialize_boc,
};
pub use builder::{Builder, MAX_COINS};
pub use cell::{ArcCell, Cell, MAX_CELL_BITS, MAX_CELL_REFS};
pub use error::{AddressError, CellError, StackError};
pub use slice::CellSlice;
pub use stack::{StackEntry, StackReader};
pub use state_init::StateInit;
