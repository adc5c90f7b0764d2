//! Jetton minter message encoding and state decoding
//!
//! Builds the bodies the minter contract dispatches on (mint, burn
//! notification, admin change, notify), decodes its get-method results and
//! predicts jetton wallet addresses off-chain. Encoding is pure; only
//! [`JettonMinter`]'s `send_*`/`get_*` methods reach a provider.

pub mod code;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod message;
pub mod minter;
pub mod writer;
#[cfg(test)]
mod tests;

pub use code::{BocFileLoader, CodeLoader};
pub use config::{JettonContent, MinterConfig, MinterInit, calculate_wallet_address};
pub use constants::*;
pub use data::{JettonData, parse_jetton_data, parse_wallet_address, wallet_address_query};
pub use error::{CodeLoadError, DecodeError, EncodeError, JettonError};
pub use message::{MinterMessage, NotifyComment, parse_amount};
pub use minter::JettonMinter;
pub use writer::PayloadWriter;
