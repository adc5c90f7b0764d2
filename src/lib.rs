//! Message encoding and contract access for a jetton minter on TON.
//!
//! [`jetton`] builds the minter's message bodies and parses its get-method
//! results on top of the cell layer in [`tvm`]. Sending and querying go
//! through the traits in [`provider`]; [`client`] implements queries over
//! toncenter.

pub mod cli;
pub mod client;
pub mod config;
pub mod crc;
pub mod jetton;
pub mod models;
pub mod provider;
pub mod tvm;
pub mod utils;
