//! serde models for toncenter v3 JSON and jetton metadata documents

pub mod basic;
pub mod toncenter_v3;
pub mod traits;

pub use basic::{JettonMetadata, StringOrInt};
