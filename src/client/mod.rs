//! HTTP access to TON through toncenter

pub mod toncenter_v3;

pub use toncenter_v3::ToncenterClient;
