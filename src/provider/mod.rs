//! Contract invocation seams
//!
//! The minter never talks to the network directly. State-changing messages go
//! through a [`MessageSender`] (a wallet or anything that can get a message
//! signed); read-only calls go through a [`ContractProvider`]. Neither trait
//! implies retries: whatever the implementation returns is passed on as is.

mod link;

pub use link::TransferLinkSender;

use crate::tvm::{Address, ArcCell, CellError, StackEntry, StateInit};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendMode(pub u8);

impl SendMode {
    pub const ORDINARY: SendMode = SendMode(0);
    pub const PAY_GAS_SEPARATELY: SendMode = SendMode(1);
    pub const IGNORE_ERRORS: SendMode = SendMode(2);
    pub const CARRY_ALL_REMAINING_INCOMING_VALUE: SendMode = SendMode(64);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalMessage {
    pub to: Address,
    /// Attached value in nanotons
    pub value: u128,
    pub bounce: bool,
    pub send_mode: SendMode,
    pub body: Option<ArcCell>,
    pub state_init: Option<StateInit>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api responded with {status}: {message}")]
    Api { status: u16, message: String },
    #[error("get method `{method}` failed with exit code {exit_code}")]
    ExitCode { method: String, exit_code: i32 },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Cell(#[from] CellError),
}

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_internal(&self, message: InternalMessage) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait ContractProvider: Send + Sync {
    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: Vec<StackEntry>,
    ) -> Result<Vec<StackEntry>, ProviderError>;
}
