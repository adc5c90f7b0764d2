//! Get-method arguments and result parsing

use crate::jetton::constants::GET_WALLET_ADDRESS_METHOD;
use crate::jetton::error::{DecodeError, EncodeError};
use crate::tvm::{Address, ArcCell, StackEntry, StackReader};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JettonData {
    pub total_supply: u128,
    /// `None` once the admin has been set to `addr_none`
    pub admin: Option<Address>,
    pub wallet_code: ArcCell,
    pub metadata: ArcCell,
}

/// Parses `get_jetton_data`: total supply, admin, wallet code, metadata.
pub fn parse_jetton_data(stack: Vec<StackEntry>) -> Result<JettonData, DecodeError> {
    let mut reader = StackReader::new(stack);
    let data = JettonData {
        total_supply: reader.read_u128()?,
        admin: reader.read_address()?,
        wallet_code: reader.read_cell()?,
        metadata: reader.read_cell()?,
    };
    debug!(
        "jetton data: supply={} admin={:?} wallet_code={}",
        data.total_supply,
        data.admin.map(|a| a.to_raw()),
        data.wallet_code.hash_hex()
    );
    Ok(data)
}

pub fn wallet_address_query(owner: &Address) -> Result<Vec<StackEntry>, EncodeError> {
    Ok(vec![StackEntry::address_slice(owner)?])
}

pub fn parse_wallet_address(stack: Vec<StackEntry>) -> Result<Address, DecodeError> {
    let mut reader = StackReader::new(stack);
    reader
        .read_address()?
        .ok_or(DecodeError::MissingAddress(GET_WALLET_ADDRESS_METHOD))
}
