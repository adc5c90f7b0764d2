//! Minter deployment state and jetton wallet address derivation

use crate::jetton::constants::*;
use crate::jetton::error::{DecodeError, EncodeError};
use crate::jetton::message::check_coins;
use crate::tvm::{Address, ArcCell, Builder, CellSlice, StateInit};
use log::debug;

/// Metadata cell: `tag:uint8` followed by the uri as snake bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JettonContent {
    pub tag: u8,
    pub uri: String,
}

impl JettonContent {
    pub fn new(tag: u8, uri: impl Into<String>) -> Self {
        Self {
            tag,
            uri: uri.into(),
        }
    }

    pub fn to_cell(&self) -> Result<ArcCell, EncodeError> {
        let mut builder = Builder::new();
        builder.store_u8(self.tag)?;
        builder.store_snake_bytes(self.uri.as_bytes())?;
        Ok(builder.build()?)
    }

    pub fn from_cell(cell: ArcCell) -> Result<Self, DecodeError> {
        let mut slice = CellSlice::new(cell);
        let tag = slice.load_u8()?;
        let uri = String::from_utf8(slice.load_snake_bytes()?)
            .map_err(|_| DecodeError::InvalidContent)?;
        Ok(Self { tag, uri })
    }
}

impl Default for JettonContent {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_TAG, DEFAULT_METADATA_URI)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinterConfig {
    pub total_supply: u128,
    pub admin: Address,
    pub next_admin: Address,
    pub wallet_code: ArcCell,
    pub metadata: ArcCell,
}

impl MinterConfig {
    /// Built-in supply, owner and metadata
    pub fn initial(wallet_code: ArcCell) -> Result<Self, EncodeError> {
        let owner: Address = INITIAL_OWNER.parse()?;
        Ok(Self {
            total_supply: INITIAL_TOTAL_SUPPLY,
            admin: owner,
            next_admin: owner,
            wallet_code,
            metadata: JettonContent::default().to_cell()?,
        })
    }

    /// `total_supply:Coins admin:MsgAddress next_admin:MsgAddress
    ///  wallet_code:^Cell metadata:^Cell`
    pub fn to_data_cell(&self) -> Result<ArcCell, EncodeError> {
        check_coins(self.total_supply)?;
        let mut builder = Builder::new();
        builder.store_coins(self.total_supply)?;
        builder.store_address(Some(&self.admin))?;
        builder.store_address(Some(&self.next_admin))?;
        builder.store_ref(self.wallet_code.clone())?;
        builder.store_ref(self.metadata.clone())?;
        Ok(builder.build()?)
    }
}

/// Code and data for deploying a minter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinterInit {
    pub code: ArcCell,
    pub data: ArcCell,
}

impl MinterInit {
    pub fn state_init(&self) -> StateInit {
        StateInit::new(self.code.clone(), self.data.clone())
    }

    pub fn address(&self, workchain: i8) -> Result<Address, EncodeError> {
        Ok(self.state_init().address(workchain)?)
    }
}

/// Wallet data at deployment: `balance:Coins owner:MsgAddress
/// minter:MsgAddress wallet_code:^Cell` with a zero balance
pub fn wallet_data_cell(
    owner: &Address,
    minter: &Address,
    wallet_code: &ArcCell,
) -> Result<ArcCell, EncodeError> {
    let mut builder = Builder::new();
    builder.store_coins(0)?;
    builder.store_address(Some(owner))?;
    builder.store_address(Some(minter))?;
    builder.store_ref(wallet_code.clone())?;
    Ok(builder.build()?)
}

/// Predicts the jetton wallet address the minter assigns to `owner`
pub fn calculate_wallet_address(
    owner: &Address,
    minter: &Address,
    wallet_code: &ArcCell,
) -> Result<Address, EncodeError> {
    let data = wallet_data_cell(owner, minter, wallet_code)?;
    let address = StateInit::new(wallet_code.clone(), data).address(BASECHAIN)?;
    debug!(
        "wallet of {} under {} is {}",
        owner.to_raw(),
        minter.to_raw(),
        address.to_raw()
    );
    Ok(address)
}
