use crate::jetton::code::CodeLoader;
use crate::jetton::config::{MinterConfig, MinterInit, calculate_wallet_address};
use crate::jetton::constants::*;
use crate::jetton::data::{JettonData, parse_jetton_data, parse_wallet_address, wallet_address_query};
use crate::jetton::error::{EncodeError, JettonError};
use crate::jetton::message::{MinterMessage, NotifyComment};
use crate::provider::{ContractProvider, InternalMessage, MessageSender, SendMode};
use crate::tvm::{Address, ArcCell};
use log::info;

/// A deployed (or about to be deployed) minter instance
#[derive(Debug, Clone)]
pub struct JettonMinter {
    pub address: Address,
    pub init: Option<MinterInit>,
    forward_ton: u128,
}

impl JettonMinter {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            init: None,
            forward_ton: DEFAULT_FORWARD_TON,
        }
    }

    pub fn from_init(init: MinterInit, workchain: i8) -> Result<Self, EncodeError> {
        Ok(Self {
            address: init.address(workchain)?,
            init: Some(init),
            forward_ton: DEFAULT_FORWARD_TON,
        })
    }

    /// Value attached when a call passes no override
    pub fn with_forward_ton(mut self, forward_ton: u128) -> Self {
        self.forward_ton = forward_ton;
        self
    }

    pub fn forward_ton(&self) -> u128 {
        self.forward_ton
    }

    /// Code and initial data for the built-in minter configuration
    pub fn init<L: CodeLoader + ?Sized>(
        wallet_code: ArcCell,
        loader: &L,
    ) -> Result<MinterInit, JettonError> {
        let data = MinterConfig::initial(wallet_code)?.to_data_cell()?;
        let code = loader.load_minter_code()?;
        Ok(MinterInit { code, data })
    }

    fn message(&self, value: u128, body: Option<ArcCell>) -> InternalMessage {
        InternalMessage {
            to: self.address,
            value,
            bounce: true,
            send_mode: SendMode::PAY_GAS_SEPARATELY,
            body,
            state_init: None,
        }
    }

    async fn send_body<S: MessageSender + ?Sized>(
        &self,
        sender: &S,
        message: MinterMessage,
        forward_ton: Option<u128>,
    ) -> Result<(), JettonError> {
        let body = message.to_cell()?;
        let value = forward_ton.unwrap_or(self.forward_ton);
        info!(
            "sending op {:#x} to {} with {} nanotons",
            message.opcode(),
            self.address,
            value
        );
        sender.send_internal(self.message(value, Some(body))).await?;
        Ok(())
    }

    /// Sends the state init with an empty body
    pub async fn send_deploy<S: MessageSender + ?Sized>(
        &self,
        sender: &S,
        value: u128,
    ) -> Result<(), JettonError> {
        let init = self
            .init
            .as_ref()
            .ok_or(EncodeError::MissingField("state_init"))?;
        let mut message = self.message(value, None);
        message.bounce = false;
        message.state_init = Some(init.state_init());
        info!("deploying minter {} with {} nanotons", self.address, value);
        sender.send_internal(message).await?;
        Ok(())
    }

    pub async fn send_mint<S: MessageSender + ?Sized>(
        &self,
        sender: &S,
        to: &Address,
        jetton_amount: u128,
        forward_ton: Option<u128>,
    ) -> Result<(), JettonError> {
        let message = MinterMessage::Mint {
            to: *to,
            amount: jetton_amount,
        };
        self.send_body(sender, message, forward_ton).await
    }

    pub async fn send_burn_notification<S: MessageSender + ?Sized>(
        &self,
        sender: &S,
        from: &Address,
        jetton_amount: u128,
        query_id: u64,
        forward_ton: Option<u128>,
    ) -> Result<(), JettonError> {
        let message = MinterMessage::BurnNotification {
            query_id,
            amount: jetton_amount,
            from: *from,
        };
        self.send_body(sender, message, forward_ton).await
    }

    pub async fn send_change_admin<S: MessageSender + ?Sized>(
        &self,
        sender: &S,
        new_admin: &Address,
        forward_ton: Option<u128>,
    ) -> Result<(), JettonError> {
        let message = MinterMessage::ChangeAdmin {
            new_admin: *new_admin,
        };
        self.send_body(sender, message, forward_ton).await
    }

    pub async fn send_notify<S: MessageSender + ?Sized>(
        &self,
        sender: &S,
        from: &Address,
        amount: u128,
        comment: &str,
        forward_ton: Option<u128>,
    ) -> Result<(), JettonError> {
        let message = MinterMessage::Notify {
            sender: *from,
            amount,
            comment: comment.parse::<NotifyComment>()?,
        };
        self.send_body(sender, message, forward_ton).await
    }

    pub async fn get_jetton_data<P: ContractProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<JettonData, JettonError> {
        let stack = provider
            .run_get_method(&self.address, GET_JETTON_DATA_METHOD, Vec::new())
            .await?;
        Ok(parse_jetton_data(stack)?)
    }

    pub async fn get_wallet_address<P: ContractProvider + ?Sized>(
        &self,
        provider: &P,
        owner: &Address,
    ) -> Result<Address, JettonError> {
        let query = wallet_address_query(owner)?;
        let stack = provider
            .run_get_method(&self.address, GET_WALLET_ADDRESS_METHOD, query)
            .await?;
        Ok(parse_wallet_address(stack)?)
    }

    /// Off-chain prediction of `owner`'s jetton wallet, no network involved
    pub fn calculate_wallet_address(
        owner: &Address,
        minter: &Address,
        wallet_code: &ArcCell,
    ) -> Result<Address, EncodeError> {
        calculate_wallet_address(owner, minter, wallet_code)
    }
}
