//! Message bodies accepted by the minter's dispatch table

use crate::jetton::constants::*;
use crate::jetton::error::{DecodeError, EncodeError};
use crate::jetton::writer::PayloadWriter;
use crate::tvm::{Address, ArcCell, Builder, CellSlice, MAX_COINS};
use log::debug;
use std::num::IntErrorKind;
use std::str::FromStr;

/// Comment field of a notify message.
///
/// The contract reads this field as a `MsgAddress`, so only strings that
/// parse as an address are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyComment(pub Address);

impl FromStr for NotifyComment {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Address>()
            .map(NotifyComment)
            .map_err(|_| EncodeError::InvalidComment(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinterMessage {
    /// `mint#00000001 to:MsgAddress amount:Coins`
    Mint { to: Address, amount: u128 },
    /// `burn_notification#00000002 query_id:uint64 amount:Coins from:MsgAddress`
    BurnNotification {
        query_id: u64,
        amount: u128,
        from: Address,
    },
    /// `change_owner#00000003 new_admin:MsgAddress`
    ChangeAdmin { new_admin: Address },
    /// `notify#7362d09c sender:MsgAddress amount:Coins comment:MsgAddress`
    Notify {
        sender: Address,
        amount: u128,
        comment: NotifyComment,
    },
}

impl MinterMessage {
    pub fn opcode(&self) -> u32 {
        match self {
            MinterMessage::Mint { .. } => MINT_OPCODE,
            MinterMessage::BurnNotification { .. } => BURN_OPCODE,
            MinterMessage::ChangeAdmin { .. } => CHANGE_OWNER_OPCODE,
            MinterMessage::Notify { .. } => JETTON_NOTIFY_OPCODE,
        }
    }

    fn amount(&self) -> Option<u128> {
        match self {
            MinterMessage::Mint { amount, .. }
            | MinterMessage::BurnNotification { amount, .. }
            | MinterMessage::Notify { amount, .. } => Some(*amount),
            MinterMessage::ChangeAdmin { .. } => None,
        }
    }

    /// Checks inputs without writing anything
    pub fn validate(&self) -> Result<(), EncodeError> {
        match self.amount() {
            Some(amount) => check_coins(amount),
            None => Ok(()),
        }
    }

    pub fn write_to<W: PayloadWriter + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.validate()?;
        w.write_uint(self.opcode() as u64, 32)?;
        match self {
            MinterMessage::Mint { to, amount } => {
                w.write_address(to)?;
                w.write_coins(*amount)?;
            }
            MinterMessage::BurnNotification {
                query_id,
                amount,
                from,
            } => {
                w.write_uint(*query_id, 64)?;
                w.write_coins(*amount)?;
                w.write_address(from)?;
            }
            MinterMessage::ChangeAdmin { new_admin } => {
                w.write_address(new_admin)?;
            }
            MinterMessage::Notify {
                sender,
                amount,
                comment,
            } => {
                w.write_address(sender)?;
                w.write_coins(*amount)?;
                w.write_address(&comment.0)?;
            }
        }
        Ok(())
    }

    pub fn to_cell(&self) -> Result<ArcCell, EncodeError> {
        let mut builder = Builder::new();
        self.write_to(&mut builder)?;
        let cell = builder.build()?;
        debug!("encoded {:?} into {}", self, cell.hash_hex());
        Ok(cell)
    }

    /// Parses a body produced by [`MinterMessage::to_cell`]
    pub fn from_cell(cell: ArcCell) -> Result<Self, DecodeError> {
        let mut slice = CellSlice::new(cell);
        let opcode = slice.load_u32()?;
        let message = match opcode {
            MINT_OPCODE => MinterMessage::Mint {
                to: required_address(&mut slice, "to")?,
                amount: slice.load_coins()?,
            },
            BURN_OPCODE => MinterMessage::BurnNotification {
                query_id: slice.load_u64()?,
                amount: slice.load_coins()?,
                from: required_address(&mut slice, "from")?,
            },
            CHANGE_OWNER_OPCODE => MinterMessage::ChangeAdmin {
                new_admin: required_address(&mut slice, "new_admin")?,
            },
            JETTON_NOTIFY_OPCODE => MinterMessage::Notify {
                sender: required_address(&mut slice, "sender")?,
                amount: slice.load_coins()?,
                comment: NotifyComment(required_address(&mut slice, "comment")?),
            },
            other => return Err(DecodeError::UnknownOpcode(other)),
        };
        if !slice.is_empty() {
            return Err(DecodeError::TrailingData {
                bits: slice.remaining_bits(),
                refs: slice.remaining_refs(),
            });
        }
        Ok(message)
    }
}

fn required_address(slice: &mut CellSlice, field: &'static str) -> Result<Address, DecodeError> {
    slice.load_address()?.ok_or(DecodeError::MissingAddress(field))
}

pub fn check_coins(amount: u128) -> Result<(), EncodeError> {
    if amount > MAX_COINS {
        return Err(EncodeError::AmountOutOfRange(amount.to_string()));
    }
    Ok(())
}

/// Parses a base-unit amount from text, rejecting negatives and values the
/// coin encoding cannot hold
pub fn parse_amount(s: &str) -> Result<u128, EncodeError> {
    let s = s.trim();
    if s.starts_with('-') {
        return Err(EncodeError::NegativeAmount(s.to_string()));
    }
    let amount = s.parse::<u128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => EncodeError::AmountOutOfRange(s.to_string()),
        _ => EncodeError::InvalidAmount(s.to_string()),
    })?;
    check_coins(amount)?;
    Ok(amount)
}
