//! Opcodes and built-in token parameters of the minter contract

pub const MINT_OPCODE: u32 = 1;
pub const BURN_OPCODE: u32 = 2;
pub const CHANGE_OWNER_OPCODE: u32 = 3;
pub const GET_JETTON_DATA_OPCODE: u32 = 4;
pub const GET_WALLET_ADDRESS_OPCODE: u32 = 0x2fcb2bc9;
pub const JETTON_NOTIFY_OPCODE: u32 = 0x7362d09c;
pub const JETTON_INTERNAL_TRANSFER: u32 = 0x0f8a7ea5;

/// Admin and next admin of a freshly initialised minter
pub const INITIAL_OWNER: &str = "0:4818f679ede118884806590b9b705a00fa6aa0cf7009d4b3d128ff263b031c88";
pub const INITIAL_TOTAL_SUPPLY: u128 = 545_217_356_060_974_508_816;

pub const JETTON_NAME: &str = "Dogs";
pub const JETTON_SYMBOL: &str = "DOGS";
pub const JETTON_DECIMALS: u8 = 9;
pub const JETTON_IMAGE: &str = "https://cdn.dogs.dev/dogs.png";

pub const DEFAULT_METADATA_URI: &str = "https://cdn.ton.dev/dogs.json";
pub const DEFAULT_CONTENT_TAG: u8 = 0x8e;

/// 0.05 TON in nanotons, attached to every minter message unless overridden
pub const DEFAULT_FORWARD_TON: u128 = 50_000_000;

pub const BASECHAIN: i8 = 0;

pub const GET_JETTON_DATA_METHOD: &str = "get_jetton_data";
pub const GET_WALLET_ADDRESS_METHOD: &str = "get_wallet_address";
