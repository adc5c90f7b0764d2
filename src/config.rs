use crate::jetton::{BASECHAIN, DEFAULT_FORWARD_TON};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MAINNET_BASE_URL: &str = "https://toncenter.com/api/v3";
pub const TESTNET_BASE_URL: &str = "https://testnet.toncenter.com/api/v3";

/// Settings for the toncenter HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientParams {
    /// Request timeout in seconds
    pub timeout: u64,
    pub api_key: Option<String>,
    /// Overrides the network default when set
    pub base_url: Option<String>,
    pub testnet: bool,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            timeout: 5,
            api_key: None,
            base_url: None,
            testnet: false,
        }
    }
}

impl ClientParams {
    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.testnet => TESTNET_BASE_URL,
            None => MAINNET_BASE_URL,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinterDefaults {
    /// Nanotons attached to minter messages
    pub forward_ton: u128,
    pub workchain: i8,
}

impl Default for MinterDefaults {
    fn default() -> Self {
        Self {
            forward_ton: DEFAULT_FORWARD_TON,
            workchain: BASECHAIN,
        }
    }
}
