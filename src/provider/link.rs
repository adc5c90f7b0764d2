use crate::provider::{InternalMessage, MessageSender, ProviderError};
use crate::tvm::boc_to_base64_url;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Mutex;

/// Renders messages as `ton://transfer` links for an external wallet to sign.
///
/// The send mode has no place in a transfer link; wallets apply their own.
#[derive(Debug, Default)]
pub struct TransferLinkSender {
    testnet: bool,
    links: Mutex<Vec<String>>,
}

impl TransferLinkSender {
    pub fn new(testnet: bool) -> Self {
        Self {
            testnet,
            links: Mutex::new(Vec::new()),
        }
    }

    pub fn render(&self, message: &InternalMessage) -> Result<String, ProviderError> {
        let mut link = format!(
            "ton://transfer/{}?amount={}",
            message.to.to_friendly(message.bounce, self.testnet),
            message.value
        );
        if let Some(body) = &message.body {
            link.push_str("&bin=");
            link.push_str(&boc_to_base64_url(body)?);
        }
        if let Some(init) = &message.state_init {
            link.push_str("&init=");
            link.push_str(&boc_to_base64_url(&init.to_cell()?)?);
        }
        Ok(link)
    }

    /// Links rendered so far, oldest first
    pub fn links(&self) -> Vec<String> {
        self.links
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl MessageSender for TransferLinkSender {
    async fn send_internal(&self, message: InternalMessage) -> Result<(), ProviderError> {
        let link = self.render(&message)?;
        debug!("send mode {:?} for {}", message.send_mode, message.to.to_raw());
        info!("transfer link: {}", link);
        self.links
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(link);
        Ok(())
    }
}
