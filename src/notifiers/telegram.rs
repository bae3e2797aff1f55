use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use teloxide::prelude::*; // brings Requester
use teloxide::types::{ChatId, Recipient};
use log::{info, debug, error};

use super::Sink;
use crate::error::WatchError;

/// Numeric ids go to a chat, anything else to a channel username.
fn recipient(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
    }
}

#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
    recipient: Recipient,
    timeout: Duration,
}

impl std::fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TelegramSink(recipient={:?})", self.recipient)
    }
}

impl TelegramSink {
    pub fn new(token: &str, chat_id: &str, timeout: Duration) -> Self {
        Self { bot: Bot::new(token), recipient: recipient(chat_id), timeout }
    }
}

#[async_trait]
impl Sink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    /// Check the token once; only logged, never fatal.
    async fn verify(&self) {
        match self.bot.get_me().await {
            Ok(me) => debug!(
                "Telegram running as @{} (id={})",
                me.user.username.as_deref().unwrap_or("unknown"),
                me.user.id.0
            ),
            Err(e) => error!("Telegram getMe error: {e}"),
        }
    }

    async fn send(&self, text: &str) -> Result<()> {
        info!("Sending notification from telegram..");
        let request = self.bot.send_message(self.recipient.clone(), text);
        tokio::time::timeout(self.timeout, async move { request.await })
            .await
            .map_err(|_| WatchError::Dispatch(format!("telegram timed out after {:?}", self.timeout)))??;
        debug!("Sent by telegram to {:?}", &self.recipient);
        Ok(())
    }
}
