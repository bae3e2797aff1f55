use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info};

pub mod command;
pub mod console;
pub mod telegram;

use crate::config::PollConfig;
use crate::error::WatchError;
use command::CommandSink;
use console::ConsoleSink;
use telegram::TelegramSink;

/// A notification action run once per trigger.
#[async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;
    async fn send(&self, msg: &str) -> Result<()>;

    /// Optional startup check, logged only.
    async fn verify(&self) {}
}

/// Runs every configured sink, in order, one after the other.
#[derive(Default)]
pub struct Notifier {
    sinks: Vec<Box<dyn Sink>>,
}

impl Notifier {
    /// Command first, then Telegram, then console.
    pub fn from_config(config: &PollConfig) -> Result<Self, WatchError> {
        let mut notifier = Notifier::default();
        if let Some(command) = &config.command {
            notifier = notifier.with_sink(Box::new(CommandSink::new(command)?));
        }
        if let Some((token, chat_id)) = config.telegram() {
            notifier = notifier.with_sink(Box::new(TelegramSink::new(token, chat_id, config.timeout())));
        }
        if config.print_message {
            notifier = notifier.with_sink(Box::new(ConsoleSink::new()));
        }
        Ok(notifier)
    }

    pub fn with_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub async fn verify(&self) {
        for sink in &self.sinks {
            sink.verify().await;
        }
    }

    /// Send to every sink. A failing sink is logged and the others still run.
    pub async fn dispatch(&self, msg: &str) -> usize {
        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.send(msg).await {
                Ok(()) => {
                    debug!("{} notifier done", sink.name());
                    delivered += 1;
                }
                Err(e) => error!("{} notifier failed: {e}", sink.name()),
            }
        }
        if self.sinks.is_empty() {
            info!("No notifier configured, nothing sent");
        }
        delivered
    }
}
