use anyhow::Result;
use async_trait::async_trait;
use log::info;

use super::Sink;

/// Prints the notification text to stdout.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self { Self }
}

#[async_trait]
impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, text: &str) -> Result<()> {
        info!("Sending notification from console..");
        println!("\n{text}\n");
        Ok(())
    }
}
