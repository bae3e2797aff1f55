use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use super::Sink;
use crate::error::WatchError;

/// Runs a local command on every trigger.
///
/// The command line is split with POSIX shell rules, not run through a shell.
/// Its exit status is only logged and there is no timeout.
#[derive(Clone, Debug)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
}

impl CommandSink {
    pub fn new(command_line: &str) -> Result<Self, WatchError> {
        let words = shlex::split(command_line)
            .ok_or_else(|| WatchError::config(format!("cannot parse command: {command_line}")))?;
        let mut words = words.into_iter();
        let program = words
            .next()
            .ok_or_else(|| WatchError::config("command is empty"))?;
        Ok(Self { program, args: words.collect() })
    }
}

#[async_trait]
impl Sink for CommandSink {
    fn name(&self) -> &str {
        "command"
    }

    async fn send(&self, _msg: &str) -> Result<()> {
        info!("Running notification command '{}'..", self.program);
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .await
            .map_err(|e| WatchError::Dispatch(format!("cannot run '{}': {e}", self.program)))?;
        debug!("'{}' exited with {status}", self.program);
        Ok(())
    }
}
