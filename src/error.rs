use thiserror::Error;

/// Failures the watcher distinguishes between.
///
/// Only `Config` is fatal: it is raised before the poll loop starts.
/// `Fetch` and `Dispatch` are logged and the loop carries on.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Fetch(String),

    #[error("notification failed: {0}")]
    Dispatch(String),
}

impl WatchError {
    pub fn config(msg: impl Into<String>) -> Self {
        WatchError::Config(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, WatchError::Config(_))
    }
}

impl From<reqwest::Error> for WatchError {
    fn from(err: reqwest::Error) -> Self {
        WatchError::Fetch(err.to_string())
    }
}
