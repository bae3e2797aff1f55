use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;

use crate::config::{Method, PollConfig};
use crate::error::WatchError;

/// One request per call, no retries.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<String, WatchError>;
}

/// Fetches the configured URL over HTTP(S).
pub struct HttpFetcher {
    client: Client,
    url: String,
    method: Method,
}

fn default_user_agent() -> String {
    format!("pollwatch/{}", env!("CARGO_PKG_VERSION"))
}

/// Default `User-Agent` overlaid with the caller's headers.
fn build_headers(config: &PollConfig) -> Result<HeaderMap, WatchError> {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(&default_user_agent())
        .map_err(|e| WatchError::config(format!("invalid user agent: {e}")))?;
    headers.insert(USER_AGENT, agent);

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| WatchError::config(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| WatchError::config(format!("invalid value for header '{name}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

impl HttpFetcher {
    pub fn new(config: &PollConfig) -> Result<Self, WatchError> {
        let client = Client::builder()
            .default_headers(build_headers(config)?)
            .timeout(config.timeout())
            .build()
            .map_err(|e| WatchError::config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, url: config.url.clone(), method: config.method })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String, WatchError> {
        debug!("{:?} {}", self.method, self.url);
        let resp = self
            .client
            .request(self.method.as_reqwest(), &self.url)
            .send()
            .await?
            .error_for_status()?;
        // Declared charset, UTF-8 otherwise, lossy on bad bytes.
        let body = resp.text().await?;
        trace!("fetched {} bytes", body.len());
        Ok(body)
    }
}
