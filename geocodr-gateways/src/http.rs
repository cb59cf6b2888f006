use geocodr_core::gateways::http::{HttpTransport, TransportError};
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A blocking HTTP transport based on reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn try_new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        // The URL contains the API key and must not end up in any message.
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|err| anyhow::Error::from(err.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Geocoding provider responded with HTTP status {status}");
        }
        let body = response
            .text()
            .map_err(|err| anyhow::Error::from(err.without_url()))?;
        if body.trim().is_empty() {
            return Err(TransportError::EmptyBody);
        }
        Ok(body)
    }
}
