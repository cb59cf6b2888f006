use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("The response body is empty")]
    EmptyBody,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A blocking HTTP client.
pub trait HttpTransport {
    /// Sends a `GET` request and returns the body of the response.
    fn get(&self, url: &Url) -> Result<String, TransportError>;
}
