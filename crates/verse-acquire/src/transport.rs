use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// One-shot GET returning the response body as text.
///
/// The HTTP status is not interpreted: the verse API reports unknown
/// references with a non-success status and a JSON body, and the body is
/// what decides the outcome.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// reqwest-backed transport. No timeout beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError::Request { url: url.to_string(), source })?;

        let status = response.status();
        tracing::debug!(url = %url, status = %status, "Received response");

        response
            .text()
            .await
            .map_err(|source| TransportError::Body { url: url.to_string(), source })
    }
}
