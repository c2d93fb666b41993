use crate::config::SubgraphConfig;
use crate::error::{DataError, TransportError};
use crate::subgraph::query::GraphQlQuery;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::fmt;

/// Sends one query and returns the decoded JSON body.
///
/// Implementations report every failure as a [`TransportError`]; whether to
/// retry is decided by [`SubgraphClient`](super::SubgraphClient).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, query: &GraphQlQuery) -> Result<Value, TransportError>;
}

/// HTTPS transport authenticating with a bearer token.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &SubgraphConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Client)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, query: &GraphQlQuery) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status });
        }

        Ok(response.json::<Value>().await?)
    }
}
