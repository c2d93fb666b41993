//! Configuration passed explicitly to the client and the paginator.

use crate::error::DataError;
use reqwest::{IntoUrl, Url};
use std::fmt;
use std::time::Duration;

/// Uniswap V3 mainnet subgraph on The Graph gateway.
pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://gateway.thegraph.com/api/subgraphs/id/5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV";

/// Largest `first` argument the gateway accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Where and how to reach the subgraph.
#[derive(Clone)]
pub struct SubgraphConfig {
    /// GraphQL endpoint.
    pub endpoint: Url,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,
}

impl SubgraphConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the default timeout.
    ///
    /// # Errors
    /// Returns an error if `endpoint` is not a valid URL.
    pub fn new(endpoint: impl IntoUrl, api_key: impl Into<String>) -> Result<Self, DataError> {
        Ok(Self {
            endpoint: endpoint.into_url().map_err(DataError::InvalidEndpoint)?,
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for SubgraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubgraphConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Page size and safety bound for cursor-based pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    page_size: u32,
    max_pages: u32,
}

impl PagingConfig {
    /// Default bound on non-empty pages per resource.
    pub const DEFAULT_MAX_PAGES: u32 = 10_000;

    /// Creates a paging configuration.
    ///
    /// `page_size` is clamped to `1..=1000` and `max_pages` to at least 1.
    #[must_use]
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            max_pages: max_pages.max(1),
        }
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Maximum number of non-empty pages fetched before giving up.
    #[must_use]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self::new(MAX_PAGE_SIZE, Self::DEFAULT_MAX_PAGES)
    }
}
