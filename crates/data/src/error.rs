//! Errors raised while talking to the subgraph.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;
use tickscope_domain::error::DomainError;

/// Failure of a single request attempt. Always eligible for retry.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or body decoding failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: StatusCode },
}

/// Errors surfaced by the data layer. All of them are fatal to the fetch
/// that produced them.
#[derive(Debug, Error)]
pub enum DataError {
    /// The endpoint could not be parsed as a URL.
    #[error("invalid subgraph endpoint: {0}")]
    InvalidEndpoint(#[source] reqwest::Error),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Every attempt allowed by the retry policy failed.
    #[error("query failed after {attempts} attempts: {source}")]
    QueryExhausted {
        attempts: u32,
        #[source]
        source: TransportError,
    },
    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The server reported GraphQL errors instead of data.
    #[error("subgraph error: {0}")]
    GraphQl(String),
    /// A query used a name that is not a valid GraphQL identifier.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// A record could not be converted into the domain model.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Pagination did not reach an empty page within the configured bound.
    #[error("pagination over {resource} exceeded {max_pages} pages")]
    PageLimitExceeded { resource: String, max_pages: u32 },
    /// A record id came back on a later page, so the cursor is not advancing.
    #[error("{resource} record `{id}` was returned more than once; ids must be served in ascending order")]
    RepeatedRecord { resource: String, id: String },
    /// Reading or writing a cache file failed.
    #[error("cache file {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A cache file could not be encoded or decoded.
    #[error("cache file {}: {source}", path.display())]
    CacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DataError {
    /// Returns true for malformed record errors coming from the domain model.
    #[must_use]
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::Domain(DomainError::MalformedRecord { .. }))
    }
}
