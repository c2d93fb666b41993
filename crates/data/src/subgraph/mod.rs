//! GraphQL access to the indexing service.

mod client;
mod query;
mod transport;

pub use client::SubgraphClient;
pub use query::{GraphQlQuery, QueryBuilder};
pub use transport::{HttpTransport, Transport};

use serde::Deserialize;

/// A numeric field the subgraph may encode either as a JSON string
/// (`BigInt`, `BigDecimal`) or as a JSON number (`Int`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumericText {
    Text(String),
    Number(serde_json::Number),
}

impl NumericText {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}
