//! Errors raised by the domain model.

use thiserror::Error;

/// Errors produced while building requests or converting records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A record field could not be converted to its expected type.
    #[error("malformed {entity} record `{id}`: field `{field}` has invalid value `{value}`")]
    MalformedRecord {
        /// Kind of record ("pool" or "tick").
        entity: &'static str,
        /// Record identifier as reported by the server.
        id: String,
        /// Wire name of the offending field.
        field: &'static str,
        /// Raw value that failed to convert.
        value: String,
    },
    /// A fee tier outside the supported set was requested.
    #[error("unsupported fee tier {0}, expected one of 100, 500, 3000, 10000")]
    UnsupportedFeeTier(u32),
    /// A request was built without any fee tier.
    #[error("at least one fee tier must be requested")]
    NoFeeTiers,
    /// A token symbol was empty after trimming.
    #[error("token symbol must not be empty")]
    EmptySymbol,
}

impl DomainError {
    /// Shorthand for a malformed tick field.
    pub fn malformed_tick(
        id: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            entity: "tick",
            id: id.into(),
            field,
            value: value.into(),
        }
    }

    /// Shorthand for a malformed pool field.
    pub fn malformed_pool(
        id: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            entity: "pool",
            id: id.into(),
            field,
            value: value.into(),
        }
    }
}
