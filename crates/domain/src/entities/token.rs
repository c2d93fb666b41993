use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Contract address, as reported by the indexer.
    pub address: String,
    pub symbol: String,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
        }
    }
}
