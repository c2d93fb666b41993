use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unordered, case-insensitive pair of token symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    /// Lesser normalized symbol.
    low: String,
    /// Greater normalized symbol.
    high: String,
}

impl TokenPair {
    /// Creates a pair from two symbols in any order and any case.
    pub fn new(token_a: &str, token_b: &str) -> Result<Self, DomainError> {
        let a = normalize(token_a)?;
        let b = normalize(token_b)?;
        Ok(Self::ordered(a, b))
    }

    fn ordered(a: String, b: String) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns true when `{symbol0, symbol1}` is this pair, ignoring order and case.
    ///
    /// Server symbols are compared as reported; only the caller's input is trimmed.
    #[must_use]
    pub fn matches(&self, symbol0: &str, symbol1: &str) -> bool {
        let (x, y) = (symbol0.to_uppercase(), symbol1.to_uppercase());
        let (low, high) = if x <= y { (x, y) } else { (y, x) };
        low == self.low && high == self.high
    }

    /// Both symbols, uppercased, in lexical order.
    #[must_use]
    pub fn symbols(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.low, self.high)
    }
}

fn normalize(symbol: &str) -> Result<String, DomainError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(DomainError::EmptySymbol);
    }
    Ok(symbol.to_uppercase())
}
