use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A token as selected for a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub address: String,
}

impl Token {
    pub fn new(symbol: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            address: address.into(),
        }
    }

    /// Address comparison is case-insensitive (checksummed vs lowercase hex).
    pub fn same_address(&self, other: &Token) -> bool {
        self.address.eq_ignore_ascii_case(&other.address)
    }
}

/// One entry of a Uniswap-style token list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenListEntry {
    #[serde(rename = "chainId")]
    pub chain_id: u64,

    pub address: String,

    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl TokenListEntry {
    pub fn to_token(&self) -> Token {
        Token::new(self.symbol.clone(), self.address.clone())
    }
}

/// Trait for token list providers.
pub trait TokenSource {
    fn entries(&self) -> &[TokenListEntry];
}

/// Token list held in memory, usually parsed from a token list JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenList {
    #[serde(default)]
    pub name: String,

    pub tokens: Vec<TokenListEntry>,
}

impl TokenList {
    pub fn new(tokens: Vec<TokenListEntry>) -> Self {
        Self {
            name: String::new(),
            tokens,
        }
    }

    /// Parse a token list document (`{ "name": ..., "tokens": [...] }`).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl TokenSource for TokenList {
    fn entries(&self) -> &[TokenListEntry] {
        &self.tokens
    }
}

/// Tokens selectable on one side of the form: those on `chain_id`, minus the
/// token already picked on the opposite side.
pub fn options(source: &dyn TokenSource, chain_id: u64, exclude: Option<&Token>) -> Vec<Token> {
    source
        .entries()
        .iter()
        .filter(|entry| entry.chain_id == chain_id)
        .map(TokenListEntry::to_token)
        .filter(|token| exclude.is_none_or(|other| !token.same_address(other)))
        .collect()
}

/// Look up a token on `chain_id` by symbol, ignoring case.
pub fn find_by_symbol(source: &dyn TokenSource, chain_id: u64, symbol: &str) -> Option<Token> {
    source
        .entries()
        .iter()
        .find(|entry| entry.chain_id == chain_id && entry.symbol.eq_ignore_ascii_case(symbol))
        .map(TokenListEntry::to_token)
}
