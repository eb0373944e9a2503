use thiserror::Error;

/// Terminal outcome of a failed quote request.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("incomplete token selection: {0}")]
    IncompleteSelection(String),

    #[error("no pool exists for {source_token} -> {dest_token}")]
    PoolNotFound {
        source_token: String,
        dest_token: String,
    },

    #[error("quote source error: {0}")]
    QuoteSource(#[from] SourceError),

    #[error("a quote request is already in flight")]
    Busy,
}

impl QuoteError {
    /// Text shown on the error notification channel.
    pub fn user_message(&self) -> String {
        match self {
            QuoteError::InvalidAmount(_) => "Amount cannot be 0 or negative".to_string(),
            QuoteError::IncompleteSelection(_) => {
                "Select two different tokens to quote".to_string()
            }
            QuoteError::PoolNotFound { .. } => "Pool does not exist for this pair".to_string(),
            QuoteError::QuoteSource(_) => "Provider error, please try again".to_string(),
            QuoteError::Busy => "A quote is already loading".to_string(),
        }
    }
}

/// Which of the two quote sources a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Reference,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Primary => f.write_str("primary quoter"),
            Source::Reference => f.write_str("lens quoter"),
        }
    }
}

/// A failed call against one of the quote sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_kind} call failed: {error}")]
    Call { source_kind: Source, error: CallError },

    #[error("{source_kind} returned malformed data: {error}")]
    Abi { source_kind: Source, error: AbiError },

    #[error("{source_kind} timed out after {millis}ms")]
    Timeout { source_kind: Source, millis: u64 },
}

impl SourceError {
    pub fn source_kind(&self) -> Source {
        match self {
            SourceError::Call { source_kind, .. }
            | SourceError::Abi { source_kind, .. }
            | SourceError::Timeout { source_kind, .. } => *source_kind,
        }
    }
}

/// Errors from a contract caller transport.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors while encoding calldata or decoding return data.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("return data too short: expected at least {expected} bytes, got {actual}")]
    ReturnTooShort { expected: usize, actual: usize },

    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// Errors while loading configuration or token lists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
