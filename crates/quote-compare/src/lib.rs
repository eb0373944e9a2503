pub mod abi;
pub mod aggregator;
pub mod amount;
pub mod config;
pub mod contracts;
pub mod direction;
pub mod engine;
pub mod error;
pub mod format;
pub mod notify;
#[cfg(feature = "rpc")]
pub mod rpc;
pub mod token;

#[cfg(test)]
mod mock;

// Re-exports for convenience
pub use aggregator::{QuoteAggregator, QuoteResult};
pub use amount::FixedPoint;
pub use config::QuoterConfig;
pub use contracts::ContractCaller;
pub use direction::Direction;
pub use engine::{QuoteEngine, QuoteRequest};
pub use error::QuoteError;
pub use notify::{Notification, NotificationKind, Notifier};
pub use token::{Token, TokenList, TokenSource};

/// Quote a pair once without notification channels.
///
/// Encodes `amount`, runs the pool check and both quoters, and returns the
/// formatted comparison.
pub async fn compare<C: ContractCaller>(
    aggregator: &QuoteAggregator<C>,
    direction: Direction,
    source: &Token,
    dest: &Token,
    amount: &str,
) -> Result<String, QuoteError> {
    let amount = crate::amount::encode(amount)?;
    let result = aggregator.aggregate(direction, source, dest, &amount).await?;
    Ok(format::format_quote(&result))
}
