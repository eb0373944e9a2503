use crate::aggregator::QuoteResult;
use crate::amount;
use crate::direction::Direction;

/// Render both quotes as one sentence for the success channel.
///
/// SELL quotes what the user would receive in the destination token, BUY
/// quotes what they would give in the source token.
pub fn format_quote(result: &QuoteResult) -> String {
    let primary = amount::decode(&result.primary);
    let reference = amount::decode(&result.reference);

    let (verb, symbol) = match result.direction {
        Direction::Sell => ("receive", &result.dest.symbol),
        Direction::Buy => ("give", &result.source.symbol),
    };

    format!("You would {verb} {primary} {symbol} (Uniswap V3 lens quoter: {reference} {symbol})")
}
