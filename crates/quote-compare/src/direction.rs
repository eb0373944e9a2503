use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::token::Token;

/// Swap direction chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Exact input: the amount is denominated in the source token.
    #[default]
    Sell,
    /// Exact output: the amount is denominated in the destination token.
    Buy,
}

impl Direction {
    pub fn from_buy_flag(buy: bool) -> Self {
        if buy {
            Direction::Buy
        } else {
            Direction::Sell
        }
    }

    /// Label for the amount input field.
    pub fn amount_label(self) -> &'static str {
        match self {
            Direction::Sell => "Amount in source tokens",
            Direction::Buy => "Amount in destination tokens",
        }
    }

    /// Calling conventions of both quoters for this direction.
    pub fn route(self) -> &'static Route {
        &ROUTES[self as usize]
    }
}

/// Order in which a (source, dest) pair is passed to a quoter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrder {
    SourceDest,
    DestSource,
}

impl PairOrder {
    pub fn apply<'a>(self, source: &'a Token, dest: &'a Token) -> (&'a Token, &'a Token) {
        match self {
            PairOrder::SourceDest => (source, dest),
            PairOrder::DestSource => (dest, source),
        }
    }
}

/// Entry points of the custom quoter contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryEntry {
    /// `estimateMaxSwapUniswapV3(tokenIn, tokenOut, amountIn)`
    EstimateMaxSwap,
    /// `estimateMinSwapUniswapV3(tokenIn, tokenOut, amountOut)`
    EstimateMinSwap,
}

/// Entry points of the lens quoter contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceEntry {
    QuoteExactInputSingle,
    QuoteExactOutputSingle,
}

/// How each quoter is called for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub primary_entry: PrimaryEntry,
    pub primary_order: PairOrder,
    pub reference_entry: ReferenceEntry,
    pub reference_order: PairOrder,
}

/// Indexed by `Direction as usize`. The custom quoter swaps the pair for BUY;
/// the lens quoter keeps (source, dest) and switches entry point instead.
static ROUTES: [Route; 2] = [
    // Sell
    Route {
        primary_entry: PrimaryEntry::EstimateMaxSwap,
        primary_order: PairOrder::SourceDest,
        reference_entry: ReferenceEntry::QuoteExactInputSingle,
        reference_order: PairOrder::SourceDest,
    },
    // Buy
    Route {
        primary_entry: PrimaryEntry::EstimateMinSwap,
        primary_order: PairOrder::DestSource,
        reference_entry: ReferenceEntry::QuoteExactOutputSingle,
        reference_order: PairOrder::SourceDest,
    },
];

/// Fully ordered call arguments for both quoters.
#[derive(Debug, Clone)]
pub struct ResolvedCalls {
    pub direction: Direction,
    pub primary_entry: PrimaryEntry,
    pub primary_pair: (Token, Token),
    pub reference_entry: ReferenceEntry,
    pub reference_pair: (Token, Token),
}

/// Resolve argument order for both quoters.
///
/// Both tokens must be selected and distinct.
pub fn resolve(
    buy: bool,
    source: Option<&Token>,
    dest: Option<&Token>,
) -> Result<ResolvedCalls, QuoteError> {
    let (source, dest) = check_selection(source, dest)?;
    let direction = Direction::from_buy_flag(buy);
    let route = direction.route();

    let ordered = |order: PairOrder| {
        let (a, b) = order.apply(source, dest);
        (a.clone(), b.clone())
    };

    Ok(ResolvedCalls {
        direction,
        primary_entry: route.primary_entry,
        primary_pair: ordered(route.primary_order),
        reference_entry: route.reference_entry,
        reference_pair: ordered(route.reference_order),
    })
}

/// Ensure both sides are selected and refer to different tokens.
pub fn check_selection<'a>(
    source: Option<&'a Token>,
    dest: Option<&'a Token>,
) -> Result<(&'a Token, &'a Token), QuoteError> {
    let source = source
        .ok_or_else(|| QuoteError::IncompleteSelection("source token not selected".to_string()))?;
    let dest = dest.ok_or_else(|| {
        QuoteError::IncompleteSelection("destination token not selected".to_string())
    })?;

    if source.same_address(dest) {
        return Err(QuoteError::IncompleteSelection(format!(
            "source and destination are both {}",
            source.symbol
        )));
    }

    Ok((source, dest))
}
