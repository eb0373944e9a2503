use log::{info, warn};
use tokio::sync::Mutex;

use crate::aggregator::QuoteAggregator;
use crate::amount;
use crate::config::QuoterConfig;
use crate::contracts::ContractCaller;
use crate::direction::{self, Direction};
use crate::error::QuoteError;
use crate::format::format_quote;
use crate::notify::Notifier;
use crate::token::Token;

/// Everything the user entered for one quote request.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub direction: Direction,
    pub source: Option<Token>,
    pub dest: Option<Token>,
    pub amount: String,
}

impl QuoteRequest {
    pub fn new(direction: Direction, source: Token, dest: Token, amount: impl Into<String>) -> Self {
        Self {
            direction,
            source: Some(source),
            dest: Some(dest),
            amount: amount.into(),
        }
    }
}

/// Runs quote requests one at a time and reports each outcome on exactly one
/// notification channel.
pub struct QuoteEngine<C> {
    aggregator: QuoteAggregator<C>,
    notifier: Notifier,
    in_flight: Mutex<()>,
}

impl<C: ContractCaller> QuoteEngine<C> {
    pub fn new(aggregator: QuoteAggregator<C>, notifier: Notifier) -> Self {
        Self {
            aggregator,
            notifier,
            in_flight: Mutex::new(()),
        }
    }

    pub fn from_config(caller: C, config: &QuoterConfig) -> Self {
        let aggregator = QuoteAggregator::new(
            caller,
            config.quoter_address.clone(),
            config.lens_address.clone(),
            config.fee_tier,
            config.call_timeout(),
        );
        let notifier = Notifier::new(config.success_display(), config.error_display());
        Self::new(aggregator, notifier)
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Whether a request is currently running.
    pub fn is_loading(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Run one quote request.
    ///
    /// Returns `QuoteError::Busy` without touching either channel when another
    /// request is still pending. Every other outcome is shown on the success
    /// or the error channel.
    pub async fn get_quote(&self, request: &QuoteRequest) -> Result<String, QuoteError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!("quote requested while another is loading");
            return Err(QuoteError::Busy);
        };

        let outcome = self.run(request).await;
        match &outcome {
            Ok(text) => {
                info!("{text}");
                self.notifier.success(text.clone());
            }
            Err(e) => {
                warn!("quote request failed: {e}");
                self.notifier.error(e.user_message());
            }
        }
        outcome
    }

    async fn run(&self, request: &QuoteRequest) -> Result<String, QuoteError> {
        let amount = amount::encode(&request.amount)?;
        let (source, dest) = direction::check_selection(request.source.as_ref(), request.dest.as_ref())?;

        let result = self
            .aggregator
            .aggregate(request.direction, source, dest, &amount)
            .await?;
        Ok(format_quote(&result))
    }
}
