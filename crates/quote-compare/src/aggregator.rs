use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::amount::FixedPoint;
use crate::contracts::{ContractCaller, LensQuoter, PrimaryQuoter};
use crate::direction::{resolve, Direction};
use crate::error::{QuoteError, Source, SourceError};
use crate::token::Token;

/// Pool fee tier passed to the lens quoter (0.3%).
pub const DEFAULT_FEE_TIER: u32 = 3000;

/// Raw results of both quote sources for one request.
#[derive(Debug, Clone)]
pub struct QuoteResult {
    pub primary: FixedPoint,
    pub reference: FixedPoint,
    pub direction: Direction,
    pub source: Token,
    pub dest: Token,
}

/// Runs the pool precondition and both quote sources.
pub struct QuoteAggregator<C> {
    primary: PrimaryQuoter<Arc<C>>,
    lens: LensQuoter<Arc<C>>,
    call_timeout: Duration,
}

impl<C: ContractCaller> QuoteAggregator<C> {
    pub fn new(
        caller: C,
        quoter_address: impl Into<String>,
        lens_address: impl Into<String>,
        fee_tier: u32,
        call_timeout: Duration,
    ) -> Self {
        let caller = Arc::new(caller);
        Self {
            primary: PrimaryQuoter::new(caller.clone(), quoter_address),
            lens: LensQuoter::new(caller, lens_address, fee_tier),
            call_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        source_kind: Source,
        call: impl Future<Output = Result<T, SourceError>>,
    ) -> Result<T, SourceError> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                source_kind,
                millis: self.call_timeout.as_millis() as u64,
            }),
        }
    }

    /// Whether the custom quoter knows a pool for this pair.
    pub async fn exists(&self, source: &Token, dest: &Token) -> Result<bool, SourceError> {
        self.bounded(Source::Primary, self.primary.does_pool_exist(source, dest))
            .await
    }

    /// Query both quoters for `amount` in the given direction.
    ///
    /// The pool check runs first and no quote call is issued when it fails.
    /// Both quote calls run concurrently and either failure fails the whole
    /// request.
    pub async fn aggregate(
        &self,
        direction: Direction,
        source: &Token,
        dest: &Token,
        amount: &FixedPoint,
    ) -> Result<QuoteResult, QuoteError> {
        let calls = resolve(direction == Direction::Buy, Some(source), Some(dest))?;

        let exists = self.exists(source, dest).await.inspect_err(|e| {
            error!("pool check failed: {e}");
        })?;
        if !exists {
            return Err(QuoteError::PoolNotFound {
                source_token: source.symbol.clone(),
                dest_token: dest.symbol.clone(),
            });
        }

        let (p_in, p_out) = &calls.primary_pair;
        let (r_in, r_out) = &calls.reference_pair;
        debug!(
            "{:?}: primary {:?}({} -> {}), reference {:?}({} -> {})",
            direction, calls.primary_entry, p_in.symbol, p_out.symbol,
            calls.reference_entry, r_in.symbol, r_out.symbol,
        );

        let primary = self.bounded(
            Source::Primary,
            self.primary.estimate(calls.primary_entry, p_in, p_out, amount),
        );
        let reference = self.bounded(
            Source::Reference,
            self.lens.quote(calls.reference_entry, r_in, r_out, amount),
        );

        let (primary, reference) = tokio::try_join!(primary, reference).inspect_err(|e| {
            error!("{} failed: {e}", e.source_kind());
        })?;

        info!(
            "{:?} {} -> {}: primary={} reference={}",
            direction,
            source.symbol,
            dest.symbol,
            primary.raw(),
            reference.raw()
        );

        Ok(QuoteResult {
            primary,
            reference,
            direction,
            source: source.clone(),
            dest: dest.clone(),
        })
    }
}
