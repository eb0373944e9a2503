use std::future::Future;
use std::sync::Arc;

use log::debug;
use num_bigint::BigUint;

use crate::abi::{self, Arg};
use crate::amount::FixedPoint;
use crate::direction::{PrimaryEntry, ReferenceEntry};
use crate::error::{AbiError, CallError, Source, SourceError};
use crate::token::Token;

pub const DOES_POOL_EXIST: &str = "doesPoolExist(address,address)";
pub const ESTIMATE_MAX_SWAP: &str = "estimateMaxSwapUniswapV3(address,address,uint256)";
pub const ESTIMATE_MIN_SWAP: &str = "estimateMinSwapUniswapV3(address,address,uint256)";
pub const QUOTE_EXACT_INPUT_SINGLE: &str =
    "quoteExactInputSingle(address,address,uint24,uint256,uint160)";
pub const QUOTE_EXACT_OUTPUT_SINGLE: &str =
    "quoteExactOutputSingle(address,address,uint24,uint256,uint160)";

/// Read-only contract access supplied by the wallet/session provider.
///
/// `to` is the contract address as hex; the returned bytes are the raw ABI
/// return data of the call.
pub trait ContractCaller: Send + Sync {
    fn call(
        &self,
        to: &str,
        calldata: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, CallError>> + Send;
}

impl<C: ContractCaller> ContractCaller for Arc<C> {
    fn call(
        &self,
        to: &str,
        calldata: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, CallError>> + Send {
        (**self).call(to, calldata)
    }
}

fn token_arg(token: &Token) -> Result<Arg, AbiError> {
    Ok(Arg::Address(abi::parse_address(&token.address)?))
}

async fn call_source<C: ContractCaller>(
    caller: &C,
    source_kind: Source,
    to: &str,
    signature: &str,
    args: &[Arg],
) -> Result<Vec<u8>, SourceError> {
    let calldata = abi::encode_call(signature, args)
        .map_err(|error| SourceError::Abi { source_kind, error })?;
    debug!("{source_kind}: {signature} -> {to}");
    caller
        .call(to, calldata)
        .await
        .map_err(|error| SourceError::Call { source_kind, error })
}

/// Client for the custom quoter contract.
#[derive(Debug, Clone)]
pub struct PrimaryQuoter<C> {
    caller: C,
    address: String,
}

impl<C: ContractCaller> PrimaryQuoter<C> {
    pub fn new(caller: C, address: impl Into<String>) -> Self {
        Self {
            caller,
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn call_with(&self, signature: &str, args: &[Arg]) -> Result<Vec<u8>, SourceError> {
        call_source(&self.caller, Source::Primary, &self.address, signature, args).await
    }

    pub async fn does_pool_exist(&self, token_a: &Token, token_b: &Token) -> Result<bool, SourceError> {
        let args = [token_a, token_b]
            .into_iter()
            .map(token_arg)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| SourceError::Abi {
                source_kind: Source::Primary,
                error,
            })?;
        let data = self.call_with(DOES_POOL_EXIST, &args).await?;
        abi::decode_bool(&data).map_err(|error| SourceError::Abi {
            source_kind: Source::Primary,
            error,
        })
    }

    /// Run one of the swap estimates with tokens already in call order.
    pub async fn estimate(
        &self,
        entry: PrimaryEntry,
        token_in: &Token,
        token_out: &Token,
        amount: &FixedPoint,
    ) -> Result<FixedPoint, SourceError> {
        let signature = match entry {
            PrimaryEntry::EstimateMaxSwap => ESTIMATE_MAX_SWAP,
            PrimaryEntry::EstimateMinSwap => ESTIMATE_MIN_SWAP,
        };
        let to_abi = |error| SourceError::Abi {
            source_kind: Source::Primary,
            error,
        };
        let args = [
            token_arg(token_in).map_err(to_abi)?,
            token_arg(token_out).map_err(to_abi)?,
            Arg::uint256(amount.raw().clone()),
        ];
        let data = self.call_with(signature, &args).await?;
        abi::decode_uint(&data).map(FixedPoint::from_raw).map_err(to_abi)
    }
}

/// Client for the Uniswap V3 lens quoter contract.
#[derive(Debug, Clone)]
pub struct LensQuoter<C> {
    caller: C,
    address: String,
    fee_tier: u32,
}

impl<C: ContractCaller> LensQuoter<C> {
    pub fn new(caller: C, address: impl Into<String>, fee_tier: u32) -> Self {
        Self {
            caller,
            address: address.into(),
            fee_tier,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Quote with the configured fee tier and the price limit disabled.
    pub async fn quote(
        &self,
        entry: ReferenceEntry,
        token_in: &Token,
        token_out: &Token,
        amount: &FixedPoint,
    ) -> Result<FixedPoint, SourceError> {
        let signature = match entry {
            ReferenceEntry::QuoteExactInputSingle => QUOTE_EXACT_INPUT_SINGLE,
            ReferenceEntry::QuoteExactOutputSingle => QUOTE_EXACT_OUTPUT_SINGLE,
        };
        let to_abi = |error| SourceError::Abi {
            source_kind: Source::Reference,
            error,
        };
        let args = [
            token_arg(token_in).map_err(to_abi)?,
            token_arg(token_out).map_err(to_abi)?,
            Arg::Uint(BigUint::from(self.fee_tier), 24),
            Arg::uint256(amount.raw().clone()),
            Arg::Uint(BigUint::from(0u8), 160),
        ];
        let data = call_source(&self.caller, Source::Reference, &self.address, signature, &args)
            .await?;
        abi::decode_uint(&data).map(FixedPoint::from_raw).map_err(to_abi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{word_bool, word_uint, MockCaller};

    const QUOTER: &str = "0x00000000000000000000000000000000000000aa";
    const LENS: &str = "0x00000000000000000000000000000000000000bb";

    fn weth() -> Token {
        Token::new("WETH", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
    }

    fn dai() -> Token {
        Token::new("DAI", "0x6b175474e89094c44da98b954eedeac495271d0f")
    }

    #[tokio::test]
    async fn test_does_pool_exist_encodes_both_tokens() {
        let caller = Arc::new(MockCaller::new());
        caller.respond(DOES_POOL_EXIST, Ok(word_bool(true)));
        let quoter = PrimaryQuoter::new(caller.clone(), QUOTER);

        assert!(quoter.does_pool_exist(&weth(), &dai()).await.unwrap());

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to, QUOTER);
        assert_eq!(calls[0].signature, DOES_POOL_EXIST);
        assert_eq!(calls[0].address_arg(0), weth().address);
        assert_eq!(calls[0].address_arg(1), dai().address);
    }

    #[tokio::test]
    async fn test_lens_quote_uses_fee_tier_and_zero_price_limit() {
        let caller = Arc::new(MockCaller::new());
        caller.respond(QUOTE_EXACT_OUTPUT_SINGLE, Ok(word_uint(7)));
        let lens = LensQuoter::new(caller.clone(), LENS, 3000);

        let amount = FixedPoint::from(5u128);
        let out = lens
            .quote(ReferenceEntry::QuoteExactOutputSingle, &weth(), &dai(), &amount)
            .await
            .unwrap();
        assert_eq!(out, FixedPoint::from(7u128));

        let calls = caller.calls();
        assert_eq!(calls[0].signature, QUOTE_EXACT_OUTPUT_SINGLE);
        assert_eq!(calls[0].uint_arg(2), BigUint::from(3000u32));
        assert_eq!(calls[0].uint_arg(3), BigUint::from(5u32));
        assert_eq!(calls[0].uint_arg(4), BigUint::from(0u32));
    }

    #[tokio::test]
    async fn test_short_return_data_is_abi_error() {
        let caller = Arc::new(MockCaller::new());
        caller.respond(ESTIMATE_MAX_SWAP, Ok(vec![0u8; 4]));
        let quoter = PrimaryQuoter::new(caller, QUOTER);

        let err = quoter
            .estimate(PrimaryEntry::EstimateMaxSwap, &weth(), &dai(), &FixedPoint::from(1u128))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Abi { source_kind: Source::Primary, .. }));
    }

    #[tokio::test]
    async fn test_invalid_token_address_never_reaches_caller() {
        let caller = Arc::new(MockCaller::new());
        let quoter = PrimaryQuoter::new(caller.clone(), QUOTER);
        let bogus = Token::new("BOGUS", "0x1234");

        let err = quoter.does_pool_exist(&bogus, &dai()).await.unwrap_err();
        assert!(matches!(err, SourceError::Abi { .. }));
        assert!(caller.calls().is_empty());
    }
}
