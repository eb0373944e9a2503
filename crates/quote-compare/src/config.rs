use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::abi;
use crate::aggregator::DEFAULT_FEE_TIER;
use crate::error::ConfigError;

/// Network and display settings for the quote engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoterConfig {
    /// JSON-RPC endpoint used for `eth_call`.
    #[serde(default)]
    pub rpc_url: String,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Custom quoter contract (`doesPoolExist`, `estimate*SwapUniswapV3`).
    pub quoter_address: String,

    /// Uniswap V3 lens quoter contract.
    pub lens_address: String,

    #[serde(default = "default_fee_tier")]
    pub fee_tier: u32,

    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,

    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u64,

    #[serde(default = "default_error_display_ms")]
    pub error_display_ms: u64,
}

fn default_chain_id() -> u64 {
    1
}

fn default_fee_tier() -> u32 {
    DEFAULT_FEE_TIER
}

fn default_call_timeout_ms() -> u64 {
    15_000
}

fn default_success_display_ms() -> u64 {
    10_000
}

fn default_error_display_ms() -> u64 {
    5_000
}

impl QuoterConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        abi::parse_address(&self.quoter_address).map_err(|e| ConfigError::Invalid {
            field: "quoterAddress",
            reason: e.to_string(),
        })?;
        abi::parse_address(&self.lens_address).map_err(|e| ConfigError::Invalid {
            field: "lensAddress",
            reason: e.to_string(),
        })?;
        if self.fee_tier >= 1 << 24 {
            return Err(ConfigError::Invalid {
                field: "feeTier",
                reason: format!("{} does not fit in uint24", self.fee_tier),
            });
        }
        if self.call_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "callTimeoutMs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }
}
