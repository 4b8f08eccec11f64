//! Reading the sale contract's counters.
//!
//! The calculator never talks to the chain itself; it is handed a
//! [`ContractCounters`] value fetched by a [`CounterSource`]. The production
//! source issues three read-only `eth_call`s over Ethereum JSON-RPC.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use allot_types::{ContractCounters, U256};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ChainConfig;

/// `keccak256("totalAllocation()")[..4]`
pub const TOTAL_ALLOCATION_SELECTOR: &str = "0x79203dc4";
/// `keccak256("totalBalance()")[..4]`
pub const TOTAL_BALANCE_SELECTOR: &str = "0xad7a672f";
/// `keccak256("totalReservedUsed()")[..4]`
pub const TOTAL_RESERVED_USED_SELECTOR: &str = "0xf45b90b1";

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC endpoint returned HTTP {0}")]
    Status(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed RPC response: {0}")]
    Malformed(String),
}

/// Anything that can produce a fresh set of contract counters.
#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn fetch_counters(&self) -> Result<ContractCounters, ChainError>;
}

/// Serves the same counters every time.
#[derive(Debug, Clone)]
pub struct StaticCounterSource {
    counters: ContractCounters,
}

impl StaticCounterSource {
    pub fn new(counters: ContractCounters) -> Self {
        Self { counters }
    }
}

#[async_trait]
impl CounterSource for StaticCounterSource {
    async fn fetch_counters(&self) -> Result<ContractCounters, ChainError> {
        Ok(self.counters.clone())
    }
}

/// Reads the counters from the contract with `eth_call` against `latest`.
pub struct RpcCounterReader {
    http: reqwest::Client,
    rpc_url: String,
    contract_address: String,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcCounterReader {
    pub fn new(
        rpc_url: impl Into<String>,
        contract_address: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            contract_address: contract_address.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self, ChainError> {
        Self::new(&config.rpc_url, &config.contract_address, config.request_timeout())
    }

    /// Calls a zero-argument view function returning `uint256`, and gives
    /// back its decimal string.
    async fn call_uint(&self, selector: &str) -> Result<String, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "eth_call",
            "params": [{ "to": self.contract_address, "data": selector }, "latest"],
        });

        let response = self.http.post(&self.rpc_url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(ChainError::Status(response.status().as_u16()));
        }

        let rpc: RpcResponse = response.json().await?;
        if let Some(error) = rpc.error {
            return Err(ChainError::Rpc { code: error.code, message: error.message });
        }
        let word = rpc.result.ok_or_else(|| ChainError::Malformed("missing result".into()))?;

        debug!(selector, %word, "eth_call returned");
        decode_uint256(&word)
    }
}

#[async_trait]
impl CounterSource for RpcCounterReader {
    async fn fetch_counters(&self) -> Result<ContractCounters, ChainError> {
        let (total_allocation, total_balance, total_reserved_used) = tokio::try_join!(
            self.call_uint(TOTAL_ALLOCATION_SELECTOR),
            self.call_uint(TOTAL_BALANCE_SELECTOR),
            self.call_uint(TOTAL_RESERVED_USED_SELECTOR),
        )?;

        info!(
            %total_allocation,
            %total_balance,
            %total_reserved_used,
            contract = %self.contract_address,
            "Fetched contract counters"
        );
        Ok(ContractCounters::new(total_allocation, total_balance, total_reserved_used))
    }
}

/// Decodes an ABI-encoded `uint256` return word (`0x` + up to 64 hex digits)
/// into its decimal string.
pub fn decode_uint256(word: &str) -> Result<String, ChainError> {
    let hex = word
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::Malformed(format!("'{word}' lacks the 0x prefix")))?;
    if hex.is_empty() {
        return Err(ChainError::Malformed("empty return data".into()));
    }
    if hex.len() > 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ChainError::Malformed(format!("'{word}' is not a uint256 word")));
    }

    let value = U256::from_str_radix(hex, 16)
        .map_err(|err| ChainError::Malformed(format!("'{word}': {err}")))?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_uint256_words() {
        let word = format!("0x{:064x}", 1_000_000_000u64);
        assert_eq!(decode_uint256(&word).unwrap(), "1000000000");
        assert_eq!(decode_uint256("0x0").unwrap(), "0");
        assert_eq!(
            decode_uint256(&format!("0x{}", "f".repeat(64))).unwrap(),
            U256::MAX.to_string()
        );
    }

    #[test]
    fn rejects_malformed_words() {
        let too_long = format!("0x{}", "0".repeat(65));
        for bad in ["", "0x", "1234", "0xzz", too_long.as_str()] {
            assert!(matches!(decode_uint256(bad), Err(ChainError::Malformed(_))), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn static_source_returns_its_counters() {
        let counters = ContractCounters::new("1", "2", "0");
        let source = StaticCounterSource::new(counters.clone());

        assert_eq!(source.fetch_counters().await.unwrap(), counters);
    }
}
