//! Request and response bodies of the HTTP API.

use allot_types::ContractCounters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Counters rendered for people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountersDisplay {
    pub total_allocation: String,
    pub total_balance: String,
    pub total_reserved_used: String,
    pub unpurchased: String,
}

/// `GET /api/contract-data`: the raw counters at the top level, plus the
/// unpurchased allocation and display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDataResponse {
    #[serde(flatten)]
    pub counters: ContractCounters,
    pub unpurchased: String,
    pub display: CountersDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// The amount as typed, e.g. `"10"` or `"2.5"`
    #[serde(default)]
    pub user_input: String,
    /// Counters to calculate against; fetched fresh when omitted
    #[serde(default)]
    pub counters: Option<ContractCounters>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    /// Fixed-point integer string, `"0"` when the calculation failed
    pub result: String,
    pub display: String,
    /// Sale tokens the result buys at the configured price, fixed-point
    pub token_estimate: String,
    pub token_display: String,
    pub token_symbol: String,
    pub counters: ContractCounters,
}
