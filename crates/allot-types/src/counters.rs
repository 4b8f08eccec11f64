use serde::{Deserialize, Serialize};

/// The three aggregate counters read from the sale contract.
///
/// Each value is the decimal string of a fixed-point integer exactly as the
/// chain returned it. The triple is replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCounters {
    total_allocation: String,
    total_balance: String,
    total_reserved_used: String,
}

impl ContractCounters {
    /// Bundles the three raw counter strings.
    pub fn new(
        total_allocation: impl Into<String>,
        total_balance: impl Into<String>,
        total_reserved_used: impl Into<String>,
    ) -> Self {
        Self {
            total_allocation: total_allocation.into(),
            total_balance: total_balance.into(),
            total_reserved_used: total_reserved_used.into(),
        }
    }

    /// Guaranteed allocation cap.
    pub fn total_allocation(&self) -> &str {
        &self.total_allocation
    }

    /// Total amount contributed.
    pub fn total_balance(&self) -> &str {
        &self.total_balance
    }

    /// Portion of allocation and balance already consumed.
    pub fn total_reserved_used(&self) -> &str {
        &self.total_reserved_used
    }
}
