use serde::{Deserialize, Serialize};
use settlement::{SettlementReport, SettlementSummary, Transaction, UnsettledBalance};

#[derive(Debug, Serialize, Deserialize)]
pub struct SettleResponse {
    pub transactions: Vec<Transaction>,
    pub summary: SettlementSummary,
    pub unsettled: Vec<UnsettledBalance>,
}

impl From<SettlementReport> for SettleResponse {
    fn from(report: SettlementReport) -> Self {
        Self {
            transactions: report.transactions,
            summary: report.summary,
            unsettled: report.unsettled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}
