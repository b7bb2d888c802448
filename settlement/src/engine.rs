//! Main settlement engine
//!
//! Quantizes members, builds the creditor and debtor heaps, runs the netting
//! loop and assembles the report. Each call builds its own heaps, so one engine
//! can serve any number of concurrent callers.

use rust_decimal::Decimal;

use crate::{
    config::{Config, ImbalancePolicy},
    heap::MaxHeap,
    netting::NettingEngine,
    quantize::{Position, Quantizer},
    types::*,
    Error, Result,
};

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    /// Amount conversion
    quantizer: Quantizer,

    /// Greedy matcher
    netting: NettingEngine,

    /// Configuration
    config: Config,
}

impl Default for SettlementEngine {
    fn default() -> Self {
        let config = Config::default();
        let quantizer = Quantizer::new(config.decimal_places);
        Self {
            quantizer,
            netting: NettingEngine::new(quantizer),
            config,
        }
    }
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let quantizer = Quantizer::new(config.decimal_places);
        Ok(Self {
            quantizer,
            netting: NettingEngine::new(quantizer),
            config,
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute the payments that bring every member's balance to zero
    ///
    /// Members are assumed to have passed boundary validation (unique,
    /// non-empty ids). Errors only when a balance cannot be quantized or when
    /// the input is unbalanced under [`ImbalancePolicy::Reject`].
    pub fn settle(&self, members: &[Member]) -> Result<SettlementReport> {
        let mut creditors = MaxHeap::with_capacity(members.len());
        let mut debtors = MaxHeap::with_capacity(members.len());
        let mut creditor_total: u128 = 0;
        let mut debtor_total: u128 = 0;

        for member in members {
            match self.quantizer.quantize(member)? {
                Position::Creditor(balance) => {
                    creditor_total += u128::from(balance.amount);
                    creditors.push(balance);
                }
                Position::Debtor(balance) => {
                    debtor_total += u128::from(balance.amount);
                    debtors.push(balance);
                }
                Position::Settled => {}
            }
        }

        let non_zero_balances = creditors.len() + debtors.len();

        if creditor_total != debtor_total {
            let creditor_total = self.quantizer.total_to_units(creditor_total);
            let debtor_total = self.quantizer.total_to_units(debtor_total);

            if self.config.imbalance_policy == ImbalancePolicy::Reject {
                return Err(Error::Unbalanced {
                    creditor_total: creditor_total.to_string(),
                    debtor_total: debtor_total.to_string(),
                });
            }

            tracing::warn!(
                %creditor_total,
                %debtor_total,
                "Balances do not net to zero, residual will be reported as unsettled"
            );
        }

        let outcome = self.netting.net(creditors, debtors);

        let total_amount: Decimal = outcome.transactions.iter().map(|t| t.amount).sum();
        let summary = SettlementSummary {
            total_members: members.len(),
            total_transactions: outcome.transactions.len(),
            total_amount,
        };
        let stats = NettingStats::new(non_zero_balances, outcome.transactions.len());

        tracing::info!(
            "Settlement complete: {} members, {} non-zero → {} transactions ({:.1}% fewer than sequential)",
            summary.total_members,
            stats.non_zero_balances,
            summary.total_transactions,
            stats.reduction_ratio * 100.0
        );

        Ok(SettlementReport {
            transactions: outcome.transactions,
            summary,
            unsettled: outcome.unsettled,
            stats,
        })
    }
}

/// Settle a group with the default engine and return only the transactions
pub fn settle_group(members: &[Member]) -> Result<Vec<Transaction>> {
    SettlementEngine::default()
        .settle(members)
        .map(|report| report.transactions)
}
