//! Core types for the settlement engine

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{Error, Result};

/// One party's net position before settlement
///
/// Positive `net` means the party is owed money, negative means it owes money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Caller-supplied identifier, unique within a settlement call
    pub id: String,

    /// Signed net balance in currency units
    pub net: Decimal,
}

impl Member {
    /// Create new member
    pub fn new(id: impl Into<String>, net: Decimal) -> Self {
        Self { id: id.into(), net }
    }

    /// Create a member from a floating point balance, rejecting NaN and infinities
    pub fn from_f64(id: impl Into<String>, net: f64) -> Result<Self> {
        let id = id.into();
        if !net.is_finite() {
            return Err(Error::NonFiniteNet { id });
        }
        let net = Decimal::from_f64(net).ok_or_else(|| Error::AmountOutOfRange { id: id.clone() })?;
        Ok(Self { id, net })
    }
}

/// Which side of the settlement a balance sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Owed money, receives transfers
    Creditor,
    /// Owes money, sends transfers
    Debtor,
}

/// Quantized, unsigned balance of one party
///
/// Debtor balances hold the magnitude of what is owed; the heap holding the
/// entry decides its sign. This is also the heap node type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Balance {
    /// Member id
    pub id: String,

    /// Amount in subunits, never zero once inside a heap
    pub amount: u64,
}

impl Balance {
    /// Create new balance
    pub fn new(id: impl Into<String>, amount: u64) -> Self {
        Self { id: id.into(), amount }
    }
}

/// Larger amounts rank higher; on equal amounts the lexicographically smaller id ranks higher.
impl Ord for Balance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount
            .cmp(&other.amount)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Balance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single payment produced by the settlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Paying member (debtor)
    pub from: String,

    /// Receiving member (creditor)
    pub to: String,

    /// Amount in currency units, rounded to the configured decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Part of a balance the settlement could not match
///
/// Only produced when the input does not net to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsettledBalance {
    /// Member id
    pub id: String,

    /// Side the residual sits on
    pub side: Side,

    /// Unmatched amount in currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Totals reported alongside the transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    /// Members supplied, including zero balances
    pub total_members: usize,

    /// Transactions emitted
    pub total_transactions: usize,

    /// Sum of emitted transaction amounts
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// Netting statistics against a naive sequential settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NettingStats {
    /// Members with a non-zero quantized balance
    pub non_zero_balances: usize,

    /// Transactions a sequential chain would need (`non_zero_balances - 1`)
    pub baseline_transactions: usize,

    /// Transactions actually emitted
    pub transactions: usize,

    /// Baseline minus emitted
    pub transactions_eliminated: usize,

    /// Eliminated transactions as a fraction of the baseline (0.0 - 1.0)
    pub reduction_ratio: f64,
}

impl NettingStats {
    /// Compute statistics for `non_zero_balances` balances settled with `transactions` payments
    pub fn new(non_zero_balances: usize, transactions: usize) -> Self {
        let baseline_transactions = non_zero_balances.saturating_sub(1);
        let transactions_eliminated = baseline_transactions.saturating_sub(transactions);
        let reduction_ratio = if baseline_transactions == 0 {
            0.0
        } else {
            transactions_eliminated as f64 / baseline_transactions as f64
        };

        Self {
            non_zero_balances,
            baseline_transactions,
            transactions,
            transactions_eliminated,
            reduction_ratio,
        }
    }
}

/// Full result of one settlement call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    /// Transactions in emission order
    pub transactions: Vec<Transaction>,

    /// Totals
    pub summary: SettlementSummary,

    /// Residual balances left unmatched, empty when the input nets to zero
    pub unsettled: Vec<UnsettledBalance>,

    /// Comparison with the sequential baseline
    pub stats: NettingStats,
}

impl SettlementReport {
    /// True when no residual was left unmatched
    pub fn is_fully_settled(&self) -> bool {
        self.unsettled.is_empty()
    }

    /// Total unmatched amount across all residual entries
    pub fn total_unsettled(&self) -> Decimal {
        self.unsettled.iter().map(|u| u.amount).sum()
    }
}
