//! Greedy largest-creditor versus largest-debtor matching
//!
//! # Algorithm
//!
//! 1. Pop the largest creditor `C` and the largest debtor `D`
//! 2. Settle `min(C, D)` subunits with a payment from `D` to `C`
//! 3. Push any non-zero remainder back onto the heap it came from
//! 4. Repeat until either heap is empty
//!
//! # Example
//!
//! ```text
//! Balances:
//!   A: +$100.50
//!   B:  -$50.25
//!   C:  -$50.25
//!
//! Matches:
//!   B pays A: $50.25   (A left with $50.25)
//!   C pays A: $50.25
//! ```
//!
//! Each match fully settles at least one side, so `k` non-zero balances
//! never need more than `k - 1` payments. This is a fast approximation; the
//! minimum transaction count problem is NP-hard in general.

use crate::heap::MaxHeap;
use crate::quantize::Quantizer;
use crate::types::{Balance, Side, Transaction, UnsettledBalance};

/// Result of one netting run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NettingOutcome {
    /// Transactions in emission order
    pub transactions: Vec<Transaction>,

    /// Entries left in the non-empty heap once the other ran dry
    pub unsettled: Vec<UnsettledBalance>,
}

/// Netting engine
#[derive(Debug, Clone, Default)]
pub struct NettingEngine {
    quantizer: Quantizer,
}

impl NettingEngine {
    /// Create new netting engine
    pub fn new(quantizer: Quantizer) -> Self {
        Self { quantizer }
    }

    /// Match creditors against debtors until one side is exhausted
    ///
    /// Both heaps are consumed. Never fails: any finite set of non-zero
    /// balances terminates after at most `k` pops per heap.
    pub fn net(
        &self,
        mut creditors: MaxHeap<Balance>,
        mut debtors: MaxHeap<Balance>,
    ) -> NettingOutcome {
        let mut transactions = Vec::with_capacity(creditors.len() + debtors.len());

        while !creditors.is_empty() && !debtors.is_empty() {
            let (Some(creditor), Some(debtor)) = (creditors.pop(), debtors.pop()) else {
                break;
            };

            let settled = creditor.amount.min(debtor.amount);
            if settled == 0 {
                // A zero node settles nothing; drop it and keep its counterpart
                if creditor.amount > 0 {
                    creditors.push(creditor);
                }
                if debtor.amount > 0 {
                    debtors.push(debtor);
                }
                continue;
            }

            tracing::debug!(
                from = %debtor.id,
                to = %creditor.id,
                subunits = settled,
                "Matched debtor with creditor"
            );

            let creditor_rem = creditor.amount - settled;
            let debtor_rem = debtor.amount - settled;

            transactions.push(Transaction {
                from: debtor.id.clone(),
                to: creditor.id.clone(),
                amount: self.quantizer.to_units(settled),
            });

            if creditor_rem > 0 {
                creditors.push(Balance::new(creditor.id, creditor_rem));
            }
            if debtor_rem > 0 {
                debtors.push(Balance::new(debtor.id, debtor_rem));
            }
        }

        let unsettled = self
            .residual(creditors, Side::Creditor)
            .chain(self.residual(debtors, Side::Debtor))
            .collect();

        NettingOutcome {
            transactions,
            unsettled,
        }
    }

    fn residual(
        &self,
        mut heap: MaxHeap<Balance>,
        side: Side,
    ) -> impl Iterator<Item = UnsettledBalance> + '_ {
        heap.drain_sorted()
            .into_iter()
            .filter(|b| b.amount > 0)
            .map(move |b| UnsettledBalance {
                id: b.id,
                side,
                amount: self.quantizer.to_units(b.amount),
            })
    }
}
