//! Property-based tests for settlement invariants
//!
//! These tests use proptest to verify:
//! - Conservation: Σ(transactions) == Σ(creditor balances)
//! - Every transaction is positive and never a self-payment
//! - Determinism: any permutation of the input yields the same sequence
//! - Bound: k non-zero balances need at most k - 1 transactions
//! - Precision: amounts are whole subunits

use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement::{Member, SettlementEngine, Side};

/// Strategy for balanced groups: the last member absorbs the sum of the others
fn balanced_group() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 1..40).prop_map(|cents| {
        let closing: i64 = -cents.iter().sum::<i64>();
        cents
            .into_iter()
            .chain(std::iter::once(closing))
            .enumerate()
            .map(|(i, c)| Member::new(format!("member-{:02}", i), Decimal::new(c, 2)))
            .collect()
    })
}

/// Strategy for arbitrary, usually unbalanced groups
fn any_group() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(-100_000i64..100_000i64, 0..40).prop_map(|cents| {
        cents
            .into_iter()
            .enumerate()
            .map(|(i, c)| Member::new(format!("m{}", i), Decimal::new(c, 2)))
            .collect()
    })
}

fn creditor_total(members: &[Member]) -> Decimal {
    members.iter().map(|m| m.net).filter(|n| n.is_sign_positive()).sum()
}

fn non_zero(members: &[Member]) -> usize {
    members.iter().filter(|m| !m.net.is_zero()).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: balanced input is fully settled and money is conserved
    #[test]
    fn prop_conservation(members in balanced_group()) {
        let report = SettlementEngine::default().settle(&members).unwrap();

        prop_assert!(report.is_fully_settled());
        prop_assert_eq!(report.summary.total_amount, creditor_total(&members));

        let paid: Decimal = report.transactions.iter().map(|t| t.amount).sum();
        prop_assert_eq!(paid, creditor_total(&members));
    }

    /// Property: every member ends at zero once transactions are applied
    #[test]
    fn prop_balances_reach_zero(members in balanced_group()) {
        let report = SettlementEngine::default().settle(&members).unwrap();

        for member in &members {
            let received: Decimal = report.transactions.iter()
                .filter(|t| t.to == member.id)
                .map(|t| t.amount)
                .sum();
            let sent: Decimal = report.transactions.iter()
                .filter(|t| t.from == member.id)
                .map(|t| t.amount)
                .sum();
            prop_assert_eq!(member.net - received + sent, Decimal::ZERO);
        }
    }

    /// Property: amounts are positive, whole cents, and nobody pays themselves
    #[test]
    fn prop_transactions_well_formed(members in any_group()) {
        let report = SettlementEngine::default().settle(&members).unwrap();

        for tx in &report.transactions {
            prop_assert!(tx.amount > Decimal::ZERO);
            prop_assert_ne!(&tx.from, &tx.to);
            prop_assert!((tx.amount * Decimal::from(100)).fract().is_zero());
        }
    }

    /// Property: never worse than a sequential chain
    #[test]
    fn prop_at_most_k_minus_one(members in any_group()) {
        let report = SettlementEngine::default().settle(&members).unwrap();
        let k = non_zero(&members);

        prop_assert!(report.transactions.len() <= k.saturating_sub(1));
        prop_assert_eq!(report.stats.non_zero_balances, k);
    }

    /// Property: input order does not change the output
    #[test]
    fn prop_order_independent(
        (members, shuffled) in balanced_group()
            .prop_flat_map(|m| (Just(m.clone()), Just(m).prop_shuffle()))
    ) {
        let engine = SettlementEngine::default();
        let first = engine.settle(&members).unwrap();
        let second = engine.settle(&members).unwrap();
        let reordered = engine.settle(&shuffled).unwrap();

        prop_assert_eq!(&first.transactions, &second.transactions);
        prop_assert_eq!(&first.transactions, &reordered.transactions);
    }

    /// Property: on unbalanced input the residual is exactly the imbalance
    #[test]
    fn prop_residual_equals_imbalance(members in any_group()) {
        let report = SettlementEngine::default().settle(&members).unwrap();

        let credits = creditor_total(&members);
        let debits: Decimal = -members.iter().map(|m| m.net).filter(|n| n.is_sign_negative()).sum::<Decimal>();

        prop_assert_eq!(report.summary.total_amount, credits.min(debits));
        prop_assert_eq!(report.total_unsettled(), (credits - debits).abs());

        let expected_side = if credits > debits { Side::Creditor } else { Side::Debtor };
        prop_assert!(report.unsettled.iter().all(|u| u.side == expected_side));
    }
}
