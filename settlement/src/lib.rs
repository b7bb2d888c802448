//! Cashflow Settlement Engine
//!
//! Computes a small set of point-to-point payments that brings every member
//! of a group to a zero balance.
//!
//! # Architecture
//!
//! 1. **Validation**: Reject malformed members at the boundary
//! 2. **Quantization**: Convert decimal balances to integer subunits
//! 3. **Heaps**: Split balances into creditor and debtor max-heaps
//! 4. **Netting**: Greedily match the largest creditor with the largest debtor
//!
//! # Invariants
//!
//! - Every transaction amount is positive and an exact number of subunits
//! - No member ever pays itself
//! - Identical input yields an identical transaction sequence, whatever the input order
//! - `k` non-zero balances settle in at most `k - 1` transactions
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use settlement::{Member, SettlementEngine};
//!
//! let engine = SettlementEngine::default();
//! let report = engine
//!     .settle(&[
//!         Member::new("Alice", Decimal::new(10050, 2)),
//!         Member::new("Bob", Decimal::new(-5025, 2)),
//!         Member::new("Carol", Decimal::new(-5025, 2)),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(report.transactions.len(), 2);
//! assert!(report.transactions.iter().all(|t| t.to == "Alice"));
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod heap;
pub mod netting;
pub mod quantize;
pub mod types;
pub mod validation;

// Re-exports
pub use config::{Config, ImbalancePolicy};
pub use engine::{settle_group, SettlementEngine};
pub use error::{Error, Result};
pub use heap::MaxHeap;
pub use netting::{NettingEngine, NettingOutcome};
pub use quantize::{Position, Quantizer};
pub use types::*;
