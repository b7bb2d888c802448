//! Decimal to integer subunit conversion
//!
//! All matching arithmetic runs on integer subunits (cents for two decimal
//! places), so repeated subtraction never accumulates rounding drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Balance, Member, Side};
use crate::{Error, Result};

/// Highest supported number of decimal places
pub const MAX_DECIMAL_PLACES: u32 = 6;

/// Outcome of quantizing one member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Owed money
    Creditor(Balance),
    /// Owes money, amount holds the magnitude
    Debtor(Balance),
    /// Rounds to exactly zero subunits, needs no settlement
    Settled,
}

impl Position {
    /// Side of the balance, `None` for settled members
    pub fn side(&self) -> Option<Side> {
        match self {
            Position::Creditor(_) => Some(Side::Creditor),
            Position::Debtor(_) => Some(Side::Debtor),
            Position::Settled => None,
        }
    }
}

/// Converts currency amounts to and from integer subunits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    decimal_places: u32,
    scale: i64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Quantizer {
    /// Create new quantizer; `decimal_places` is clamped to [`MAX_DECIMAL_PLACES`]
    pub fn new(decimal_places: u32) -> Self {
        let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
        Self {
            decimal_places,
            scale: 10_i64.pow(decimal_places),
        }
    }

    /// Number of decimal places in output amounts
    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Subunits per currency unit (100 for cents)
    pub fn subunits_per_unit(&self) -> i64 {
        self.scale
    }

    /// `round(net × scale)` with halves rounded away from zero
    ///
    /// Returns `None` when the result does not fit in an `i64`.
    pub fn to_subunits(&self, net: Decimal) -> Option<i64> {
        net.checked_mul(Decimal::from(self.scale))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }

    /// Quantize a member and split it by sign
    pub fn quantize(&self, member: &Member) -> Result<Position> {
        let subunits = self
            .to_subunits(member.net)
            .ok_or_else(|| Error::AmountOutOfRange { id: member.id.clone() })?;

        Ok(match subunits {
            0 => Position::Settled,
            s if s > 0 => Position::Creditor(Balance::new(member.id.clone(), s.unsigned_abs())),
            s => Position::Debtor(Balance::new(member.id.clone(), s.unsigned_abs())),
        })
    }

    /// Convert subunits back to currency units at the configured precision
    pub fn to_units(&self, subunits: u64) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(subunits), self.decimal_places)
    }

    /// Convert a (possibly large) subunit total back to currency units
    pub fn total_to_units(&self, subunits: u128) -> Decimal {
        i128::try_from(subunits)
            .ok()
            .and_then(|v| Decimal::try_from_i128_with_scale(v, self.decimal_places).ok())
            .unwrap_or(Decimal::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_subunits_rounds_half_away_from_zero() {
        let q = Quantizer::default();
        assert_eq!(q.to_subunits(dec("100.50")), Some(10050));
        assert_eq!(q.to_subunits(dec("33.333")), Some(3333));
        assert_eq!(q.to_subunits(dec("-16.666")), Some(-1667));
        assert_eq!(q.to_subunits(dec("-16.667")), Some(-1667));
        assert_eq!(q.to_subunits(dec("0.005")), Some(1));
        assert_eq!(q.to_subunits(dec("-0.005")), Some(-1));
        assert_eq!(q.to_subunits(dec("0.004")), Some(0));
    }

    #[test]
    fn test_quantize_splits_by_sign() {
        let q = Quantizer::default();

        let creditor = q.quantize(&Member::new("Alice", dec("100.50"))).unwrap();
        assert_eq!(creditor, Position::Creditor(Balance::new("Alice", 10050)));

        let debtor = q.quantize(&Member::new("Bob", dec("-50.25"))).unwrap();
        assert_eq!(debtor, Position::Debtor(Balance::new("Bob", 5025)));
        assert_eq!(debtor.side(), Some(Side::Debtor));

        // Sub-cent balances round to nothing
        let dust = q.quantize(&Member::new("Dust", dec("0.001"))).unwrap();
        assert_eq!(dust, Position::Settled);
        assert_eq!(dust.side(), None);
    }

    #[test]
    fn test_quantize_out_of_range() {
        let q = Quantizer::default();
        let huge = Member::new("Huge", Decimal::MAX);
        assert!(matches!(q.quantize(&huge), Err(Error::AmountOutOfRange { .. })));
    }

    #[test]
    fn test_to_units() {
        let q = Quantizer::default();
        assert_eq!(q.to_units(10050), dec("100.50"));
        assert_eq!(q.to_units(10050).to_string(), "100.50");
        assert_eq!(q.to_units(1).to_string(), "0.01");

        let yen = Quantizer::new(0);
        assert_eq!(yen.to_subunits(dec("99.5")), Some(100));
        assert_eq!(yen.to_units(100).to_string(), "100");
    }

    #[test]
    fn test_decimal_places_clamped() {
        let q = Quantizer::new(12);
        assert_eq!(q.decimal_places(), MAX_DECIMAL_PLACES);
        assert_eq!(q.subunits_per_unit(), 1_000_000);
    }
}
