//! Reference price set.
//!
//! Prices come from an external feed, one point per pair, each stamped with
//! its publication time. The analytics never fetch or retry; a missing pair
//! is a hard error because valuing an account against a partial price set
//! would silently misstate every aggregate downstream.

use crate::types::{PairId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single observed reference price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub value: Decimal,
    pub updated_at: Timestamp,
}

impl PricePoint {
    pub fn new(value: Decimal, updated_at: Timestamp) -> Self {
        Self { value, updated_at }
    }

    pub fn age_seconds(&self, now: Timestamp) -> i64 {
        self.updated_at.elapsed_seconds(&now)
    }
}

/// Snapshot of reference prices keyed by pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceMap(HashMap<PairId, PricePoint>);

impl PriceMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, pair_id: PairId, point: PricePoint) {
        self.0.insert(pair_id, point);
    }

    pub fn get(&self, pair_id: &PairId) -> Option<&PricePoint> {
        self.0.get(pair_id)
    }

    pub fn point(&self, pair_id: &PairId) -> Result<&PricePoint, MissingPriceError> {
        self.0.get(pair_id).ok_or_else(|| MissingPriceError {
            pair_id: pair_id.clone(),
        })
    }

    /// Price value for a pair, erroring when the feed did not cover it.
    pub fn value(&self, pair_id: &PairId) -> Result<Decimal, MissingPriceError> {
        self.point(pair_id).map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PairId, PricePoint)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (PairId, PricePoint)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("no reference price for pair {pair_id}")]
pub struct MissingPriceError {
    pub pair_id: PairId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lookup_present_pair() {
        let mut prices = PriceMap::new();
        prices.insert(
            PairId::from("BTC/USD"),
            PricePoint::new(dec!(60000), Timestamp::from_seconds(1000)),
        );

        assert_eq!(prices.value(&PairId::from("BTC/USD")).unwrap(), dec!(60000));
    }

    #[test]
    fn lookup_missing_pair() {
        let prices = PriceMap::new();
        let err = prices.value(&PairId::from("SOL/USD")).unwrap_err();
        assert_eq!(err.pair_id, PairId::from("SOL/USD"));
    }

    #[test]
    fn point_age() {
        let point = PricePoint::new(dec!(1), Timestamp::from_seconds(100));
        assert_eq!(point.age_seconds(Timestamp::from_seconds(107)), 7);
    }
}
