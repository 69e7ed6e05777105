//! Pool state per pair.
//!
//! Mutable on-chain state, read here as an immutable snapshot: open interest
//! on both sides, the pool's accumulated cost basis, and the raw funding-2
//! integral. The raw integral can transiently exceed its valid range between
//! on-chain updates, so readers must clamp it before use.

use crate::types::{PairId, Price, Quote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolPairState {
    pub pair_id: PairId,
    /// Long open interest, base units. Never negative on-chain.
    pub oi_long: Decimal,
    /// Short open interest, base units. Never negative on-chain.
    pub oi_short: Decimal,
    /// Accumulated cost basis of the pool's side of the book.
    pub cost: Quote,
    /// Raw decaying funding integral. Clamp before use.
    pub funding_2_raw: Decimal,
}

impl PoolPairState {
    pub fn new(pair_id: PairId, oi_long: Decimal, oi_short: Decimal) -> Self {
        Self {
            pair_id,
            oi_long,
            oi_short,
            cost: Quote::zero(),
            funding_2_raw: Decimal::ZERO,
        }
    }

    pub fn oi_net(&self) -> Decimal {
        self.oi_long + self.oi_short
    }

    /// Signed book imbalance priced in quote terms. Positive = net-long book.
    pub fn skew(&self, price: Price) -> Quote {
        Quote::new((self.oi_long - self.oi_short) * price.value())
    }

    /// Funding-2 integral clamped to its valid range at this price.
    ///
    /// The range is [-oi_short * price, oi_long * price]; values outside it
    /// are an artifact of the on-chain integral not having been settled yet.
    pub fn funding_2_clamped(&self, price: Price) -> Decimal {
        let lower = -self.oi_short * price.value();
        let upper = self.oi_long * price.value();
        self.funding_2_raw.max(lower).min(upper)
    }
}
