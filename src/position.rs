// 3.0: position snapshot. one per account per pair, read-only.
// valuation happens at read time against a reference price: margins are held
// in base units on-chain and priced here, pnl nets out accrued funding.

use crate::types::{PairId, Quote, SignedSize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub pair_id: PairId,
    /// Signed size: positive = long.
    pub size: SignedSize,
    /// Initial margin reserved, base units.
    pub margin_initial: Decimal,
    /// Maintenance margin reserved, base units.
    pub margin_maintenance: Decimal,
    /// Accumulated cost basis in quote terms.
    pub cost: Quote,
    /// Accumulated funding paid (positive) or received (negative).
    pub funding: Quote,
}

impl Position {
    /// Average entry price. None for an (invalid) zero-size position.
    pub fn entry_price(&self) -> Option<Decimal> {
        if self.size.is_zero() {
            None
        } else {
            Some(self.cost.value() / self.size.value())
        }
    }

    /// Current notional value, signed with the position.
    pub fn value(&self, price: Decimal) -> Quote {
        Quote::new(self.size.value() * price)
    }

    /// value - cost - funding. What the account would realize at this price.
    pub fn pnl(&self, price: Decimal) -> Quote {
        self.value(price).sub(self.cost).sub(self.funding)
    }

    pub fn margin_initial_priced(&self, price: Decimal) -> Quote {
        Quote::new(self.margin_initial * price)
    }

    pub fn margin_maintenance_priced(&self, price: Decimal) -> Quote {
        Quote::new(self.margin_maintenance * price)
    }
}

/// A position valued against a reference price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionMetrics {
    pub pair_id: PairId,
    pub size: SignedSize,
    pub entry_price: Decimal,
    pub mark_price: Decimal,
    pub value: Quote,
    pub margin: Quote,
    pub margin_maintenance: Quote,
    pub pnl: Quote,
    /// PnL as a percentage of absolute cost.
    pub roi: Decimal,
}
