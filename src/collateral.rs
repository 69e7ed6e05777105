// 3.1: collateral snapshot. one per account per backing asset.
// the discount is the haircut applied when counting the asset toward margin
// capacity; the margin field is the weight it adds to margin requirements.

use crate::types::{PairId, Quote, ResourceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collateral {
    /// Pair used to price this asset, e.g. "XRD/USD".
    pub pair_id: PairId,
    pub resource: ResourceId,
    pub amount: Decimal,
    /// Haircut factor, at most 1.
    pub discount: Decimal,
    /// Margin weight, base units. Priced at read time.
    pub margin: Decimal,
}

impl Collateral {
    pub fn value(&self, price: Decimal) -> Quote {
        Quote::new(self.amount * price)
    }

    pub fn value_discounted(&self, price: Decimal) -> Quote {
        self.value(price).mul(self.discount)
    }

    pub fn margin_priced(&self, price: Decimal) -> Quote {
        Quote::new(self.margin * price)
    }
}

/// A collateral entry valued against a reference price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralMetrics {
    pub pair_id: PairId,
    pub resource: ResourceId,
    pub mark_price: Decimal,
    pub amount: Decimal,
    pub value: Quote,
    pub discount: Decimal,
    pub value_discounted: Quote,
    pub margin: Quote,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_collateral() -> Collateral {
        Collateral {
            pair_id: PairId::from("XRD/USD"),
            resource: ResourceId::new("resource_rdx1xrd"),
            amount: dec!(10000),
            discount: dec!(0.8),
            margin: dec!(100),
        }
    }

    #[test]
    fn value_and_discount() {
        let col = test_collateral();
        assert_eq!(col.value(dec!(0.05)).value(), dec!(500));
        assert_eq!(col.value_discounted(dec!(0.05)).value(), dec!(400));
    }

    #[test]
    fn discounted_never_exceeds_value() {
        let col = test_collateral();
        assert!(col.value_discounted(dec!(0.05)) <= col.value(dec!(0.05)));
    }

    #[test]
    fn margin_priced_at_mark() {
        let col = test_collateral();
        assert_eq!(col.margin_priced(dec!(0.05)).value(), dec!(5));
    }
}
