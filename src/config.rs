//! Per-pair market configuration.
//!
//! An immutable snapshot of the parameters the exchange holds on-chain for
//! one pair. Nothing here is ambient: every computation receives the config
//! it should use as an explicit argument.

use crate::types::PairId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Pair parameters as configured on the exchange component.
///
/// All ratio and coefficient fields are non-negative fixed-point decimals;
/// the funding engine applies signs, the config never stores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    pub pair_id: PairId,
    /// Trading disabled flag. Reported, not enforced here.
    pub disabled: bool,
    /// Maximum accepted reference price age, seconds.
    pub price_age_max: i64,
    /// Open interest cap per side.
    pub oi_max: Decimal,
    /// Minimum trade size in base units.
    pub trade_size_min: Decimal,
    /// Price move ratio that makes a keeper price update eligible for reward.
    pub update_price_delta_ratio: Decimal,
    /// Keeper update reward period, seconds.
    pub update_period_seconds: i64,
    /// Initial margin ratio, base units per unit of size.
    pub margin_initial: Decimal,
    /// Maintenance margin ratio.
    pub margin_maintenance: Decimal,
    /// Skew-linear funding coefficient.
    pub funding_1: Decimal,
    /// Decaying-integral funding coefficient.
    pub funding_2: Decimal,
    /// Drive rate of the funding-2 integral.
    pub funding_2_delta: Decimal,
    /// Decay rate of the funding-2 integral.
    pub funding_2_decay: Decimal,
    /// Constant pool funding coefficient, applied to total OI notional.
    pub funding_pool_0: Decimal,
    /// Skew-based pool funding coefficient.
    pub funding_pool_1: Decimal,
    /// Fraction of net funding retained by the pool.
    pub funding_share: Decimal,
    /// Constant fee coefficient.
    pub fee_0: Decimal,
    /// Skew-based fee coefficient.
    pub fee_1: Decimal,
}

impl PairConfig {
    /// BTC/USD as parameterized on the live deployment.
    pub fn btc_usd() -> Self {
        Self {
            pair_id: PairId::from("BTC/USD"),
            disabled: false,
            price_age_max: 5,
            oi_max: dec!(50),
            trade_size_min: Decimal::ZERO,
            update_price_delta_ratio: dec!(0.005),
            update_period_seconds: 3600,
            margin_initial: dec!(0.1),
            margin_maintenance: dec!(0.01),
            funding_1: dec!(1),
            funding_2: dec!(1),
            funding_2_delta: dec!(50),
            funding_2_decay: dec!(100),
            funding_pool_0: dec!(0.02),
            funding_pool_1: dec!(0.25),
            funding_share: dec!(0.05),
            fee_0: dec!(0.001),
            fee_1: dec!(0.00000001),
        }
    }

    /// ETH/USD deployment parameters. Same curve, larger OI cap.
    pub fn eth_usd() -> Self {
        Self {
            pair_id: PairId::from("ETH/USD"),
            oi_max: dec!(700),
            ..Self::btc_usd()
        }
    }

    /// XRD/USD deployment parameters. Higher initial margin, steeper fee skew.
    pub fn xrd_usd() -> Self {
        Self {
            pair_id: PairId::from("XRD/USD"),
            oi_max: dec!(4_000_000),
            margin_initial: dec!(0.2),
            fee_1: dec!(0.00000008),
            ..Self::btc_usd()
        }
    }
}
