// 2.0: funding engine. reconstructs the exchange's funding split off-chain from a
// pool snapshot and a reference price. 2.1 has the computation, 2.2 the rate
// conversion helpers.
//
// two funding terms: funding_1 is linear in skew, funding_2 is a decaying
// integral accumulated on-chain (clamped here, see pool.rs). the paying side
// pays the gross amount, the receiving side gets gross minus the pool's share.

use crate::config::PairConfig;
use crate::pool::PoolPairState;
use crate::price::PricePoint;
use crate::types::{PairId, Price, Quote, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FundingError {
    #[error("price for {pair_id} is {age_seconds}s old, exceeds max {max_age_seconds}s")]
    StalePrice {
        pair_id: PairId,
        age_seconds: i64,
        max_age_seconds: i64,
    },

    #[error("non-positive reference price {value} for {pair_id}")]
    NonPositivePrice { pair_id: PairId, value: Decimal },
}

/// Full funding breakdown for one pair at one price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingResult {
    pub pair_id: PairId,
    pub oi_long: Decimal,
    pub oi_short: Decimal,
    pub oi_net: Decimal,
    /// Signed book imbalance in quote terms. Positive = net-long book.
    pub skew: Quote,
    /// Skew-linear funding term.
    pub funding_1: Quote,
    /// Decaying-integral funding term, from the clamped on-chain integral.
    pub funding_2: Quote,
    /// funding_1 + funding_2. Positive = longs pay.
    pub net_funding: Quote,
    /// Pool's cut of the gross trader-to-trader funding.
    pub funding_share: Quote,
    /// Per-unit funding on the long side, trader leg only. Positive = pays.
    pub funding_long_index: Decimal,
    /// Per-unit funding on the short side, trader leg only.
    pub funding_short_index: Decimal,
    /// Total pool take: pool funding terms plus the funding share.
    pub funding_pool: Quote,
    /// Per-unit pool funding charged to every open unit.
    pub funding_pool_index: Decimal,
    /// Combined per-unit period rate charged to longs.
    pub funding_long: Decimal,
    /// Combined per-unit period rate charged to shorts.
    pub funding_short: Decimal,
}

impl FundingResult {
    fn zero(pool: &PoolPairState, price: Price) -> Self {
        Self {
            pair_id: pool.pair_id.clone(),
            oi_long: pool.oi_long,
            oi_short: pool.oi_short,
            oi_net: pool.oi_net(),
            skew: pool.skew(price),
            funding_1: Quote::zero(),
            funding_2: Quote::zero(),
            net_funding: Quote::zero(),
            funding_share: Quote::zero(),
            funding_long_index: Decimal::ZERO,
            funding_short_index: Decimal::ZERO,
            funding_pool: Quote::zero(),
            funding_pool_index: Decimal::ZERO,
            funding_long: Decimal::ZERO,
            funding_short: Decimal::ZERO,
        }
    }

    /// Annualized combined long/short rates for display.
    pub fn annualized(&self, periods_per_year: u32) -> AnnualizedFunding {
        AnnualizedFunding {
            funding_long: period_to_annual_rate(self.funding_long, periods_per_year),
            funding_short: period_to_annual_rate(self.funding_short, periods_per_year),
            funding_pool_index: period_to_annual_rate(self.funding_pool_index, periods_per_year),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnnualizedFunding {
    pub funding_long: Decimal,
    pub funding_short: Decimal,
    pub funding_pool_index: Decimal,
}

// 2.1: the funding computation. pure, never mutates the pool snapshot.
//
// with one side of the book empty there is no counterparty to route funding
// through, so every funding output is zero. skew and oi are still reported.
pub fn compute_funding(
    config: &PairConfig,
    pool: &PoolPairState,
    price_point: &PricePoint,
    now: Timestamp,
) -> Result<FundingResult, FundingError> {
    let price = Price::new(price_point.value).ok_or_else(|| FundingError::NonPositivePrice {
        pair_id: pool.pair_id.clone(),
        value: price_point.value,
    })?;

    let age_seconds = price_point.age_seconds(now);
    if age_seconds > config.price_age_max {
        return Err(FundingError::StalePrice {
            pair_id: pool.pair_id.clone(),
            age_seconds,
            max_age_seconds: config.price_age_max,
        });
    }

    if pool.oi_long.is_zero() || pool.oi_short.is_zero() {
        return Ok(FundingResult::zero(pool, price));
    }

    let skew = pool.skew(price);
    let funding_1 = skew.mul(config.funding_1);
    let funding_2 = Quote::new(pool.funding_2_clamped(price) * config.funding_2);
    let net_funding = funding_1.add(funding_2);

    // payer pays gross, receiver gets gross minus the pool's share
    let (funding_long_index, funding_short_index, funding_share) =
        if net_funding.value() > Decimal::ZERO {
            let funding_long = net_funding;
            let funding_share = funding_long.mul(config.funding_share);
            let funding_long_index = funding_long.value() / pool.oi_long;
            let funding_short_index =
                -(funding_long.value() - funding_share.value()) / pool.oi_short;
            (funding_long_index, funding_short_index, funding_share)
        } else {
            let funding_short = net_funding.negate();
            let funding_share = funding_short.mul(config.funding_share);
            let funding_short_index = funding_short.value() / pool.oi_short;
            let funding_long_index =
                -(funding_short.value() - funding_share.value()) / pool.oi_long;
            (funding_long_index, funding_short_index, funding_share)
        };

    let oi_net = pool.oi_net();
    let funding_pool_0 = oi_net * price.value() * config.funding_pool_0;
    let funding_pool_1 = skew.abs().value() * config.funding_pool_1;
    let funding_pool = funding_pool_0 + funding_pool_1;
    let funding_pool_index = if oi_net.is_zero() {
        Decimal::ZERO
    } else {
        funding_pool / oi_net
    };

    Ok(FundingResult {
        pair_id: pool.pair_id.clone(),
        oi_long: pool.oi_long,
        oi_short: pool.oi_short,
        oi_net,
        skew,
        funding_1,
        funding_2,
        net_funding,
        funding_share,
        funding_long_index,
        funding_short_index,
        funding_pool: Quote::new(funding_pool + funding_share.value()),
        funding_pool_index,
        funding_long: funding_long_index + funding_pool_index,
        funding_short: funding_short_index + funding_pool_index,
    })
}

// 2.2: period/annual rate conversion. the period base is whatever the caller
// reports in (365 for a daily base).
pub fn period_to_annual_rate(period_rate: Decimal, periods_per_year: u32) -> Decimal {
    period_rate * Decimal::from(periods_per_year)
}

pub fn annual_to_period_rate(annual_rate: Decimal, periods_per_year: u32) -> Decimal {
    annual_rate / Decimal::from(periods_per_year)
}
