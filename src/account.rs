// 4.0: account risk aggregator. values an account snapshot against a set of
// reference prices: per-position pnl/margin/roi, per-collateral discounted
// value, and the account-level solvency summary.
//
// the price set must cover every pair the positions and collaterals
// reference. valuing against a partial set would silently misstate every
// aggregate, so a missing price is a hard error and produces no partial
// result. liquidation policy itself lives on-chain; this only reports the
// two available-margin figures.

use crate::collateral::{Collateral, CollateralMetrics};
use crate::position::{Position, PositionMetrics};
use crate::price::{MissingPriceError, PriceMap};
use crate::types::{PairId, Quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    MissingPrice(#[from] MissingPriceError),

    // zero-size position with a cost basis is corrupt snapshot data,
    // not a valuation question
    #[error("zero-size position for pair {pair_id} with cost {cost}")]
    ZeroSizePosition { pair_id: PairId, cost: Quote },
}

/// Account-level solvency summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOverview {
    pub account_value: Quote,
    pub account_value_discounted: Quote,
    pub available_margin: Quote,
    pub available_margin_maintenance: Quote,
    pub balance: Quote,
    pub total_pnl: Quote,
    pub total_margin: Quote,
    pub total_margin_maintenance: Quote,
    pub total_collateral_value: Quote,
    pub total_collateral_value_discounted: Quote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub balance: Quote,
    pub positions: Vec<PositionMetrics>,
    pub collaterals: Vec<CollateralMetrics>,
    pub overview: AccountOverview,
}

// 4.1: per-position valuation. roi uses |cost| so its sign always matches
// pnl, long or short.
fn value_position(position: &Position, prices: &PriceMap) -> Result<PositionMetrics, AccountError> {
    let mark_price = prices.value(&position.pair_id)?;

    let entry_price = position
        .entry_price()
        .ok_or_else(|| AccountError::ZeroSizePosition {
            pair_id: position.pair_id.clone(),
            cost: position.cost,
        })?;

    let pnl = position.pnl(mark_price);
    // a position with no cost basis has no meaningful roi
    let roi = if position.cost.is_zero() {
        Decimal::ZERO
    } else {
        pnl.value() / position.cost.abs().value() * dec!(100)
    };

    Ok(PositionMetrics {
        pair_id: position.pair_id.clone(),
        size: position.size,
        entry_price,
        mark_price,
        value: position.value(mark_price),
        margin: position.margin_initial_priced(mark_price),
        margin_maintenance: position.margin_maintenance_priced(mark_price),
        pnl,
        roi,
    })
}

fn value_collateral(
    collateral: &Collateral,
    prices: &PriceMap,
) -> Result<CollateralMetrics, AccountError> {
    let mark_price = prices.value(&collateral.pair_id)?;

    Ok(CollateralMetrics {
        pair_id: collateral.pair_id.clone(),
        resource: collateral.resource.clone(),
        mark_price,
        amount: collateral.amount,
        value: collateral.value(mark_price),
        discount: collateral.discount,
        value_discounted: collateral.value_discounted(mark_price),
        margin: collateral.margin_priced(mark_price),
    })
}

// 4.2: the aggregation. pure; fails before producing any output if the price
// set has a gap or a position is corrupt.
pub fn aggregate_account(
    balance: Quote,
    positions: &[Position],
    collaterals: &[Collateral],
    prices: &PriceMap,
) -> Result<AccountSummary, AccountError> {
    let positions = positions
        .iter()
        .map(|p| value_position(p, prices))
        .collect::<Result<Vec<_>, _>>()?;

    let collaterals = collaterals
        .iter()
        .map(|c| value_collateral(c, prices))
        .collect::<Result<Vec<_>, _>>()?;

    let total_pnl: Quote = positions.iter().map(|p| p.pnl).sum();
    let collateral_margin: Quote = collaterals.iter().map(|c| c.margin).sum();
    let position_margin: Quote = positions.iter().map(|p| p.margin).sum();
    let position_margin_maintenance: Quote =
        positions.iter().map(|p| p.margin_maintenance).sum();

    let total_margin = position_margin.add(collateral_margin);
    let total_margin_maintenance = position_margin_maintenance.add(collateral_margin);
    let total_collateral_value: Quote = collaterals.iter().map(|c| c.value).sum();
    let total_collateral_value_discounted: Quote =
        collaterals.iter().map(|c| c.value_discounted).sum();

    let account_value = balance.add(total_pnl).add(total_collateral_value);
    let account_value_discounted = balance.add(total_pnl).add(total_collateral_value_discounted);
    let available_margin = account_value_discounted.sub(total_margin);
    let available_margin_maintenance = account_value_discounted.sub(total_margin_maintenance);

    Ok(AccountSummary {
        balance,
        positions,
        collaterals,
        overview: AccountOverview {
            account_value,
            account_value_discounted,
            available_margin,
            available_margin_maintenance,
            balance,
            total_pnl,
            total_margin,
            total_margin_maintenance,
            total_collateral_value,
            total_collateral_value_discounted,
        },
    })
}
