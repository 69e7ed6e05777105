// 6.0: report composition. glues the three computations over one snapshot and
// shapes the output the way the dashboards consume it. no I/O here: callers
// fetch the snapshot from the gateway and serialize the result themselves.

use crate::account::{aggregate_account, AccountError, AccountSummary};
use crate::collateral::Collateral;
use crate::config::PairConfig;
use crate::funding::{compute_funding, AnnualizedFunding, FundingError, FundingResult};
use crate::pool::PoolPairState;
use crate::position::Position;
use crate::price::PriceMap;
use crate::request::{decode_request, DecodedRequest, RawRequest, RequestError};
use crate::types::{Quote, Timestamp};
use serde::{Deserialize, Serialize};

/// Periods per year used for annualized rates, on a daily funding base.
pub const PERIODS_PER_YEAR: u32 = 365;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Funding(#[from] FundingError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// One pair's state as fetched from the exchange component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub config: PairConfig,
    pub pool: PoolPairState,
}

/// One account's state as fetched from the exchange component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: Quote,
    pub positions: Vec<Position>,
    pub collaterals: Vec<Collateral>,
    /// First queue index the ledger still considers valid.
    pub valid_requests_start: u64,
    pub active_requests: Vec<RawRequest>,
    pub requests_history: Vec<RawRequest>,
}

/// Funding breakdown plus config echo for one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    #[serde(flatten)]
    pub funding: FundingResult,
    pub funding_annualized: AnnualizedFunding,
    pub config: PairConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountReport {
    /// Balance, positions, collaterals, overview.
    #[serde(flatten)]
    pub summary: AccountSummary,
    pub valid_requests_start: u64,
    pub active_requests: Vec<DecodedRequest>,
    pub requests_history: Vec<DecodedRequest>,
}

pub fn pair_report(
    snapshot: &PairSnapshot,
    prices: &PriceMap,
    now: Timestamp,
) -> Result<PairReport, ReportError> {
    let point = prices
        .point(&snapshot.pool.pair_id)
        .map_err(AccountError::from)?;
    let funding = compute_funding(&snapshot.config, &snapshot.pool, point, now)?;
    let funding_annualized = funding.annualized(PERIODS_PER_YEAR);

    Ok(PairReport {
        funding,
        funding_annualized,
        config: snapshot.config.clone(),
    })
}

/// Reports for many pairs. Fails on the first pair that cannot be valued.
pub fn pair_reports(
    snapshots: &[PairSnapshot],
    prices: &PriceMap,
    now: Timestamp,
) -> Result<Vec<PairReport>, ReportError> {
    snapshots
        .iter()
        .map(|snapshot| pair_report(snapshot, prices, now))
        .collect()
}

pub fn account_report(
    snapshot: &AccountSnapshot,
    prices: &PriceMap,
) -> Result<AccountReport, ReportError> {
    let summary = aggregate_account(
        snapshot.balance,
        &snapshot.positions,
        &snapshot.collaterals,
        prices,
    )?;

    let active_requests = snapshot
        .active_requests
        .iter()
        .map(decode_request)
        .collect::<Result<Vec<_>, _>>()?;

    let requests_history = snapshot
        .requests_history
        .iter()
        .map(decode_request)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccountReport {
        summary,
        valid_requests_start: snapshot.valid_requests_start,
        active_requests,
        requests_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::PricePoint;
    use crate::types::PairId;
    use rust_decimal_macros::dec;

    fn btc_snapshot() -> PairSnapshot {
        PairSnapshot {
            config: PairConfig {
                funding_1: dec!(0.001),
                funding_2: rust_decimal::Decimal::ZERO,
                funding_pool_0: rust_decimal::Decimal::ZERO,
                funding_pool_1: rust_decimal::Decimal::ZERO,
                funding_share: dec!(0.1),
                ..PairConfig::btc_usd()
            },
            pool: PoolPairState::new(PairId::from("BTC/USD"), dec!(10), dec!(5)),
        }
    }

    fn btc_prices() -> PriceMap {
        [(
            PairId::from("BTC/USD"),
            PricePoint::new(dec!(100), Timestamp::from_seconds(1000)),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn pair_report_includes_annualized_rates() {
        let report =
            pair_report(&btc_snapshot(), &btc_prices(), Timestamp::from_seconds(1000)).unwrap();

        assert_eq!(report.funding.funding_long_index, dec!(0.05));
        assert_eq!(
            report.funding_annualized.funding_long,
            report.funding.funding_long * rust_decimal::Decimal::from(PERIODS_PER_YEAR)
        );
    }

    #[test]
    fn pair_report_missing_price() {
        let prices = PriceMap::new();
        let err =
            pair_report(&btc_snapshot(), &prices, Timestamp::from_seconds(1000)).unwrap_err();
        assert!(matches!(err, ReportError::Account(AccountError::MissingPrice(_))));
    }

    #[test]
    fn account_report_empty_snapshot() {
        let snapshot = AccountSnapshot {
            balance: Quote::new(dec!(100)),
            positions: vec![],
            collaterals: vec![],
            valid_requests_start: 0,
            active_requests: vec![],
            requests_history: vec![],
        };

        let report = account_report(&snapshot, &btc_prices()).unwrap();
        assert_eq!(report.summary.overview.account_value.value(), dec!(100));
        assert!(report.active_requests.is_empty());
    }
}
