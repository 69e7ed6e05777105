//! Analytics report demo.
//!
//! Runs the three analytics components over a canned exchange snapshot and
//! prints the JSON the reporting scripts would serve to a dashboard. In
//! production the snapshot comes from a gateway preview call; here it is
//! constructed inline so the output is reproducible.

use perp_analytics::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn main() {
    let now = Timestamp::from_seconds(1_700_000_000);
    let prices = demo_prices(now);

    println!("Pair details:");
    let pairs = vec![
        PairSnapshot {
            config: PairConfig::btc_usd(),
            pool: PoolPairState {
                pair_id: PairId::from("BTC/USD"),
                oi_long: dec!(10),
                oi_short: dec!(5),
                cost: Quote::new(dec!(290000)),
                funding_2_raw: dec!(120000),
            },
        },
        PairSnapshot {
            config: PairConfig::xrd_usd(),
            pool: PoolPairState::new(PairId::from("XRD/USD"), dec!(2_000_000), Decimal::ZERO),
        },
    ];

    match pair_reports(&pairs, &prices, now) {
        Ok(reports) => print_json(&reports),
        Err(err) => eprintln!("pair report failed: {err}"),
    }

    println!("\nAccount details:");
    match account_report(&demo_account(), &prices) {
        Ok(report) => print_json(&report),
        Err(err) => eprintln!("account report failed: {err}"),
    }
}

fn demo_prices(now: Timestamp) -> PriceMap {
    [
        (PairId::from("BTC/USD"), PricePoint::new(dec!(60000), now)),
        (PairId::from("XRD/USD"), PricePoint::new(dec!(0.05), now)),
    ]
    .into_iter()
    .collect()
}

fn demo_account() -> AccountSnapshot {
    AccountSnapshot {
        balance: Quote::new(dec!(2500)),
        positions: vec![Position {
            pair_id: PairId::from("BTC/USD"),
            size: SignedSize::new(dec!(0.5)),
            margin_initial: dec!(0.05),
            margin_maintenance: dec!(0.005),
            cost: Quote::new(dec!(29000)),
            funding: Quote::new(dec!(12)),
        }],
        collaterals: vec![Collateral {
            pair_id: PairId::from("XRD/USD"),
            resource: ResourceId::new("resource_rdx1t5xrd"),
            amount: dec!(100000),
            discount: dec!(0.9),
            margin: dec!(1000),
        }],
        valid_requests_start: 11,
        active_requests: vec![RawRequest {
            index: 12,
            submission: Timestamp::from_seconds(1_699_999_000),
            expiry: Timestamp::from_seconds(1_700_600_000),
            status: 1,
            data: RawRequestData::MarginOrder(RawMarginOrder {
                pair_id: PairId::from("BTC/USD"),
                size: dec!(-0.25),
                reduce_only: true,
                limit_variant: 2,
                limit_price: Some(dec!(66000)),
                slippage_variant: 1,
                slippage: Some(dec!(0.5)),
                activate_requests: vec![],
                cancel_requests: vec![13],
            }),
        }],
        requests_history: vec![RawRequest {
            index: 11,
            submission: Timestamp::from_seconds(1_699_990_000),
            expiry: Timestamp::from_seconds(1_699_999_600),
            status: 2,
            data: RawRequestData::MarginOrder(RawMarginOrder {
                pair_id: PairId::from("BTC/USD"),
                size: dec!(0.5),
                reduce_only: false,
                limit_variant: 0,
                limit_price: None,
                slippage_variant: 0,
                slippage: None,
                activate_requests: vec![12],
                cancel_requests: vec![],
            }),
        }],
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("serialization failed: {err}"),
    }
}
