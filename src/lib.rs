// perp-analytics: off-chain analytics for an on-chain perpetual futures exchange.
// read-only reconstruction of the funding, margin, and request-queue figures
// the exchange computes authoritatively on-chain.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: PairId, ResourceId, Price, Quote, SignedSize
//   2.x  funding.rs: skew, funding split, pool funding, rate annualization
//   3.x  position.rs / collateral.rs: per-entry valuation at a reference price
//   4.x  account.rs: account-level solvency summary
//   5.x  request.rs: request queue decoding and trade-type classification
//   6.x  report.rs: pair/account report composition for the dashboards
//        config.rs: per-pair exchange parameters
//        pool.rs: pool state snapshot, funding-2 clamp
//        price.rs: reference price set

// snapshot data
pub mod collateral;
pub mod config;
pub mod pool;
pub mod position;
pub mod price;
pub mod request;
pub mod types;

// computation
pub mod account;
pub mod funding;

// composition
pub mod report;

// re exports for convenience
pub use account::*;
pub use collateral::*;
pub use config::*;
pub use funding::*;
pub use pool::*;
pub use position::*;
pub use price::*;
pub use report::*;
pub use request::*;
pub use types::*;
