// 5.0: request lifecycle interpreter. decodes the opaque request records the
// exchange keeps per account into typed, display-ready descriptions.
// the ledger owns every state transition; this only renders the state it
// observes. 5.1 has the decode tables, 5.2 the decode function.

use crate::types::{PairId, ResourceId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestError {
    #[error("unrecognized request payload tag {variant_id} for request {index}")]
    UnrecognizedPayload { index: u64, variant_id: u8 },

    #[error("request {index} has a trigger limit kind but no limit price")]
    MissingLimitPrice { index: u64 },
}

// 5.1: decode tables for the ledger's positionally-tagged unions.

/// Observed request status. Executed, Canceled, Expired and Failed are
/// terminal; the client never transitions state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Dormant,
    Active,
    Executed,
    Canceled,
    Expired,
    Failed,
    /// Status code outside the known range. Rendered, never raised.
    Unknown,
}

impl RequestStatus {
    pub fn from_raw(status_id: u8) -> Self {
        match status_id {
            0 => Self::Dormant,
            1 => Self::Active,
            2 => Self::Executed,
            3 => Self::Canceled,
            4 => Self::Expired,
            5 => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Executed | Self::Canceled | Self::Expired | Self::Failed
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dormant => "Dormant",
            Self::Active => "Active",
            Self::Executed => "Executed",
            Self::Canceled => "Canceled",
            Self::Expired => "Expired",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Human-facing trade label, a fixed lookup on (limit kind, sign of size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    MarketLong,
    MarketShort,
    StopLong,
    StopShort,
    LimitLong,
    LimitShort,
    /// Combination outside the table. Rendered for diagnostics, never raised.
    Unknown,
}

impl TradeType {
    /// The classification table. `limit_variant` is the raw limit-kind tag:
    /// 0 = market, 1 = stop trigger, 2 = limit trigger.
    pub fn classify(limit_variant: u8, size: Decimal) -> Self {
        match limit_variant {
            0 if size >= Decimal::ZERO => Self::MarketLong,
            0 => Self::MarketShort,
            1 if size > Decimal::ZERO => Self::StopLong,
            1 => Self::LimitShort,
            2 if size >= Decimal::ZERO => Self::LimitLong,
            2 => Self::StopShort,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MarketLong => "Market Long",
            Self::MarketShort => "Market Short",
            Self::StopLong => "Stop Long",
            Self::StopShort => "Stop Short",
            Self::LimitLong => "Limit Long",
            Self::LimitShort => "Limit Short",
            Self::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Price trigger attached to a margin order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceLimit {
    /// No trigger: execute at market.
    None,
    /// Executes once the price crosses the trigger in the stop direction.
    StopTrigger(Decimal),
    /// Executes once the price crosses the trigger in the limit direction.
    LimitTrigger(Decimal),
    /// Tag outside the known range. Rendered for diagnostics.
    Unrecognized { variant_id: u8 },
}

/// Slippage bound attached to a margin order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlippageLimit {
    None,
    /// Bound as a percentage of the fill price.
    Percent(Decimal),
    /// Bound as an absolute quote amount.
    Absolute(Decimal),
    Unrecognized { variant_id: u8 },
}

// raw records: structured values handed over by the (external) ledger
// decoder, with the union tags still numeric.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceClaim {
    pub resource: ResourceId,
    pub size: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMarginOrder {
    pub pair_id: PairId,
    pub size: Decimal,
    pub reduce_only: bool,
    /// Raw limit-kind tag: 0 = market, 1 = stop trigger, 2 = limit trigger.
    pub limit_variant: u8,
    pub limit_price: Option<Decimal>,
    /// Raw slippage tag: 0 = none, 1 = percent, 2 = absolute.
    pub slippage_variant: u8,
    pub slippage: Option<Decimal>,
    pub activate_requests: Vec<u64>,
    pub cancel_requests: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RawRequestData {
    RemoveCollateral {
        target_account: ResourceId,
        claims: Vec<ResourceClaim>,
    },
    MarginOrder(RawMarginOrder),
    /// Payload variant the ledger decoder did not recognize.
    Unrecognized { variant_id: u8 },
}

/// One entry of the account's request queue, as fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRequest {
    pub index: u64,
    pub submission: Timestamp,
    pub expiry: Timestamp,
    /// Raw status code, see [`RequestStatus::from_raw`].
    pub status: u8,
    pub data: RawRequestData,
}

/// Typed request description for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedRequest {
    pub index: u64,
    pub submission: Timestamp,
    pub expiry: Timestamp,
    pub status: RequestStatus,
    pub details: RequestDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestDetails {
    RemoveCollateral {
        target_account: ResourceId,
        claims: Vec<ResourceClaim>,
    },
    MarginOrder {
        pair_id: PairId,
        size: Decimal,
        reduce_only: bool,
        trade_type: TradeType,
        price_limit: PriceLimit,
        slippage: SlippageLimit,
        /// Request indices the ledger activates atomically on fill.
        activate_requests: Vec<u64>,
        /// Request indices the ledger cancels atomically on fill.
        cancel_requests: Vec<u64>,
    },
}

impl DecodedRequest {
    /// Trade label for margin orders, None for collateral removals.
    pub fn trade_type(&self) -> Option<TradeType> {
        match &self.details {
            RequestDetails::MarginOrder { trade_type, .. } => Some(*trade_type),
            RequestDetails::RemoveCollateral { .. } => None,
        }
    }
}

// 5.2: the decode function. pure classification, no I/O.
pub fn decode_request(raw: &RawRequest) -> Result<DecodedRequest, RequestError> {
    let details = match &raw.data {
        RawRequestData::RemoveCollateral {
            target_account,
            claims,
        } => RequestDetails::RemoveCollateral {
            target_account: target_account.clone(),
            claims: claims.clone(),
        },
        RawRequestData::MarginOrder(order) => decode_margin_order(raw.index, order)?,
        RawRequestData::Unrecognized { variant_id } => {
            return Err(RequestError::UnrecognizedPayload {
                index: raw.index,
                variant_id: *variant_id,
            });
        }
    };

    Ok(DecodedRequest {
        index: raw.index,
        submission: raw.submission,
        expiry: raw.expiry,
        status: RequestStatus::from_raw(raw.status),
        details,
    })
}

fn decode_margin_order(
    index: u64,
    order: &RawMarginOrder,
) -> Result<RequestDetails, RequestError> {
    let price_limit = match order.limit_variant {
        0 => PriceLimit::None,
        1 | 2 => {
            let price = order
                .limit_price
                .ok_or(RequestError::MissingLimitPrice { index })?;
            if order.limit_variant == 1 {
                PriceLimit::StopTrigger(price)
            } else {
                PriceLimit::LimitTrigger(price)
            }
        }
        variant_id => PriceLimit::Unrecognized { variant_id },
    };

    let slippage = match (order.slippage_variant, order.slippage) {
        (0, _) => SlippageLimit::None,
        (1, Some(value)) => SlippageLimit::Percent(value),
        (2, Some(value)) => SlippageLimit::Absolute(value),
        (variant_id, _) => SlippageLimit::Unrecognized { variant_id },
    };

    Ok(RequestDetails::MarginOrder {
        pair_id: order.pair_id.clone(),
        size: order.size,
        reduce_only: order.reduce_only,
        trade_type: TradeType::classify(order.limit_variant, order.size),
        price_limit,
        slippage,
        activate_requests: order.activate_requests.clone(),
        cancel_requests: order.cancel_requests.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw_order(limit_variant: u8, size: Decimal, limit_price: Option<Decimal>) -> RawRequest {
        RawRequest {
            index: 7,
            submission: Timestamp::from_seconds(100),
            expiry: Timestamp::from_seconds(700),
            status: 1,
            data: RawRequestData::MarginOrder(RawMarginOrder {
                pair_id: PairId::from("BTC/USD"),
                size,
                reduce_only: false,
                limit_variant,
                limit_price,
                slippage_variant: 0,
                slippage: None,
                activate_requests: vec![],
                cancel_requests: vec![],
            }),
        }
    }

    #[test]
    fn status_decode_table() {
        assert_eq!(RequestStatus::from_raw(0), RequestStatus::Dormant);
        assert_eq!(RequestStatus::from_raw(1), RequestStatus::Active);
        assert_eq!(RequestStatus::from_raw(2), RequestStatus::Executed);
        assert_eq!(RequestStatus::from_raw(3), RequestStatus::Canceled);
        assert_eq!(RequestStatus::from_raw(4), RequestStatus::Expired);
        assert_eq!(RequestStatus::from_raw(5), RequestStatus::Failed);
        assert_eq!(RequestStatus::from_raw(42), RequestStatus::Unknown);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!RequestStatus::Dormant.is_terminal());
        assert!(!RequestStatus::Active.is_terminal());
        assert!(RequestStatus::Executed.is_terminal());
        assert!(RequestStatus::Canceled.is_terminal());
        assert!(RequestStatus::Expired.is_terminal());
        assert!(RequestStatus::Failed.is_terminal());
    }

    #[test]
    fn trade_type_table() {
        assert_eq!(TradeType::classify(0, dec!(1)), TradeType::MarketLong);
        assert_eq!(TradeType::classify(0, dec!(0)), TradeType::MarketLong);
        assert_eq!(TradeType::classify(0, dec!(-0.5)), TradeType::MarketShort);
        assert_eq!(TradeType::classify(1, dec!(2)), TradeType::StopLong);
        assert_eq!(TradeType::classify(1, dec!(0)), TradeType::LimitShort);
        assert_eq!(TradeType::classify(1, dec!(-1)), TradeType::LimitShort);
        assert_eq!(TradeType::classify(2, dec!(1)), TradeType::LimitLong);
        assert_eq!(TradeType::classify(2, dec!(0)), TradeType::LimitLong);
        assert_eq!(TradeType::classify(2, dec!(-1)), TradeType::StopShort);
        assert_eq!(TradeType::classify(9, dec!(1)), TradeType::Unknown);
    }

    #[test]
    fn trade_type_labels() {
        assert_eq!(TradeType::MarketShort.to_string(), "Market Short");
        assert_eq!(TradeType::StopLong.to_string(), "Stop Long");
        assert_eq!(TradeType::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn decode_market_short() {
        let decoded = decode_request(&raw_order(0, dec!(-0.5), None)).unwrap();
        assert_eq!(decoded.status, RequestStatus::Active);
        assert_eq!(decoded.trade_type(), Some(TradeType::MarketShort));
        match decoded.details {
            RequestDetails::MarginOrder { price_limit, .. } => {
                assert_eq!(price_limit, PriceLimit::None);
            }
            _ => panic!("expected margin order"),
        }
    }

    #[test]
    fn decode_stop_long_with_trigger() {
        let decoded = decode_request(&raw_order(1, dec!(2), Some(dec!(61000)))).unwrap();
        assert_eq!(decoded.trade_type(), Some(TradeType::StopLong));
        match decoded.details {
            RequestDetails::MarginOrder { price_limit, .. } => {
                assert_eq!(price_limit, PriceLimit::StopTrigger(dec!(61000)));
            }
            _ => panic!("expected margin order"),
        }
    }

    #[test]
    fn trigger_without_price_is_integrity_error() {
        let err = decode_request(&raw_order(2, dec!(1), None)).unwrap_err();
        assert!(matches!(err, RequestError::MissingLimitPrice { index: 7 }));
    }

    #[test]
    fn unknown_limit_kind_still_renders() {
        let decoded = decode_request(&raw_order(9, dec!(1), None)).unwrap();
        assert_eq!(decoded.trade_type(), Some(TradeType::Unknown));
        match decoded.details {
            RequestDetails::MarginOrder { price_limit, .. } => {
                assert_eq!(price_limit, PriceLimit::Unrecognized { variant_id: 9 });
            }
            _ => panic!("expected margin order"),
        }
    }

    #[test]
    fn decode_remove_collateral() {
        let raw = RawRequest {
            index: 3,
            submission: Timestamp::from_seconds(10),
            expiry: Timestamp::from_seconds(610),
            status: 2,
            data: RawRequestData::RemoveCollateral {
                target_account: ResourceId::new("account_rdx1abc"),
                claims: vec![ResourceClaim {
                    resource: ResourceId::new("resource_rdx1xrd"),
                    size: dec!(500),
                }],
            },
        };

        let decoded = decode_request(&raw).unwrap();
        assert_eq!(decoded.status, RequestStatus::Executed);
        assert_eq!(decoded.trade_type(), None);
        match decoded.details {
            RequestDetails::RemoveCollateral { claims, .. } => {
                assert_eq!(claims.len(), 1);
                assert_eq!(claims[0].size, dec!(500));
            }
            _ => panic!("expected remove collateral"),
        }
    }

    #[test]
    fn unrecognized_payload_is_integrity_error() {
        let raw = RawRequest {
            index: 4,
            submission: Timestamp::from_seconds(10),
            expiry: Timestamp::from_seconds(610),
            status: 0,
            data: RawRequestData::Unrecognized { variant_id: 8 },
        };

        let err = decode_request(&raw).unwrap_err();
        assert!(matches!(
            err,
            RequestError::UnrecognizedPayload { index: 4, variant_id: 8 }
        ));
    }

    #[test]
    fn chained_indices_pass_through() {
        let mut raw = raw_order(0, dec!(1), None);
        if let RawRequestData::MarginOrder(order) = &mut raw.data {
            order.activate_requests = vec![8, 9];
            order.cancel_requests = vec![5];
        }

        let decoded = decode_request(&raw).unwrap();
        match decoded.details {
            RequestDetails::MarginOrder {
                activate_requests,
                cancel_requests,
                ..
            } => {
                assert_eq!(activate_requests, vec![8, 9]);
                assert_eq!(cancel_requests, vec![5]);
            }
            _ => panic!("expected margin order"),
        }
    }

    #[test]
    fn slippage_decode() {
        let mut raw = raw_order(0, dec!(1), None);
        if let RawRequestData::MarginOrder(order) = &mut raw.data {
            order.slippage_variant = 1;
            order.slippage = Some(dec!(0.5));
        }
        let decoded = decode_request(&raw).unwrap();
        match decoded.details {
            RequestDetails::MarginOrder { slippage, .. } => {
                assert_eq!(slippage, SlippageLimit::Percent(dec!(0.5)));
            }
            _ => panic!("expected margin order"),
        }
    }
}
