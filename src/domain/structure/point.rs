use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::segment::Segment;

/// Chan buy/sell point taxonomy, ranked by structural confirmation:
/// 1st = earliest, from momentum divergence; 2nd = pullback holding the
/// pivot; 3rd = pullback holding outside the pivot after a breakout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    #[serde(rename = "1st_buy")]
    FirstBuy,
    #[serde(rename = "1st_sell")]
    FirstSell,
    #[serde(rename = "2nd_buy")]
    SecondBuy,
    #[serde(rename = "2nd_sell")]
    SecondSell,
    #[serde(rename = "3rd_buy")]
    ThirdBuy,
    #[serde(rename = "3rd_sell")]
    ThirdSell,
}

impl PointKind {
    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            PointKind::FirstBuy | PointKind::SecondBuy | PointKind::ThirdBuy
        )
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PointKind::FirstBuy => "1st_buy",
            PointKind::FirstSell => "1st_sell",
            PointKind::SecondBuy => "2nd_buy",
            PointKind::SecondSell => "2nd_sell",
            PointKind::ThirdBuy => "3rd_buy",
            PointKind::ThirdSell => "3rd_sell",
        };
        write!(f, "{}", label)
    }
}

/// A typed trade signal anchored to the segment whose completion triggered
/// it. One analysis run emits each (timestamp, kind) pair at most once,
/// sorted by timestamp ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuySellPoint {
    pub kind: PointKind,
    pub timestamp: i64,
    pub price: Decimal,
    pub segment: Segment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(PointKind::FirstBuy.to_string(), "1st_buy");
        assert_eq!(PointKind::SecondSell.to_string(), "2nd_sell");
        assert_eq!(PointKind::ThirdBuy.to_string(), "3rd_buy");
    }

    #[test]
    fn test_buy_side_classification() {
        assert!(PointKind::FirstBuy.is_buy());
        assert!(PointKind::SecondBuy.is_buy());
        assert!(PointKind::ThirdBuy.is_buy());
        assert!(!PointKind::FirstSell.is_buy());
        assert!(!PointKind::SecondSell.is_buy());
        assert!(!PointKind::ThirdSell.is_buy());
    }

    #[test]
    fn test_serde_labels_match_display() {
        let json = serde_json::to_string(&PointKind::FirstBuy).unwrap();
        assert_eq!(json, "\"1st_buy\"");

        let parsed: PointKind = serde_json::from_str("\"3rd_sell\"").unwrap();
        assert_eq!(parsed, PointKind::ThirdSell);
    }
}
