//! Typed vocabulary for the Alpaca trading and market-data APIs
//!
//! Every categorical tool argument maps onto one of these enums. Parsing is
//! case-insensitive and fails with a descriptive message naming the accepted
//! literals; nothing falls back silently.

use serde::{Deserialize, Serialize};

use crate::error::{BrokrError, Result};

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Parse from a caller-supplied string, case-insensitively
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(BrokrError::InvalidParam(format!(
                "Invalid side parameter: {}. Must be 'buy' or 'sell'.",
                s
            ))),
        }
    }

    /// Wire representation expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// How long a submitted order remains eligible for execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    Day,
    Gtc,
    Opg,
    Cls,
    Ioc,
    Fok,
}

impl TimeInForce {
    const ACCEPTED: &'static str = "day, gtc, opg, cls, ioc, fok";

    /// Parse from a caller-supplied string, case-insensitively
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "gtc" => Ok(Self::Gtc),
            "opg" => Ok(Self::Opg),
            "cls" => Ok(Self::Cls),
            "ioc" => Ok(Self::Ioc),
            "fok" => Ok(Self::Fok),
            _ => Err(BrokrError::InvalidParam(format!(
                "Invalid time_in_force parameter: {}. Must be one of: {}",
                s,
                Self::ACCEPTED
            ))),
        }
    }

    /// Wire representation expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Gtc => "gtc",
            Self::Opg => "opg",
            Self::Cls => "cls",
            Self::Ioc => "ioc",
            Self::Fok => "fok",
        }
    }
}

/// Order status filter for order listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryOrderStatus {
    Open,
    Closed,
    All,
}

impl QueryOrderStatus {
    /// Parse from a caller-supplied string, case-insensitively
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            _ => Err(BrokrError::InvalidParam(format!(
                "Invalid status parameter: {}. Must be one of: open, closed, all",
                s
            ))),
        }
    }

    /// Wire representation expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Sort direction for ordered result sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse from a caller-supplied string, case-insensitively
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(BrokrError::InvalidParam(format!(
                "Invalid sort direction: {}. Must be 'asc' or 'desc'.",
                s
            ))),
        }
    }

    /// Wire representation expected by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Unit of time for a single bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeFrameUnit {
    const ACCEPTED: &'static str = "Min, Hour, Day, Week, Month";

    /// Parse from a caller-supplied string, case-insensitively
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "min" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(BrokrError::InvalidParam(format!(
                "Invalid timeframe_unit: {}. Must be one of: {}",
                s,
                Self::ACCEPTED
            ))),
        }
    }

    /// Wire representation used inside a timeframe string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "Min",
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }
}

/// Bar size: a count of time units, e.g. 15 minutes or 1 day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub value: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    /// Create a new timeframe
    pub fn new(value: u32, unit: TimeFrameUnit) -> Self {
        Self { value, unit }
    }

    /// Wire representation, e.g. "15Min" or "1Day"
    pub fn to_query(&self) -> String {
        format!("{}{}", self.value, self.unit.as_str())
    }
}

/// Request for historical bars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarsRequest {
    pub symbols: Vec<String>,
    pub timeframe: TimeFrame,
    /// Start of the range, YYYY-MM-DD or RFC 3339; passed through unvalidated
    pub start: String,
    /// End of the range, YYYY-MM-DD or RFC 3339; passed through unvalidated
    pub end: String,
    pub limit: Option<u32>,
    pub sort: Option<SortDirection>,
}

/// Filter for order listing; absent fields are omitted from the query,
/// deferring defaults to the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersFilter {
    pub status: Option<QueryOrderStatus>,
    pub limit: Option<u32>,
    pub after: Option<String>,
    pub until: Option<String>,
    pub direction: Option<SortDirection>,
    pub nested: Option<bool>,
    pub side: Option<OrderSide>,
    pub symbols: Option<Vec<String>>,
}

impl OrdersFilter {
    /// True if no filter field is set
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.limit.is_none()
            && self.after.is_none()
            && self.until.is_none()
            && self.direction.is_none()
            && self.nested.is_none()
            && self.side.is_none()
            && self.symbols.is_none()
    }
}

/// A fully specified limit order, immutable once submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitOrder {
    pub symbol: String,
    pub qty: f64,
    pub side: OrderSide,
    pub limit_price: f64,
    pub time_in_force: TimeInForce,
}

/// Partial liquidation options for closing a position.
/// Quantities travel as strings, matching the API's order endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClosePositionOptions {
    pub qty: Option<String>,
    pub percentage: Option<String>,
}

impl ClosePositionOptions {
    /// True if neither qty nor percentage is set
    pub fn is_empty(&self) -> bool {
        self.qty.is_none() && self.percentage.is_none()
    }
}

/// Optional date range for the market calendar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl CalendarRange {
    /// True if neither bound is set
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_side_parse_case_insensitive() {
        for input in ["buy", "BUY", "Buy", "bUy"] {
            assert_eq!(OrderSide::parse(input).unwrap(), OrderSide::Buy);
        }
        for input in ["sell", "SELL", "Sell"] {
            assert_eq!(OrderSide::parse(input).unwrap(), OrderSide::Sell);
        }
    }

    #[test]
    fn test_order_side_parse_invalid() {
        let err = OrderSide::parse("sideways").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid side parameter: sideways. Must be 'buy' or 'sell'."
        );
    }

    #[test]
    fn test_order_side_wire() {
        assert_eq!(OrderSide::Buy.as_str(), "buy");
        assert_eq!(OrderSide::Sell.as_str(), "sell");
    }

    #[test]
    fn test_time_in_force_parse_all_literals() {
        let cases = [
            ("day", TimeInForce::Day),
            ("gtc", TimeInForce::Gtc),
            ("opg", TimeInForce::Opg),
            ("cls", TimeInForce::Cls),
            ("ioc", TimeInForce::Ioc),
            ("fok", TimeInForce::Fok),
        ];
        for (input, expected) in cases {
            assert_eq!(TimeInForce::parse(input).unwrap(), expected);
            assert_eq!(TimeInForce::parse(&input.to_uppercase()).unwrap(), expected);
        }
    }

    #[test]
    fn test_time_in_force_parse_invalid() {
        let err = TimeInForce::parse("forever").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid time_in_force parameter: forever"));
        assert!(msg.contains("day, gtc, opg, cls, ioc, fok"));
    }

    #[test]
    fn test_query_order_status_parse() {
        assert_eq!(
            QueryOrderStatus::parse("open").unwrap(),
            QueryOrderStatus::Open
        );
        assert_eq!(
            QueryOrderStatus::parse("CLOSED").unwrap(),
            QueryOrderStatus::Closed
        );
        assert_eq!(
            QueryOrderStatus::parse("All").unwrap(),
            QueryOrderStatus::All
        );
    }

    #[test]
    fn test_query_order_status_parse_invalid() {
        let err = QueryOrderStatus::parse("pending").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid status parameter: pending"));
        assert!(msg.contains("open, closed, all"));
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC").unwrap(), SortDirection::Desc);
        assert!(SortDirection::parse("sideways").is_err());
    }

    #[test]
    fn test_timeframe_unit_parse_case_insensitive() {
        let cases = [
            ("Min", TimeFrameUnit::Minute),
            ("min", TimeFrameUnit::Minute),
            ("MIN", TimeFrameUnit::Minute),
            ("Hour", TimeFrameUnit::Hour),
            ("day", TimeFrameUnit::Day),
            ("WEEK", TimeFrameUnit::Week),
            ("Month", TimeFrameUnit::Month),
        ];
        for (input, expected) in cases {
            assert_eq!(TimeFrameUnit::parse(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_timeframe_unit_parse_invalid_names_accepted_values() {
        let err = TimeFrameUnit::parse("Fortnight").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid timeframe_unit: Fortnight"));
        assert!(msg.contains("Min"));
        assert!(msg.contains("Hour"));
        assert!(msg.contains("Day"));
        assert!(msg.contains("Week"));
        assert!(msg.contains("Month"));
    }

    #[test]
    fn test_timeframe_to_query() {
        assert_eq!(
            TimeFrame::new(15, TimeFrameUnit::Minute).to_query(),
            "15Min"
        );
        assert_eq!(TimeFrame::new(1, TimeFrameUnit::Day).to_query(), "1Day");
        assert_eq!(TimeFrame::new(2, TimeFrameUnit::Week).to_query(), "2Week");
    }

    #[test]
    fn test_orders_filter_is_empty() {
        assert!(OrdersFilter::default().is_empty());

        let filter = OrdersFilter {
            status: Some(QueryOrderStatus::Open),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_close_position_options_is_empty() {
        assert!(ClosePositionOptions::default().is_empty());
        let opts = ClosePositionOptions {
            qty: Some("10".to_string()),
            percentage: None,
        };
        assert!(!opts.is_empty());
    }

    #[test]
    fn test_calendar_range_is_empty() {
        assert!(CalendarRange::default().is_empty());
        let range = CalendarRange {
            start: Some("2025-01-01".to_string()),
            end: None,
        };
        assert!(!range.is_empty());
    }

    #[test]
    fn test_enum_serialization_lowercase() {
        assert_eq!(serde_json::to_string(&OrderSide::Buy).unwrap(), "\"buy\"");
        assert_eq!(
            serde_json::to_string(&TimeInForce::Gtc).unwrap(),
            "\"gtc\""
        );
        assert_eq!(
            serde_json::to_string(&QueryOrderStatus::All).unwrap(),
            "\"all\""
        );
        assert_eq!(
            serde_json::to_string(&SortDirection::Desc).unwrap(),
            "\"desc\""
        );
    }
}
