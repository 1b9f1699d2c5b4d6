//! Tool parameter types and normalization
//!
//! Callers send loosely typed JSON arguments; these types carry them into
//! the strict vocabulary of the broker client. Symbol arguments accept a
//! single string or an ordered list and normalize to a list; optional fields
//! stay unset rather than being defaulted locally.

use serde::{Deserialize, Serialize};

/// A value that is either one string or an ordered sequence of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Normalize to a sequence: a scalar becomes a one-element list,
    /// a list passes through unchanged and order-preserved
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Arguments for `get_latest_quotes`
#[derive(Debug, Clone, Deserialize)]
pub struct QuotesParams {
    pub symbols: OneOrMany,
}

fn default_timeframe_value() -> u32 {
    1
}

fn default_timeframe_unit() -> String {
    "Day".to_string()
}

fn default_sort() -> String {
    "asc".to_string()
}

/// Arguments for `get_stock_bars`
#[derive(Debug, Clone, Deserialize)]
pub struct BarsParams {
    pub symbols: OneOrMany,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_timeframe_value")]
    pub timeframe_value: u32,
    #[serde(default = "default_timeframe_unit")]
    pub timeframe_unit: String,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default = "default_sort")]
    pub sort: String,
}

/// Arguments for `get_orders`; every field is an independent optional filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrdersParams {
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub after: Option<String>,
    pub until: Option<String>,
    pub direction: Option<String>,
    pub nested: Option<bool>,
    pub side: Option<String>,
    pub symbols: Option<OneOrMany>,
}

/// Arguments for `cancel_order_by_id`
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderParams {
    pub order_id: String,
}

/// Arguments for `get_asset` and `get_open_position`
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolOrAssetIdParams {
    pub symbol_or_asset_id: String,
}

/// Arguments for `close_position`
#[derive(Debug, Clone, Deserialize)]
pub struct ClosePositionParams {
    pub symbol_or_asset_id: String,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub percentage: Option<String>,
}

/// Arguments for `get_calendar`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

fn default_time_in_force() -> String {
    "day".to_string()
}

/// Arguments for `place_limit_order`
#[derive(Debug, Clone, Deserialize)]
pub struct LimitOrderParams {
    pub symbol: String,
    pub limit_price: f64,
    pub qty: f64,
    pub side: String,
    #[serde(default = "default_time_in_force")]
    pub time_in_force: String,
}
