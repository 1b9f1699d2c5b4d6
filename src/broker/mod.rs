//! Brokerage client abstraction
//!
//! The `Broker` trait is the seam between the tool dispatcher and the
//! external API: one async method per remote operation, each returning the
//! API's native JSON structure unmodified. `AlpacaClient` is the live HTTP
//! implementation; tests substitute mock implementations.

mod alpaca;
pub mod types;

pub use alpaca::AlpacaClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use types::{BarsRequest, CalendarRange, ClosePositionOptions, LimitOrder, OrdersFilter};

/// Stateless brokerage client - each call is one independent HTTP exchange
#[async_trait]
pub trait Broker: Send + Sync {
    /// Latest best bid/ask per symbol
    async fn get_latest_quotes(&self, symbols: &[String]) -> Result<Value>;

    /// Historical OHLC bar series
    async fn get_stock_bars(&self, request: &BarsRequest) -> Result<Value>;

    /// Orders matching the given filter
    async fn get_orders(&self, filter: &OrdersFilter) -> Result<Value>;

    /// Cancel every open order; returns a per-order outcome list
    async fn cancel_orders(&self) -> Result<Value>;

    /// Cancel one order by id; the API returns no body on success
    async fn cancel_order_by_id(&self, order_id: &str) -> Result<()>;

    /// Asset metadata by symbol or asset id
    async fn get_asset(&self, symbol_or_asset_id: &str) -> Result<Value>;

    /// Account snapshot
    async fn get_account(&self) -> Result<Value>;

    /// All open positions
    async fn get_all_positions(&self) -> Result<Value>;

    /// One open position by symbol or asset id
    async fn get_open_position(&self, symbol_or_asset_id: &str) -> Result<Value>;

    /// Submit a liquidating order for all or part of a position
    async fn close_position(
        &self,
        symbol_or_asset_id: &str,
        options: &ClosePositionOptions,
    ) -> Result<Value>;

    /// Market open/closed state and next transition times
    async fn get_clock(&self) -> Result<Value>;

    /// Trading-day open/close schedule
    async fn get_calendar(&self, range: &CalendarRange) -> Result<Value>;

    /// Submit a new limit order
    async fn submit_limit_order(&self, order: &LimitOrder) -> Result<Value>;
}
