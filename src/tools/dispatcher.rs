//! Tool dispatch
//!
//! Routes a named tool invocation to its handler. Every handler normalizes
//! its parameters, performs exactly one broker call, and returns the API's
//! native JSON. The dispatcher applies one uniform error policy: any failure,
//! local validation or remote, becomes a `{"success": false, "message": …}`
//! record (wrapped in a one-element array for list-returning tools). Nothing
//! propagates a raw fault to the host.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::broker::types::{
    BarsRequest, CalendarRange, ClosePositionOptions, LimitOrder, OrderSide, OrdersFilter,
    QueryOrderStatus, SortDirection, TimeFrame, TimeFrameUnit, TimeInForce,
};
use crate::broker::Broker;
use crate::error::{BrokrError, Result};
use crate::params::{
    BarsParams, CalendarParams, CancelOrderParams, ClosePositionParams, LimitOrderParams,
    OrdersParams, QuotesParams, SymbolOrAssetIdParams,
};

use super::catalog::ToolCatalog;

/// Tools whose success value is a list; their failure record is a
/// one-element list of the same shape
const LIST_RETURNING: [&str; 3] = ["cancel_orders", "get_all_positions", "get_calendar"];

/// Routes tool calls to handlers over an injected broker client
pub struct ToolDispatcher<B: Broker> {
    catalog: ToolCatalog,
    broker: B,
}

impl<B: Broker> ToolDispatcher<B> {
    /// Create a dispatcher over the full brokerage catalog
    pub fn new(broker: B) -> Self {
        Self {
            catalog: ToolCatalog::brokerage(),
            broker,
        }
    }

    /// The catalog this dispatcher serves
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// The broker client behind this dispatcher
    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Dispatch a tool call, shaping any failure into the uniform record
    pub async fn dispatch(&self, name: &str, input: Value) -> Value {
        match self.invoke(name, input).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Tool {} failed: {}", name, e);
                let record = json!({"success": false, "message": e.to_string()});
                if LIST_RETURNING.contains(&name) {
                    json!([record])
                } else {
                    record
                }
            }
        }
    }

    /// Route to the handler for `name`
    async fn invoke(&self, name: &str, input: Value) -> Result<Value> {
        match name {
            "get_latest_quotes" => self.get_latest_quotes(input).await,
            "get_stock_bars" => self.get_stock_bars(input).await,
            "get_orders" => self.get_orders(input).await,
            "cancel_orders" => self.broker.cancel_orders().await,
            "cancel_order_by_id" => self.cancel_order_by_id(input).await,
            "get_asset" => self.get_asset(input).await,
            "get_account" => self.broker.get_account().await,
            "get_all_positions" => self.broker.get_all_positions().await,
            "get_open_position" => self.get_open_position(input).await,
            "close_position" => self.close_position(input).await,
            "get_clock" => self.broker.get_clock().await,
            "get_calendar" => self.get_calendar(input).await,
            "place_limit_order" => self.place_limit_order(input).await,
            _ => Err(BrokrError::UnknownTool(name.to_string())),
        }
    }

    async fn get_latest_quotes(&self, input: Value) -> Result<Value> {
        let params: QuotesParams = parse_params("get_latest_quotes", input)?;
        let symbols = params.symbols.into_vec();
        self.broker.get_latest_quotes(&symbols).await
    }

    async fn get_stock_bars(&self, input: Value) -> Result<Value> {
        let params: BarsParams = parse_params("get_stock_bars", input)?;

        let unit = TimeFrameUnit::parse(&params.timeframe_unit)?;
        let sort = SortDirection::parse(&params.sort)?;

        let request = BarsRequest {
            symbols: params.symbols.into_vec(),
            timeframe: TimeFrame::new(params.timeframe_value, unit),
            start: params.start_date,
            end: params.end_date,
            limit: params.limit,
            sort: Some(sort),
        };
        self.broker.get_stock_bars(&request).await
    }

    async fn get_orders(&self, input: Value) -> Result<Value> {
        let params: OrdersParams = parse_params("get_orders", input)?;

        // Every supplied categorical is validated; absent fields stay unset
        // so the API applies its own defaults.
        let filter = OrdersFilter {
            status: params
                .status
                .as_deref()
                .map(QueryOrderStatus::parse)
                .transpose()?,
            limit: params.limit,
            after: params.after,
            until: params.until,
            direction: params
                .direction
                .as_deref()
                .map(SortDirection::parse)
                .transpose()?,
            nested: params.nested,
            side: params.side.as_deref().map(OrderSide::parse).transpose()?,
            symbols: params.symbols.map(|s| s.into_vec()),
        };
        self.broker.get_orders(&filter).await
    }

    async fn cancel_order_by_id(&self, input: Value) -> Result<Value> {
        let params: CancelOrderParams = parse_params("cancel_order_by_id", input)?;

        // The API returns no body on success, so synthesize the response
        self.broker.cancel_order_by_id(&params.order_id).await?;
        Ok(json!({
            "success": true,
            "message": format!(
                "Request to cancel order {} was sent to Alpaca. Verify order status to ensure it was cancelled.",
                params.order_id
            )
        }))
    }

    async fn get_asset(&self, input: Value) -> Result<Value> {
        let params: SymbolOrAssetIdParams = parse_params("get_asset", input)?;
        self.broker.get_asset(&params.symbol_or_asset_id).await
    }

    async fn get_open_position(&self, input: Value) -> Result<Value> {
        let params: SymbolOrAssetIdParams = parse_params("get_open_position", input)?;
        self.broker
            .get_open_position(&params.symbol_or_asset_id)
            .await
    }

    async fn close_position(&self, input: Value) -> Result<Value> {
        let params: ClosePositionParams = parse_params("close_position", input)?;

        // The API rejects the combination with a 422; failing here is faster
        // and clearer than letting it through.
        if params.qty.is_some() && params.percentage.is_some() {
            return Err(BrokrError::InvalidParam(
                "Specify either qty or percentage, not both.".to_string(),
            ));
        }

        let options = ClosePositionOptions {
            qty: params.qty,
            percentage: params.percentage,
        };
        self.broker
            .close_position(&params.symbol_or_asset_id, &options)
            .await
    }

    async fn get_calendar(&self, input: Value) -> Result<Value> {
        let params: CalendarParams = parse_params("get_calendar", input)?;
        let range = CalendarRange {
            start: params.start,
            end: params.end,
        };
        self.broker.get_calendar(&range).await
    }

    async fn place_limit_order(&self, input: Value) -> Result<Value> {
        let params: LimitOrderParams = parse_params("place_limit_order", input)?;

        let side = OrderSide::parse(&params.side)?;
        let time_in_force = TimeInForce::parse(&params.time_in_force)?;

        let order = LimitOrder {
            symbol: params.symbol,
            qty: params.qty,
            side,
            limit_price: params.limit_price,
            time_in_force,
        };
        self.broker.submit_limit_order(&order).await
    }
}

/// Deserialize raw JSON arguments into a typed parameter struct
fn parse_params<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T> {
    serde_json::from_value(input)
        .map_err(|e| BrokrError::InvalidParam(format!("Invalid parameters for {}: {}", tool, e)))
}
