//! Alpaca REST client implementation
//!
//! Live HTTP implementation of the `Broker` trait against the Alpaca trading
//! and market-data APIs. Credentials are read once at construction and the
//! reqwest client is reused for every call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use crate::broker::types::{
    BarsRequest, CalendarRange, ClosePositionOptions, LimitOrder, OrdersFilter,
};
use crate::broker::Broker;
use crate::config::{AlpacaConfig, Credentials};
use crate::error::{BrokrError, Result};

/// Header carrying the API key id
const HEADER_KEY_ID: &str = "APCA-API-KEY-ID";

/// Header carrying the API secret
const HEADER_SECRET: &str = "APCA-API-SECRET-KEY";

/// Alpaca API client
pub struct AlpacaClient {
    client: Client,
    credentials: Credentials,
    trading_url: String,
    data_url: String,
}

impl AlpacaClient {
    /// Create a new client, reading credentials from the environment
    pub fn new(config: &AlpacaConfig) -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Self::with_credentials(credentials, config)
    }

    /// Create a client with explicit credentials
    pub fn with_credentials(credentials: Credentials, config: &AlpacaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(BrokrError::Network)?;

        Ok(Self {
            client,
            credentials,
            trading_url: config.trading_url(),
            data_url: config.data_url(),
        })
    }

    /// Attach auth headers to a request
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(HEADER_KEY_ID, &self.credentials.api_key)
            .header(HEADER_SECRET, &self.credentials.secret_key)
    }

    /// Send a request, surface non-success statuses, parse the JSON body
    async fn send_json(&self, builder: RequestBuilder) -> Result<Value> {
        let response = self.authed(builder).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BrokrError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value = response.json().await?;
        Ok(value)
    }

    /// Send a request whose success response carries no body
    async fn send_no_body(&self, builder: RequestBuilder) -> Result<()> {
        let response = self.authed(builder).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BrokrError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    fn trading(&self, path: &str) -> String {
        format!("{}{}", self.trading_url, path)
    }

    fn data(&self, path: &str) -> String {
        format!("{}{}", self.data_url, path)
    }
}

#[async_trait]
impl Broker for AlpacaClient {
    async fn get_latest_quotes(&self, symbols: &[String]) -> Result<Value> {
        let url = self.data("/v2/stocks/quotes/latest");
        let request = self
            .client
            .get(url)
            .query(&[("symbols", symbols.join(","))]);
        self.send_json(request).await
    }

    async fn get_stock_bars(&self, request: &BarsRequest) -> Result<Value> {
        let url = self.data("/v2/stocks/bars");
        let mut query: Vec<(&str, String)> = vec![
            ("symbols", request.symbols.join(",")),
            ("timeframe", request.timeframe.to_query()),
            ("start", request.start.clone()),
            ("end", request.end.clone()),
        ];
        if let Some(limit) = request.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(sort) = request.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
        self.send_json(self.client.get(url).query(&query)).await
    }

    async fn get_orders(&self, filter: &OrdersFilter) -> Result<Value> {
        let url = self.trading("/v2/orders");
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(after) = &filter.after {
            query.push(("after", after.clone()));
        }
        if let Some(until) = &filter.until {
            query.push(("until", until.clone()));
        }
        if let Some(direction) = filter.direction {
            query.push(("direction", direction.as_str().to_string()));
        }
        if let Some(nested) = filter.nested {
            query.push(("nested", nested.to_string()));
        }
        if let Some(side) = filter.side {
            query.push(("side", side.as_str().to_string()));
        }
        if let Some(symbols) = &filter.symbols {
            query.push(("symbols", symbols.join(",")));
        }
        self.send_json(self.client.get(url).query(&query)).await
    }

    async fn cancel_orders(&self) -> Result<Value> {
        let url = self.trading("/v2/orders");
        self.send_json(self.client.delete(url)).await
    }

    async fn cancel_order_by_id(&self, order_id: &str) -> Result<()> {
        let url = self.trading(&format!("/v2/orders/{}", order_id));
        self.send_no_body(self.client.delete(url)).await
    }

    async fn get_asset(&self, symbol_or_asset_id: &str) -> Result<Value> {
        let url = self.trading(&format!("/v2/assets/{}", symbol_or_asset_id));
        self.send_json(self.client.get(url)).await
    }

    async fn get_account(&self) -> Result<Value> {
        let url = self.trading("/v2/account");
        self.send_json(self.client.get(url)).await
    }

    async fn get_all_positions(&self) -> Result<Value> {
        let url = self.trading("/v2/positions");
        self.send_json(self.client.get(url)).await
    }

    async fn get_open_position(&self, symbol_or_asset_id: &str) -> Result<Value> {
        let url = self.trading(&format!("/v2/positions/{}", symbol_or_asset_id));
        self.send_json(self.client.get(url)).await
    }

    async fn close_position(
        &self,
        symbol_or_asset_id: &str,
        options: &ClosePositionOptions,
    ) -> Result<Value> {
        let url = self.trading(&format!("/v2/positions/{}", symbol_or_asset_id));
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(qty) = &options.qty {
            query.push(("qty", qty.clone()));
        }
        if let Some(percentage) = &options.percentage {
            query.push(("percentage", percentage.clone()));
        }
        self.send_json(self.client.delete(url).query(&query)).await
    }

    async fn get_clock(&self) -> Result<Value> {
        let url = self.trading("/v2/clock");
        self.send_json(self.client.get(url)).await
    }

    async fn get_calendar(&self, range: &CalendarRange) -> Result<Value> {
        let url = self.trading("/v2/calendar");
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = &range.start {
            query.push(("start", start.clone()));
        }
        if let Some(end) = &range.end {
            query.push(("end", end.clone()));
        }
        self.send_json(self.client.get(url).query(&query)).await
    }

    async fn submit_limit_order(&self, order: &LimitOrder) -> Result<Value> {
        let url = self.trading("/v2/orders");
        let body = json!({
            "symbol": order.symbol,
            "qty": order.qty.to_string(),
            "side": order.side.as_str(),
            "type": "limit",
            "time_in_force": order.time_in_force.as_str(),
            "limit_price": order.limit_price.to_string(),
        });
        self.send_json(self.client.post(url).json(&body)).await
    }
}

// Keep credentials out of debug output
impl std::fmt::Debug for AlpacaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaClient")
            .field("trading_url", &self.trading_url)
            .field("data_url", &self.data_url)
            .finish()
    }
}
