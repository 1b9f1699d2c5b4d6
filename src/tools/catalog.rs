//! The fixed brokerage tool catalog
//!
//! Registers the full set of named operations with their parameter schemas.
//! Kept in declaration order so `tools/list` output is stable.

use serde_json::json;

use super::definition::ToolDefinition;

/// Catalog of tool definitions
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Build the full brokerage catalog
    pub fn brokerage() -> Self {
        let mut catalog = Self::new();

        catalog.add(
            ToolDefinition::new(
                "get_latest_quotes",
                "Get the latest quotes for one or multiple stock symbols",
            )
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "symbols": {
                        "type": ["string", "array"],
                        "items": { "type": "string" },
                        "description": "A single stock symbol or a list of symbols"
                    }
                },
                "required": ["symbols"]
            })),
        );

        catalog.add(
            ToolDefinition::new(
                "get_stock_bars",
                "Get historical stock bars (candles) for one or multiple symbols",
            )
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "symbols": {
                        "type": ["string", "array"],
                        "items": { "type": "string" },
                        "description": "A single stock symbol or a list of symbols"
                    },
                    "start_date": { "type": "string", "description": "Range start, YYYY-MM-DD or RFC 3339" },
                    "end_date": { "type": "string", "description": "Range end, YYYY-MM-DD or RFC 3339" },
                    "timeframe_value": { "type": "integer", "description": "Time units per bar (default: 1)" },
                    "timeframe_unit": { "type": "string", "description": "Bar unit: Min, Hour, Day, Week, Month (default: Day)" },
                    "limit": { "type": "integer", "description": "Maximum number of bars to return" },
                    "sort": { "type": "string", "description": "Sort direction, 'asc' or 'desc' (default: asc)" }
                },
                "required": ["symbols", "start_date", "end_date"]
            })),
        );

        catalog.add(
            ToolDefinition::new("get_orders", "Get orders from the trading account with filters")
                .with_schema(json!({
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "description": "Order status: open, closed, or all" },
                        "limit": { "type": "integer", "description": "Maximum number of orders (max 500)" },
                        "after": { "type": "string", "description": "Only orders submitted after this timestamp" },
                        "until": { "type": "string", "description": "Only orders submitted until this timestamp" },
                        "direction": { "type": "string", "description": "Sort order: asc or desc" },
                        "nested": { "type": "boolean", "description": "Roll multi-leg orders up under the primary order" },
                        "side": { "type": "string", "description": "Filter by order side: buy or sell" },
                        "symbols": {
                            "type": ["string", "array"],
                            "items": { "type": "string" },
                            "description": "Filter by symbol or list of symbols"
                        }
                    },
                    "required": []
                })),
        );

        catalog.add(ToolDefinition::new(
            "cancel_orders",
            "Cancel all open orders; returns a per-order cancellation status list",
        ));

        catalog.add(
            ToolDefinition::new("cancel_order_by_id", "Cancel a specific order by its order ID")
                .with_schema(json!({
                    "type": "object",
                    "properties": {
                        "order_id": { "type": "string", "description": "The unique identifier (UUID) of the order" }
                    },
                    "required": ["order_id"]
                })),
        );

        catalog.add(
            ToolDefinition::new("get_asset", "Get details for an asset by symbol or asset ID")
                .with_schema(json!({
                    "type": "object",
                    "properties": {
                        "symbol_or_asset_id": { "type": "string", "description": "Symbol (e.g. AAPL) or asset ID (UUID)" }
                    },
                    "required": ["symbol_or_asset_id"]
                })),
        );

        catalog.add(ToolDefinition::new(
            "get_account",
            "Get account details: status, buying power, cash, portfolio value, restrictions",
        ));

        catalog.add(ToolDefinition::new(
            "get_all_positions",
            "Get all open positions in the trading account",
        ));

        catalog.add(
            ToolDefinition::new(
                "get_open_position",
                "Get details for one open position by symbol or asset ID",
            )
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "symbol_or_asset_id": { "type": "string", "description": "Symbol (e.g. AAPL) or asset ID (UUID)" }
                },
                "required": ["symbol_or_asset_id"]
            })),
        );

        catalog.add(
            ToolDefinition::new(
                "close_position",
                "Close all or part of an open position by submitting a liquidating order",
            )
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "symbol_or_asset_id": { "type": "string", "description": "Symbol (e.g. AAPL) or asset ID (UUID)" },
                    "qty": { "type": "string", "description": "Number of shares to liquidate (e.g. \"100\")" },
                    "percentage": { "type": "string", "description": "Percentage of the position to liquidate (e.g. \"50\")" }
                },
                "required": ["symbol_or_asset_id"]
            })),
        );

        catalog.add(ToolDefinition::new(
            "get_clock",
            "Get the market clock: current timestamp, open/closed state, next open and close",
        ));

        catalog.add(
            ToolDefinition::new(
                "get_calendar",
                "Get the market calendar with open and close times for each trading day",
            )
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "start": { "type": "string", "description": "Start date, YYYY-MM-DD" },
                    "end": { "type": "string", "description": "End date, YYYY-MM-DD" }
                },
                "required": []
            })),
        );

        catalog.add(
            ToolDefinition::new(
                "place_limit_order",
                "Place a limit order to buy or sell an asset at a specified price",
            )
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "symbol": { "type": "string", "description": "Stock symbol (e.g. AAPL, TSLA)" },
                    "limit_price": { "type": "number", "description": "Limit price for the order" },
                    "qty": { "type": "number", "description": "Number of shares to trade" },
                    "side": { "type": "string", "description": "Order side: buy or sell" },
                    "time_in_force": { "type": "string", "description": "day, gtc, opg, cls, ioc, or fok (default: day)" }
                },
                "required": ["symbol", "limit_price", "qty", "side"]
            })),
        );

        catalog
    }

    /// Add a tool to the catalog
    pub fn add(&mut self, tool: ToolDefinition) {
        self.tools.push(tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// List all tool names in declaration order
    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Iterate over all tools
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    /// Get number of tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_new_empty() {
        let catalog = ToolCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_brokerage_catalog_has_all_operations() {
        let catalog = ToolCatalog::brokerage();
        assert_eq!(catalog.len(), 13);

        for name in [
            "get_latest_quotes",
            "get_stock_bars",
            "get_orders",
            "cancel_orders",
            "cancel_order_by_id",
            "get_asset",
            "get_account",
            "get_all_positions",
            "get_open_position",
            "close_position",
            "get_clock",
            "get_calendar",
            "place_limit_order",
        ] {
            assert!(catalog.contains(name), "missing tool: {}", name);
        }
    }

    #[test]
    fn test_catalog_get() {
        let catalog = ToolCatalog::brokerage();
        let tool = catalog.get("place_limit_order").unwrap();
        assert_eq!(tool.name, "place_limit_order");

        let required = tool.input_schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "symbol"));
        assert!(required.iter().any(|v| v == "side"));
        // time_in_force has a default and is not required
        assert!(!required.iter().any(|v| v == "time_in_force"));
    }

    #[test]
    fn test_catalog_get_nonexistent() {
        let catalog = ToolCatalog::brokerage();
        assert!(catalog.get("get_widgets").is_none());
    }

    #[test]
    fn test_catalog_list_order_is_stable() {
        let catalog = ToolCatalog::brokerage();
        let names = catalog.list();
        assert_eq!(names[0], "get_latest_quotes");
        assert_eq!(names[names.len() - 1], "place_limit_order");
        assert_eq!(names, ToolCatalog::brokerage().list());
    }

    #[test]
    fn test_no_args_tools_have_empty_schemas() {
        let catalog = ToolCatalog::brokerage();
        for name in ["cancel_orders", "get_account", "get_all_positions", "get_clock"] {
            let tool = catalog.get(name).unwrap();
            assert!(
                tool.input_schema["properties"].as_object().unwrap().is_empty(),
                "{} should take no parameters",
                name
            );
        }
    }

    #[test]
    fn test_all_tools_have_descriptions() {
        let catalog = ToolCatalog::brokerage();
        for tool in catalog.all() {
            assert!(!tool.description.is_empty(), "{} lacks a description", tool.name);
        }
    }

    #[test]
    fn test_catalog_default() {
        let catalog = ToolCatalog::default();
        assert!(catalog.is_empty());
    }
}
