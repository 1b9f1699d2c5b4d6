//! Stdio host loop
//!
//! Reads one JSON request per line from stdin, handles it, and writes one
//! JSON response per line to stdout. Requests are processed sequentially;
//! the dispatcher itself holds no mutable state.

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::broker::Broker;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::tools::ToolDispatcher;

use super::messages::{RpcError, ToolRequest, ToolResponse};

fn default_arguments() -> Value {
    json!({})
}

/// Parameters for a "tools/call" request
#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default = "default_arguments")]
    arguments: Value,
}

/// Stdio JSON-Lines server over a tool dispatcher
pub struct StdioServer<B: Broker> {
    dispatcher: ToolDispatcher<B>,
    max_request_bytes: usize,
}

impl<B: Broker> StdioServer<B> {
    /// Create a server over the given dispatcher
    pub fn new(dispatcher: ToolDispatcher<B>, config: &ServerConfig) -> Self {
        Self {
            dispatcher,
            max_request_bytes: config.max_request_bytes,
        }
    }

    /// Run the read/handle/write loop until stdin closes
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdout = tokio::io::stdout();

        log::info!(
            "Serving {} tools over stdio",
            self.dispatcher.catalog().len()
        );

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line).await;
            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }

        log::info!("Host closed stdin, shutting down");
        Ok(())
    }

    /// Handle one raw request line
    async fn handle_line(&self, line: &str) -> ToolResponse {
        if line.len() > self.max_request_bytes {
            return ToolResponse::error(
                0,
                RpcError::invalid_request(format!(
                    "Request exceeds {} bytes",
                    self.max_request_bytes
                )),
            );
        }

        let request: ToolRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return ToolResponse::error(0, RpcError::parse_error(e.to_string()));
            }
        };

        self.handle_request(request).await
    }

    /// Handle one parsed request
    pub async fn handle_request(&self, request: ToolRequest) -> ToolResponse {
        log::debug!("Handling request {} ({})", request.id, request.method);

        match request.method.as_str() {
            "tools/list" => {
                let tools: Vec<Value> = self
                    .dispatcher
                    .catalog()
                    .all()
                    .map(|t| serde_json::to_value(t).unwrap_or(Value::Null))
                    .collect();
                ToolResponse::success(request.id, json!({"tools": tools}))
            }
            "tools/call" => {
                let params: CallParams = match serde_json::from_value(request.params) {
                    Ok(params) => params,
                    Err(e) => {
                        return ToolResponse::error(
                            request.id,
                            RpcError::invalid_request(format!("Invalid call params: {}", e)),
                        );
                    }
                };

                let result = self.dispatcher.dispatch(&params.name, params.arguments).await;
                ToolResponse::success(request.id, result)
            }
            other => ToolResponse::error(request.id, RpcError::method_not_found(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::types::{
        BarsRequest, CalendarRange, ClosePositionOptions, LimitOrder, OrdersFilter,
    };
    use async_trait::async_trait;

    /// Broker stub returning a fixed value for every operation
    struct StubBroker;

    #[async_trait]
    impl Broker for StubBroker {
        async fn get_latest_quotes(&self, _symbols: &[String]) -> crate::error::Result<Value> {
            Ok(json!({"quotes": {}}))
        }
        async fn get_stock_bars(&self, _request: &BarsRequest) -> crate::error::Result<Value> {
            Ok(json!({"bars": {}}))
        }
        async fn get_orders(&self, _filter: &OrdersFilter) -> crate::error::Result<Value> {
            Ok(json!([]))
        }
        async fn cancel_orders(&self) -> crate::error::Result<Value> {
            Ok(json!([]))
        }
        async fn cancel_order_by_id(&self, _order_id: &str) -> crate::error::Result<()> {
            Ok(())
        }
        async fn get_asset(&self, _symbol_or_asset_id: &str) -> crate::error::Result<Value> {
            Ok(json!({"symbol": "AAPL"}))
        }
        async fn get_account(&self) -> crate::error::Result<Value> {
            Ok(json!({"status": "ACTIVE"}))
        }
        async fn get_all_positions(&self) -> crate::error::Result<Value> {
            Ok(json!([]))
        }
        async fn get_open_position(&self, _symbol_or_asset_id: &str) -> crate::error::Result<Value> {
            Ok(json!({"qty": "1"}))
        }
        async fn close_position(
            &self,
            _symbol_or_asset_id: &str,
            _options: &ClosePositionOptions,
        ) -> crate::error::Result<Value> {
            Ok(json!({"status": "accepted"}))
        }
        async fn get_clock(&self) -> crate::error::Result<Value> {
            Ok(json!({"is_open": false}))
        }
        async fn get_calendar(&self, _range: &CalendarRange) -> crate::error::Result<Value> {
            Ok(json!([]))
        }
        async fn submit_limit_order(&self, _order: &LimitOrder) -> crate::error::Result<Value> {
            Ok(json!({"status": "new"}))
        }
    }

    fn test_server() -> StdioServer<StubBroker> {
        StdioServer::new(ToolDispatcher::new(StubBroker), &ServerConfig::default())
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = test_server();
        let response = server
            .handle_request(ToolRequest::no_params(1, "tools/list"))
            .await;

        assert!(response.is_success());
        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 13);
    }

    #[tokio::test]
    async fn test_tools_call_get_clock() {
        let server = test_server();
        let response = server
            .handle_request(ToolRequest::new(
                2,
                "tools/call",
                json!({"name": "get_clock"}),
            ))
            .await;

        assert!(response.is_success());
        assert_eq!(response.result.unwrap()["is_open"], false);
    }

    #[tokio::test]
    async fn test_tools_call_with_arguments() {
        let server = test_server();
        let response = server
            .handle_request(ToolRequest::new(
                3,
                "tools/call",
                json!({"name": "get_latest_quotes", "arguments": {"symbols": "AAPL"}}),
            ))
            .await;

        assert!(response.is_success());
        assert!(response.result.unwrap()["quotes"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_wrapped_failure() {
        // Dispatch failures come back as a success response carrying the
        // uniform failure record, not as a protocol-level error
        let server = test_server();
        let response = server
            .handle_request(ToolRequest::new(
                4,
                "tools/call",
                json!({"name": "get_widgets"}),
            ))
            .await;

        assert!(response.is_success());
        let result = response.result.unwrap();
        assert_eq!(result["success"], false);
        assert_eq!(result["message"], "Unknown tool: get_widgets");
    }

    #[tokio::test]
    async fn test_tools_call_missing_name() {
        let server = test_server();
        let response = server
            .handle_request(ToolRequest::new(5, "tools/call", json!({})))
            .await;

        assert!(!response.is_success());
        assert_eq!(
            response.error.unwrap().code,
            super::super::messages::ErrorCode::INVALID_REQUEST
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = test_server();
        let response = server
            .handle_request(ToolRequest::no_params(6, "tools/eat"))
            .await;

        assert!(!response.is_success());
        let error = response.error.unwrap();
        assert_eq!(
            error.code,
            super::super::messages::ErrorCode::METHOD_NOT_FOUND
        );
        assert!(error.message.contains("tools/eat"));
    }

    #[tokio::test]
    async fn test_handle_line_parse_error() {
        let server = test_server();
        let response = server.handle_line("not json").await;

        assert!(!response.is_success());
        assert_eq!(
            response.error.unwrap().code,
            super::super::messages::ErrorCode::PARSE_ERROR
        );
    }

    #[tokio::test]
    async fn test_handle_line_oversized_request() {
        let server = StdioServer::new(
            ToolDispatcher::new(StubBroker),
            &ServerConfig {
                max_request_bytes: 16,
            },
        );
        let long_line = format!("{{\"id\": 1, \"method\": \"{}\"}}", "x".repeat(100));
        let response = server.handle_line(&long_line).await;

        assert!(!response.is_success());
        assert!(response.error.unwrap().message.contains("16 bytes"));
    }

    #[tokio::test]
    async fn test_handle_line_valid_request() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"id": 8, "method": "tools/list"}"#)
            .await;

        assert!(response.is_success());
        assert_eq!(response.id, 8);
    }
}
