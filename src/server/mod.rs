//! Host loop - JSON Lines request/response serving over stdio

mod messages;
mod stdio;

pub use messages::{ErrorCode, RpcError, ToolRequest, ToolResponse};
pub use stdio::StdioServer;
