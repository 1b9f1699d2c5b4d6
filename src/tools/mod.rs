//! Tool system - definitions, the fixed brokerage catalog, and dispatch

mod catalog;
mod definition;
mod dispatcher;

pub use catalog::ToolCatalog;
pub use definition::ToolDefinition;
pub use dispatcher::ToolDispatcher;
