//! Brokr - brokerage and market data served as callable tools
//!
//! Brokr exposes a fixed catalog of Alpaca trading and market data
//! operations as named tools, dispatched by name with JSON arguments
//! over a JSON-Lines stdio loop.

pub mod broker;
pub mod config;
pub mod error;
pub mod params;
pub mod server;
pub mod tools;

pub use error::{BrokrError, Result};
