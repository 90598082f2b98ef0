//! MCP Inbound Adapter
//!
//! JSON-RPC over stdio that drives the application layer.

pub mod protocol;
mod server;
mod tools;

pub use server::McpServer;
pub use tools::{FIND_RECIPIENT, LIST_RECIPIENTS, SEND_MONEY, ToolDefaults, tool_schemas};
