// SPDX-License-Identifier: MIT

//! MCP tool surface: JSON-RPC 2.0 over stdio.

pub mod protocol;
pub mod schema;
pub mod server;

pub use server::McpServer;
