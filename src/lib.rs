// SPDX-License-Identifier: MIT

//! Strava-MCP: OAuth and activity tools for Strava, served over MCP
//!
//! This crate is a thin integration adapter: it builds the Strava
//! authorization URL, exchanges authorization codes and refresh tokens
//! for access tokens, persists token bundles to a single local JSON
//! file, and fetches the athlete's activity list. The operations are
//! exposed as MCP tools over stdio.

pub mod adapter;
pub mod config;
pub mod error;
pub mod mcp;
pub mod store;
pub mod strava;

pub use adapter::StravaAdapter;
pub use config::Config;
pub use error::AdapterError;
pub use mcp::McpServer;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
