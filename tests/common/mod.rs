// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::sync::Arc;
use strava_mcp::config::Config;
use strava_mcp::store::TokenStore;
use strava_mcp::strava::StravaClient;
use strava_mcp::StravaAdapter;

/// Test configuration with both credentials present.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        client_id: Some("12345".to_string()),
        client_secret: Some("test_secret".to_string()),
        token_store_path: PathBuf::from("unused.json"),
    }
}

/// Test configuration with no credentials at all.
#[allow(dead_code)]
pub fn config_without_credentials() -> Config {
    Config {
        client_id: None,
        client_secret: None,
        token_store_path: PathBuf::from("unused.json"),
    }
}

/// Adapter pointed at a wiremock server for both OAuth and API calls.
#[allow(dead_code)]
pub fn mock_adapter(server_uri: &str, store: Arc<dyn TokenStore>) -> StravaAdapter {
    let client = StravaClient::with_base_urls(
        server_uri.to_string(),
        format!("{}/api/v3", server_uri),
    );
    StravaAdapter::with_client(test_config(), client, store)
}
