// SPDX-License-Identifier: MIT

//! Strava API client for the OAuth token endpoints and the activity list.
//!
//! Handles:
//! - Authorization URL construction
//! - Code exchange and token refresh
//! - Activity list fetching (fixed page size)
//!
//! Token bundles and activity payloads are passed through as opaque JSON;
//! this client never reshapes individual records.

use crate::error::AdapterError;
use serde_json::Value;

/// Production OAuth base URL (authorize + token endpoints live under it).
pub const DEFAULT_OAUTH_BASE: &str = "https://www.strava.com";

/// Production REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://www.strava.com/api/v3";

/// Fixed redirect URI registered for the out-of-band flow.
pub const REDIRECT_URI: &str = "https://developers.strava.com/oauth2-redirect/";

/// Scopes requested during authorization.
pub const SCOPE: &str = "read,activity:read_all";

/// Fixed page size for the activity list.
pub const ACTIVITIES_PER_PAGE: u32 = 60;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    oauth_base: String,
    api_base: String,
}

impl StravaClient {
    /// Create a client against the production Strava endpoints.
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_OAUTH_BASE.to_string(), DEFAULT_API_BASE.to_string())
    }

    /// Create a client with overridden base URLs (used by tests to point
    /// at a mock server).
    pub fn with_base_urls(oauth_base: String, api_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth_base,
            api_base,
        }
    }

    /// Build the complete authorization URL for the given client id.
    ///
    /// Query parameters are fixed apart from the client id: response type
    /// `code`, the registered redirect URI, a forced re-approval prompt,
    /// and the activity read scopes.
    pub fn authorization_url(&self, client_id: u64) -> String {
        format!(
            "{}/oauth/authorize?client_id={}&response_type=code&redirect_uri={}&approval_prompt=force&scope={}",
            self.oauth_base,
            client_id,
            urlencoding::encode(REDIRECT_URI),
            urlencoding::encode(SCOPE),
        )
    }

    /// Exchange an authorization code for a token bundle.
    pub async fn exchange_code(
        &self,
        client_id: u64,
        client_secret: &str,
        code: &str,
    ) -> Result<Value, AdapterError> {
        let response = self
            .http
            .post(format!("{}/oauth/token", self.oauth_base))
            .form(&[
                ("client_id", client_id.to_string()),
                ("client_secret", client_secret.to_string()),
                ("code", code.to_string()),
                ("grant_type", "authorization_code".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AdapterError::Transport(format!("Token exchange request failed: {}", e)))?;

        self.check_response_json("token request failed", response)
            .await
    }

    /// Exchange a refresh token for a fresh token bundle.
    pub async fn refresh_token(
        &self,
        client_id: u64,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<Value, AdapterError> {
        let response = self
            .http
            .post(format!("{}/oauth/token", self.oauth_base))
            .form(&[
                ("client_id", client_id.to_string()),
                ("client_secret", client_secret.to_string()),
                ("refresh_token", refresh_token.to_string()),
                ("grant_type", "refresh_token".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AdapterError::Transport(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json("token refresh failed", response)
            .await
    }

    /// Fetch the athlete's activity list (one page, fixed size).
    pub async fn list_activities(&self, access_token: &str) -> Result<Value, AdapterError> {
        let url = format!("{}/athlete/activities", self.api_base);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("per_page", ACTIVITIES_PER_PAGE.to_string())])
            .send()
            .await
            .map_err(|e| AdapterError::Transport(format!("Activities request failed: {}", e)))?;

        self.check_response_json("activities request failed", response)
            .await
    }

    /// Check response status and parse the JSON body.
    ///
    /// Non-2xx responses become an upstream error carrying the status
    /// code and the raw body; never retried.
    async fn check_response_json(
        &self,
        context: &'static str,
        response: reqwest::Response,
    ) -> Result<Value, AdapterError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), context, "Strava request failed");
            return Err(AdapterError::Upstream {
                context,
                status_code: status.as_u16(),
                response: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AdapterError::Transport(format!("JSON parse error: {}", e)))
    }
}

impl Default for StravaClient {
    fn default() -> Self {
        Self::new()
    }
}
