// SPDX-License-Identifier: MIT

//! Activity-access adapter: the operations exposed as tools.
//!
//! Each operation validates its inputs, resolves credentials from the
//! per-call override or the startup configuration, performs at most one
//! Strava request and/or one token store access, and returns a JSON
//! payload. Failures become structured error values at the tool boundary
//! (see [`crate::error::AdapterError::to_value`]); nothing here retries
//! or caches.

use crate::config::Config;
use crate::error::{AdapterError, Result};
use crate::store::{StoreError, TokenStore};
use crate::strava::StravaClient;
use serde_json::{json, Value};
use std::sync::Arc;

/// The adapter: configuration + Strava client + injected token store.
pub struct StravaAdapter {
    config: Config,
    client: StravaClient,
    store: Arc<dyn TokenStore>,
}

impl StravaAdapter {
    /// Create an adapter against the production Strava endpoints.
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> Self {
        Self::with_client(config, StravaClient::new(), store)
    }

    /// Create an adapter with an explicit client (tests point it at a
    /// mock server).
    pub fn with_client(config: Config, client: StravaClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    /// Build the Strava authorization URL.
    ///
    /// No side effects. The client id comes from the argument or the
    /// configured `STRAVA_CLIENT_ID`.
    pub fn authorization_url(&self, client_id: Option<u64>) -> Result<String> {
        let client_id = self.resolve_client_id(client_id)?;
        Ok(self.client.authorization_url(client_id))
    }

    /// Refresh an access token using a refresh token.
    ///
    /// Returns the `{access_token, refresh_token, expires_at, expires_in}`
    /// subset of the bundle. Does not persist anything.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
        client_id: Option<u64>,
        client_secret: Option<String>,
    ) -> Result<Value> {
        if refresh_token.is_empty() {
            return Err(AdapterError::Validation("missing refresh token".to_string()));
        }
        let client_id = self.resolve_client_id(client_id)?;
        let client_secret = self.resolve_client_secret(client_secret)?;

        let bundle = self
            .client
            .refresh_token(client_id, &client_secret, refresh_token)
            .await?;

        Ok(token_subset(&bundle))
    }

    /// Exchange an authorization code for tokens and fetch the athlete's
    /// activity list with the new access token.
    ///
    /// The full bundle subset (including `athlete`, `token_type`, `scope`
    /// when present) is persisted before the activities call, overwriting
    /// any prior store contents. A failed persist does not fail the
    /// operation: the result carries `persisted: false` plus
    /// `persist_error` so the caller can see the partial failure.
    pub async fn exchange_code_for_activities(
        &self,
        code: &str,
        client_id: Option<u64>,
        client_secret: Option<String>,
    ) -> Result<Value> {
        if code.is_empty() {
            return Err(AdapterError::Validation(
                "missing authorization code".to_string(),
            ));
        }
        let client_id = self.resolve_client_id(client_id)?;
        let client_secret = self.resolve_client_secret(client_secret)?;

        let bundle = self
            .client
            .exchange_code(client_id, &client_secret, code)
            .await?;

        // Persist for later refresh usage before touching the API again.
        let persist_result = self.store.write(&persisted_subset(&bundle));
        if let Err(e) = &persist_result {
            tracing::warn!(error = %e, "Failed to persist tokens, continuing anyway");
        }

        let access_token = bundle
            .get("access_token")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let activities = self.client.list_activities(access_token).await?;

        let mut result = json!({
            "activities": activities,
            "tokens": token_subset(&bundle),
            "persisted": persist_result.is_ok(),
        });
        if let Err(e) = persist_result {
            result["persist_error"] = Value::String(e.to_string());
        }
        Ok(result)
    }

    /// Fetch the athlete's activity list with an existing access token.
    ///
    /// Returns the raw decoded response body directly, no wrapping.
    pub async fn fetch_activities_with_token(&self, access_token: &str) -> Result<Value> {
        if access_token.is_empty() {
            return Err(AdapterError::Validation("missing access token".to_string()));
        }
        self.client.list_activities(access_token).await
    }

    /// Write a token bundle verbatim to the store, replacing any prior
    /// contents.
    pub fn persist_tokens(&self, tokens: &Value) -> Result<Value> {
        if !tokens.is_object() {
            return Err(AdapterError::Validation("tokens object required".to_string()));
        }
        self.store
            .write(tokens)
            .map_err(|e| self.store_error(e))?;
        Ok(json!({
            "ok": true,
            "path": self.store.path().display().to_string(),
        }))
    }

    /// Read and decode the stored token bundle.
    pub fn load_tokens(&self) -> Result<Value> {
        match self.store.read() {
            Ok(tokens) => Ok(json!({
                "ok": true,
                "tokens": tokens,
                "path": self.store.path().display().to_string(),
            })),
            Err(e) => Err(self.store_error(e)),
        }
    }

    /// Resolve the client id from the per-call override or configuration.
    ///
    /// An env value that is absent or not an integer is the same
    /// configuration error; no network or file access happens after a
    /// resolution failure.
    fn resolve_client_id(&self, client_id: Option<u64>) -> Result<u64> {
        if let Some(id) = client_id {
            return Ok(id);
        }
        self.config
            .client_id
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| AdapterError::Config("missing client id config".to_string()))
    }

    /// Resolve the client secret from the per-call override or configuration.
    fn resolve_client_secret(&self, client_secret: Option<String>) -> Result<String> {
        client_secret
            .filter(|s| !s.is_empty())
            .or_else(|| self.config.client_secret.clone())
            .ok_or_else(|| AdapterError::Config("missing client secret config".to_string()))
    }

    fn store_error(&self, e: StoreError) -> AdapterError {
        AdapterError::Store {
            message: e.to_string(),
            path: self.store.path().to_path_buf(),
        }
    }
}

/// The four-field token subset returned to callers.
fn token_subset(bundle: &Value) -> Value {
    json!({
        "access_token": field(bundle, "access_token"),
        "refresh_token": field(bundle, "refresh_token"),
        "expires_at": field(bundle, "expires_at"),
        "expires_in": field(bundle, "expires_in"),
    })
}

/// The persisted bundle: the token subset plus athlete/type/scope.
fn persisted_subset(bundle: &Value) -> Value {
    json!({
        "access_token": field(bundle, "access_token"),
        "refresh_token": field(bundle, "refresh_token"),
        "expires_at": field(bundle, "expires_at"),
        "expires_in": field(bundle, "expires_in"),
        "athlete": field(bundle, "athlete"),
        "token_type": field(bundle, "token_type"),
        "scope": field(bundle, "scope"),
    })
}

fn field(bundle: &Value, key: &str) -> Value {
    bundle.get(key).cloned().unwrap_or(Value::Null)
}
