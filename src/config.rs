//! Application configuration loaded from environment variables.
//!
//! The environment is read once at startup; operations accept per-call
//! credential overrides that take precedence over these values.

use std::env;
use std::path::PathBuf;

/// Default token store filename, placed in the user's home directory.
const TOKEN_STORE_FILENAME: &str = ".strava_mcp_tokens.json";

/// Application configuration, loaded once at startup.
///
/// Credentials are optional at load time: their absence only becomes an
/// error when an operation needs the value and no per-call override was
/// supplied. The client id stays a raw string here so a malformed value
/// surfaces as a per-call configuration error instead of a startup crash.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public, numeric)
    pub client_id: Option<String>,
    /// Strava OAuth client secret
    pub client_secret: Option<String>,
    /// Path of the local token store file
    pub token_store_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `STRAVA_CLIENT_ID` and `STRAVA_CLIENT_SECRET` if set, and
    /// `STRAVA_TOKEN_FILE` to override the token store location. The
    /// default store path is `~/.strava_mcp_tokens.json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let token_store_path = match env::var("STRAVA_TOKEN_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_token_store_path()?,
        };

        Ok(Self {
            client_id: env::var("STRAVA_CLIENT_ID")
                .ok()
                .map(|v| v.trim().to_string()),
            client_secret: env::var("STRAVA_CLIENT_SECRET")
                .ok()
                .map(|v| v.trim().to_string()),
            token_store_path,
        })
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            client_id: Some("12345".to_string()),
            client_secret: Some("test_secret".to_string()),
            token_store_path: PathBuf::from(TOKEN_STORE_FILENAME),
        }
    }
}

/// Resolve the default token store path under the user's home directory.
fn default_token_store_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
    Ok(dirs.home_dir().join(TOKEN_STORE_FILENAME))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory for the token store")]
    NoHomeDir,
}
