// SPDX-License-Identifier: MIT

//! Tool descriptors advertised through `tools/list`.

use serde_json::{json, Value};

pub const GET_AUTH_URL: &str = "get_auth_url";
pub const REFRESH_ACCESS_TOKEN: &str = "refresh_access_token";
pub const EXCHANGE_CODE_FOR_ACTIVITIES: &str = "exchange_code_for_activities";
pub const FETCH_ACTIVITIES_WITH_TOKEN: &str = "fetch_activities_with_token";
pub const SAVE_TOKENS: &str = "save_tokens";
pub const LOAD_TOKENS: &str = "load_tokens";

/// All tool descriptors, in the order they are advertised.
pub fn tool_descriptors() -> Value {
    json!([
        {
            "name": GET_AUTH_URL,
            "description": "Return the Strava OAuth authorization URL. If client_id is \
                            not provided, it is read from STRAVA_CLIENT_ID.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "client_id": {
                        "type": "integer",
                        "description": "Strava application client ID."
                    }
                }
            }
        },
        {
            "name": REFRESH_ACCESS_TOKEN,
            "description": "Refresh an access token using a refresh token.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "refresh_token": {
                        "type": "string",
                        "description": "Long-lived refresh token from a prior exchange."
                    },
                    "client_id": {
                        "type": "integer",
                        "description": "Strava application client ID (defaults to STRAVA_CLIENT_ID)."
                    },
                    "client_secret": {
                        "type": "string",
                        "description": "Strava application client secret (defaults to STRAVA_CLIENT_SECRET)."
                    }
                },
                "required": ["refresh_token"]
            }
        },
        {
            "name": EXCHANGE_CODE_FOR_ACTIVITIES,
            "description": "Exchange an authorization code for tokens, persist them, and \
                            fetch the athlete's activities.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "code": {
                        "type": "string",
                        "description": "Authorization code from the OAuth redirect."
                    },
                    "client_id": {
                        "type": "integer",
                        "description": "Strava application client ID (defaults to STRAVA_CLIENT_ID)."
                    },
                    "client_secret": {
                        "type": "string",
                        "description": "Strava application client secret (defaults to STRAVA_CLIENT_SECRET)."
                    }
                },
                "required": ["code"]
            }
        },
        {
            "name": FETCH_ACTIVITIES_WITH_TOKEN,
            "description": "Fetch the athlete's activities using an existing access token.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "access_token": {
                        "type": "string",
                        "description": "Valid Strava access token."
                    }
                },
                "required": ["access_token"]
            }
        },
        {
            "name": SAVE_TOKENS,
            "description": "Save a token bundle to the local token store.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "tokens": {
                        "type": "object",
                        "description": "Token bundle to persist verbatim."
                    }
                },
                "required": ["tokens"]
            }
        },
        {
            "name": LOAD_TOKENS,
            "description": "Load the token bundle from the local token store.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        }
    ])
}
