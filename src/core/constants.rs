//! Shared constants used across the application

use std::time::Duration;

/// Model queried when neither the config file nor `--model` names one.
pub const DEFAULT_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";

/// Base URL the endpoint is derived from when none is configured explicitly.
pub const DEFAULT_ENDPOINT_BASE: &str = "https://api-inference.huggingface.co/models";

/// Environment variable holding the bearer token. Checked at startup, before
/// the terminal enters raw mode.
pub const TOKEN_ENV_VAR: &str = "HF_TOKEN";

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 512;

/// Upper bound on one inference request. Expiry surfaces as a `Timeout`
/// failure instead of leaving the session stuck waiting.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
