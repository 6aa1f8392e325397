use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use jiff::SignedDuration;
use tracing::warn;

pub const DEFAULT_MODEL_NAME: &str = "medgemma-4b-it-q4";
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_NEW_TOKENS: usize = 256;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 600;
pub const DEFAULT_TOKEN_SWEEP_SECS: u64 = 60;

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub model_path: Option<PathBuf>,
    pub tokenizer_path: Option<PathBuf>,
    pub model_name: String,
    pub inference_timeout: Duration,
    pub max_new_tokens: usize,
    pub token_ttl: SignedDuration,
    /// How long a used or expired token is remembered. Defaults to the TTL.
    pub token_retention: SignedDuration,
    pub token_sweep: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparseable values take their
    /// defaults; a bad value is logged, never fatal.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = parse_or(&lookup, "BRIDGE_BIND_ADDR", || {
            SocketAddr::from(([127, 0, 0, 1], 8001))
        });
        let model_path = non_empty(&lookup, "BRIDGE_MODEL_PATH").map(PathBuf::from);
        let tokenizer_path = non_empty(&lookup, "BRIDGE_TOKENIZER_PATH").map(PathBuf::from);
        let model_name =
            non_empty(&lookup, "BRIDGE_MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());

        let timeout_secs = parse_or(&lookup, "BRIDGE_INFERENCE_TIMEOUT_SECS", || {
            DEFAULT_INFERENCE_TIMEOUT_SECS
        });
        let max_new_tokens = parse_or(&lookup, "BRIDGE_MAX_NEW_TOKENS", || DEFAULT_MAX_NEW_TOKENS);
        let ttl_secs = parse_or(&lookup, "BRIDGE_TOKEN_TTL_SECS", || DEFAULT_TOKEN_TTL_SECS);
        let retention_secs = parse_or(&lookup, "BRIDGE_TOKEN_RETENTION_SECS", || ttl_secs);
        let sweep_secs = parse_or(&lookup, "BRIDGE_TOKEN_SWEEP_SECS", || DEFAULT_TOKEN_SWEEP_SECS);

        Self {
            bind_addr,
            model_path,
            tokenizer_path,
            model_name,
            inference_timeout: Duration::from_secs(timeout_secs),
            max_new_tokens,
            token_ttl: secs(ttl_secs),
            token_retention: secs(retention_secs),
            token_sweep: Duration::from_secs(sweep_secs.max(1)),
        }
    }

    /// Both model files, when configured.
    pub fn model_files(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.model_path, &self.tokenizer_path) {
            (Some(model), Some(tokenizer)) => Some((model.clone(), tokenizer.clone())),
            _ => None,
        }
    }
}

fn secs(n: u64) -> SignedDuration {
    SignedDuration::from_secs(i64::try_from(n).unwrap_or(i64::MAX))
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: impl FnOnce() -> T) -> T {
    match non_empty(lookup, key) {
        None => default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "invalid configuration value, using default");
            default()
        }),
    }
}
