use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use bridge_server::config::{DEFAULT_MODEL_NAME, ServerConfig};
use jiff::SignedDuration;

fn config(pairs: &[(&str, &str)]) -> ServerConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_without_environment() {
    let c = config(&[]);
    assert_eq!(c.bind_addr.to_string(), "127.0.0.1:8001");
    assert_eq!(c.model_name, DEFAULT_MODEL_NAME);
    assert_eq!(c.inference_timeout, Duration::from_secs(60));
    assert_eq!(c.max_new_tokens, 256);
    assert_eq!(c.token_ttl, SignedDuration::from_mins(10));
    assert_eq!(c.token_retention, c.token_ttl);
    assert_eq!(c.token_sweep, Duration::from_secs(60));
    assert_eq!(c.model_files(), None);
}

#[test]
fn reads_overrides() {
    let c = config(&[
        ("BRIDGE_BIND_ADDR", "0.0.0.0:9000"),
        ("BRIDGE_MODEL_PATH", "/models/medgemma.gguf"),
        ("BRIDGE_TOKENIZER_PATH", "/models/tokenizer.json"),
        ("BRIDGE_INFERENCE_TIMEOUT_SECS", "15"),
        ("BRIDGE_TOKEN_TTL_SECS", "120"),
        ("BRIDGE_TOKEN_RETENTION_SECS", "3600"),
    ]);
    assert_eq!(c.bind_addr.port(), 9000);
    assert_eq!(c.inference_timeout, Duration::from_secs(15));
    assert_eq!(c.token_ttl, SignedDuration::from_secs(120));
    assert_eq!(c.token_retention, SignedDuration::from_hours(1));
    assert_eq!(
        c.model_files(),
        Some((
            PathBuf::from("/models/medgemma.gguf"),
            PathBuf::from("/models/tokenizer.json")
        ))
    );
}

#[test]
fn invalid_numbers_fall_back_to_defaults() {
    let c = config(&[
        ("BRIDGE_MAX_NEW_TOKENS", "lots"),
        ("BRIDGE_TOKEN_SWEEP_SECS", "-5"),
        ("BRIDGE_MODEL_NAME", "   "),
    ]);
    assert_eq!(c.max_new_tokens, 256);
    assert_eq!(c.token_sweep, Duration::from_secs(60));
    assert_eq!(c.model_name, DEFAULT_MODEL_NAME);
}

#[test]
fn model_path_without_tokenizer_is_not_loadable() {
    let c = config(&[("BRIDGE_MODEL_PATH", "/models/medgemma.gguf")]);
    assert_eq!(c.model_path, Some(PathBuf::from("/models/medgemma.gguf")));
    assert_eq!(c.model_files(), None);
}

#[test]
fn retention_follows_ttl_unless_set() {
    let c = config(&[("BRIDGE_TOKEN_TTL_SECS", "90")]);
    assert_eq!(c.token_retention, SignedDuration::from_secs(90));
}
