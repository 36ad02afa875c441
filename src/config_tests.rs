#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::time::Duration;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ── from_lookup ───────────────────────────────────────────────

#[test]
fn test_defaults_without_env() {
    let config = Config::from_lookup(|_| None).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.retries, 2);
}

#[test]
fn test_env_overrides() {
    let config = Config::from_lookup(lookup_from(&[
        ("TXNVIEW_API_URL", "http://localhost:8081/"),
        ("TXNVIEW_TIMEOUT_SECS", "3"),
        ("TXNVIEW_RETRIES", "0"),
        ("TXNVIEW_RETRY_DELAY_MS", "50"),
        ("TXNVIEW_LOG", "txnview=debug"),
    ]))
    .unwrap();
    assert_eq!(config.api_url, "http://localhost:8081");
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.retries, 0);
    assert_eq!(config.retry_delay, Duration::from_millis(50));
    assert_eq!(config.log_filter, "txnview=debug");
}

#[test]
fn test_blank_url_keeps_default() {
    let config = Config::from_lookup(lookup_from(&[("TXNVIEW_API_URL", "  ")])).unwrap();
    assert_eq!(config.api_url, DEFAULT_API_URL);
}

#[test]
fn test_invalid_number_is_an_error() {
    let err = Config::from_lookup(lookup_from(&[("TXNVIEW_RETRIES", "lots")])).unwrap_err();
    assert!(err.to_string().contains("TXNVIEW_RETRIES"));
}

#[test]
fn test_negative_timeout_rejected() {
    assert!(Config::from_lookup(lookup_from(&[("TXNVIEW_TIMEOUT_SECS", "-1")])).is_err());
}

// ── apply_args ────────────────────────────────────────────────

#[test]
fn test_flags_are_consumed() {
    let mut config = Config::default();
    let rest = config
        .apply_args(&args(&[
            "txnview",
            "--api-url",
            "http://127.0.0.1:9000/",
            "list",
            "--retries",
            "5",
            "food",
            "--timeout",
            "1",
        ]))
        .unwrap();
    assert_eq!(rest, args(&["txnview", "list", "food"]));
    assert_eq!(config.api_url, "http://127.0.0.1:9000");
    assert_eq!(config.retries, 5);
    assert_eq!(config.timeout, Duration::from_secs(1));
}

#[test]
fn test_no_flags_passes_through() {
    let mut config = Config::default();
    let rest = config.apply_args(&args(&["txnview", "show", "3"])).unwrap();
    assert_eq!(rest, args(&["txnview", "show", "3"]));
    assert_eq!(config, Config::default());
}

#[test]
fn test_flag_missing_value() {
    let mut config = Config::default();
    let err = config.apply_args(&args(&["txnview", "--retries"])).unwrap_err();
    assert!(err.to_string().contains("--retries"));
}
