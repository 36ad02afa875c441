use anyhow::{Context, Result};
use std::time::Duration;

pub(crate) const DEFAULT_API_URL: &str = "https://shinetools-banking-app--ahz7kybtxu.expo.app";

const ENV_API_URL: &str = "TXNVIEW_API_URL";
const ENV_TIMEOUT_SECS: &str = "TXNVIEW_TIMEOUT_SECS";
const ENV_RETRIES: &str = "TXNVIEW_RETRIES";
const ENV_RETRY_DELAY_MS: &str = "TXNVIEW_RETRY_DELAY_MS";
const ENV_LOG: &str = "TXNVIEW_LOG";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) api_url: String,
    /// Per-request timeout, applied to every attempt.
    pub(crate) timeout: Duration,
    /// Extra attempts after a network failure.
    pub(crate) retries: u32,
    pub(crate) retry_delay: Duration,
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout: Duration::from_secs(10),
            retries: 2,
            retry_delay: Duration::from_millis(500),
            log_filter: "info".into(),
        }
    }
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `TXNVIEW_*` keys.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &secs)?);
        }
        if let Some(retries) = lookup(ENV_RETRIES) {
            config.retries = parse_number(ENV_RETRIES, &retries)?;
        }
        if let Some(ms) = lookup(ENV_RETRY_DELAY_MS) {
            config.retry_delay = Duration::from_millis(parse_number(ENV_RETRY_DELAY_MS, &ms)?);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }
        Ok(config)
    }

    /// Consume `--api-url`, `--timeout` and `--retries` flags, returning the
    /// remaining arguments (program name included).
    pub(crate) fn apply_args(&mut self, args: &[String]) -> Result<Vec<String>> {
        let mut rest = Vec::with_capacity(args.len());
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--api-url" => {
                    let url = flag_value(&mut iter, arg)?;
                    self.api_url = url.trim_end_matches('/').to_string();
                }
                "--timeout" => {
                    let secs = flag_value(&mut iter, arg)?;
                    self.timeout = Duration::from_secs(parse_number(arg, secs)?);
                }
                "--retries" => {
                    let retries = flag_value(&mut iter, arg)?;
                    self.retries = parse_number(arg, retries)?;
                }
                _ => rest.push(arg.clone()),
            }
        }
        Ok(rest)
    }
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing value for {flag}"))
}

fn parse_number<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {name}: '{value}'"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
