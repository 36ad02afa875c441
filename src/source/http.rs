use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SourceError, TransactionSource};
use crate::config::Config;
use crate::models::{Transaction, TransactionDetail, TransactionId};

/// Every response body is wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Serialize)]
struct InternalPatch {
    internal: bool,
}

pub(crate) struct HttpSource {
    client: Client,
    base_url: String,
    retries: u32,
    retry_delay: Duration,
}

impl HttpSource {
    pub(crate) fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("txnview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            retries: config.retries,
            retry_delay: config.retry_delay,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/transactions{path}", self.base_url)
    }

    /// Runs `attempt` until it succeeds, fails with a non-retryable error, or
    /// the retry budget is spent.
    fn with_retry<T>(
        &self,
        what: &str,
        mut attempt: impl FnMut() -> Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        let mut tries = 0;
        loop {
            match attempt() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && tries < self.retries => {
                    tries += 1;
                    warn!(%what, attempt = tries, error = %e, "retrying request");
                    thread::sleep(self.retry_delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.url(path);
        self.with_retry(&url, || {
            debug!(%url, "GET");
            let response = self.client.get(&url).send().map_err(transport_error)?;
            let body = check_status(response, &url)?
                .text()
                .map_err(transport_error)?;
            decode_data(&body)
        })
    }
}

impl TransactionSource for HttpSource {
    fn list(&self) -> Result<Vec<Transaction>, SourceError> {
        self.get_data("")
    }

    fn detail(&self, id: TransactionId) -> Result<TransactionDetail, SourceError> {
        self.get_data(&format!("/{id}"))
    }

    fn set_internal(&self, id: TransactionId, internal: bool) -> Result<(), SourceError> {
        let url = self.url(&format!("/{id}"));
        self.with_retry(&url, || {
            debug!(%url, internal, "PATCH");
            let response = self
                .client
                .patch(&url)
                .json(&InternalPatch { internal })
                .send()
                .map_err(transport_error)?;
            check_status(response, &url).map(|_| ())
        })
    }
}

fn transport_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Network(format!("request timed out: {e}"))
    } else if e.is_decode() {
        SourceError::Malformed(e.to_string())
    } else {
        SourceError::Network(e.to_string())
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(url.to_string()));
    }
    Err(SourceError::Network(format!("{url} returned {status}")))
}

fn decode_data<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| SourceError::Malformed(e.to_string()))
}
