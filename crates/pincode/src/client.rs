use async_trait::async_trait;
use matcher::Candidate;
use serde_json::Value;
use std::collections::HashMap;

use crate::retry::execute_with_retry_async;
use crate::types::{parse_lookup_response, validate_pincode};
use crate::{LookupError, PincodeConfig};

/// Source of post-office records for a PIN code.
#[async_trait]
pub trait PincodeLookup: Send + Sync {
    /// Post offices registered under `pincode`, in service order.
    async fn lookup(&self, pincode: &str) -> Result<Vec<Candidate>, LookupError>;
}

/// Lookup backed by the public postal PIN code HTTP API.
#[derive(Debug, Clone)]
pub struct HttpPincodeClient {
    http: reqwest::Client,
    config: PincodeConfig,
}

impl HttpPincodeClient {
    pub fn new(config: PincodeConfig) -> Result<Self, LookupError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| LookupError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PincodeConfig {
        &self.config
    }

    async fn fetch(&self, url: &str) -> Result<Value, LookupError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LookupError::Decode(format!("invalid JSON: {e}")))
    }
}

#[async_trait]
impl PincodeLookup for HttpPincodeClient {
    async fn lookup(&self, pincode: &str) -> Result<Vec<Candidate>, LookupError> {
        let pincode = validate_pincode(pincode)?;
        let url = self.config.lookup_url(pincode);

        let outcome = execute_with_retry_async(
            &self.config.retry,
            LookupError::is_retryable,
            |_attempt| self.fetch(&url),
        )
        .await;

        let attempts = outcome.attempts;
        let elapsed_ms = outcome.total_duration.as_millis() as u64;
        let body = match outcome.into_result() {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(pincode, attempts, elapsed_ms, error = %err, "pincode lookup failed");
                return Err(err);
            }
        };

        let offices = parse_lookup_response(pincode, body)?;
        tracing::debug!(pincode, attempts, elapsed_ms, offices = offices.len(), "pincode lookup");
        Ok(offices)
    }
}

/// Fixed in-memory lookup table.
///
/// Unknown PIN codes answer [`LookupError::NoRecords`], matching what the HTTP
/// service reports.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    records: HashMap<String, Vec<Candidate>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        mut self,
        pincode: impl Into<String>,
        offices: impl IntoIterator<Item = Candidate>,
    ) -> Self {
        self.records
            .insert(pincode.into(), offices.into_iter().collect());
        self
    }
}

#[async_trait]
impl PincodeLookup for StaticLookup {
    async fn lookup(&self, pincode: &str) -> Result<Vec<Candidate>, LookupError> {
        let pincode = validate_pincode(pincode)?;
        self.records
            .get(pincode)
            .cloned()
            .ok_or_else(|| LookupError::NoRecords {
                pincode: pincode.to_string(),
                message: "No records found".into(),
            })
    }
}
