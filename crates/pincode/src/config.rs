use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::RetryConfig;
use crate::LookupError;

/// Runtime configuration for [`HttpPincodeClient`](crate::HttpPincodeClient).
///
/// # Example
/// ```no_run
/// use pincode::{HttpPincodeClient, PincodeConfig};
///
/// let cfg = PincodeConfig {
///     base_url: "http://localhost:9000".into(),
///     ..Default::default()
/// };
/// let client = HttpPincodeClient::new(cfg).expect("valid config");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PincodeConfig {
    /// Service root; requests go to `{base_url}/pincode/{pincode}`.
    pub base_url: String,
    /// Overall per-attempt timeout.
    #[serde(with = "crate::serde_millis")]
    pub timeout: Duration,
    /// TCP connect timeout.
    #[serde(with = "crate::serde_millis")]
    pub connect_timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl Default for PincodeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.postalpincode.in".into(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            retry: RetryConfig::default(),
        }
    }
}

impl PincodeConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), LookupError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(LookupError::InvalidConfig(
                "base_url must not be empty".into(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(LookupError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got {base:?}"
            )));
        }
        if self.timeout.is_zero() {
            return Err(LookupError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// URL queried for `pincode`.
    pub fn lookup_url(&self, pincode: &str) -> String {
        format!("{}/pincode/{pincode}", self.base_url.trim().trim_end_matches('/'))
    }
}
