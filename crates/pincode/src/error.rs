use thiserror::Error;

/// Errors surfaced by a [`PincodeLookup`](crate::PincodeLookup).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The PIN code is not six ASCII digits.
    #[error("invalid PIN code: {0}")]
    InvalidPincode(String),
    /// The lookup service knows no post office for this PIN code.
    #[error("no post office records for PIN code {pincode}: {message}")]
    NoRecords { pincode: String, message: String },
    /// The request never produced an HTTP response (connect, timeout, TLS...).
    #[error("lookup request failed: {0}")]
    Transport(String),
    /// The lookup service answered with a non-success status.
    #[error("lookup service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The response body did not have the expected shape.
    #[error("invalid lookup response: {0}")]
    Decode(String),
    /// Client configuration is unusable.
    #[error("invalid lookup config: {0}")]
    InvalidConfig(String),
}

impl LookupError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures, `408`, `429` and `5xx` are transient; everything
    /// else is answered the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            LookupError::Transport(_) => true,
            LookupError::Upstream { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            LookupError::InvalidPincode(_)
            | LookupError::NoRecords { .. }
            | LookupError::Decode(_)
            | LookupError::InvalidConfig(_) => false,
        }
    }

    /// True when the failure is about the PIN code itself rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidPincode(_) | LookupError::NoRecords { .. }
        )
    }
}
