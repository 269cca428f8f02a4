use matcher::Candidate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LookupError;

/// Length of an Indian PIN code.
pub const PINCODE_LEN: usize = 6;

/// One entry of the lookup service's response array.
///
/// ```json
/// [{ "Message": "Number of pincode(s) found:2", "Status": "Success",
///    "PostOffice": [{ "Name": "Andheri", "District": "Mumbai", ... }] }]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PincodeResponse {
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "PostOffice", default)]
    pub post_offices: Option<Vec<Candidate>>,
}

impl PincodeResponse {
    pub fn is_error(&self) -> bool {
        self.status == "Error"
    }

    /// Post offices of a successful response.
    ///
    /// An `Error` status or a missing/null `PostOffice` becomes
    /// [`LookupError::NoRecords`]. An empty list is returned as-is.
    pub fn into_candidates(self, pincode: &str) -> Result<Vec<Candidate>, LookupError> {
        match self.post_offices {
            Some(offices) if !self.is_error() => Ok(offices),
            _ => Err(LookupError::NoRecords {
                pincode: pincode.to_string(),
                message: self.message,
            }),
        }
    }
}

/// Decode the raw lookup body, which is a JSON array with one element per PIN code.
pub fn parse_lookup_response(pincode: &str, body: Value) -> Result<Vec<Candidate>, LookupError> {
    let first = match body {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => {
            return Err(LookupError::NoRecords {
                pincode: pincode.to_string(),
                message: "empty response".into(),
            })
        }
        Value::Object(_) => body,
        other => {
            return Err(LookupError::Decode(format!(
                "expected a JSON array, got {other}"
            )))
        }
    };

    let response: PincodeResponse = serde_json::from_value(first)
        .map_err(|e| LookupError::Decode(format!("unexpected response shape: {e}")))?;
    response.into_candidates(pincode)
}

/// Trim and check that `pincode` is exactly six ASCII digits.
pub fn validate_pincode(pincode: &str) -> Result<&str, LookupError> {
    let trimmed = pincode.trim();
    if trimmed.len() != PINCODE_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LookupError::InvalidPincode(format!(
            "expected {PINCODE_LEN} digits, got {pincode:?}"
        )));
    }
    Ok(trimmed)
}
