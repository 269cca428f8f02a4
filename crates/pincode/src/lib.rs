//! Post-office lookup for Indian PIN codes.
//!
//! The [`PincodeLookup`] trait is the seam between the HTTP layer and the
//! matcher: it turns a six-digit PIN code into the list of post-office
//! [`Candidate`](matcher::Candidate)s registered for it.
//!
//! - [`HttpPincodeClient`] queries the public postal API
//!   (`GET {base_url}/pincode/{pincode}`) with a timeout and retries
//!   transient failures using exponential backoff with jitter.
//! - [`StaticLookup`] serves a fixed in-memory table.
//!
//! A response whose `Status` is `"Error"` or that carries no `PostOffice`
//! list becomes [`LookupError::NoRecords`]; callers typically report that to
//! the client as an invalid PIN code.

mod client;
mod config;
mod error;
mod retry;
mod serde_millis;
mod types;

pub use crate::client::{HttpPincodeClient, PincodeLookup, StaticLookup};
pub use crate::config::PincodeConfig;
pub use crate::error::LookupError;
pub use crate::retry::{execute_with_retry_async, RetryConfig, RetryResult};
pub use crate::types::{parse_lookup_response, validate_pincode, PincodeResponse, PINCODE_LEN};
