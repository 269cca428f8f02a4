//! Workspace umbrella crate for Pinmatch.
//!
//! This crate stitches together the PIN code lookup and the address matcher
//! so callers can score an address with a single API entry point:
//!
//! ```no_run
//! use pinmatch::{verify_address, AddressRequest, HttpPincodeClient, PincodeConfig, SelectorConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let lookup = HttpPincodeClient::new(PincodeConfig::default())?;
//! let request = AddressRequest::new("400069", "Mumbai", "12 Hill Road", "Andheri East");
//! let report = verify_address(&lookup, &request, &SelectorConfig::default()).await?;
//! println!("{} -> {:?}", report.accuracy, report.address);
//! # Ok(())
//! # }
//! ```

pub use matcher::{
    distinct_names, score, select_best_match, set_match_metrics, Accuracy, AccuracyReport,
    Candidate, MatchError, MatchMetrics, MatchResult, QueryField, QueryFields, RunningMaxPolicy,
    ScoreRule, Selector, SelectorConfig, Similarity,
};
pub use pincode::{
    validate_pincode, HttpPincodeClient, LookupError, PincodeConfig, PincodeLookup, RetryConfig,
    StaticLookup,
};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// An address to verify against the post offices of its PIN code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub pincode: String,
    pub city: String,
    pub address_line_one: String,
    pub address_line_two: String,
}

impl AddressRequest {
    pub fn new(
        pincode: impl Into<String>,
        city: impl Into<String>,
        address_line_one: impl Into<String>,
        address_line_two: impl Into<String>,
    ) -> Self {
        Self {
            pincode: pincode.into(),
            city: city.into(),
            address_line_one: address_line_one.into(),
            address_line_two: address_line_two.into(),
        }
    }

    /// The free-text fragments compared against post-office names.
    pub fn fields(&self) -> QueryFields {
        QueryFields::new(
            self.city.as_str(),
            self.address_line_one.as_str(),
            self.address_line_two.as_str(),
        )
    }
}

/// Errors that can occur while verifying an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Lookup(LookupError),
    Match(MatchError),
}

impl PipelineError {
    /// True when the request itself is at fault (bad or unknown PIN code,
    /// nothing to match against) rather than the lookup service.
    pub fn is_client_error(&self) -> bool {
        match self {
            PipelineError::Lookup(err) => err.is_client_error(),
            PipelineError::Match(_) => true,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Lookup(err) => write!(f, "pincode lookup failure: {err}"),
            PipelineError::Match(err) => write!(f, "address matching failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Lookup(err) => Some(err),
            PipelineError::Match(err) => Some(err),
        }
    }
}

impl From<LookupError> for PipelineError {
    fn from(value: LookupError) -> Self {
        PipelineError::Lookup(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_lookup(&self, latency: Duration, result: Result<usize, LookupError>);
    fn record_match(&self, latency: Duration, result: Result<Accuracy, MatchError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_lookup(self, result: Result<usize, LookupError>) {
        self.recorder.record_lookup(self.start.elapsed(), result);
    }

    fn record_match(self, result: Result<Accuracy, MatchError>) {
        self.recorder.record_match(self.start.elapsed(), result);
    }
}

/// Score a set of already fetched post offices against the request fields.
pub fn score_candidates(
    candidates: &[Candidate],
    request: &AddressRequest,
    selector_cfg: &SelectorConfig,
) -> Result<MatchResult, PipelineError> {
    let span = MetricsSpan::start();
    let outcome = Selector::new(*selector_cfg).select(candidates, &request.fields());
    if let Some(span) = span {
        span.record_match(
            outcome
                .as_ref()
                .map(|found| found.accuracy)
                .map_err(Clone::clone),
        );
    }
    Ok(outcome?)
}

/// Look up the post offices for `request.pincode` and pick the best match.
pub async fn verify_address<L>(
    lookup: &L,
    request: &AddressRequest,
    selector_cfg: &SelectorConfig,
) -> Result<AccuracyReport, PipelineError>
where
    L: PincodeLookup + ?Sized,
{
    let pincode = validate_pincode(&request.pincode)?;

    let span = MetricsSpan::start();
    let lookup_result = lookup.lookup(pincode).await;
    if let Some(span) = span {
        span.record_lookup(
            lookup_result
                .as_ref()
                .map(Vec::len)
                .map_err(Clone::clone),
        );
    }
    let candidates = lookup_result?;

    let result = score_candidates(&candidates, request, selector_cfg)?;
    tracing::info!(
        pincode,
        offices = candidates.len(),
        accuracy = %result.accuracy,
        best = %result.best_candidate.name,
        field = %result.matched_field,
        "address verified"
    );

    Ok(AccuracyReport::from(result))
}
