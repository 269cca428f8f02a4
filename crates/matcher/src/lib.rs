//! # Pinmatch Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides how well a user-supplied address agrees with the post
//! offices registered for a PIN code. It has no I/O: the caller supplies the
//! candidate records (usually fetched by the `pincode` crate) and the three
//! free-text address fragments, and gets back a confidence percentage and the
//! best candidate.
//!
//! ## Core Types
//!
//! - [`similarity`]: the string scorer. Two named rules,
//!   [`ScoreRule::TokenContainment`] and [`ScoreRule::EditDistance`], are
//!   exposed separately so each can be exercised on its own.
//! - [`Candidate`]: a post-office record; only its `name` is scored.
//! - [`QueryFields`]: `city`, `addressLineOne`, `addressLineTwo`.
//! - [`Selector`]: the sequential, field-prioritised scan with early exit on
//!   exact matches. [`RunningMaxPolicy`] selects how the running maximum is
//!   carried between candidates.
//! - [`MatchResult`] / [`AccuracyReport`]: the decision and its wire shape.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{select_best_match, AccuracyReport, Candidate, QueryFields};
//!
//! let offices = vec![Candidate::named("Andheri"), Candidate::named("Kurla")];
//! let fields = QueryFields::new("Andheri East", "12 Hill Road", "");
//!
//! let result = select_best_match(&offices, &fields).expect("non-empty candidates");
//! assert_eq!(result.accuracy.to_string(), "100");
//!
//! let report = AccuracyReport::from(result);
//! assert_eq!(report.names, vec!["Andheri", "Kurla"]);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! per-selection latency and comparison counts. Individual comparisons are
//! logged at `TRACE` level through `tracing`.

pub mod engine;
pub mod metrics;
pub mod similarity;
pub mod types;

pub use crate::engine::{distinct_names, select_best_match, Selector};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::similarity::{score, ScoreRule, Similarity};
pub use crate::types::{
    Accuracy, AccuracyReport, Candidate, MatchError, MatchResult, QueryField, QueryFields,
    RunningMaxPolicy, SelectorConfig,
};
