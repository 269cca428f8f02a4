use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use thiserror::Error;

/// A post-office record that an address may be matched against.
///
/// Only `name` takes part in scoring. Every other attribute of the upstream
/// record is kept in `details` and echoed back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Post-office / locality name.
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    /// Remaining upstream attributes (`BranchType`, `District`, `State`, ...).
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}

impl Candidate {
    /// Candidate with a name and no extra attributes.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: Map::new(),
        }
    }
}

/// The address fragments a user submitted, compared in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryFields {
    pub city: String,
    pub address_line_one: String,
    pub address_line_two: String,
}

impl QueryFields {
    pub fn new(
        city: impl Into<String>,
        address_line_one: impl Into<String>,
        address_line_two: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            address_line_one: address_line_one.into(),
            address_line_two: address_line_two.into(),
        }
    }

    /// The text of a single field.
    pub fn get(&self, field: QueryField) -> &str {
        match field {
            QueryField::City => &self.city,
            QueryField::AddressLineOne => &self.address_line_one,
            QueryField::AddressLineTwo => &self.address_line_two,
        }
    }
}

/// Identifies one of the three [`QueryFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryField {
    City,
    AddressLineOne,
    AddressLineTwo,
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryField::City => "city",
            QueryField::AddressLineOne => "addressLineOne",
            QueryField::AddressLineTwo => "addressLineTwo",
        };
        f.write_str(name)
    }
}

/// How the running maximum is carried from one candidate to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningMaxPolicy {
    /// Every candidate's city score replaces the running maximum before its
    /// address lines are compared, even when it is lower than the best so far.
    /// This is the behaviour existing clients observe.
    #[default]
    CityBaseline,
    /// The city score is adopted only when it beats the running maximum, so
    /// the result is the best score over every comparison made.
    GlobalMaximum,
}

/// Selector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub policy: RunningMaxPolicy,
}

impl SelectorConfig {
    pub fn with_policy(mut self, policy: RunningMaxPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Match confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Accuracy {
    /// The city matched exactly. Rendered as the literal `"100"`.
    Exact,
    /// A similarity in `[0, 1]`, rendered as a percentage with two decimals.
    Percent(f64),
}

impl Accuracy {
    /// Similarity as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        match self {
            Accuracy::Exact => 1.0,
            Accuracy::Percent(value) => *value,
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Exact => f.write_str("100"),
            Accuracy::Percent(value) => f.write_str(&percent_two_decimals(*value)),
        }
    }
}

/// `value * 100` with two decimals, exact halves rounded up.
///
/// `{:.2}` rounds an exact half to even. A double lands exactly on a half
/// cent only when it is an odd multiple of 1/8, so those are rounded here.
fn percent_two_decimals(value: f64) -> String {
    let scaled = value * 100.0;
    let eighths = scaled * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        let cents = (scaled * 100.0).round();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{scaled:.2}")
}

/// Outcome of a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub accuracy: Accuracy,
    pub best_candidate: Candidate,
    /// Field whose comparison produced `accuracy`.
    pub matched_field: QueryField,
    /// Candidate names in order of first appearance, duplicates removed.
    pub distinct_names: Vec<String>,
    /// Number of similarity comparisons performed before returning.
    pub comparisons: usize,
}

/// Client-facing response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub accuracy: String,
    pub address: Option<Candidate>,
    pub names: Vec<String>,
}

impl From<MatchResult> for AccuracyReport {
    fn from(result: MatchResult) -> Self {
        Self {
            accuracy: result.accuracy.to_string(),
            address: Some(result.best_candidate),
            names: result.distinct_names,
        }
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// No candidate records were supplied.
    #[error("no candidate records to match against")]
    EmptyCandidateSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_accuracy_renders_unformatted() {
        assert_eq!(Accuracy::Exact.to_string(), "100");
        assert_eq!(Accuracy::Exact.fraction(), 1.0);
    }

    #[test]
    fn percent_accuracy_renders_two_decimals() {
        assert_eq!(Accuracy::Percent(1.0).to_string(), "100.00");
        assert_eq!(Accuracy::Percent(0.0).to_string(), "0.00");
        assert_eq!(Accuracy::Percent(0.75).to_string(), "75.00");
        assert_eq!(Accuracy::Percent(1.0 - 5.0 / 7.0).to_string(), "28.57");
    }

    #[test]
    fn percent_accuracy_rounds_exact_halves_up() {
        assert_eq!(Accuracy::Percent(1.0 / 32.0).to_string(), "3.13");
        assert_eq!(Accuracy::Percent(9.0 / 32.0).to_string(), "28.13");
        assert_eq!(Accuracy::Percent(1.0 - 3.0 / 32.0).to_string(), "90.63");
        assert_eq!(Accuracy::Percent(1.0 - 1.0 / 160.0).to_string(), "99.38");
        assert_eq!(Accuracy::Percent(0.00125).to_string(), "0.13");
    }

    #[test]
    fn percent_accuracy_near_a_half_follows_the_binary_value() {
        // 0.99995 * 100 is slightly above 99.995, 0.00015 * 100 slightly below 0.015.
        assert_eq!(Accuracy::Percent(0.99995).to_string(), "100.00");
        assert_eq!(Accuracy::Percent(0.99994999).to_string(), "99.99");
        assert_eq!(Accuracy::Percent(0.00015).to_string(), "0.01");
        assert_eq!(Accuracy::Percent(0.00005).to_string(), "0.01");
    }

    #[test]
    fn candidate_keeps_upstream_attributes() {
        let raw = json!({
            "Name": "Andheri",
            "BranchType": "Sub Post Office",
            "District": "Mumbai",
        });
        let candidate: Candidate = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(candidate.name, "Andheri");
        assert_eq!(candidate.details.len(), 2);
        assert_eq!(serde_json::to_value(&candidate).unwrap(), raw);
    }

    #[test]
    fn candidate_accepts_lowercase_name() {
        let candidate: Candidate = serde_json::from_value(json!({ "name": "Powai" })).unwrap();
        assert_eq!(candidate, Candidate::named("Powai"));
    }

    #[test]
    fn query_fields_use_camel_case() {
        let fields: QueryFields = serde_json::from_value(json!({
            "city": "Mumbai",
            "addressLineOne": "12 Hill Road",
            "addressLineTwo": "Bandra West",
        }))
        .unwrap();
        assert_eq!(fields.get(QueryField::City), "Mumbai");
        assert_eq!(fields.get(QueryField::AddressLineOne), "12 Hill Road");
        assert_eq!(fields.get(QueryField::AddressLineTwo), "Bandra West");
    }

    #[test]
    fn policy_defaults_to_city_baseline() {
        assert_eq!(SelectorConfig::default().policy, RunningMaxPolicy::CityBaseline);
        let cfg: SelectorConfig = serde_json::from_value(json!({ "policy": "global_maximum" })).unwrap();
        assert_eq!(cfg.policy, RunningMaxPolicy::GlobalMaximum);
    }

    #[test]
    fn report_from_result() {
        let result = MatchResult {
            accuracy: Accuracy::Exact,
            best_candidate: Candidate::named("Andheri"),
            matched_field: QueryField::City,
            distinct_names: vec!["Andheri".into()],
            comparisons: 1,
        };
        let report = AccuracyReport::from(result);
        assert_eq!(report.accuracy, "100");
        assert_eq!(report.address, Some(Candidate::named("Andheri")));
        assert_eq!(report.names, vec!["Andheri".to_string()]);
    }
}
