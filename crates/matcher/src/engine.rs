use std::collections::HashSet;
use std::time::Instant;

use crate::metrics::metrics_recorder;
use crate::similarity;
use crate::types::{
    Accuracy, Candidate, MatchError, MatchResult, QueryField, QueryFields, RunningMaxPolicy,
    SelectorConfig,
};


/// Picks the post office that best matches a set of address fragments.
///
/// The scan is sequential and field-prioritised rather than a symmetric
/// search over all pairs. For each candidate in input order:
///
/// 1. `city` is scored; a perfect score returns [`Accuracy::Exact`] at once.
/// 2. The city score seeds the running maximum according to
///    [`RunningMaxPolicy`].
/// 3. `addressLineOne` is scored; a perfect score returns `Percent(1.0)` at
///    once, otherwise a strictly greater score is adopted.
/// 4. `addressLineTwo` is scored and adopted when strictly greater. It never
///    ends the scan early.
///
/// The candidate name is always the reference side of the comparison.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    config: SelectorConfig,
}

#[derive(Debug, Clone, Copy)]
struct Leader<'a> {
    score: f64,
    candidate: &'a Candidate,
    field: QueryField,
}

impl Selector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select the best candidate for `fields`.
    ///
    /// Returns [`MatchError::EmptyCandidateSet`] when `candidates` is empty.
    pub fn select(
        &self,
        candidates: &[Candidate],
        fields: &QueryFields,
    ) -> Result<MatchResult, MatchError> {
        let start = Instant::now();
        let outcome = self.scan(candidates, fields);

        if let Some(metrics) = metrics_recorder() {
            let (comparisons, result) = match &outcome {
                Ok(found) => (found.comparisons, Ok(())),
                Err(err) => (0, Err(err.clone())),
            };
            metrics.record_selection(
                self.config.policy,
                start.elapsed(),
                candidates.len(),
                comparisons,
                result,
            );
        }

        outcome
    }

    fn scan(
        &self,
        candidates: &[Candidate],
        fields: &QueryFields,
    ) -> Result<MatchResult, MatchError> {
        let names = distinct_names(candidates);
        if candidates.is_empty() {
            return Err(MatchError::EmptyCandidateSet);
        }

        let mut leader: Option<Leader<'_>> = None;
        let mut comparisons = 0usize;

        for candidate in candidates {
            let city = similarity::score(&candidate.name, &fields.city);
            comparisons += 1;
            if city == 1.0 {
                tracing::debug!(name = %candidate.name, comparisons, "exact city match");
                return Ok(MatchResult {
                    accuracy: Accuracy::Exact,
                    best_candidate: candidate.clone(),
                    matched_field: QueryField::City,
                    distinct_names: names,
                    comparisons,
                });
            }

            let seeded = Leader {
                score: city,
                candidate,
                field: QueryField::City,
            };
            match self.config.policy {
                RunningMaxPolicy::CityBaseline => leader = Some(seeded),
                RunningMaxPolicy::GlobalMaximum => adopt_if_greater(&mut leader, seeded),
            }

            let line_one = similarity::score(&candidate.name, &fields.address_line_one);
            comparisons += 1;
            if line_one == 1.0 {
                tracing::debug!(name = %candidate.name, comparisons, "exact address line one match");
                return Ok(MatchResult {
                    accuracy: Accuracy::Percent(line_one),
                    best_candidate: candidate.clone(),
                    matched_field: QueryField::AddressLineOne,
                    distinct_names: names,
                    comparisons,
                });
            }
            adopt_if_greater(
                &mut leader,
                Leader {
                    score: line_one,
                    candidate,
                    field: QueryField::AddressLineOne,
                },
            );

            let line_two = similarity::score(&candidate.name, &fields.address_line_two);
            comparisons += 1;
            adopt_if_greater(
                &mut leader,
                Leader {
                    score: line_two,
                    candidate,
                    field: QueryField::AddressLineTwo,
                },
            );
        }

        let leader = leader.ok_or(MatchError::EmptyCandidateSet)?;
        tracing::debug!(
            name = %leader.candidate.name,
            field = %leader.field,
            score = leader.score,
            comparisons,
            "best match after full scan"
        );

        Ok(MatchResult {
            accuracy: Accuracy::Percent(leader.score),
            best_candidate: leader.candidate.clone(),
            matched_field: leader.field,
            distinct_names: names,
            comparisons,
        })
    }
}

fn adopt_if_greater<'a>(leader: &mut Option<Leader<'a>>, next: Leader<'a>) {
    if leader.map_or(true, |current| next.score > current.score) {
        *leader = Some(next);
    }
}

/// Candidate names in order of first appearance, exact duplicates removed.
pub fn distinct_names(candidates: &[Candidate]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .iter()
        .filter(|candidate| seen.insert(candidate.name.as_str()))
        .map(|candidate| candidate.name.clone())
        .collect()
}

/// Select with the default [`SelectorConfig`].
pub fn select_best_match(
    candidates: &[Candidate],
    fields: &QueryFields,
) -> Result<MatchResult, MatchError> {
    Selector::default().select(candidates, fields)
}
