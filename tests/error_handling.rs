use pinmatch::{
    score_candidates, verify_address, AddressRequest, Candidate, LookupError, MatchError,
    PipelineError, SelectorConfig, StaticLookup,
};
use std::error::Error;

fn lookup() -> StaticLookup {
    StaticLookup::new()
        .with_records("400069", [Candidate::named("Andheri")])
        .with_records("400001", Vec::<Candidate>::new())
}

#[tokio::test]
async fn malformed_pincode_is_rejected_before_lookup() {
    let request = AddressRequest::new("40-069", "Mumbai", "", "");

    let err = verify_address(&lookup(), &request, &SelectorConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Lookup(LookupError::InvalidPincode(_))
    ));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn unknown_pincode_has_no_records() {
    let request = AddressRequest::new("999999", "Mumbai", "", "");

    let err = verify_address(&lookup(), &request, &SelectorConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Lookup(LookupError::NoRecords { .. })
    ));
    assert!(err.is_client_error());
    assert!(err.to_string().contains("999999"));
}

#[tokio::test]
async fn empty_office_list_is_an_empty_candidate_set() {
    let request = AddressRequest::new("400001", "Mumbai", "", "");

    let err = verify_address(&lookup(), &request, &SelectorConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err, PipelineError::Match(MatchError::EmptyCandidateSet));
    assert!(err.is_client_error());
}

#[test]
fn score_candidates_rejects_empty_input() {
    let request = AddressRequest::new("400069", "Mumbai", "", "");
    let err = score_candidates(&[], &request, &SelectorConfig::default()).unwrap_err();
    assert_eq!(err, PipelineError::Match(MatchError::EmptyCandidateSet));
}

#[test]
fn transport_failures_are_not_client_errors() {
    let err = PipelineError::from(LookupError::Transport("connection refused".into()));
    assert!(!err.is_client_error());
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("pincode lookup failure"));
}
