//! HTTP client tests against a local stand-in for the postal API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use pincode::{HttpPincodeClient, LookupError, PincodeConfig, PincodeLookup, RetryConfig};
use serde_json::json;

#[derive(Clone, Default)]
struct Upstream {
    hits: Arc<AtomicUsize>,
    /// Number of leading requests answered with 503.
    failures: usize,
}

async fn pincode_handler(
    State(upstream): State<Upstream>,
    Path(pincode): Path<String>,
) -> impl IntoResponse {
    let hit = upstream.hits.fetch_add(1, Ordering::SeqCst);
    if hit < upstream.failures {
        return (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response();
    }

    let body = match pincode.as_str() {
        "400069" => json!([{
            "Message": "Number of pincode(s) found:2",
            "Status": "Success",
            "PostOffice": [
                { "Name": "Andheri", "District": "Mumbai", "State": "Maharashtra" },
                { "Name": "Andheri East", "District": "Mumbai", "State": "Maharashtra" }
            ]
        }]),
        "400404" => return (StatusCode::NOT_FOUND, "gone").into_response(),
        "400500" => return (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => json!([{ "Message": "No records found", "Status": "Error", "PostOffice": null }]),
    };
    Json(body).into_response()
}

async fn spawn_upstream(upstream: Upstream) -> anyhow::Result<String> {
    let app = Router::new()
        .route("/pincode/{pincode}", get(pincode_handler))
        .with_state(upstream);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig::default()
        .with_max_retries(max_retries)
        .with_base_delay(Duration::from_millis(5))
        .with_max_delay(Duration::from_millis(20))
        .with_jitter(false)
}

async fn client_for(upstream: Upstream, retries: u32) -> anyhow::Result<HttpPincodeClient> {
    let base = spawn_upstream(upstream).await?;
    let cfg = PincodeConfig::default()
        .with_base_url(base)
        .with_retry(fast_retry(retries));
    Ok(HttpPincodeClient::new(cfg)?)
}

#[tokio::test]
async fn lookup_returns_post_offices() -> anyhow::Result<()> {
    let client = client_for(Upstream::default(), 0).await?;

    let offices = client.lookup("400069").await?;
    let names: Vec<&str> = offices.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Andheri", "Andheri East"]);
    assert_eq!(offices[0].details["State"], "Maharashtra");
    Ok(())
}

#[tokio::test]
async fn error_status_becomes_no_records() -> anyhow::Result<()> {
    let client = client_for(Upstream::default(), 0).await?;

    let err = client.lookup("999999").await.unwrap_err();
    assert!(matches!(err, LookupError::NoRecords { .. }));
    assert!(err.is_client_error());
    Ok(())
}

#[tokio::test]
async fn transient_failures_are_retried() -> anyhow::Result<()> {
    let upstream = Upstream {
        failures: 2,
        ..Default::default()
    };
    let hits = upstream.hits.clone();
    let client = client_for(upstream, 3).await?;

    let offices = client.lookup("400069").await?;
    assert_eq!(offices.len(), 2);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    Ok(())
}

#[tokio::test]
async fn retries_are_bounded() -> anyhow::Result<()> {
    let upstream = Upstream {
        failures: usize::MAX,
        ..Default::default()
    };
    let hits = upstream.hits.clone();
    let client = client_for(upstream, 2).await?;

    let err = client.lookup("400069").await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream { status: 503, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    Ok(())
}

#[tokio::test]
async fn permanent_http_errors_are_not_retried() -> anyhow::Result<()> {
    let upstream = Upstream::default();
    let hits = upstream.hits.clone();
    let client = client_for(upstream, 3).await?;

    let err = client.lookup("400404").await.unwrap_err();
    assert!(matches!(err, LookupError::Upstream { status: 404, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() -> anyhow::Result<()> {
    let client = client_for(Upstream::default(), 0).await?;

    let err = client.lookup("400500").await.unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() -> anyhow::Result<()> {
    // Bind then drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let cfg = PincodeConfig::default()
        .with_base_url(format!("http://{addr}"))
        .with_retry(fast_retry(1));
    let client = HttpPincodeClient::new(cfg)?;

    let err = client.lookup("400069").await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
    Ok(())
}
