use crate::error::{ServerError, ServerResult};
use crate::middleware::RequestId;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use pinmatch::{verify_address, AccuracyReport, AddressRequest};
use std::sync::Arc;

/// Score an address against the post offices of its PIN code.
///
/// The accuracy is `"100"` when the city names a post office outright, and a
/// two-decimal percentage otherwise. `address` is the best matching post
/// office record as returned by the postal service and `names` lists every
/// distinct post-office name for the PIN code.
pub async fn calculate_accuracy(
    State(state): State<Arc<ServerState>>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<AddressRequest>, JsonRejection>,
) -> ServerResult<Json<AccuracyReport>> {
    let Json(request) = payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

    let report = verify_address(state.lookup.as_ref(), &request, &state.selector)
        .await
        .map_err(|err| {
            let request_id = request_id
                .as_ref()
                .map(|Extension(id)| id.0.as_str())
                .unwrap_or_default();
            tracing::warn!(
                request_id,
                pincode = %request.pincode,
                error = %err,
                "address verification failed"
            );
            ServerError::from(err)
        })?;

    Ok(Json(report))
}
