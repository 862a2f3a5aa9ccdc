use axum::{extract::State, Json};

use crate::error::GatewayResult;
use crate::models::ListResponse;
use crate::AppState;

/// List every object the store returns in a single call.
///
/// No pagination: buckets larger than the store's page size are truncated.
pub async fn list_files(State(state): State<AppState>) -> GatewayResult<Json<ListResponse>> {
    let files = state.store.list_objects().await.map_err(|e| {
        tracing::error!("Failed to list bucket {}: {}", state.locator.bucket(), e);
        e
    })?;

    tracing::info!("Listed {} objects", files.len());

    Ok(Json(ListResponse { files }))
}
