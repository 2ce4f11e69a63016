//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use super::record_request;
use crate::{ApiError, AppState};

/// Identifier of every station
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    record_request("stations");
    let ids = state
        .repository
        .stations()
        .await?
        .into_iter()
        .map(|s| s.station)
        .collect();
    Ok(Json(ids))
}
