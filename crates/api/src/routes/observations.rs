//! Precipitation and Temperature Observation Routes

use axum::{extract::State, Json};
use climate_storage::DateReading;
use std::sync::Arc;

use super::record_request;
use crate::{ApiError, AppState};

/// Every date with its precipitation, one object per measurement
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DateReading>>, ApiError> {
    record_request("precipitation");
    let readings = state.repository.precipitation().await?;
    Ok(Json(readings))
}

/// Temperature observations from the start of the tobs window onwards
pub async fn get_tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DateReading>>, ApiError> {
    record_request("tobs");
    let readings = state
        .repository
        .measurements_since(&state.window.tobs_start)
        .await?
        .into_iter()
        .map(DateReading::from)
        .collect();
    Ok(Json(readings))
}
