//! Temperature Range Routes
//!
//! Bounds are compared against stored dates as plain strings and are not
//! validated; a malformed bound just matches nothing.

use axum::{
    extract::{Path, State},
    Json,
};
use climate_storage::TemperatureSummary;
use std::sync::Arc;

use super::record_request;
use crate::{ApiError, AppState};

/// TMIN/TAVG/TMAX from `start` to the end of the date window
pub async fn get_temps_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    record_request("temps_from");
    let end = state.window.range_end.clone();
    summarize(&state, start, end).await
}

/// TMIN/TAVG/TMAX between `start` and `end`, inclusive
pub async fn get_temps_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    record_request("temps_between");
    summarize(&state, start, end).await
}

async fn summarize(
    state: &AppState,
    start: String,
    end: String,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let temps = state.repository.temperatures_between(&start, &end).await?;

    TemperatureSummary::compute(&temps)
        .map(Json)
        .ok_or(ApiError::NoObservations { start, end })
}
