//! Route handlers

pub mod index;
pub mod observations;
pub mod stations;
pub mod temps;

/// Count a request against its route
fn record_request(route: &'static str) {
    metrics::counter!("climate_api_requests_total", "route" => route).increment(1);
}
