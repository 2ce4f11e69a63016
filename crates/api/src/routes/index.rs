//! Route listing

use axum::response::Html;

use super::record_request;

/// HTML fragment naming every data route
pub const ROUTE_LISTING: &str = concat!(
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/>",
    "/api/v1.0/&lt;start&gt;<br/>",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
);

/// List all available api routes
pub async fn list_routes() -> Html<&'static str> {
    record_request("index");
    Html(ROUTE_LISTING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_names_each_route_once() {
        let routes: Vec<_> = ROUTE_LISTING
            .trim_start_matches("Available Routes:<br/>")
            .split("<br/>")
            .collect();
        assert_eq!(
            routes,
            vec![
                "/api/v1.0/precipitation",
                "/api/v1.0/stations",
                "/api/v1.0/tobs",
                "/api/v1.0/&lt;start&gt;",
                "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
            ]
        );
    }
}
