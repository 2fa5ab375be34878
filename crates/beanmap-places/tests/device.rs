//! Integration tests for `IpLocation` using wiremock HTTP mocks.

use std::time::Duration;

use beanmap_core::Coordinates;
use beanmap_places::{IpLocation, LocationError, LocationProvider};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_location(url: &str) -> IpLocation {
    IpLocation::new(url, "beanmap-test").expect("client construction should not fail")
}

#[tokio::test]
async fn successful_lookup_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "city": "Seattle",
            "lat": 47.6062,
            "lon": -122.3321
        })))
        .mount(&server)
        .await;

    let coords = test_location(&server.uri()).current_location().await;
    assert_eq!(coords, Ok(Coordinates::new(47.6062, -122.3321)));
}

#[tokio::test]
async fn forbidden_is_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = test_location(&server.uri()).current_location().await;
    assert_eq!(result, Err(LocationError::Denied));
}

#[tokio::test]
async fn unsuccessful_status_field_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let result = test_location(&server.uri()).current_location().await;
    assert_eq!(result, Err(LocationError::Failed("private range".to_string())));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "lat": 1.0, "lon": 1.0 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let result = test_location(&server.uri())
        .with_timeout(Duration::from_millis(100))
        .current_location()
        .await;
    assert_eq!(result, Err(LocationError::TimedOut));
}
