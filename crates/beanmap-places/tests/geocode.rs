//! Integration tests for `Geocoder` using wiremock HTTP mocks.

use beanmap_core::Coordinates;
use beanmap_places::{GeocodeOutcome, Geocoder, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_geocoder(base_url: &str) -> Geocoder {
    Geocoder::with_base_url(base_url, 5, "beanmap-test")
        .expect("geocoder construction should not fail")
}

#[tokio::test]
async fn lookup_returns_first_match() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "place_id": 1,
            "lat": "47.6038321",
            "lon": "-122.330062",
            "display_name": "Seattle, King County, Washington, United States"
        },
        {
            "place_id": 2,
            "lat": "0",
            "lon": "0",
            "display_name": "Somewhere else"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Seattle"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let outcome = test_geocoder(&server.uri())
        .lookup("Seattle")
        .await
        .expect("lookup should succeed");

    let GeocodeOutcome::Found(place) = outcome else {
        panic!("expected a match, got {outcome:?}");
    };
    assert_eq!(place.coordinates, Coordinates::new(47.603_832_1, -122.330_062));
    assert_eq!(
        place.display_name,
        "Seattle, King County, Washington, United States"
    );
}

#[tokio::test]
async fn empty_array_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let outcome = test_geocoder(&server.uri())
        .lookup("Atlantis")
        .await
        .expect("lookup should succeed");
    assert_eq!(outcome, GeocodeOutcome::NotFound);
}

#[tokio::test]
async fn server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_geocoder(&server.uri())
        .lookup("Seattle")
        .await
        .expect_err("500 should be an error");
    assert!(
        matches!(err, PlacesError::UnexpectedStatus { status: 500, .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = test_geocoder(&server.uri())
        .lookup("Seattle")
        .await
        .expect_err("HTML should not parse");
    assert!(matches!(err, PlacesError::Deserialize { .. }), "{err:?}");
}

#[tokio::test]
async fn transient_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "40.7", "lon": "-74.0", "display_name": "New York" }
        ])))
        .with_priority(2)
        .mount(&server)
        .await;

    let outcome = test_geocoder(&server.uri())
        .with_max_retries(1)
        .lookup("New York")
        .await
        .expect("second attempt should succeed");
    assert!(matches!(outcome, GeocodeOutcome::Found(_)));
}
