//! End-to-end `Locator` tests: wiremock geocoder, seeded mock places, and
//! the view reducer.

use beanmap_core::{
    default_cafes, reduce, Coordinates, Notice, SortKey, Specialty, ViewState, DEFAULT_REFERENCE,
};
use beanmap_places::{FixedLocation, Geocoder, Locator, MockPlaces};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn locator(base_url: &str, seed: u64) -> Locator<MockPlaces, FixedLocation> {
    let geocoder = Geocoder::with_base_url(base_url, 5, "beanmap-test")
        .expect("geocoder construction should not fail");
    Locator::new(geocoder, MockPlaces::seeded(seed), FixedLocation(None))
}

#[tokio::test]
async fn text_search_centres_results_on_geocoded_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "47.6062", "lon": "-122.3321", "display_name": "Seattle" }
        ])))
        .mount(&server)
        .await;

    let outcome = locator(&server.uri(), 42).search_text("Seattle", 2.0).await;
    let seattle = Coordinates::new(47.6062, -122.3321);

    assert_eq!(outcome.reference, Some(seattle));
    assert_eq!(outcome.place_name.as_deref(), Some("Seattle"));
    assert!(outcome.notice.is_none());

    let state = reduce(ViewState::default(), outcome.into_action());
    let view = state.derived();
    assert!(view.distance_sort_available);
    // Mock results sit within ~0.02 degrees of the centre.
    assert!(state
        .cafes()
        .iter()
        .all(|c| c.distance_km().is_some_and(|d| d < 3.5)));
}

#[tokio::test]
async fn unmatched_query_falls_back_to_default_area() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let outcome = locator(&server.uri(), 1).search_text("Atlantis", 2.0).await;
    assert_eq!(outcome.cafes, default_cafes());
    assert_eq!(outcome.reference, Some(DEFAULT_REFERENCE));
    assert_eq!(
        outcome.notice,
        Some(Notice::LookupNotFound {
            query: "Atlantis".to_string()
        })
    );
}

#[tokio::test]
async fn fallback_results_flow_through_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let outcome = locator(&server.uri(), 1).search_text("Seattle", 2.0).await;
    assert!(matches!(outcome.notice, Some(Notice::LookupFailed { .. })));

    let state = reduce(ViewState::default(), outcome.into_action());
    let state = reduce(
        state,
        beanmap_core::Action::SpecialtyChanged(Some(Specialty::Coffee)),
    );
    let state = reduce(state, beanmap_core::Action::SortChanged(SortKey::Rating));
    let names: Vec<&str> = state.filtered().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Espresso Central", "The Roasted Bean"]);
}
