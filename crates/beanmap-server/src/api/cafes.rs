use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use beanmap_core::{reduce, Action, Coordinates, ResultView, SortKey, Specialty, ViewState};
use beanmap_places::SearchOutcome;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct CafesQuery {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub near: bool,
    pub radius_km: Option<f64>,
    pub specialty: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct CafesData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(flatten)]
    pub view: ResultView,
}

/// Where to search, after validation.
#[derive(Debug, PartialEq)]
enum Source {
    Text(String),
    Around(Coordinates),
    NearDevice,
    DefaultArea,
}

#[derive(Debug)]
struct ViewParams {
    source: Source,
    radius_km: f64,
    specialty: Option<Specialty>,
    sort: SortKey,
    page: usize,
}

fn validate(query: CafesQuery, default_radius_km: f64) -> Result<ViewParams, String> {
    let text = query
        .q
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    let coordinates = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => {
            let coords = Coordinates::new(lat, lng);
            if !coords.is_valid() {
                return Err(format!("coordinates ({coords}) are out of range"));
            }
            Some(coords)
        }
        (None, None) => None,
        _ => return Err("lat and lng must be given together".to_string()),
    };

    let source = match (text, coordinates, query.near) {
        (Some(q), None, false) => Source::Text(q),
        (None, Some(c), false) => Source::Around(c),
        (None, None, true) => Source::NearDevice,
        (None, None, false) => Source::DefaultArea,
        _ => return Err("use only one of q, lat/lng, or near".to_string()),
    };

    let radius_km = match query.radius_km {
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(r) => return Err(format!("radius_km must be positive, got {r}")),
        None => default_radius_km,
    };

    let specialty = match query.specialty.as_deref() {
        Some(raw) => Specialty::parse_filter(raw).map_err(|e| e.to_string())?,
        None => None,
    };
    let sort = match query.sort.as_deref() {
        Some(raw) => raw.parse::<SortKey>().map_err(|e| e.to_string())?,
        None => SortKey::default(),
    };

    Ok(ViewParams {
        source,
        radius_km,
        specialty,
        sort,
        page: query.page.unwrap_or(1),
    })
}

pub(super) async fn list_cafes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<CafesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CafesData>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(req_id.0.clone(), e.body_text()))?;
    let params = validate(query, state.default_radius_km)
        .map_err(|message| ApiError::validation(req_id.0.clone(), message))?;

    let locator = &state.locator;
    let outcome = match &params.source {
        Source::Text(q) => locator.search_text(q, params.radius_km).await,
        Source::Around(center) => locator.around(*center, params.radius_km).await,
        Source::NearDevice => locator.near_me(params.radius_km).await,
        Source::DefaultArea => SearchOutcome::default_area(),
    };
    tracing::debug!(source = ?params.source, count = outcome.cafes.len(), "cafes search");

    let place_name = outcome.place_name.clone();
    let view = [
        Action::SpecialtyChanged(params.specialty),
        Action::SortChanged(params.sort),
        outcome.into_action(),
        Action::PageRequested(params.page),
    ]
    .into_iter()
    .fold(ViewState::default(), reduce)
    .derived();

    Ok(Json(ApiResponse {
        data: CafesData { place_name, view },
        meta: ResponseMeta::new(req_id.0),
    }))
}
