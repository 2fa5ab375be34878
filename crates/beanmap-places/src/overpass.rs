//! Place search against the OpenStreetMap Overpass API.
//!
//! Queries coffee-related nodes inside a radius and maps their tags onto
//! [`CafeRecord`]. OSM has no ratings, so every record carries `0.0`, and
//! opening status is unknown.

use std::collections::HashMap;

use reqwest::{Client, Url};
use serde::Deserialize;

use beanmap_core::{CafeRecord, Coordinates, NewCafe, Specialty};

use crate::error::PlacesError;
use crate::http::{build_client, send_json};
use crate::provider::PlaceSearch;
use crate::retry::retry_with_backoff;

const DEFAULT_URL: &str = "https://overpass-api.de/api/interpreter";
const RETRY_BACKOFF_BASE_MS: u64 = 1_000;
/// Server-side query timeout passed to Overpass.
const QUERY_TIMEOUT_SECS: u64 = 25;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

pub struct OverpassPlaces {
    client: Client,
    url: Url,
    max_retries: u32,
}

impl OverpassPlaces {
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(DEFAULT_URL, timeout_secs, user_agent)
    }

    /// Point at a specific interpreter endpoint (mirror, or wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built, or
    /// [`PlacesError::InvalidBaseUrl`] if `url` does not parse.
    pub fn with_base_url(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        let parsed = Url::parse(url).map_err(|e| PlacesError::InvalidBaseUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            url: parsed,
            max_retries: 0,
        })
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl PlaceSearch for OverpassPlaces {
    async fn search(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<CafeRecord>, PlacesError> {
        let query = build_query(center, radius_km);
        let context = format!("overpass(center={center}, radius_km={radius_km})");
        let response: OverpassResponse =
            retry_with_backoff(self.max_retries, RETRY_BACKOFF_BASE_MS, || {
                send_json(
                    self.client.post(self.url.clone()).form(&[("data", query.as_str())]),
                    &context,
                )
            })
            .await?;

        let total = response.elements.len();
        let cafes: Vec<CafeRecord> = response
            .elements
            .into_iter()
            .filter_map(element_to_cafe)
            .collect();
        tracing::debug!(
            %center,
            radius_km,
            elements = total,
            cafes = cafes.len(),
            "overpass search complete"
        );
        Ok(cafes)
    }
}

/// Overpass QL for cafes, coffee shops, bakeries, and roasters around `center`.
fn build_query(center: Coordinates, radius_km: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radius_m = (radius_km.max(0.1) * 1000.0).round() as u64;
    let around = format!(
        "(around:{radius_m},{:.6},{:.6})",
        center.latitude, center.longitude
    );
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];(\
node[\"amenity\"=\"cafe\"]{around};\
node[\"shop\"=\"coffee\"]{around};\
node[\"shop\"=\"bakery\"]{around};\
node[\"craft\"=\"coffee_roaster\"]{around};\
);out body;"
    )
}

fn specialty_from_tags(tags: &HashMap<String, String>) -> Specialty {
    let tag = |k: &str| tags.get(k).map(String::as_str);
    if tag("craft") == Some("coffee_roaster") {
        Specialty::Roastery
    } else if tag("shop") == Some("bakery") {
        Specialty::Bakery
    } else if tag("shop") == Some("coffee")
        || tag("cuisine").is_some_and(|c| c.split(';').any(|v| v.trim() == "coffee_shop"))
    {
        Specialty::Coffee
    } else {
        Specialty::Cafe
    }
}

fn address_from_tags(tags: &HashMap<String, String>) -> String {
    if let Some(full) = tags.get("addr:full") {
        return full.clone();
    }
    let street_line = [tags.get("addr:housenumber"), tags.get("addr:street")]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    [Some(&street_line), tags.get("addr:city")]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn element_to_cafe(element: OverpassElement) -> Option<CafeRecord> {
    let (Some(lat), Some(lon)) = (element.lat, element.lon) else {
        return None;
    };
    let name = element.tags.get("name")?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    let tags = &element.tags;
    let text = |k: &str| tags.get(k).cloned().unwrap_or_default();

    let result = CafeRecord::new(NewCafe {
        name,
        coordinates: Coordinates::new(lat, lon),
        address: address_from_tags(tags),
        rating: 0.0,
        specialty: specialty_from_tags(tags),
        description: text("description"),
        hours: text("opening_hours"),
        is_open: None,
        phone: tags
            .get("phone")
            .or_else(|| tags.get("contact:phone"))
            .cloned()
            .unwrap_or_default(),
    });
    match result {
        Ok(cafe) => Some(cafe),
        Err(e) => {
            tracing::debug!(osm_id = element.id, error = %e, "skipping overpass element");
            None
        }
    }
}
