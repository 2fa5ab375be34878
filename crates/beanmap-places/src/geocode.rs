//! Free-text location lookup against a Nominatim-compatible geocoder.
//!
//! "No match" is a successful lookup ([`GeocodeOutcome::NotFound`]); transport
//! and parse problems are errors. Callers recover from both the same way but
//! log them differently.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use beanmap_core::Coordinates;

use crate::error::PlacesError;
use crate::http::{build_client, parse_base_url, send_json};
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";
const RETRY_BACKOFF_BASE_MS: u64 = 500;

/// The best match for a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedPlace {
    pub coordinates: Coordinates,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(GeocodedPlace),
    NotFound,
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct Geocoder {
    client: Client,
    base_url: Url,
    max_retries: u32,
}

impl Geocoder {
    /// Creates a geocoder pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a geocoder with a custom base URL (self-hosted Nominatim, or a
    /// wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built, or
    /// [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
            max_retries: 0,
        })
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Look up `query` and return the single best match.
    ///
    /// A blank query is `NotFound` without touching the network.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] / [`PlacesError::UnexpectedStatus`] on network
    ///   failure or a non-2xx status (after retries).
    /// - [`PlacesError::Deserialize`] / [`PlacesError::InvalidResponse`] if the
    ///   body is not the expected shape.
    pub async fn lookup(&self, query: &str) -> Result<GeocodeOutcome, PlacesError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(GeocodeOutcome::NotFound);
        }

        let url = self.search_url(query)?;
        let context = format!("geocode(q={query})");
        let hits: Vec<NominatimHit> =
            retry_with_backoff(self.max_retries, RETRY_BACKOFF_BASE_MS, || {
                send_json(self.client.get(url.clone()), &context)
            })
            .await?;

        let Some(hit) = hits.into_iter().next() else {
            tracing::debug!(query, "geocoder returned no match");
            return Ok(GeocodeOutcome::NotFound);
        };

        let coordinates = parse_hit_coordinates(&hit).map_err(|reason| {
            PlacesError::InvalidResponse {
                context: context.clone(),
                reason,
            }
        })?;

        tracing::debug!(query, %coordinates, display_name = %hit.display_name, "geocoded");
        Ok(GeocodeOutcome::Found(GeocodedPlace {
            coordinates,
            display_name: hit.display_name,
        }))
    }

    fn search_url(&self, query: &str) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .append_pair("q", query);
        Ok(url)
    }
}

fn parse_hit_coordinates(hit: &NominatimHit) -> Result<Coordinates, String> {
    let latitude = hit
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("latitude '{}': {e}", hit.lat))?;
    let longitude = hit
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("longitude '{}': {e}", hit.lon))?;
    let coordinates = Coordinates::new(latitude, longitude);
    if coordinates.is_valid() {
        Ok(coordinates)
    } else {
        Err(format!("({coordinates}) is out of range"))
    }
}
