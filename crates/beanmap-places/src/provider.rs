//! The place-search seam.

use std::future::Future;

use beanmap_core::{AppConfig, CafeRecord, Coordinates, PlacesProviderKind};

use crate::error::PlacesError;
use crate::mock::MockPlaces;
use crate::overpass::OverpassPlaces;

/// Finds cafes around a point.
///
/// Returned records carry no distance; the view reducer computes distances
/// against whatever reference location is current.
pub trait PlaceSearch {
    fn search(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> impl Future<Output = Result<Vec<CafeRecord>, PlacesError>> + Send;
}

/// The configured place-search backend.
pub enum Places {
    Mock(MockPlaces),
    Overpass(OverpassPlaces),
}

impl Places {
    /// Build the backend selected by `BEANMAP_PLACES_PROVIDER`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the Overpass client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        match config.places_provider {
            PlacesProviderKind::Mock => {
                let mock = match config.mock_seed {
                    Some(seed) => MockPlaces::seeded(seed),
                    None => MockPlaces::from_os_rng(),
                };
                Ok(Places::Mock(mock.with_latency_ms(config.mock_latency_ms)))
            }
            PlacesProviderKind::Overpass => Ok(Places::Overpass(
                OverpassPlaces::with_base_url(
                    &config.overpass_url,
                    config.request_timeout_secs,
                    &config.user_agent,
                )?
                .with_max_retries(config.max_retries),
            )),
        }
    }
}

impl PlaceSearch for Places {
    async fn search(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<CafeRecord>, PlacesError> {
        match self {
            Places::Mock(mock) => mock.search(center, radius_km).await,
            Places::Overpass(overpass) => overpass.search(center, radius_km).await,
        }
    }
}
