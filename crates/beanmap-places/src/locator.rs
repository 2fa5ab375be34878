//! One-call cafe search over the geocoder, place search, and device location.
//!
//! Every entry point returns a [`SearchOutcome`] rather than an error: when a
//! collaborator fails the outcome falls back to the built-in dataset and
//! carries a [`Notice`] explaining why.

use std::time::Duration;

use beanmap_core::{
    default_cafes, Action, AppConfig, CafeRecord, Coordinates, Notice, DEFAULT_REFERENCE,
};

use crate::device::{CachedLocation, DeviceLocation, LocationProvider};
use crate::error::PlacesError;
use crate::geocode::{GeocodeOutcome, Geocoder};
use crate::provider::{PlaceSearch, Places};

/// A finished search, ready to feed into the view reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub cafes: Vec<CafeRecord>,
    pub reference: Option<Coordinates>,
    /// Geocoder display name for text searches that matched.
    pub place_name: Option<String>,
    pub notice: Option<Notice>,
}

impl SearchOutcome {
    fn fallback(notice: Notice) -> Self {
        Self {
            cafes: default_cafes(),
            reference: Some(DEFAULT_REFERENCE),
            place_name: None,
            notice: Some(notice),
        }
    }

    /// The built-in dataset around its own reference point, with no notice.
    #[must_use]
    pub fn default_area() -> Self {
        Self {
            cafes: default_cafes(),
            reference: Some(DEFAULT_REFERENCE),
            place_name: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn into_action(self) -> Action {
        Action::ResultsLoaded {
            cafes: self.cafes,
            reference: self.reference,
            notice: self.notice,
        }
    }
}

pub struct Locator<P, L> {
    geocoder: Geocoder,
    places: P,
    location: L,
}

/// The locator wired from [`AppConfig`].
pub type ConfiguredLocator = Locator<Places, CachedLocation<DeviceLocation>>;

impl ConfiguredLocator {
    /// # Errors
    ///
    /// Returns [`PlacesError`] if any HTTP client cannot be built or a
    /// configured URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let geocoder = Geocoder::with_base_url(
            &config.geocoder_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_max_retries(config.max_retries);
        let location = CachedLocation::new(
            DeviceLocation::from_config(config)?,
            Duration::from_secs(config.location_max_age_secs),
        );
        Ok(Locator::new(geocoder, Places::from_config(config)?, location))
    }
}

impl<P, L> Locator<P, L>
where
    P: PlaceSearch + Sync,
    L: LocationProvider + Sync,
{
    pub fn new(geocoder: Geocoder, places: P, location: L) -> Self {
        Self {
            geocoder,
            places,
            location,
        }
    }

    /// Override the device location source (e.g. coordinates given on the
    /// command line).
    pub fn with_location<M>(self, location: M) -> Locator<P, M> {
        Locator {
            geocoder: self.geocoder,
            places: self.places,
            location,
        }
    }

    /// Geocode `query`, then search around the match.
    pub async fn search_text(&self, query: &str, radius_km: f64) -> SearchOutcome {
        let query = query.trim();
        match self.geocoder.lookup(query).await {
            Ok(GeocodeOutcome::Found(place)) => {
                let mut outcome = self.around(place.coordinates, radius_km).await;
                if outcome.notice.is_none() {
                    outcome.place_name = Some(place.display_name);
                }
                outcome
            }
            Ok(GeocodeOutcome::NotFound) => {
                tracing::warn!(query, "no geocoding match, using default area");
                SearchOutcome::fallback(Notice::LookupNotFound {
                    query: query.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "geocoding failed, using default area");
                SearchOutcome::fallback(Notice::LookupFailed {
                    query: query.to_string(),
                })
            }
        }
    }

    /// Search around the current device location.
    ///
    /// Without a location the built-in dataset is returned with no reference,
    /// so no distances are shown.
    pub async fn near_me(&self, radius_km: f64) -> SearchOutcome {
        match self.location.current_location().await {
            Ok(center) => self.around(center, radius_km).await,
            Err(e) => {
                tracing::warn!(error = %e, "device location unavailable");
                SearchOutcome {
                    cafes: default_cafes(),
                    reference: None,
                    place_name: None,
                    notice: Some(Notice::LocationUnavailable {
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    /// Search around known coordinates.
    pub async fn around(&self, center: Coordinates, radius_km: f64) -> SearchOutcome {
        match self.places.search(center, radius_km).await {
            Ok(cafes) => {
                tracing::info!(%center, radius_km, count = cafes.len(), "place search complete");
                SearchOutcome {
                    cafes,
                    reference: Some(center),
                    place_name: None,
                    notice: None,
                }
            }
            Err(e) => {
                tracing::error!(%center, error = %e, "place search failed, using default area");
                SearchOutcome::fallback(Notice::SearchFailed)
            }
        }
    }
}
