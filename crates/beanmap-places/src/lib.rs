//! External collaborators for beanmap.
//!
//! Geocoding (Nominatim), place search (a seeded mock generator and the
//! OpenStreetMap Overpass API), and device location (fixed, IP-based, and a
//! max-age cache). [`Locator`] stitches them together into a single search
//! call that always yields a usable result set, falling back to the built-in
//! New York dataset when a lookup fails.

pub mod device;
pub mod error;
pub mod geocode;
pub mod locator;
pub mod mock;
pub mod overpass;
pub mod provider;

mod http;
mod retry;

pub use device::{CachedLocation, DeviceLocation, FixedLocation, IpLocation, LocationProvider};
pub use error::{LocationError, PlacesError};
pub use geocode::{GeocodeOutcome, GeocodedPlace, Geocoder};
pub use locator::{ConfiguredLocator, Locator, SearchOutcome};
pub use mock::{generate_cafes, MockPlaces};
pub use overpass::OverpassPlaces;
pub use provider::{PlaceSearch, Places};
