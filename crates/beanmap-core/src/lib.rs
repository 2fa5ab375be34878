//! Domain types and the cafe result pipeline for beanmap.
//!
//! Everything in this crate is pure: the pipeline stages take a list of
//! [`CafeRecord`]s and produce filtered, sorted, and paginated views plus
//! summary statistics. I/O-bound collaborators (geocoding, place search,
//! device location) live in `beanmap-places`.

pub mod app_config;
pub mod cafe;
pub mod config;
pub mod distance;
pub mod fixtures;
pub mod pipeline;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, PlacesProviderKind};
pub use cafe::{CafeRecord, Coordinates, NewCafe, SortKey, Specialty};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{apply_reference, haversine_km, EARTH_RADIUS_KM};
pub use fixtures::{default_cafes, DEFAULT_REFERENCE};
pub use pipeline::{
    filter_by_specialty, paginate, sort_cafes, summarize, total_pages, Page, Summary, PAGE_SIZE,
};
pub use view::{reduce, Action, Notice, ResultView, ViewState};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("rating {0} is outside 0.0..=5.0")]
    RatingOutOfRange(f64),

    #[error("invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("unknown specialty: {0}")]
    UnknownSpecialty(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
