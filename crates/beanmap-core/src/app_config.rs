use std::net::SocketAddr;

use crate::cafe::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which place-search backend to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesProviderKind {
    /// Synthesized results around the search center.
    Mock,
    /// OpenStreetMap Overpass API.
    Overpass,
}

impl std::fmt::Display for PlacesProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacesProviderKind::Mock => write!(f, "mock"),
            PlacesProviderKind::Overpass => write!(f, "overpass"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub places_provider: PlacesProviderKind,
    pub geocoder_url: String,
    pub overpass_url: String,
    pub ip_location_url: String,
    /// Fixed device location, when the host knows where it is.
    pub device_location: Option<Coordinates>,
    pub request_timeout_secs: u64,
    pub location_max_age_secs: u64,
    pub user_agent: String,
    pub default_radius_km: f64,
    pub mock_latency_ms: u64,
    pub mock_seed: Option<u64>,
    pub max_retries: u32,
    pub rate_limit_per_minute: usize,
}
