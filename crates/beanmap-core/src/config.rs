use crate::app_config::{AppConfig, Environment, PlacesProviderKind};
use crate::cafe::Coordinates;
use crate::ConfigError;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_IP_LOCATION_URL: &str = "http://ip-api.com/json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every key has a default, so an empty environment yields a working
/// development config backed by the mock place provider.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_optional_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(None),
        }
    };

    let env = parse_environment(&or_default("BEANMAP_ENV", "development"))?;

    let bind_addr = or_default("BEANMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BEANMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("BEANMAP_LOG_LEVEL", "info");

    let places_provider = parse_places_provider(&or_default("BEANMAP_PLACES_PROVIDER", "mock"))?;
    let geocoder_url = or_default("BEANMAP_GEOCODER_URL", DEFAULT_GEOCODER_URL);
    let overpass_url = or_default("BEANMAP_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let ip_location_url = or_default("BEANMAP_IP_LOCATION_URL", DEFAULT_IP_LOCATION_URL);

    let device_location = match (
        parse_optional_f64("BEANMAP_DEVICE_LAT")?,
        parse_optional_f64("BEANMAP_DEVICE_LNG")?,
    ) {
        (Some(lat), Some(lng)) => {
            let coords = Coordinates::new(lat, lng);
            if !coords.is_valid() {
                return Err(invalid(
                    "BEANMAP_DEVICE_LAT",
                    format!("({coords}) is not a valid coordinate"),
                ));
            }
            Some(coords)
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(invalid(
                "BEANMAP_DEVICE_LNG",
                "must be set together with BEANMAP_DEVICE_LAT".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "BEANMAP_DEVICE_LAT",
                "must be set together with BEANMAP_DEVICE_LNG".to_string(),
            ))
        }
    };

    let request_timeout_secs = parse_u64("BEANMAP_REQUEST_TIMEOUT_SECS", "10")?;
    let location_max_age_secs = parse_u64("BEANMAP_LOCATION_MAX_AGE_SECS", "300")?;
    let user_agent = or_default("BEANMAP_USER_AGENT", "beanmap/0.1 (cafe-locator)");

    let default_radius_km = parse_optional_f64("BEANMAP_DEFAULT_RADIUS_KM")?.unwrap_or(2.0);
    if !(default_radius_km.is_finite() && default_radius_km > 0.0) {
        return Err(invalid(
            "BEANMAP_DEFAULT_RADIUS_KM",
            format!("{default_radius_km} must be a positive number"),
        ));
    }

    let mock_latency_ms = parse_u64("BEANMAP_MOCK_LATENCY_MS", "0")?;
    let mock_seed = match lookup("BEANMAP_MOCK_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("BEANMAP_MOCK_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };
    let max_retries = parse_u32("BEANMAP_MAX_RETRIES", "2")?;
    let rate_limit_per_minute = parse_usize("BEANMAP_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        places_provider,
        geocoder_url,
        overpass_url,
        ip_location_url,
        device_location,
        request_timeout_secs,
        location_max_age_secs,
        user_agent,
        default_radius_km,
        mock_latency_ms,
        mock_seed,
        max_retries,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BEANMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_places_provider(s: &str) -> Result<PlacesProviderKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "mock" => Ok(PlacesProviderKind::Mock),
        "overpass" => Ok(PlacesProviderKind::Overpass),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BEANMAP_PLACES_PROVIDER".to_string(),
            reason: format!("unknown provider '{other}' (expected mock or overpass)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
