use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn config_with(pairs: &[(&'static str, &'static str)]) -> Result<AppConfig, ConfigError> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    build_app_config(lookup_from_map(&map))
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BEANMAP_ENV"));
}

#[test]
fn empty_environment_yields_defaults() {
    let cfg = config_with(&[]).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.places_provider, PlacesProviderKind::Mock);
    assert_eq!(cfg.geocoder_url, DEFAULT_GEOCODER_URL);
    assert_eq!(cfg.overpass_url, DEFAULT_OVERPASS_URL);
    assert_eq!(cfg.ip_location_url, DEFAULT_IP_LOCATION_URL);
    assert!(cfg.device_location.is_none());
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.location_max_age_secs, 300);
    assert_eq!(cfg.user_agent, "beanmap/0.1 (cafe-locator)");
    assert!((cfg.default_radius_km - 2.0).abs() < f64::EPSILON);
    assert_eq!(cfg.mock_latency_ms, 0);
    assert!(cfg.mock_seed.is_none());
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.rate_limit_per_minute, 120);
}

#[test]
fn invalid_bind_addr_fails() {
    let result = config_with(&[("BEANMAP_BIND_ADDR", "not-a-socket-addr")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_BIND_ADDR"),
        "expected InvalidEnvVar(BEANMAP_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn invalid_env_fails() {
    let result = config_with(&[("BEANMAP_ENV", "staging")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_ENV"),
        "expected InvalidEnvVar(BEANMAP_ENV), got: {result:?}"
    );
}

#[test]
fn places_provider_overpass() {
    let cfg = config_with(&[("BEANMAP_PLACES_PROVIDER", "Overpass")]).unwrap();
    assert_eq!(cfg.places_provider, PlacesProviderKind::Overpass);
}

#[test]
fn places_provider_unknown_fails() {
    let result = config_with(&[("BEANMAP_PLACES_PROVIDER", "google")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_PLACES_PROVIDER"),
        "got: {result:?}"
    );
}

#[test]
fn device_location_pair_is_parsed() {
    let cfg = config_with(&[
        ("BEANMAP_DEVICE_LAT", "51.5074"),
        ("BEANMAP_DEVICE_LNG", "-0.1278"),
    ])
    .unwrap();
    let loc = cfg.device_location.expect("device location set");
    assert!((loc.latitude - 51.5074).abs() < 1e-9);
    assert!((loc.longitude - -0.1278).abs() < 1e-9);
}

#[test]
fn device_location_requires_both_halves() {
    let result = config_with(&[("BEANMAP_DEVICE_LAT", "51.5074")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_DEVICE_LNG"),
        "got: {result:?}"
    );
}

#[test]
fn device_location_out_of_range_fails() {
    let result = config_with(&[
        ("BEANMAP_DEVICE_LAT", "123.0"),
        ("BEANMAP_DEVICE_LNG", "0.0"),
    ]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_DEVICE_LAT"),
        "got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let cfg = config_with(&[("BEANMAP_REQUEST_TIMEOUT_SECS", "3")]).unwrap();
    assert_eq!(cfg.request_timeout_secs, 3);
}

#[test]
fn request_timeout_invalid() {
    let result = config_with(&[("BEANMAP_REQUEST_TIMEOUT_SECS", "soon")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_REQUEST_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn default_radius_must_be_positive() {
    let result = config_with(&[("BEANMAP_DEFAULT_RADIUS_KM", "0")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_DEFAULT_RADIUS_KM"),
        "got: {result:?}"
    );
}

#[test]
fn mock_seed_override() {
    let cfg = config_with(&[("BEANMAP_MOCK_SEED", "42")]).unwrap();
    assert_eq!(cfg.mock_seed, Some(42));
}

#[test]
fn mock_seed_invalid() {
    let result = config_with(&[("BEANMAP_MOCK_SEED", "-1")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BEANMAP_MOCK_SEED"),
        "got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let cfg = config_with(&[("BEANMAP_MAX_RETRIES", "5")]).unwrap();
    assert_eq!(cfg.max_retries, 5);
}
