//! Current-device-location providers.
//!
//! A provider either yields coordinates or says why it can't
//! ([`LocationError`]). Callers treat every failure the same way: carry on
//! without a reference location.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use beanmap_core::{AppConfig, Coordinates};

use crate::error::{LocationError, PlacesError};
use crate::http::build_client;

/// Hard ceiling on a single location request.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);
/// How long a previously obtained location may be reused.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(5 * 60);

pub trait LocationProvider {
    fn current_location(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// A location known up front (configuration or command-line flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Option<Coordinates>);

impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        self.0.ok_or(LocationError::Unsupported)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Approximate location from an ip-api style HTTP endpoint.
pub struct IpLocation {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl IpLocation {
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built, or
    /// [`PlacesError::InvalidBaseUrl`] if `url` does not parse.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, PlacesError> {
        let parsed = Url::parse(url).map_err(|e| PlacesError::InvalidBaseUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: build_client(LOCATION_TIMEOUT.as_secs(), user_agent)?,
            url: parsed,
            timeout: LOCATION_TIMEOUT,
        })
    }

    /// Override the request timeout (tests use a short one).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .client
            .get(self.url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(LocationError::Denied),
            s if !s.is_success() => {
                return Err(LocationError::Failed(format!("HTTP status {}", s.as_u16())))
            }
            _ => {}
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if body.status.as_deref().is_some_and(|s| s != "success") {
            return Err(LocationError::Failed(
                body.message.unwrap_or_else(|| "lookup unsuccessful".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) if Coordinates::new(lat, lon).is_valid() => {
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(LocationError::Failed(
                "response carried no usable coordinates".to_string(),
            )),
        }
    }
}

fn classify_transport_error(err: &reqwest::Error) -> LocationError {
    if err.is_timeout() {
        LocationError::TimedOut
    } else {
        LocationError::Failed(err.to_string())
    }
}

impl LocationProvider for IpLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        tokio::time::timeout(self.timeout, self.fetch())
            .await
            .unwrap_or(Err(LocationError::TimedOut))
    }
}

/// The location source selected by configuration.
pub enum DeviceLocation {
    Fixed(FixedLocation),
    Ip(IpLocation),
}

impl DeviceLocation {
    /// `BEANMAP_DEVICE_LAT`/`LNG` pin the location; otherwise it comes from
    /// the IP lookup endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the IP lookup client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        match config.device_location {
            Some(coords) => Ok(Self::Fixed(FixedLocation(Some(coords)))),
            None => Ok(Self::Ip(IpLocation::new(
                &config.ip_location_url,
                &config.user_agent,
            )?)),
        }
    }
}

impl LocationProvider for DeviceLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        match self {
            DeviceLocation::Fixed(fixed) => fixed.current_location().await,
            DeviceLocation::Ip(ip) => ip.current_location().await,
        }
    }
}

/// Reuses the last successful location for up to `max_age`.
///
/// Failures are never cached.
pub struct CachedLocation<P> {
    inner: P,
    max_age: Duration,
    last: Mutex<Option<(Instant, Coordinates)>>,
}

impl<P> CachedLocation<P> {
    pub fn new(inner: P, max_age: Duration) -> Self {
        Self {
            inner,
            max_age,
            last: Mutex::new(None),
        }
    }

    fn fresh(&self) -> Option<Coordinates> {
        let last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        last.and_then(|(at, coords)| (at.elapsed() <= self.max_age).then_some(coords))
    }

    fn store(&self, coords: Coordinates) {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        *last = Some((Instant::now(), coords));
    }
}

impl<P> LocationProvider for CachedLocation<P>
where
    P: LocationProvider + Sync,
{
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        if let Some(coords) = self.fresh() {
            tracing::debug!(%coords, "using cached device location");
            return Ok(coords);
        }
        let coords = self.inner.current_location().await?;
        self.store(coords);
        Ok(coords)
    }
}
