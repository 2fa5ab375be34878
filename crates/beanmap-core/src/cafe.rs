use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::haversine_km;
use crate::CoreError;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both components are finite and within the
    /// geographic range (±90° latitude, ±180° longitude).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    Coffee,
    Cafe,
    Bakery,
    Roastery,
}

impl Specialty {
    pub const ALL: [Specialty; 4] = [
        Specialty::Coffee,
        Specialty::Cafe,
        Specialty::Bakery,
        Specialty::Roastery,
    ];

    /// Parse a user-supplied filter value. `"all"` and the empty string mean
    /// "no filter".
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSpecialty`] for anything else that is not a
    /// specialty tag.
    pub fn parse_filter(raw: &str) -> Result<Option<Specialty>, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Specialty::Coffee => write!(f, "coffee"),
            Specialty::Cafe => write!(f, "cafe"),
            Specialty::Bakery => write!(f, "bakery"),
            Specialty::Roastery => write!(f, "roastery"),
        }
    }
}

impl FromStr for Specialty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coffee" => Ok(Specialty::Coffee),
            "cafe" => Ok(Specialty::Cafe),
            "bakery" => Ok(Specialty::Bakery),
            "roastery" => Ok(Specialty::Roastery),
            other => Err(CoreError::UnknownSpecialty(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Name,
    Rating,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Distance => write!(f, "distance"),
            SortKey::Name => write!(f, "name"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortKey::Distance),
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Unvalidated input for [`CafeRecord::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub coordinates: Coordinates,
    pub address: String,
    pub rating: f64,
    pub specialty: Specialty,
    pub description: String,
    pub hours: String,
    pub is_open: Option<bool>,
    pub phone: String,
}

/// A single cafe result.
///
/// Immutable once built. `distance_km` is only ever set by
/// [`CafeRecord::with_distance_from`], so a present value always belongs to
/// the reference location it was computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NewCafe")]
pub struct CafeRecord {
    name: String,
    coordinates: Coordinates,
    address: String,
    rating: f64,
    specialty: Specialty,
    description: String,
    hours: String,
    is_open: Option<bool>,
    phone: String,
    distance_km: Option<f64>,
}

impl CafeRecord {
    /// Validate and build a record. Distance starts out unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RatingOutOfRange`] when the rating is not within
    /// `0.0..=5.0`, or [`CoreError::InvalidCoordinates`] for out-of-range or
    /// non-finite coordinates.
    pub fn new(input: NewCafe) -> Result<Self, CoreError> {
        if !(0.0..=5.0).contains(&input.rating) {
            return Err(CoreError::RatingOutOfRange(input.rating));
        }
        if !input.coordinates.is_valid() {
            return Err(CoreError::InvalidCoordinates {
                latitude: input.coordinates.latitude,
                longitude: input.coordinates.longitude,
            });
        }

        Ok(Self {
            name: input.name,
            coordinates: input.coordinates,
            address: input.address,
            rating: input.rating,
            specialty: input.specialty,
            description: input.description,
            hours: input.hours,
            is_open: input.is_open,
            phone: input.phone,
            distance_km: None,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    #[must_use]
    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn hours(&self) -> &str {
        &self.hours
    }

    /// `None` when opening status is unknown.
    #[must_use]
    pub fn is_open(&self) -> Option<bool> {
        self.is_open
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    /// Return a copy with `distance_km` measured from `reference`.
    #[must_use]
    pub fn with_distance_from(mut self, reference: Coordinates) -> Self {
        self.distance_km = Some(haversine_km(reference, self.coordinates));
        self
    }

    /// Return a copy with no distance, for when the reference is lost.
    #[must_use]
    pub fn without_distance(mut self) -> Self {
        self.distance_km = None;
        self
    }
}

impl TryFrom<NewCafe> for CafeRecord {
    type Error = CoreError;

    fn try_from(value: NewCafe) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
