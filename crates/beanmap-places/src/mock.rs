//! Synthesized place-search results.
//!
//! Stands in for a real place API during development and in tests. Given a
//! center, generates 7–15 cafes scattered within roughly `radius_km`, with
//! ratings in 3.0–5.0 and a 70 % chance of being open. Seed it for
//! reproducible output.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use beanmap_core::{CafeRecord, Coordinates, NewCafe, Specialty};

use crate::error::PlacesError;
use crate::provider::PlaceSearch;

const MIN_RESULTS: usize = 7;
const MAX_RESULTS: usize = 15;
/// Offset bound in degrees at the reference 2 km radius.
const OFFSET_DEG_PER_2KM: f64 = 0.02;
const OPEN_PROBABILITY: f64 = 0.7;

const NAME_POOL: [(&str, Specialty); 16] = [
    ("Blue Bottle Corner", Specialty::Coffee),
    ("Espresso Lane", Specialty::Coffee),
    ("The Daily Drip", Specialty::Coffee),
    ("Crema & Co.", Specialty::Coffee),
    ("Steam Room Coffee", Specialty::Coffee),
    ("Book Nook Cafe", Specialty::Cafe),
    ("Maple Leaf Cafe", Specialty::Cafe),
    ("Sidewalk Social", Specialty::Cafe),
    ("The Reading Room", Specialty::Cafe),
    ("Flour & Fold", Specialty::Bakery),
    ("Rise Bakehouse", Specialty::Bakery),
    ("Butter Lane Bakery", Specialty::Bakery),
    ("Second Crack Roasters", Specialty::Roastery),
    ("Origin Roasting Works", Specialty::Roastery),
    ("Copper Drum Roastery", Specialty::Roastery),
    ("Hearth & Bean", Specialty::Cafe),
];

const COFFEE_DESCRIPTIONS: [&str; 3] = [
    "Espresso-forward bar with a rotating single-origin pour-over.",
    "Tiny counter serving flat whites and cold brew on tap.",
    "Third-wave coffee with latte art classes on weekends.",
];

const CAFE_DESCRIPTIONS: [&str; 3] = [
    "Relaxed spot with sandwiches, soups, and good Wi-Fi.",
    "Sunny corner cafe with brunch served all day.",
    "Community hangout with board games and house-made chai.",
];

const BAKERY_DESCRIPTIONS: [&str; 3] = [
    "Fresh sourdough and laminated pastries from 6 AM.",
    "Neighbourhood bakery known for its cardamom buns.",
    "French-style patisserie with a short coffee menu.",
];

const ROASTERY_DESCRIPTIONS: [&str; 3] = [
    "Roasts in small batches on site; retail beans available.",
    "Tasting bar with weekly cupping sessions.",
    "Direct-trade roaster with a rotating espresso blend.",
];

const HOURS_POOL: [&str; 4] = [
    "6:00 AM - 6:00 PM",
    "7:00 AM - 7:00 PM",
    "7:30 AM - 4:00 PM",
    "8:00 AM - 9:00 PM",
];

const STREET_POOL: [&str; 6] = [
    "Main St",
    "Market St",
    "Park Ave",
    "Broadway",
    "Elm St",
    "Harbor Rd",
];

fn descriptions_for(specialty: Specialty) -> &'static [&'static str] {
    match specialty {
        Specialty::Coffee => &COFFEE_DESCRIPTIONS,
        Specialty::Cafe => &CAFE_DESCRIPTIONS,
        Specialty::Bakery => &BAKERY_DESCRIPTIONS,
        Specialty::Roastery => &ROASTERY_DESCRIPTIONS,
    }
}

/// Bring a longitude back into `[-180, 180)` across the antimeridian.
fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 540.0).rem_euclid(360.0) - 180.0
}

/// Generate a random result set around `center`.
///
/// Names are unique within one result set. Records carry no distance.
pub fn generate_cafes<R: Rng>(
    rng: &mut R,
    center: Coordinates,
    radius_km: f64,
) -> Vec<CafeRecord> {
    let radius_km = if radius_km.is_finite() && radius_km > 0.0 {
        radius_km
    } else {
        2.0
    };
    let max_offset = OFFSET_DEG_PER_2KM * radius_km / 2.0;
    let count = rng.random_range(MIN_RESULTS..=MAX_RESULTS);

    let mut pool = NAME_POOL.to_vec();
    pool.shuffle(rng);

    pool.into_iter()
        .take(count)
        .filter_map(|(name, specialty)| {
            let latitude = (center.latitude + rng.random_range(-max_offset..=max_offset))
                .clamp(-90.0, 90.0);
            let longitude =
                wrap_longitude(center.longitude + rng.random_range(-max_offset..=max_offset));
            let rating = f64::from(rng.random_range(30u8..=50)) / 10.0;
            let is_open = rng.random_bool(OPEN_PROBABILITY);
            let description = descriptions_for(specialty)
                .choose(rng)
                .copied()
                .unwrap_or_default();
            let hours = HOURS_POOL.choose(rng).copied().unwrap_or_default();
            let street = STREET_POOL.choose(rng).copied().unwrap_or_default();
            let number: u16 = rng.random_range(10..=999);
            let phone = format!(
                "(555) {:03}-{:04}",
                rng.random_range(200u16..=999),
                rng.random_range(0u16..=9999)
            );

            CafeRecord::new(NewCafe {
                name: name.to_string(),
                coordinates: Coordinates::new(latitude, longitude),
                address: format!("{number} {street}"),
                rating,
                specialty,
                description: description.to_string(),
                hours: hours.to_string(),
                is_open: Some(is_open),
                phone,
            })
            .ok()
        })
        .collect()
}

/// [`PlaceSearch`] backed by [`generate_cafes`].
pub struct MockPlaces {
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl MockPlaces {
    /// Deterministic generator: the same seed yields the same sequence of
    /// result sets.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            latency: Duration::ZERO,
        }
    }

    /// Simulated network delay awaited before each search.
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency = Duration::from_millis(latency_ms);
        self
    }
}

impl PlaceSearch for MockPlaces {
    async fn search(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<CafeRecord>, PlacesError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let cafes = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            generate_cafes(&mut *rng, center, radius_km)
        };
        tracing::debug!(%center, radius_km, count = cafes.len(), "generated mock cafes");
        Ok(cafes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Coordinates = Coordinates::new(47.6062, -122.3321);

    #[test]
    fn result_count_is_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = generate_cafes(&mut rng, CENTER, 2.0).len();
            assert!((MIN_RESULTS..=MAX_RESULTS).contains(&n), "got {n}");
        }
    }

    #[test]
    fn offsets_stay_within_radius_box() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            for cafe in generate_cafes(&mut rng, CENTER, 2.0) {
                let c = cafe.coordinates();
                assert!((c.latitude - CENTER.latitude).abs() <= OFFSET_DEG_PER_2KM + 1e-12);
                assert!((c.longitude - CENTER.longitude).abs() <= OFFSET_DEG_PER_2KM + 1e-12);
            }
        }
    }

    #[test]
    fn larger_radius_spreads_results_wider() {
        let mut rng = StdRng::seed_from_u64(3);
        let max_lat_offset = (0..50)
            .flat_map(|_| generate_cafes(&mut rng, CENTER, 10.0))
            .map(|c| (c.coordinates().latitude - CENTER.latitude).abs())
            .fold(0.0_f64, f64::max);
        assert!(max_lat_offset > OFFSET_DEG_PER_2KM);
        assert!(max_lat_offset <= OFFSET_DEG_PER_2KM * 5.0 + 1e-12);
    }

    #[test]
    fn ratings_are_between_three_and_five_with_one_decimal() {
        let mut rng = StdRng::seed_from_u64(19);
        for cafe in (0..50).flat_map(|_| generate_cafes(&mut rng, CENTER, 2.0)) {
            let r = cafe.rating();
            assert!((3.0..=5.0).contains(&r), "rating {r}");
            assert!(((r * 10.0).round() - r * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn roughly_seventy_percent_are_open() {
        let mut rng = StdRng::seed_from_u64(23);
        let cafes: Vec<CafeRecord> = (0..300)
            .flat_map(|_| generate_cafes(&mut rng, CENTER, 2.0))
            .collect();
        let open = cafes.iter().filter(|c| c.is_open() == Some(true)).count();
        #[allow(clippy::cast_precision_loss)]
        let share = open as f64 / cafes.len() as f64;
        assert!((0.6..=0.8).contains(&share), "open share {share}");
    }

    #[test]
    fn names_are_unique_within_a_result_set() {
        let mut rng = StdRng::seed_from_u64(31);
        let cafes = generate_cafes(&mut rng, CENTER, 2.0);
        let mut names: Vec<&str> = cafes.iter().map(CafeRecord::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), cafes.len());
    }

    #[test]
    fn specialty_matches_name_pool() {
        let mut rng = StdRng::seed_from_u64(5);
        for cafe in generate_cafes(&mut rng, CENTER, 2.0) {
            let (_, expected) = NAME_POOL
                .iter()
                .find(|(n, _)| *n == cafe.name())
                .expect("name comes from pool");
            assert_eq!(cafe.specialty(), *expected);
        }
    }

    #[test]
    fn longitude_wraps_across_antimeridian() {
        assert!((wrap_longitude(180.5) - -179.5).abs() < 1e-9);
        assert!((wrap_longitude(-180.5) - 179.5).abs() < 1e-9);
        assert!((wrap_longitude(-122.3) - -122.3).abs() < 1e-9);
    }

    #[test]
    fn results_near_antimeridian_do_not_collapse_onto_it() {
        let center = Coordinates::new(-17.7, 179.99);
        let mut rng = StdRng::seed_from_u64(13);
        let cafes: Vec<CafeRecord> = (0..20)
            .flat_map(|_| generate_cafes(&mut rng, center, 2.0))
            .collect();
        assert!(cafes
            .iter()
            .all(|c| (-180.0..180.0).contains(&c.coordinates().longitude)));
        assert!(cafes.iter().any(|c| c.coordinates().longitude < 0.0));
        assert!(!cafes
            .iter()
            .any(|c| (c.coordinates().longitude - 180.0).abs() < f64::EPSILON));
    }

    #[test]
    fn non_positive_radius_falls_back_to_default() {
        let mut rng = StdRng::seed_from_u64(1);
        let cafes = generate_cafes(&mut rng, CENTER, 0.0);
        assert!(!cafes.is_empty());
    }

    #[tokio::test]
    async fn same_seed_same_results() {
        let a = MockPlaces::seeded(42).search(CENTER, 2.0).await.unwrap();
        let b = MockPlaces::seeded(42).search(CENTER, 2.0).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn different_seeds_differ() {
        let a = MockPlaces::seeded(1).search(CENTER, 2.0).await.unwrap();
        let b = MockPlaces::seeded(2).search(CENTER, 2.0).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn search_results_have_no_distance() {
        let cafes = MockPlaces::seeded(9).search(CENTER, 2.0).await.unwrap();
        assert!(cafes.iter().all(|c| c.distance_km().is_none()));
    }
}
