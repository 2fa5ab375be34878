//! Built-in fallback dataset around Times Square, New York.
//!
//! Used whenever a location lookup fails or the device location is
//! unavailable, so a usable result set is always on screen.

use crate::cafe::{CafeRecord, Coordinates, NewCafe, Specialty};

/// Fallback reference location (Times Square).
pub const DEFAULT_REFERENCE: Coordinates = Coordinates::new(40.7589, -73.9851);

struct Seed {
    name: &'static str,
    lat: f64,
    lng: f64,
    address: &'static str,
    rating: f64,
    specialty: Specialty,
    description: &'static str,
    hours: &'static str,
    is_open: Option<bool>,
    phone: &'static str,
}

const SEEDS: [Seed; 7] = [
    Seed {
        name: "The Roasted Bean",
        lat: 40.761_4,
        lng: -73.977_6,
        address: "123 W 52nd St, New York, NY 10019",
        rating: 4.5,
        specialty: Specialty::Coffee,
        description: "Single-origin pour-overs and a quiet corner to work.",
        hours: "6:30 AM - 8:00 PM",
        is_open: Some(true),
        phone: "(212) 555-0142",
    },
    Seed {
        name: "Espresso Central",
        lat: 40.750_5,
        lng: -73.993_4,
        address: "350 7th Ave, New York, NY 10001",
        rating: 4.7,
        specialty: Specialty::Coffee,
        description: "Italian-style espresso bar pulling shots since dawn.",
        hours: "6:00 AM - 7:00 PM",
        is_open: Some(true),
        phone: "(212) 555-0187",
    },
    Seed {
        name: "Morning Glory Cafe",
        lat: 40.764_2,
        lng: -73.983_1,
        address: "870 8th Ave, New York, NY 10019",
        rating: 4.3,
        specialty: Specialty::Cafe,
        description: "All-day brunch, fresh juices, and bottomless drip coffee.",
        hours: "7:00 AM - 9:00 PM",
        is_open: Some(true),
        phone: "(212) 555-0119",
    },
    Seed {
        name: "Golden Crust Bakery",
        lat: 40.756_7,
        lng: -73.986_9,
        address: "1501 Broadway, New York, NY 10036",
        rating: 4.6,
        specialty: Specialty::Bakery,
        description: "Croissants laminated in-house and baked every morning.",
        hours: "6:00 AM - 6:00 PM",
        is_open: Some(true),
        phone: "(212) 555-0164",
    },
    Seed {
        name: "Ironworks Roasting Co.",
        lat: 40.748_4,
        lng: -73.985_7,
        address: "20 W 34th St, New York, NY 10001",
        rating: 4.8,
        specialty: Specialty::Roastery,
        description: "Small-batch roastery with a tasting bar and bean shop.",
        hours: "8:00 AM - 5:00 PM",
        is_open: Some(true),
        phone: "(212) 555-0133",
    },
    Seed {
        name: "The Daily Grind",
        lat: 40.759_2,
        lng: -73.969_8,
        address: "575 Lexington Ave, New York, NY 10022",
        rating: 4.1,
        specialty: Specialty::Cafe,
        description: "Neighbourhood cafe with sandwiches and plenty of outlets.",
        hours: "7:00 AM - 4:00 PM",
        is_open: Some(false),
        phone: "(212) 555-0171",
    },
    Seed {
        name: "Sunrise Bakehouse",
        lat: 40.763_1,
        lng: -73.991_2,
        address: "412 W 47th St, New York, NY 10036",
        rating: 4.2,
        specialty: Specialty::Bakery,
        description: "Sourdough loaves, cinnamon knots, and a short espresso menu.",
        hours: "Hours vary",
        is_open: None,
        phone: "(212) 555-0158",
    },
];

/// The seven-record New York dataset, without distances.
#[must_use]
pub fn default_cafes() -> Vec<CafeRecord> {
    SEEDS
        .iter()
        .filter_map(|s| {
            CafeRecord::new(NewCafe {
                name: s.name.to_string(),
                coordinates: Coordinates::new(s.lat, s.lng),
                address: s.address.to_string(),
                rating: s.rating,
                specialty: s.specialty,
                description: s.description.to_string(),
                hours: s.hours.to_string(),
                is_open: s.is_open,
                phone: s.phone.to_string(),
            })
            .ok()
        })
        .collect()
}
