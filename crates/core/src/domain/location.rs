use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::crop::normalize_tag;
use crate::errors::DomainError;

/// Broad agro-climatic region used to pick location-class defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    North,
    Central,
    South,
    East,
    Northeast,
}

impl Region {
    pub const ALL: [Region; 5] =
        [Region::North, Region::Central, Region::South, Region::East, Region::Northeast];

    /// Bounding boxes checked in order; anything unmatched is central.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        let within = |lat: (f64, f64), lon: (f64, f64)| {
            (lat.0..=lat.1).contains(&latitude) && (lon.0..=lon.1).contains(&longitude)
        };

        if within((28.0, 37.0), (76.0, 97.0)) {
            Self::North
        } else if within((20.0, 28.0), (70.0, 88.0)) {
            Self::Central
        } else if within((8.0, 20.0), (70.0, 80.0)) {
            Self::South
        } else if within((24.0, 28.0), (88.0, 97.0)) {
            Self::East
        } else if within((22.0, 30.0), (88.0, 97.0)) {
            Self::Northeast
        } else {
            Self::Central
        }
    }

    pub fn from_place_name(name: &str) -> Option<Self> {
        let key = normalize_tag(name);
        KNOWN_PLACES.iter().find(|(place, _)| *place == key).map(|(_, region)| *region)
    }

    /// Mandi price multiplier applied by the market scorer.
    pub fn price_multiplier(&self) -> f64 {
        match self {
            Self::North => 1.10,
            Self::Central => 1.00,
            Self::South => 0.90,
            Self::East => 0.95,
            Self::Northeast => 0.85,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Central => "central",
            Self::South => "south",
            Self::East => "east",
            Self::Northeast => "northeast",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_tag(value).as_str() {
            "north" | "northern" => Ok(Self::North),
            "central" => Ok(Self::Central),
            "south" | "southern" => Ok(Self::South),
            "east" | "eastern" => Ok(Self::East),
            "northeast" | "north_east" | "northeastern" => Ok(Self::Northeast),
            _ => Err(DomainError::UnknownRegion(value.to_string())),
        }
    }
}

const KNOWN_PLACES: &[(&str, Region)] = &[
    ("delhi", Region::North),
    ("new_delhi", Region::North),
    ("punjab", Region::North),
    ("haryana", Region::North),
    ("chandigarh", Region::North),
    ("lucknow", Region::North),
    ("uttar_pradesh", Region::North),
    ("kanpur", Region::North),
    ("jaipur", Region::Central),
    ("rajasthan", Region::Central),
    ("bhopal", Region::Central),
    ("indore", Region::Central),
    ("madhya_pradesh", Region::Central),
    ("nagpur", Region::Central),
    ("raipur", Region::Central),
    ("ahmedabad", Region::Central),
    ("gujarat", Region::Central),
    ("mumbai", Region::South),
    ("pune", Region::South),
    ("maharashtra", Region::South),
    ("hyderabad", Region::South),
    ("bangalore", Region::South),
    ("bengaluru", Region::South),
    ("karnataka", Region::South),
    ("chennai", Region::South),
    ("tamil_nadu", Region::South),
    ("kerala", Region::South),
    ("kochi", Region::South),
    ("kolkata", Region::East),
    ("west_bengal", Region::East),
    ("patna", Region::East),
    ("bihar", Region::East),
    ("bhubaneswar", Region::East),
    ("odisha", Region::East),
    ("ranchi", Region::East),
    ("guwahati", Region::Northeast),
    ("assam", Region::Northeast),
    ("shillong", Region::Northeast),
    ("imphal", Region::Northeast),
    ("agartala", Region::Northeast),
];

/// Normalized location handed to the engine by the geocoding layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: Option<Region>,
}

impl LocationRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), latitude: None, longitude: None, region: None }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn resolve_region(&self) -> Region {
        if let Some(region) = self.region {
            return region;
        }
        if let Some((lat, lon)) = self.coordinates() {
            return Region::from_coordinates(lat, lon);
        }
        Region::from_place_name(&self.name).unwrap_or(Region::Central)
    }

    /// Key used by the short-lived signal cache.
    pub fn cache_key(&self) -> String {
        let name = normalize_tag(&self.name);
        match self.coordinates() {
            Some((lat, lon)) => format!("{name}@{lat:.2},{lon:.2}"),
            None => name,
        }
    }
}
