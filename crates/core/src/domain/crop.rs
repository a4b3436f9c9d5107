use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CropId(pub String);

impl CropId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed numeric interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        let interval = Self { min, max };
        if interval.is_valid() {
            Ok(interval)
        } else {
            Err(DomainError::InvalidInterval { min, max })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance from `value` to the nearest bound, zero when inside.
    pub fn distance_outside(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
    YearRound,
}

impl Season {
    /// Calendar mapping relied on by callers: June to September is kharif,
    /// October to February is rabi, every other month is zaid.
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=9 => Self::Kharif,
            10 | 11 | 12 | 1 | 2 => Self::Rabi,
            _ => Self::Zaid,
        }
    }

    pub fn current() -> Self {
        Self::from_month(Local::now().month())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kharif => "kharif",
            Self::Rabi => "rabi",
            Self::Zaid => "zaid",
            Self::YearRound => "year_round",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_tag(value).as_str() {
            "kharif" | "monsoon" => Ok(Self::Kharif),
            "rabi" | "winter" => Ok(Self::Rabi),
            "zaid" | "zayed" | "summer" => Ok(Self::Zaid),
            "year_round" | "yearround" | "perennial" | "all_season" => Ok(Self::YearRound),
            _ => Err(DomainError::UnknownSeason(value.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Loamy,
    SandyLoam,
    Sandy,
    Clay,
    Coastal,
    Calcareous,
    Forest,
    Terai,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alluvial => "alluvial",
            Self::Black => "black",
            Self::Red => "red",
            Self::Laterite => "laterite",
            Self::Loamy => "loamy",
            Self::SandyLoam => "sandy_loam",
            Self::Sandy => "sandy",
            Self::Clay => "clay",
            Self::Coastal => "coastal",
            Self::Calcareous => "calcareous",
            Self::Forest => "forest",
            Self::Terai => "terai",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tag = normalize_tag(value);
        let tag = tag.strip_suffix("_soil").unwrap_or(&tag);
        match tag {
            "alluvial" | "alluvium" => Ok(Self::Alluvial),
            "black" | "black_cotton" | "regur" => Ok(Self::Black),
            "red" | "red_loam" => Ok(Self::Red),
            "laterite" | "lateritic" => Ok(Self::Laterite),
            "loamy" | "loam" => Ok(Self::Loamy),
            "sandy_loam" | "sandy_loamy" => Ok(Self::SandyLoam),
            "sandy" | "sand" | "desert" | "arid" => Ok(Self::Sandy),
            "clay" | "clayey" | "clay_loam" => Ok(Self::Clay),
            "coastal" | "coastal_alluvial" => Ok(Self::Coastal),
            "calcareous" => Ok(Self::Calcareous),
            "forest" | "mountain" | "hill" => Ok(Self::Forest),
            "terai" => Ok(Self::Terai),
            _ => Err(DomainError::UnknownSoilType(value.to_string())),
        }
    }
}

/// Four-step ordinal used for support, demand, export potential and volatility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Cereal,
    Pulse,
    Oilseed,
    Vegetable,
    Fibre,
    Cash,
    Spice,
    Fruit,
}

/// Relative importance of each climate dimension for one crop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClimateWeights {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

impl ClimateWeights {
    pub fn sum(&self) -> f64 {
        self.temperature + self.humidity + self.rainfall
    }

    fn is_valid(&self) -> bool {
        let parts = [self.temperature, self.humidity, self.rainfall];
        parts.iter().all(|part| part.is_finite() && *part >= 0.0)
            && (self.sum() - 1.0).abs() <= 1e-9
    }
}

impl Default for ClimateWeights {
    fn default() -> Self {
        Self { temperature: 0.5, humidity: 0.3, rainfall: 0.2 }
    }
}

/// Immutable reference record for one crop.
///
/// Prices are rupees per quintal, costs rupees per hectare and yields
/// quintals per hectare. A yield of zero marks an unknown yield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    pub id: CropId,
    pub display_name: String,
    pub localized_name: String,
    pub category: CropCategory,
    pub suitable_seasons: Vec<Season>,
    pub suitable_soil_types: Vec<SoilType>,
    pub ph_range: Interval,
    pub temperature_range: Interval,
    pub humidity_range: Interval,
    pub rainfall_range: Interval,
    pub climate_weights: ClimateWeights,
    pub duration_days: u32,
    pub base_price_per_unit: f64,
    pub reference_input_cost_per_area: f64,
    pub reference_yield_per_area: f64,
    pub government_support_level: Level,
    pub market_demand_level: Level,
    pub export_potential_level: Level,
    pub risk_level: RiskLevel,
    pub volatility: Level,
}

impl CropDefinition {
    pub fn is_year_round(&self) -> bool {
        self.suitable_seasons.contains(&Season::YearRound)
    }

    /// A `YearRound` request places no seasonal constraint on any crop.
    pub fn is_in_season(&self, season: Season) -> bool {
        season == Season::YearRound
            || self.is_year_round()
            || self.suitable_seasons.contains(&season)
    }

    pub fn suits_soil(&self, soil: SoilType) -> bool {
        self.suitable_soil_types.contains(&soil)
    }

    pub fn has_known_yield(&self) -> bool {
        self.reference_yield_per_area > 0.0
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidCrop {
            crop: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.as_str().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if self.suitable_seasons.is_empty() {
            return Err(invalid("at least one suitable season is required"));
        }
        let intervals = [
            ("ph_range", &self.ph_range),
            ("temperature_range", &self.temperature_range),
            ("humidity_range", &self.humidity_range),
            ("rainfall_range", &self.rainfall_range),
        ];
        for (name, interval) in intervals {
            if !interval.is_valid() {
                return Err(invalid(&format!("{name} lower bound must not exceed upper bound")));
            }
        }
        if !self.climate_weights.is_valid() {
            return Err(invalid("climate weights must be non-negative and sum to 1.0"));
        }
        if self.duration_days == 0 {
            return Err(invalid("duration_days must be greater than zero"));
        }
        if !(self.base_price_per_unit.is_finite() && self.base_price_per_unit > 0.0) {
            return Err(invalid("base_price_per_unit must be positive"));
        }
        if !(self.reference_input_cost_per_area.is_finite()
            && self.reference_input_cost_per_area >= 0.0)
        {
            return Err(invalid("reference_input_cost_per_area must not be negative"));
        }
        if !(self.reference_yield_per_area.is_finite() && self.reference_yield_per_area >= 0.0) {
            return Err(invalid("reference_yield_per_area must not be negative"));
        }

        Ok(())
    }
}

pub(crate) fn normalize_tag(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch == ' ' || ch == '-' { '_' } else { ch })
        .collect()
}
