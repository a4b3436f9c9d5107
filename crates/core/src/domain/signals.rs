use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::crop::{CropId, SoilType};
use crate::domain::location::{LocationRef, Region};

/// One field of a [`LocationSignalSnapshot`] whose origin is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalField {
    Temperature,
    Humidity,
    Rainfall,
    SoilType,
    SoilPh,
    NutrientIndex,
    MarketPrice,
    DemandIndex,
    Support,
}

impl SignalField {
    pub const ALL: [SignalField; 9] = [
        SignalField::Temperature,
        SignalField::Humidity,
        SignalField::Rainfall,
        SignalField::SoilType,
        SignalField::SoilPh,
        SignalField::NutrientIndex,
        SignalField::MarketPrice,
        SignalField::DemandIndex,
        SignalField::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Rainfall => "rainfall",
            Self::SoilType => "soil_type",
            Self::SoilPh => "soil_ph",
            Self::NutrientIndex => "nutrient_index",
            Self::MarketPrice => "market_price",
            Self::DemandIndex => "demand_index",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for SignalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrigin {
    Live,
    Fallback,
    StaleCache,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProvenance {
    pub origin: SignalOrigin,
    /// Provider name for live and cached fields, default table name otherwise.
    pub source: String,
}

/// Per-field record of where each snapshot value came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    fields: BTreeMap<SignalField, FieldProvenance>,
}

impl Provenance {
    pub fn record(&mut self, field: SignalField, origin: SignalOrigin, source: impl Into<String>) {
        self.fields.insert(field, FieldProvenance { origin, source: source.into() });
    }

    /// Fields never recorded count as fallback.
    pub fn origin(&self, field: SignalField) -> SignalOrigin {
        self.fields.get(&field).map(|entry| entry.origin).unwrap_or(SignalOrigin::Fallback)
    }

    pub fn source(&self, field: SignalField) -> Option<&str> {
        self.fields.get(&field).map(|entry| entry.source.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalField, &FieldProvenance)> {
        self.fields.iter().map(|(field, entry)| (*field, entry))
    }

    pub fn fallback_fields(&self) -> Vec<SignalField> {
        SignalField::ALL
            .into_iter()
            .filter(|field| self.origin(*field) == SignalOrigin::Fallback)
            .collect()
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback_fields().len()
    }

    /// More than half of the tracked fields were synthesized.
    pub fn is_mostly_fallback(&self) -> bool {
        self.fallback_count() * 2 > SignalField::ALL.len()
    }

    pub fn all_fallback(&self) -> bool {
        self.fallback_count() == SignalField::ALL.len()
    }
}

/// Announced minimum support prices and active schemes per crop.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernmentSupportSignal {
    pub msp: BTreeMap<CropId, f64>,
    pub schemes: BTreeMap<CropId, Vec<String>>,
}

impl GovernmentSupportSignal {
    pub fn msp_for(&self, crop: &CropId) -> Option<f64> {
        self.msp.get(crop).copied().filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn schemes_for(&self, crop: &CropId) -> &[String] {
        self.schemes.get(crop).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.msp.is_empty() && self.schemes.is_empty()
    }
}

/// Every signal the scorers read for one request, already gap-filled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSignalSnapshot {
    pub location: LocationRef,
    pub region: Region,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall_mm: f64,
    pub soil_type: SoilType,
    pub soil_ph: f64,
    pub nutrient_index: f64,
    pub market_prices: BTreeMap<CropId, f64>,
    pub demand_index: f64,
    pub support: GovernmentSupportSignal,
    pub provenance: Provenance,
}

impl LocationSignalSnapshot {
    /// Observed mandi price for a crop, ignoring non-positive values.
    pub fn market_price(&self, crop: &CropId) -> Option<f64> {
        self.market_prices.get(crop).copied().filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn origin(&self, field: SignalField) -> SignalOrigin {
        self.provenance.origin(field)
    }
}
