//! Crop catalog
//!
//! Read-only reference data loaded once per process. The built-in seed table
//! covers the common Indian field crops; hosts may load their own definitions
//! through [`CropCatalog::from_definitions`].

mod seeds;

use std::collections::HashMap;

use crate::domain::crop::{
    ClimateWeights, CropCategory, CropDefinition, CropId, Interval, Level, RiskLevel, Season,
    SoilType,
};
use crate::errors::DomainError;

pub use seeds::CROP_SEEDS;

/// Broadly safe crops returned as the fallback recommendation set.
pub const STAPLE_CROPS: [&str; 4] = ["wheat", "rice", "maize", "potato"];

#[derive(Clone, Debug)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
    index: HashMap<CropId, usize>,
}

impl CropCatalog {
    pub fn builtin() -> Result<Self, DomainError> {
        let definitions = CROP_SEEDS.iter().map(CropSeed::to_definition).collect();
        Self::from_definitions(definitions)
    }

    /// Validates every definition, rejects duplicate ids and requires the staples.
    pub fn from_definitions(crops: Vec<CropDefinition>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(crops.len());
        for (position, crop) in crops.iter().enumerate() {
            crop.validate()?;
            if index.insert(crop.id.clone(), position).is_some() {
                return Err(DomainError::InvalidCrop {
                    crop: crop.id.clone(),
                    reason: "duplicate crop id".to_string(),
                });
            }
        }

        let missing: Vec<&str> = STAPLE_CROPS
            .iter()
            .copied()
            .filter(|staple| !index.contains_key(&CropId::new(*staple)))
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "catalog is missing staple crops required for fallback recommendations: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { crops, index })
    }

    pub fn get(&self, id: &CropId) -> Option<&CropDefinition> {
        self.index.get(id).map(|position| &self.crops[*position])
    }

    /// Position in catalog order, used as the final ranking tie-break.
    pub fn position(&self, id: &CropId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropDefinition> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn staples(&self) -> Vec<&CropDefinition> {
        STAPLE_CROPS.iter().filter_map(|staple| self.get(&CropId::new(*staple))).collect()
    }
}

/// Compact seed row for the built-in table.
#[derive(Clone, Copy, Debug)]
pub struct CropSeed {
    pub id: &'static str,
    pub display_name: &'static str,
    pub localized_name: &'static str,
    pub category: CropCategory,
    pub seasons: &'static [Season],
    pub soils: &'static [SoilType],
    pub ph: (f64, f64),
    pub temperature: (f64, f64),
    pub humidity: (f64, f64),
    pub rainfall: (f64, f64),
    /// Temperature, humidity and rainfall weights.
    pub climate_weights: (f64, f64, f64),
    pub duration_days: u32,
    pub base_price: f64,
    pub input_cost: f64,
    pub yield_per_hectare: f64,
    pub support: Level,
    pub demand: Level,
    pub export: Level,
    pub risk: RiskLevel,
    pub volatility: Level,
}

impl CropSeed {
    pub fn to_definition(&self) -> CropDefinition {
        let interval = |(min, max): (f64, f64)| Interval { min, max };
        let (temperature, humidity, rainfall) = self.climate_weights;

        CropDefinition {
            id: CropId::new(self.id),
            display_name: self.display_name.to_string(),
            localized_name: self.localized_name.to_string(),
            category: self.category,
            suitable_seasons: self.seasons.to_vec(),
            suitable_soil_types: self.soils.to_vec(),
            ph_range: interval(self.ph),
            temperature_range: interval(self.temperature),
            humidity_range: interval(self.humidity),
            rainfall_range: interval(self.rainfall),
            climate_weights: ClimateWeights { temperature, humidity, rainfall },
            duration_days: self.duration_days,
            base_price_per_unit: self.base_price,
            reference_input_cost_per_area: self.input_cost,
            reference_yield_per_area: self.yield_per_hectare,
            government_support_level: self.support,
            market_demand_level: self.demand,
            export_potential_level: self.export,
            risk_level: self.risk,
            volatility: self.volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CropCatalog, CROP_SEEDS, STAPLE_CROPS};
    use crate::domain::crop::{CropId, Interval, Season};
    use crate::errors::DomainError;

    #[test]
    fn builtin_catalog_is_valid_and_contains_staples() {
        let catalog = CropCatalog::builtin().expect("builtin catalog");

        assert_eq!(catalog.len(), CROP_SEEDS.len());
        assert_eq!(catalog.staples().len(), STAPLE_CROPS.len());
        assert_eq!(catalog.position(&CropId::new("rice")), Some(0));
    }

    #[test]
    fn every_seed_has_unit_climate_weights() {
        for seed in CROP_SEEDS {
            let (t, h, r) = seed.climate_weights;
            assert!((t + h + r - 1.0).abs() < 1e-9, "{} climate weights", seed.id);
        }
    }

    #[test]
    fn missing_staples_are_rejected() {
        let definitions = CROP_SEEDS
            .iter()
            .filter(|seed| seed.id != "potato")
            .map(|seed| seed.to_definition())
            .collect();

        let error = CropCatalog::from_definitions(definitions).expect_err("potato is required");
        assert!(matches!(
            error,
            DomainError::InvariantViolation(ref message) if message.contains("potato")
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut definitions: Vec<_> = CROP_SEEDS.iter().map(|seed| seed.to_definition()).collect();
        definitions.push(CROP_SEEDS[0].to_definition());

        let error = CropCatalog::from_definitions(definitions).expect_err("duplicate rice");
        assert!(matches!(
            error,
            DomainError::InvalidCrop { ref reason, .. } if reason.contains("duplicate")
        ));
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let mut definitions: Vec<_> = CROP_SEEDS.iter().map(|seed| seed.to_definition()).collect();
        definitions[1].ph_range = Interval { min: 8.0, max: 6.0 };
        assert!(CropCatalog::from_definitions(definitions.clone()).is_err());

        definitions[1].ph_range = Interval { min: 6.0, max: 7.5 };
        definitions[1].suitable_seasons.clear();
        assert!(CropCatalog::from_definitions(definitions.clone()).is_err());

        definitions[1].suitable_seasons.push(Season::Rabi);
        assert!(CropCatalog::from_definitions(definitions).is_ok());
    }
}
