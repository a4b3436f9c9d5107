//! Weighted aggregation of factor scores into one total per crop.

use serde::{Deserialize, Serialize};

use crate::domain::recommendation::{FactorName, FactorScore};
use crate::errors::EngineError;

/// Allowed drift of a weight vector's sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// The single canonical weight vector for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub climate: f64,
    pub market: f64,
    pub soil: f64,
    pub seasonal: f64,
    pub government_support: f64,
    pub risk: f64,
    pub profitability: f64,
}

pub const DEFAULT_WEIGHTS: WeightVector = WeightVector {
    climate: 0.25,
    market: 0.20,
    soil: 0.15,
    seasonal: 0.15,
    government_support: 0.05,
    risk: 0.05,
    profitability: 0.15,
};

impl Default for WeightVector {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl WeightVector {
    pub fn weight(&self, factor: FactorName) -> f64 {
        match factor {
            FactorName::Climate => self.climate,
            FactorName::Soil => self.soil,
            FactorName::Market => self.market,
            FactorName::Seasonal => self.seasonal,
            FactorName::Risk => self.risk,
            FactorName::Profitability => self.profitability,
            FactorName::GovernmentSupport => self.government_support,
        }
    }

    pub fn sum(&self) -> f64 {
        FactorName::ALL.iter().map(|factor| self.weight(*factor)).sum()
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for factor in FactorName::ALL {
            let weight = self.weight(factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidWeightConfiguration(format!(
                    "weight for `{factor}` must be a finite non-negative number, got {weight}"
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(EngineError::InvalidWeightConfiguration(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(())
    }
}

/// Split of the soil factor between type match, pH fit and nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilWeights {
    pub soil_type: f64,
    pub ph: f64,
    pub nutrient: f64,
}

pub const DEFAULT_SOIL_WEIGHTS: SoilWeights =
    SoilWeights { soil_type: 0.4, ph: 0.3, nutrient: 0.3 };

impl Default for SoilWeights {
    fn default() -> Self {
        DEFAULT_SOIL_WEIGHTS
    }
}

impl SoilWeights {
    pub fn validate(&self) -> Result<(), EngineError> {
        let parts = [self.soil_type, self.ph, self.nutrient];
        if parts.iter().any(|part| !part.is_finite() || *part < 0.0) {
            return Err(EngineError::InvalidSoilWeights(
                "soil weights must be finite non-negative numbers".to_string(),
            ));
        }

        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(EngineError::InvalidSoilWeights(format!(
                "soil weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(())
    }
}

/// Applies a validated [`WeightVector`] to factor scores.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: WeightVector,
}

impl ScoreAggregator {
    /// Fails when the vector is invalid; construction happens at startup only.
    pub fn new(weights: WeightVector) -> Result<Self, EngineError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// `Σ weight × value`, clamped to `[0, 100]`.
    pub fn total_score(&self, scores: &[FactorScore]) -> f64 {
        let total: f64 =
            scores.iter().map(|score| self.weights.weight(score.factor) * score.value).sum();

        if total.is_finite() {
            total.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}
