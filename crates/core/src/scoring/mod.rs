//! Factor scorers
//!
//! Seven pure scorers, one per factor, each mapping a crop and a gap-filled
//! signal snapshot to a clamped 0-100 [`FactorScore`]. [`CropScorer`] runs
//! them in emission order and aggregates the result with the deployment's
//! weight vector.

pub mod climate;
pub mod market;
pub mod profitability;
pub mod risk;
pub mod seasonal;
pub mod soil;
pub mod support;

use crate::aggregation::{ScoreAggregator, SoilWeights, WeightVector};
use crate::domain::crop::{CropDefinition, Season};
use crate::domain::recommendation::{FactorScore, ScoredCandidate};
use crate::domain::signals::LocationSignalSnapshot;
use crate::errors::EngineError;

/// Highest confidence ever attached to a candidate.
pub const MAX_CONFIDENCE: f64 = 0.95;

const EXCELLENT_THRESHOLD: f64 = 70.0;
const GOOD_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct CropScorer {
    aggregator: ScoreAggregator,
    soil_weights: SoilWeights,
}

impl CropScorer {
    pub fn new(weights: WeightVector, soil_weights: SoilWeights) -> Result<Self, EngineError> {
        soil_weights.validate()?;
        Ok(Self { aggregator: ScoreAggregator::new(weights)?, soil_weights })
    }

    pub fn weights(&self) -> &WeightVector {
        self.aggregator.weights()
    }

    /// All seven factors in emission order.
    pub fn factor_scores(
        &self,
        crop: &CropDefinition,
        snapshot: &LocationSignalSnapshot,
        season: Season,
    ) -> Vec<FactorScore> {
        vec![
            climate::score(crop, snapshot),
            soil::score(crop, snapshot, &self.soil_weights),
            market::score(crop, snapshot),
            seasonal::score(crop, season),
            risk::score(crop, snapshot),
            profitability::score(crop, snapshot),
            support::score(crop, snapshot),
        ]
    }

    pub fn score(
        &self,
        crop: &CropDefinition,
        snapshot: &LocationSignalSnapshot,
        season: Season,
    ) -> ScoredCandidate {
        let factor_scores = self.factor_scores(crop, snapshot, season);
        let total_score = self.aggregator.total_score(&factor_scores);
        let expected_profit_per_area = profitability::expected_profit(crop, snapshot);
        let reasons = reasons(&factor_scores, expected_profit_per_area);

        ScoredCandidate {
            crop: crop.clone(),
            factor_scores,
            total_score,
            confidence: (total_score / 100.0).min(MAX_CONFIDENCE),
            expected_profit_per_area,
            reasons,
        }
    }

    pub fn score_all(
        &self,
        snapshot: &LocationSignalSnapshot,
        season: Season,
        crops: &[&CropDefinition],
    ) -> Vec<ScoredCandidate> {
        crops.iter().map(|crop| self.score(crop, snapshot, season)).collect()
    }
}

/// One human-readable line per factor, strongest first.
fn reasons(scores: &[FactorScore], expected_profit: Option<f64>) -> Vec<String> {
    let mut ordered: Vec<&FactorScore> = scores.iter().collect();
    ordered.sort_by(|left, right| right.value.total_cmp(&left.value));

    let mut lines: Vec<String> = ordered
        .into_iter()
        .map(|score| {
            let grade = if score.value >= EXCELLENT_THRESHOLD {
                "Excellent"
            } else if score.value >= GOOD_THRESHOLD {
                "Good"
            } else {
                "Moderate"
            };
            format!("{grade} {} ({:.0}/100): {}", score.factor.label(), score.value, score.detail)
        })
        .collect();

    if let Some(profit) = expected_profit {
        lines.push(format!("Expected profit about ₹{profit:.0} per hectare"));
    }
    lines
}


#[cfg(test)]
mod tests {
    use super::test_support::{crop, snapshot};
    use super::CropScorer;
    use crate::aggregation::{SoilWeights, DEFAULT_WEIGHTS};
    use crate::catalog::CropCatalog;
    use crate::domain::crop::Season;
    use crate::domain::recommendation::FactorName;

    fn scorer() -> CropScorer {
        CropScorer::new(DEFAULT_WEIGHTS, SoilWeights::default()).expect("valid weights")
    }

    #[test]
    fn factors_are_emitted_in_canonical_order() {
        let candidate = scorer().score(&crop("rice"), &snapshot(), Season::Kharif);
        let order: Vec<FactorName> =
            candidate.factor_scores.iter().map(|score| score.factor).collect();

        assert_eq!(order, FactorName::ALL.to_vec());
    }

    #[test]
    fn every_catalog_crop_stays_in_bounds_for_extreme_snapshots() {
        let catalog = CropCatalog::builtin().expect("builtin catalog");
        let scorer = scorer();
        let mut extremes = vec![snapshot()];
        for (temperature, humidity, rainfall) in
            [(-20.0, 0.0, 0.0), (55.0, 100.0, 6000.0), (f64::NAN, f64::INFINITY, -5.0)]
        {
            let mut signals = snapshot();
            signals.temperature = temperature;
            signals.humidity = humidity;
            signals.rainfall_mm = rainfall;
            signals.nutrient_index = 7.0;
            signals.demand_index = -3.0;
            extremes.push(signals);
        }

        for signals in &extremes {
            for definition in catalog.iter() {
                for season in [Season::Kharif, Season::Rabi, Season::Zaid, Season::YearRound] {
                    let candidate = scorer.score(definition, signals, season);
                    assert!((0.0..=100.0).contains(&candidate.total_score), "{}", definition.id);
                    assert!(candidate.confidence <= 0.95);
                    for factor in &candidate.factor_scores {
                        assert!((0.0..=100.0).contains(&factor.value), "{}", factor.factor);
                    }
                }
            }
        }
    }

    #[test]
    fn reasons_cover_every_factor_and_profit() {
        let candidate = scorer().score(&crop("wheat"), &snapshot(), Season::Rabi);

        assert_eq!(candidate.reasons.len(), 8);
        assert!(candidate.reasons.last().is_some_and(|line| line.contains("per hectare")));
    }
}
