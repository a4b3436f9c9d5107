use crate::aggregation::SoilWeights;
use crate::domain::crop::CropDefinition;
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore};
use crate::domain::signals::LocationSignalSnapshot;

const TYPE_MATCH: f64 = 1.0;
const TYPE_MISMATCH: f64 = 0.3;
const MIN_PH_FIT: f64 = 0.1;

pub fn score(
    crop: &CropDefinition,
    snapshot: &LocationSignalSnapshot,
    weights: &SoilWeights,
) -> FactorScore {
    if !snapshot.soil_ph.is_finite() || !snapshot.nutrient_index.is_finite() {
        return FactorScore::neutral(FactorName::Soil, "soil readings were not usable");
    }

    let matched = crop.suits_soil(snapshot.soil_type);
    let type_fit = if matched { TYPE_MATCH } else { TYPE_MISMATCH };
    let ph_match = ph_fit(crop, snapshot.soil_ph);
    let nutrient_fit = snapshot.nutrient_index.clamp(0.0, 1.0);

    let value = 100.0
        * (weights.soil_type * type_fit + weights.ph * ph_match + weights.nutrient * nutrient_fit);
    let basis = if matched { FactorBasis::SoilTypeMatched } else { FactorBasis::SoilTypeMismatch };
    let detail = format!(
        "{} soil {} {}, pH {:.1} (ideal {:.1}-{:.1}), nutrient index {:.2}",
        snapshot.soil_type,
        if matched { "suits" } else { "is not preferred by" },
        crop.display_name,
        snapshot.soil_ph,
        crop.ph_range.min,
        crop.ph_range.max,
        nutrient_fit,
    );

    FactorScore::new(FactorName::Soil, value, basis, detail)
}

fn ph_fit(crop: &CropDefinition, ph: f64) -> f64 {
    let distance = crop.ph_range.distance_outside(ph);
    (1.0 - distance / 2.0).max(MIN_PH_FIT)
}

#[cfg(test)]
mod tests {
    use super::score;
    use crate::aggregation::SoilWeights;
    use crate::domain::crop::SoilType;
    use crate::domain::recommendation::FactorBasis;
    use crate::scoring::test_support::{crop, snapshot};

    #[test]
    fn matching_soil_in_ph_range_scores_by_nutrients() {
        let mut signals = snapshot();
        signals.soil_type = SoilType::Alluvial;
        signals.soil_ph = 6.5;
        signals.nutrient_index = 0.5;

        let result = score(&crop("wheat"), &signals, &SoilWeights::default());

        assert!((result.value - 85.0).abs() < 1e-9);
        assert_eq!(result.basis, FactorBasis::SoilTypeMatched);
    }

    #[test]
    fn mismatch_and_acidic_soil_are_penalized() {
        let mut signals = snapshot();
        signals.soil_type = SoilType::Laterite;
        signals.soil_ph = 5.0;
        signals.nutrient_index = 1.0;

        let result = score(&crop("wheat"), &signals, &SoilWeights::default());

        // 0.4 * 0.3 + 0.3 * 0.5 + 0.3 * 1.0
        assert!((result.value - 57.0).abs() < 1e-9);
        assert_eq!(result.basis, FactorBasis::SoilTypeMismatch);
    }

    #[test]
    fn configured_weights_are_respected() {
        let mut signals = snapshot();
        signals.soil_type = SoilType::Sandy;
        signals.soil_ph = 6.5;
        signals.nutrient_index = 0.0;
        let weights = SoilWeights { soil_type: 0.0, ph: 1.0, nutrient: 0.0 };

        let result = score(&crop("wheat"), &signals, &weights);

        assert!((result.value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn nan_ph_yields_neutral_default() {
        let mut signals = snapshot();
        signals.soil_ph = f64::NAN;

        let result = score(&crop("rice"), &signals, &SoilWeights::default());

        assert_eq!(result.value, 50.0);
        assert_eq!(result.basis, FactorBasis::NeutralDefault);
    }
}
