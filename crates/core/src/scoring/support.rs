use crate::domain::crop::{CropDefinition, Level};
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore};
use crate::domain::signals::{LocationSignalSnapshot, SignalField, SignalOrigin};

const LEVEL_WEIGHT: f64 = 0.7;
const COVERAGE_WEIGHT: f64 = 0.3;

pub fn score(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> FactorScore {
    let level = level_score(crop.government_support_level);
    let msp = snapshot.support.msp_for(&crop.id);
    let coverage = match (snapshot.origin(SignalField::Support), msp) {
        (SignalOrigin::Fallback, _) => 50.0,
        (_, Some(_)) => 100.0,
        (_, None) => 20.0,
    };

    let value = LEVEL_WEIGHT * level + COVERAGE_WEIGHT * coverage;
    let basis = if value >= 75.0 {
        FactorBasis::StrongSupport
    } else if value >= 50.0 {
        FactorBasis::ModerateSupport
    } else {
        FactorBasis::LimitedSupport
    };

    let mut detail = format!("{} government support", crop.government_support_level.as_str());
    if let Some(msp) = msp {
        detail.push_str(&format!(", MSP ₹{msp:.0}/quintal"));
    }
    let schemes = snapshot.support.schemes_for(&crop.id);
    if !schemes.is_empty() {
        detail.push_str(&format!(", schemes: {}", schemes.join(", ")));
    }

    FactorScore::new(FactorName::GovernmentSupport, value, basis, detail)
}

pub fn level_score(level: Level) -> f64 {
    match level {
        Level::Low => 30.0,
        Level::Medium => 55.0,
        Level::High => 80.0,
        Level::VeryHigh => 100.0,
    }
}
