use crate::domain::crop::{CropDefinition, RiskLevel};
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore};
use crate::domain::signals::LocationSignalSnapshot;

/// Seasonal rainfall band with little weather risk, in millimetres.
pub const SAFE_RAINFALL_MM: (f64, f64) = (200.0, 800.0);
/// Distance outside the safe band that counts as full volatility.
pub const VOLATILITY_SPAN_MM: f64 = 400.0;

const VOLATILITY_WEIGHT: f64 = 0.6;
const STATIC_RISK_WEIGHT: f64 = 0.4;

pub fn score(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> FactorScore {
    if !snapshot.rainfall_mm.is_finite() {
        return FactorScore::neutral(FactorName::Risk, "rainfall reading was not usable");
    }

    let volatility = weather_volatility(snapshot.rainfall_mm);
    let static_risk = static_risk(crop.risk_level);
    let value =
        100.0 * (1.0 - (VOLATILITY_WEIGHT * volatility + STATIC_RISK_WEIGHT * static_risk));

    let basis = if value >= 70.0 {
        FactorBasis::LowRisk
    } else if value >= 45.0 {
        FactorBasis::ModerateRisk
    } else {
        FactorBasis::HighRisk
    };
    let detail = format!(
        "{} crop risk, rainfall {:.0} mm gives weather volatility {:.2}",
        crop.risk_level.as_str(),
        snapshot.rainfall_mm,
        volatility,
    );

    FactorScore::new(FactorName::Risk, value, basis, detail)
}

/// 0 inside the safe band, rising to 1 at one span outside it.
pub fn weather_volatility(rainfall_mm: f64) -> f64 {
    let (low, high) = SAFE_RAINFALL_MM;
    let distance = if rainfall_mm < low {
        low - rainfall_mm
    } else if rainfall_mm > high {
        rainfall_mm - high
    } else {
        0.0
    };
    (distance / VOLATILITY_SPAN_MM).min(1.0)
}

pub fn static_risk(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Low => 0.1,
        RiskLevel::Medium => 0.3,
        RiskLevel::High => 0.5,
    }
}
