use crate::domain::crop::{CropDefinition, Interval};
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore};
use crate::domain::signals::LocationSignalSnapshot;

/// Distance outside the ideal interval at which a dimension bottoms out.
pub const TEMPERATURE_TOLERANCE_C: f64 = 10.0;
pub const HUMIDITY_TOLERANCE_PCT: f64 = 50.0;
pub const RAINFALL_TOLERANCE_MM: f64 = 1000.0;

/// Floor keeps a badly matched crop comparable instead of excluded.
pub const MIN_DIMENSION_SCORE: f64 = 10.0;

pub fn score(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> FactorScore {
    let observed = [snapshot.temperature, snapshot.humidity, snapshot.rainfall_mm];
    if observed.iter().any(|value| !value.is_finite()) {
        return FactorScore::neutral(FactorName::Climate, "climate readings were not usable");
    }

    let temperature =
        dimension_score(&crop.temperature_range, snapshot.temperature, TEMPERATURE_TOLERANCE_C);
    let humidity = dimension_score(&crop.humidity_range, snapshot.humidity, HUMIDITY_TOLERANCE_PCT);
    let rainfall =
        dimension_score(&crop.rainfall_range, snapshot.rainfall_mm, RAINFALL_TOLERANCE_MM);

    let weights = &crop.climate_weights;
    let value = temperature * weights.temperature
        + humidity * weights.humidity
        + rainfall * weights.rainfall;

    let inside = [
        crop.temperature_range.contains(snapshot.temperature),
        crop.humidity_range.contains(snapshot.humidity),
        crop.rainfall_range.contains(snapshot.rainfall_mm),
    ]
    .into_iter()
    .filter(|inside| *inside)
    .count();
    let basis = match inside {
        3 => FactorBasis::WithinIdealRange,
        0 => FactorBasis::OutsideIdealRange,
        _ => FactorBasis::PartialClimateMatch,
    };

    let detail = format!(
        "temperature {:.1}°C (ideal {:.0}-{:.0}), humidity {:.0}% (ideal {:.0}-{:.0}), \
         rainfall {:.0} mm (ideal {:.0}-{:.0})",
        snapshot.temperature,
        crop.temperature_range.min,
        crop.temperature_range.max,
        snapshot.humidity,
        crop.humidity_range.min,
        crop.humidity_range.max,
        snapshot.rainfall_mm,
        crop.rainfall_range.min,
        crop.rainfall_range.max,
    );

    FactorScore::new(FactorName::Climate, value, basis, detail)
}

/// 100 inside the interval, then linear decay down to the floor.
pub fn dimension_score(ideal: &Interval, observed: f64, tolerance: f64) -> f64 {
    let distance = ideal.distance_outside(observed);
    if distance == 0.0 {
        return 100.0;
    }
    (100.0 - 100.0 * distance / tolerance).max(MIN_DIMENSION_SCORE)
}
