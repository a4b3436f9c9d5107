use crate::domain::crop::{CropDefinition, Level};
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore};
use crate::domain::signals::LocationSignalSnapshot;

/// Observed/reference price ratio beyond which a price stops adding score.
pub const PRICE_RATIO_CAP: f64 = 1.3;

const PRICE_WEIGHT: f64 = 0.5;
const DEMAND_WEIGHT: f64 = 0.3;
const CATALOG_DEMAND_WEIGHT: f64 = 0.2;

pub fn score(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> FactorScore {
    if !snapshot.demand_index.is_finite() {
        return FactorScore::neutral(FactorName::Market, "demand index was not usable");
    }

    let reference = crop.base_price_per_unit;
    let observed = snapshot.market_price(&crop.id);
    let ratio = observed.map(|price| price / reference).unwrap_or(1.0);
    if !ratio.is_finite() {
        return FactorScore::neutral(FactorName::Market, "price ratio was not usable");
    }

    let multiplier = snapshot.region.price_multiplier();
    let price_component =
        (ratio.min(PRICE_RATIO_CAP) / PRICE_RATIO_CAP * multiplier).clamp(0.0, 1.0);
    let demand_component = snapshot.demand_index.clamp(0.0, 1.0);
    let catalog_component = catalog_demand(crop.market_demand_level);

    let value = 100.0
        * (PRICE_WEIGHT * price_component
            + DEMAND_WEIGHT * demand_component
            + CATALOG_DEMAND_WEIGHT * catalog_component);

    let basis = match observed {
        None => FactorBasis::ReferencePriceUsed,
        Some(_) if ratio > PRICE_RATIO_CAP => FactorBasis::PriceCapped,
        Some(_) if ratio >= 1.1 => FactorBasis::PriceAboveReference,
        Some(_) if ratio >= 0.9 => FactorBasis::PriceNearReference,
        Some(_) => FactorBasis::PriceBelowReference,
    };
    let detail = match observed {
        Some(price) => format!(
            "mandi price ₹{price:.0}/quintal is {:.0}% of reference ₹{reference:.0}, {} demand, \
             {} price multiplier {multiplier:.2}",
            ratio * 100.0,
            crop.market_demand_level.as_str(),
            snapshot.region,
        ),
        None => format!(
            "no mandi price observed, using reference ₹{reference:.0}/quintal, {} demand",
            crop.market_demand_level.as_str(),
        ),
    };

    FactorScore::new(FactorName::Market, value, basis, detail)
}

pub fn catalog_demand(level: Level) -> f64 {
    match level {
        Level::Low => 0.4,
        Level::Medium => 0.6,
        Level::High => 0.8,
        Level::VeryHigh => 1.0,
    }
}
