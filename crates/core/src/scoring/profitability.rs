use crate::domain::crop::CropDefinition;
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore, NEUTRAL_SCORE};
use crate::domain::signals::LocationSignalSnapshot;

/// Score for the best margin tier, also used when input cost is zero.
pub const TIER_CAP: f64 = 90.0;

pub fn score(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> FactorScore {
    let price = effective_price(crop, snapshot);
    let cost = crop.reference_input_cost_per_area;
    if !price.is_finite() || !cost.is_finite() {
        return FactorScore::neutral(FactorName::Profitability, "price or cost was not usable");
    }

    if cost <= 0.0 {
        return FactorScore::new(
            FactorName::Profitability,
            TIER_CAP,
            FactorBasis::ZeroInputCost,
            "no reference input cost, treated as the top margin tier",
        );
    }
    if !crop.has_known_yield() {
        return FactorScore::new(
            FactorName::Profitability,
            NEUTRAL_SCORE,
            FactorBasis::UnknownYield,
            "reference yield is unknown",
        );
    }

    let revenue = price * crop.reference_yield_per_area;
    let margin = (revenue - cost) / cost;
    let (value, basis) = if margin > 0.5 {
        (TIER_CAP, FactorBasis::HighMargin)
    } else if margin > 0.2 {
        (70.0, FactorBasis::ModerateMargin)
    } else if margin > 0.0 {
        (50.0, FactorBasis::ThinMargin)
    } else {
        (20.0, FactorBasis::NegativeMargin)
    };
    let detail = format!(
        "revenue ₹{revenue:.0}/ha against input cost ₹{cost:.0}/ha, margin {:.0}%",
        margin * 100.0
    );

    FactorScore::new(FactorName::Profitability, value, basis, detail)
}

/// `price × yield − input cost` per hectare, when the yield is known.
pub fn expected_profit(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> Option<f64> {
    if !crop.has_known_yield() {
        return None;
    }
    let profit = effective_price(crop, snapshot) * crop.reference_yield_per_area
        - crop.reference_input_cost_per_area;
    profit.is_finite().then_some(profit)
}

fn effective_price(crop: &CropDefinition, snapshot: &LocationSignalSnapshot) -> f64 {
    snapshot.market_price(&crop.id).unwrap_or(crop.base_price_per_unit)
}

#[cfg(test)]
mod tests {
    use super::{expected_profit, score};
    use crate::domain::crop::CropId;
    use crate::domain::recommendation::FactorBasis;
    use crate::scoring::test_support::{crop, snapshot};

    #[test]
    fn zero_input_cost_scores_tier_cap_without_dividing() {
        let mut free = crop("rice");
        free.reference_input_cost_per_area = 0.0;

        let result = score(&free, &snapshot());

        assert_eq!(result.value, 90.0);
        assert_eq!(result.basis, FactorBasis::ZeroInputCost);
    }

    #[test]
    fn unknown_yield_is_neutral() {
        let mut unknown = crop("rice");
        unknown.reference_yield_per_area = 0.0;

        let result = score(&unknown, &snapshot());

        assert_eq!(result.value, 50.0);
        assert_eq!(result.basis, FactorBasis::UnknownYield);
        assert_eq!(expected_profit(&unknown, &snapshot()), None);
    }

    #[test]
    fn margin_tiers() {
        let mut signals = snapshot();
        let mut item = crop("rice");
        item.reference_yield_per_area = 10.0;
        item.reference_input_cost_per_area = 20_000.0;

        let cases = [
            (3100.0, 90.0, FactorBasis::HighMargin),
            (2500.0, 70.0, FactorBasis::ModerateMargin),
            (2100.0, 50.0, FactorBasis::ThinMargin),
            (2000.0, 20.0, FactorBasis::NegativeMargin),
        ];
        for (price, expected, basis) in cases {
            signals.market_prices.insert(CropId::new("rice"), price);
            let result = score(&item, &signals);
            assert_eq!(result.value, expected, "price {price}");
            assert_eq!(result.basis, basis, "price {price}");
        }
    }

    #[test]
    fn expected_profit_uses_live_price_when_present() {
        let mut signals = snapshot();
        signals.market_prices.insert(CropId::new("wheat"), 2500.0);

        let profit = expected_profit(&crop("wheat"), &signals).expect("known yield");

        assert!((profit - (2500.0 * 45.0 - 25_000.0)).abs() < 1e-6);
    }
}
