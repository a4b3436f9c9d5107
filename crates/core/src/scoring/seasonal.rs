use crate::domain::crop::{CropDefinition, Season};
use crate::domain::recommendation::{FactorBasis, FactorName, FactorScore};

/// Off-season crops are penalized, never excluded.
pub const OFF_SEASON_SCORE: f64 = 20.0;

const SEASON_WEIGHT: f64 = 0.7;
const DURATION_WEIGHT: f64 = 0.3;

pub fn score(crop: &CropDefinition, season: Season) -> FactorScore {
    let (season_component, basis) = if crop.is_year_round() {
        (100.0, FactorBasis::YearRound)
    } else if crop.is_in_season(season) {
        (100.0, FactorBasis::InSeason)
    } else {
        (OFF_SEASON_SCORE, FactorBasis::OffSeason)
    };
    let duration_component = duration_score(crop.duration_days);

    let value = SEASON_WEIGHT * season_component + DURATION_WEIGHT * duration_component;
    let seasons =
        crop.suitable_seasons.iter().map(Season::as_str).collect::<Vec<_>>().join("/");
    let detail = match basis {
        FactorBasis::YearRound => {
            format!("grown year-round, {} days to harvest", crop.duration_days)
        }
        FactorBasis::InSeason => format!(
            "{season} is a sowing season ({seasons}), {} days to harvest",
            crop.duration_days
        ),
        _ => format!(
            "{season} is outside the usual sowing seasons ({seasons}), {} days to harvest",
            crop.duration_days
        ),
    };

    FactorScore::new(FactorName::Seasonal, value, basis, detail)
}

/// Shorter crops turn land around faster.
pub fn duration_score(duration_days: u32) -> f64 {
    match duration_days {
        0..=90 => 90.0,
        91..=150 => 70.0,
        _ => 50.0,
    }
}
