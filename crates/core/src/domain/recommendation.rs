use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregation::WeightVector;
use crate::domain::crop::{CropDefinition, CropId, Season};
use crate::domain::location::{LocationRef, Region};
use crate::domain::signals::{Provenance, SignalField};

/// Scoring factors in the order they are emitted on every candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorName {
    Climate,
    Soil,
    Market,
    Seasonal,
    Risk,
    Profitability,
    GovernmentSupport,
}

impl FactorName {
    pub const ALL: [FactorName; 7] = [
        FactorName::Climate,
        FactorName::Soil,
        FactorName::Market,
        FactorName::Seasonal,
        FactorName::Risk,
        FactorName::Profitability,
        FactorName::GovernmentSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::Soil => "soil",
            Self::Market => "market",
            Self::Seasonal => "seasonal",
            Self::Risk => "risk",
            Self::Profitability => "profitability",
            Self::GovernmentSupport => "government_support",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Climate => "climate suitability",
            Self::Soil => "soil compatibility",
            Self::Market => "market outlook",
            Self::Seasonal => "seasonal timing",
            Self::Risk => "risk profile",
            Self::Profitability => "profitability",
            Self::GovernmentSupport => "government support",
        }
    }
}

impl fmt::Display for FactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enumerated rationale rendered by callers next to each factor value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorBasis {
    WithinIdealRange,
    PartialClimateMatch,
    OutsideIdealRange,
    SoilTypeMatched,
    SoilTypeMismatch,
    PriceAboveReference,
    PriceNearReference,
    PriceBelowReference,
    PriceCapped,
    ReferencePriceUsed,
    InSeason,
    YearRound,
    OffSeason,
    LowRisk,
    ModerateRisk,
    HighRisk,
    HighMargin,
    ModerateMargin,
    ThinMargin,
    NegativeMargin,
    ZeroInputCost,
    UnknownYield,
    StrongSupport,
    ModerateSupport,
    LimitedSupport,
    NeutralDefault,
}

pub const NEUTRAL_SCORE: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: FactorName,
    /// Always within `[0, 100]`.
    pub value: f64,
    pub basis: FactorBasis,
    pub detail: String,
}

impl FactorScore {
    /// Clamps `value` into range; a non-finite value becomes the neutral default.
    pub fn new(
        factor: FactorName,
        value: f64,
        basis: FactorBasis,
        detail: impl Into<String>,
    ) -> Self {
        if !value.is_finite() {
            return Self::neutral(factor, "score could not be computed from the inputs");
        }
        Self { factor, value: value.clamp(0.0, 100.0), basis, detail: detail.into() }
    }

    pub fn neutral(factor: FactorName, detail: impl Into<String>) -> Self {
        Self {
            factor,
            value: NEUTRAL_SCORE,
            basis: FactorBasis::NeutralDefault,
            detail: detail.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub crop: CropDefinition,
    pub factor_scores: Vec<FactorScore>,
    pub total_score: f64,
    pub confidence: f64,
    /// `price × yield − input cost` per hectare, absent when yield is unknown.
    pub expected_profit_per_area: Option<f64>,
    pub reasons: Vec<String>,
}

impl ScoredCandidate {
    pub fn factor(&self, factor: FactorName) -> Option<&FactorScore> {
        self.factor_scores.iter().find(|score| score.factor == factor)
    }

    pub fn crop_id(&self) -> &CropId {
        &self.crop.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    EmptyCandidateSet,
    AllScoresBelowThreshold,
    NoLiveSignals,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyCandidateSet => "empty_candidate_set",
            Self::AllScoresBelowThreshold => "all_scores_below_threshold",
            Self::NoLiveSignals => "no_live_signals",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub request_id: Uuid,
    pub location: LocationRef,
    pub region: Region,
    pub season: Season,
    pub generated_at: DateTime<Utc>,
    /// Rank order, non-increasing by total score.
    pub candidates: Vec<ScoredCandidate>,
    pub provenance: Provenance,
    pub degraded: bool,
    pub fallback_reason: Option<FallbackReason>,
    pub weights: WeightVector,
}

impl RecommendationResult {
    pub fn fallback_fields(&self) -> Vec<SignalField> {
        self.provenance.fallback_fields()
    }

    pub fn is_fallback_set(&self) -> bool {
        self.fallback_reason.is_some()
    }

    pub fn top(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }
}

/// Input of [`crate::engine::RecommendationEngine::recommend`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendRequest {
    pub location: LocationRef,
    /// Inferred from the current month when absent.
    pub season: Option<Season>,
    pub soil_type_hint: Option<String>,
    pub top_n: Option<usize>,
    /// `None` scores the whole catalog.
    pub candidates: Option<Vec<CropId>>,
    /// Caller's budget for signal gathering; can only shorten the configured deadline.
    pub deadline: Option<Duration>,
}

impl RecommendRequest {
    pub fn new(location: LocationRef) -> Self {
        Self {
            location,
            season: None,
            soil_type_hint: None,
            top_n: None,
            candidates: None,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_soil_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.soil_type_hint = Some(hint.into());
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = Some(candidates.into_iter().map(CropId::new).collect());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExplainRequest {
    pub location: LocationRef,
    pub crop_id: CropId,
    pub season: Option<Season>,
    pub soil_type_hint: Option<String>,
    pub deadline: Option<Duration>,
}

impl ExplainRequest {
    pub fn new(location: LocationRef, crop_id: impl Into<String>) -> Self {
        Self {
            location,
            crop_id: CropId::new(crop_id),
            season: None,
            soil_type_hint: None,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_soil_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.soil_type_hint = Some(hint.into());
        self
    }
}
