//! Ordering, truncation and detection of when the staple set must be served.

use std::cmp::Ordering;

use crate::catalog::CropCatalog;
use crate::config::RankingConfig;
use crate::domain::recommendation::{FallbackReason, ScoredCandidate};

/// Confidence ceiling for any candidate in a degraded result.
pub const DEGRADED_CONFIDENCE_CAP: f64 = 0.5;

#[derive(Clone, Debug)]
pub struct Ranker {
    config: RankingConfig,
}

impl Ranker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Requested count, or the configured default, clamped to `1..=max_top_n`.
    pub fn top_n(&self, requested: Option<usize>) -> usize {
        let max = self.config.max_top_n.max(1);
        requested.unwrap_or(self.config.default_top_n).clamp(1, max)
    }

    /// Why the scored set cannot be returned as is, if it cannot.
    pub fn fallback_reason(&self, candidates: &[ScoredCandidate]) -> Option<FallbackReason> {
        if candidates.is_empty() {
            return Some(FallbackReason::EmptyCandidateSet);
        }
        let minimum = self.config.minimum_score;
        if candidates.iter().all(|candidate| candidate.total_score < minimum) {
            return Some(FallbackReason::AllScoresBelowThreshold);
        }
        None
    }

    /// Sorts, truncates and caps confidence in one pass.
    pub fn select(
        &self,
        mut candidates: Vec<ScoredCandidate>,
        catalog: &CropCatalog,
        top_n: usize,
        degraded: bool,
    ) -> Vec<ScoredCandidate> {
        sort_candidates(&mut candidates, catalog);
        candidates.truncate(top_n);
        if degraded {
            cap_confidence(&mut candidates, DEGRADED_CONFIDENCE_CAP);
        }
        candidates
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

/// Total score descending, then lower risk, higher support, catalog order.
pub fn sort_candidates(candidates: &mut [ScoredCandidate], catalog: &CropCatalog) {
    candidates.sort_by(|a, b| compare(a, b, catalog));
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate, catalog: &CropCatalog) -> Ordering {
    b.total_score
        .total_cmp(&a.total_score)
        .then_with(|| a.crop.risk_level.cmp(&b.crop.risk_level))
        .then_with(|| b.crop.government_support_level.cmp(&a.crop.government_support_level))
        .then_with(|| catalog_position(a, catalog).cmp(&catalog_position(b, catalog)))
}

fn catalog_position(candidate: &ScoredCandidate, catalog: &CropCatalog) -> usize {
    catalog.position(candidate.crop_id()).unwrap_or(usize::MAX)
}

pub fn cap_confidence(candidates: &mut [ScoredCandidate], cap: f64) {
    for candidate in candidates {
        candidate.confidence = candidate.confidence.min(cap);
    }
}
