//! Recommendation engine
//!
//! Wires the catalog, fallback coordinator, scorers and ranker together.
//! Construction validates everything that can be wrong with a deployment;
//! once built, `recommend` always returns a fully populated result.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::WeightVector;
use crate::catalog::CropCatalog;
use crate::config::AppConfig;
use crate::domain::crop::{CropDefinition, CropId, Season};
use crate::domain::recommendation::{
    ExplainRequest, FallbackReason, RecommendRequest, RecommendationResult, ScoredCandidate,
};
use crate::domain::signals::LocationSignalSnapshot;
use crate::errors::EngineError;
use crate::fallback::FallbackCoordinator;
use crate::providers::ProviderSet;
use crate::ranking::{cap_confidence, Ranker, DEGRADED_CONFIDENCE_CAP};
use crate::scoring::CropScorer;

#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: Arc<CropCatalog>,
    scorer: CropScorer,
    ranker: Ranker,
    coordinator: FallbackCoordinator,
}

impl RecommendationEngine {
    /// Fails on invalid factor or soil weights. Never fails afterwards.
    pub fn new(
        config: &AppConfig,
        catalog: CropCatalog,
        providers: ProviderSet,
    ) -> Result<Self, EngineError> {
        let scorer = CropScorer::new(config.weights, config.soil_weights)?;

        info!(
            event_name = "engine.startup.ready",
            crops = catalog.len(),
            weather_provider = providers.weather.name(),
            soil_provider = providers.soil.name(),
            market_provider = providers.market.name(),
            support_provider = providers.support.name(),
            "recommendation engine ready"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            scorer,
            ranker: Ranker::new(config.ranking.clone()),
            coordinator: FallbackCoordinator::new(providers, &config.fallback),
        })
    }

    pub fn with_builtin_catalog(
        config: &AppConfig,
        providers: ProviderSet,
    ) -> Result<Self, EngineError> {
        Self::new(config, CropCatalog::builtin()?, providers)
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &WeightVector {
        self.scorer.weights()
    }

    pub async fn recommend(&self, request: RecommendRequest) -> RecommendationResult {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let season = request.season.unwrap_or_else(Season::current);

        let snapshot = self
            .coordinator
            .assemble(
                &request.location,
                request.soil_type_hint.as_deref(),
                request.deadline,
                request_id,
            )
            .await;

        let crops = self.candidate_crops(request.candidates.as_deref(), request_id);
        let scored = self.score_candidates(&snapshot, season, &crops);
        let top_n = self.ranker.top_n(request.top_n);

        let fallback_reason = if snapshot.provenance.all_fallback() {
            Some(FallbackReason::NoLiveSignals)
        } else {
            self.ranker.fallback_reason(&scored)
        };

        let (candidates, degraded) = match fallback_reason {
            Some(reason) => {
                warn!(
                    event_name = "engine.recommend.fallback_set",
                    correlation_id = %request_id,
                    reason = reason.as_str(),
                    requested_candidates = crops.len(),
                    "returning staple fallback set"
                );
                let staples = self.catalog.staples();
                let scored = self.score_candidates(&snapshot, season, &staples);
                (self.ranker.select(scored, &self.catalog, top_n, true), true)
            }
            None => {
                let degraded = snapshot.provenance.is_mostly_fallback();
                (self.ranker.select(scored, &self.catalog, top_n, degraded), degraded)
            }
        };

        info!(
            event_name = "engine.recommend.completed",
            correlation_id = %request_id,
            location = %request.location.name,
            region = %snapshot.region,
            season = %season,
            returned = candidates.len(),
            top_crop = candidates.first().map(|candidate| candidate.crop_id().as_str()),
            degraded,
            fallback_fields = snapshot.provenance.fallback_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recommendation completed"
        );

        RecommendationResult {
            request_id,
            location: snapshot.location,
            region: snapshot.region,
            season,
            generated_at: Utc::now(),
            candidates,
            provenance: snapshot.provenance,
            degraded,
            fallback_reason,
            weights: *self.scorer.weights(),
        }
    }

    /// Scores one crop through the same pipeline as `recommend`.
    pub async fn explain(&self, request: ExplainRequest) -> Result<ScoredCandidate, EngineError> {
        let crop = self
            .catalog
            .get(&request.crop_id)
            .ok_or_else(|| EngineError::UnknownCrop(request.crop_id.clone()))?;

        let request_id = Uuid::new_v4();
        let season = request.season.unwrap_or_else(Season::current);
        let snapshot = self
            .coordinator
            .assemble(
                &request.location,
                request.soil_type_hint.as_deref(),
                request.deadline,
                request_id,
            )
            .await;

        let mut scored = self.score_candidates(&snapshot, season, &[crop]);
        if snapshot.provenance.is_mostly_fallback() {
            cap_confidence(&mut scored, DEGRADED_CONFIDENCE_CAP);
        }
        let candidate = scored.pop().ok_or_else(|| EngineError::UnknownCrop(crop.id.clone()))?;

        info!(
            event_name = "engine.explain.completed",
            correlation_id = %request_id,
            crop = %candidate.crop_id(),
            season = %season,
            total_score = candidate.total_score,
            "explanation completed"
        );
        Ok(candidate)
    }

    /// Pure scoring path shared by `recommend` and `explain`.
    pub fn score_candidates(
        &self,
        snapshot: &LocationSignalSnapshot,
        season: Season,
        crops: &[&CropDefinition],
    ) -> Vec<ScoredCandidate> {
        self.scorer.score_all(snapshot, season, crops)
    }

    fn candidate_crops(
        &self,
        requested: Option<&[CropId]>,
        request_id: Uuid,
    ) -> Vec<&CropDefinition> {
        let Some(requested) = requested else {
            return self.catalog.iter().collect();
        };

        let mut seen = HashSet::new();
        let mut crops = Vec::with_capacity(requested.len());
        for id in requested {
            if !seen.insert(id) {
                continue;
            }
            match self.catalog.get(id) {
                Some(crop) => crops.push(crop),
                None => warn!(
                    event_name = "engine.recommend.unknown_candidate",
                    correlation_id = %request_id,
                    crop = %id,
                    "skipping candidate missing from the catalog"
                ),
            }
        }
        crops
    }
}

#[cfg(test)]
mod tests {
    use super::RecommendationEngine;
    use crate::aggregation::WeightVector;
    use crate::catalog::CropCatalog;
    use crate::config::AppConfig;
    use crate::domain::crop::{CropId, Season};
    use crate::domain::location::LocationRef;
    use crate::domain::recommendation::{ExplainRequest, FallbackReason, RecommendRequest};
    use crate::errors::EngineError;
    use crate::providers::ProviderSet;

    fn engine() -> RecommendationEngine {
        let config = AppConfig::default();
        RecommendationEngine::with_builtin_catalog(&config, ProviderSet::unavailable())
            .expect("default engine")
    }

    #[test]
    fn invalid_weights_fail_construction() {
        let mut config = AppConfig::default();
        config.weights = WeightVector { climate: 0.9, ..config.weights };

        let result =
            RecommendationEngine::with_builtin_catalog(&config, ProviderSet::unavailable());

        assert!(matches!(result, Err(EngineError::InvalidWeightConfiguration(_))));
    }

    #[test]
    fn invalid_soil_weights_fail_construction() {
        let mut config = AppConfig::default();
        config.soil_weights.ph = 0.9;

        let result = RecommendationEngine::new(
            &config,
            CropCatalog::builtin().expect("builtin catalog"),
            ProviderSet::unavailable(),
        );

        assert!(matches!(result, Err(EngineError::InvalidSoilWeights(_))));
    }

    #[tokio::test]
    async fn no_live_signals_returns_staple_set() {
        let request = RecommendRequest::new(LocationRef::named("Patna")).with_season(Season::Rabi);
        let result = engine().recommend(request).await;

        assert!(result.degraded);
        assert_eq!(result.fallback_reason, Some(FallbackReason::NoLiveSignals));
        assert_eq!(result.candidates.len(), 4);
        assert!(result.candidates.iter().all(|candidate| candidate.confidence <= 0.5));
    }

    #[test]
    fn unknown_and_duplicate_candidates_are_skipped() {
        let engine = engine();
        let requested = vec![CropId::new("rice"), CropId::new("dragonfruit"), CropId::new("rice")];
        let crops = engine.candidate_crops(Some(requested.as_slice()), uuid::Uuid::new_v4());

        let ids: Vec<&str> = crops.iter().map(|crop| crop.id.as_str()).collect();
        assert_eq!(ids, vec!["rice"]);
    }

    #[tokio::test]
    async fn explain_rejects_unknown_crop() {
        let error = engine()
            .explain(ExplainRequest::new(LocationRef::named("Patna"), "dragonfruit"))
            .await
            .expect_err("unknown crop");

        assert_eq!(error, EngineError::UnknownCrop(CropId::new("dragonfruit")));
        assert!(!error.is_startup_failure());
    }
}
