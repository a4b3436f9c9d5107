mod support;

use krishi_core::{
    ExplainRequest, FactorBasis, FactorName, RecommendRequest, Season, SignalField, SignalOrigin,
};
use serde_json::Value;

use support::{cuttack, engine, kharif_weather, live_providers, wheat_weather};

fn kharif_request() -> RecommendRequest {
    RecommendRequest::new(cuttack())
        .with_season(Season::Kharif)
        .with_candidates(["rice", "wheat", "cotton"])
}

#[tokio::test]
async fn rice_leads_kharif_candidates_and_wheat_pays_the_season_penalty() {
    let engine = engine(live_providers(kharif_weather()));

    let result = engine.recommend(kharif_request()).await;

    assert!(!result.degraded);
    assert_eq!(result.fallback_reason, None);
    let order: Vec<&str> =
        result.candidates.iter().map(|candidate| candidate.crop_id().as_str()).collect();
    assert_eq!(order, vec!["rice", "cotton", "wheat"]);

    let wheat = &result.candidates[2];
    let seasonal = wheat.factor(FactorName::Seasonal).expect("seasonal factor");
    assert_eq!(seasonal.basis, FactorBasis::OffSeason);
    assert!(result.candidates[0].total_score > wheat.total_score);
}

#[tokio::test]
async fn seasonal_penalty_outweighs_a_better_climate_match() {
    let engine = engine(live_providers(wheat_weather()));

    let result = engine.recommend(kharif_request().with_candidates(["rice", "wheat"])).await;

    let rice = result.candidates.iter().find(|c| c.crop_id().as_str() == "rice").expect("rice");
    let wheat = result.candidates.iter().find(|c| c.crop_id().as_str() == "wheat").expect("wheat");
    let climate = |candidate: &krishi_core::ScoredCandidate| {
        candidate.factor(FactorName::Climate).map(|score| score.value).unwrap_or_default()
    };

    assert!(climate(wheat) > climate(rice));
    assert!(rice.total_score > wheat.total_score);
    assert_eq!(result.candidates[0].crop_id().as_str(), "rice");
}

#[tokio::test]
async fn explain_matches_the_batch_score() {
    let engine = engine(live_providers(kharif_weather()));

    let batch = engine.recommend(kharif_request()).await;
    let single = engine
        .explain(ExplainRequest::new(cuttack(), "rice").with_season(Season::Kharif))
        .await
        .expect("rice is in the catalog");

    let batch_rice = batch
        .candidates
        .iter()
        .find(|candidate| candidate.crop_id().as_str() == "rice")
        .expect("rice in batch");
    assert_eq!(single.total_score, batch_rice.total_score);
    assert_eq!(single.factor_scores, batch_rice.factor_scores);
    assert_eq!(single.confidence, batch_rice.confidence);
}

#[tokio::test]
async fn identical_requests_produce_identical_order() {
    let engine = engine(live_providers(kharif_weather()));
    let request = RecommendRequest::new(cuttack()).with_season(Season::Kharif).with_top_n(10);

    let first = engine.recommend(request.clone()).await;
    let second = engine.recommend(request).await;

    let ranked = |result: &krishi_core::RecommendationResult| -> Vec<(String, f64)> {
        result
            .candidates
            .iter()
            .map(|candidate| (candidate.crop_id().to_string(), candidate.total_score))
            .collect()
    };
    assert_eq!(ranked(&first), ranked(&second));
    assert_ne!(first.request_id, second.request_id);
}

#[tokio::test]
async fn full_catalog_is_sorted_and_truncated() {
    let engine = engine(live_providers(kharif_weather()));

    let result = engine
        .recommend(RecommendRequest::new(cuttack()).with_season(Season::Kharif).with_top_n(50))
        .await;

    assert_eq!(result.candidates.len(), 10);
    for pair in result.candidates.windows(2) {
        assert!(pair[0].total_score >= pair[1].total_score);
    }
    for candidate in &result.candidates {
        assert!((0.0..=100.0).contains(&candidate.total_score));
        assert!(candidate.confidence <= 0.95);
        assert_eq!(candidate.factor_scores.len(), FactorName::ALL.len());
    }
}

#[tokio::test]
async fn default_top_n_is_four() {
    let engine = engine(live_providers(kharif_weather()));

    let result = engine.recommend(RecommendRequest::new(cuttack()).with_season(Season::Zaid)).await;

    assert_eq!(result.candidates.len(), 4);
    assert_eq!(result.season, Season::Zaid);
}

#[tokio::test]
async fn live_fields_record_their_provider() {
    let engine = engine(live_providers(kharif_weather()));

    let result = engine.recommend(kharif_request()).await;

    assert!(result.fallback_fields().is_empty());
    assert_eq!(result.provenance.origin(SignalField::Rainfall), SignalOrigin::Live);
    assert_eq!(result.provenance.source(SignalField::Rainfall), Some("scripted_weather"));
    assert_eq!(result.provenance.source(SignalField::Support), Some("scripted_support"));
}

#[tokio::test]
async fn soil_hint_overrides_the_soil_provider() {
    let engine = engine(live_providers(kharif_weather()));

    let request = kharif_request().with_soil_type_hint("Black cotton soil");
    let result = engine.recommend(request).await;

    assert_eq!(result.provenance.source(SignalField::SoilType), Some("soil_type_hint"));
    let rice = result.candidates.iter().find(|c| c.crop_id().as_str() == "rice").expect("rice");
    let soil = rice.factor(FactorName::Soil).expect("soil factor");
    assert_eq!(soil.basis, FactorBasis::SoilTypeMismatch);
}

#[tokio::test]
async fn result_serializes_with_every_contract_field() {
    let engine = engine(live_providers(kharif_weather()));

    let result = engine.recommend(kharif_request()).await;
    let payload: Value = serde_json::to_value(&result).expect("result serializes");

    assert_eq!(payload["degraded"], Value::Bool(false));
    assert_eq!(payload["season"], "kharif");
    assert!(payload["request_id"].is_string());
    assert!(payload["provenance"].is_object());
    let first = &payload["candidates"][0];
    assert_eq!(first["crop"]["id"], "rice");
    let factors = first["factor_scores"].as_array().expect("factor list");
    assert_eq!(factors.len(), 7);
    assert!(factors.iter().all(|factor| factor["basis"].is_string()));
    assert!(first["reasons"].as_array().is_some_and(|reasons| !reasons.is_empty()));
}
