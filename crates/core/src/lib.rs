pub mod aggregation;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod fallback;
pub mod providers;
pub mod ranking;
pub mod scoring;
pub mod telemetry;

pub use aggregation::{ScoreAggregator, SoilWeights, WeightVector, DEFAULT_WEIGHTS};
pub use catalog::{CropCatalog, STAPLE_CROPS};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::crop::{CropDefinition, CropId, Interval, Level, RiskLevel, Season, SoilType};
pub use domain::location::{LocationRef, Region};
pub use domain::recommendation::{
    ExplainRequest, FactorBasis, FactorName, FactorScore, FallbackReason, RecommendRequest,
    RecommendationResult, ScoredCandidate,
};
pub use domain::signals::{
    GovernmentSupportSignal, LocationSignalSnapshot, Provenance, SignalField, SignalOrigin,
};
pub use engine::RecommendationEngine;
pub use errors::{DomainError, EngineError, ProviderError};
pub use fallback::FallbackCoordinator;
pub use providers::{
    MarketFragment, ProviderSet, ProviderSlot, SignalProvider, SoilFragment, StaticProvider,
    SupportFragment, UnavailableProvider, WeatherFragment,
};
pub use telemetry::init_logging;
