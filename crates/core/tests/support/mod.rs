#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use krishi_core::config::{AppConfig, FallbackConfig};
use krishi_core::{
    CropId, GovernmentSupportSignal, LocationRef, MarketFragment, ProviderError, ProviderSet,
    RecommendationEngine, SignalProvider, SoilFragment, SoilType, StaticProvider, WeatherFragment,
};

/// Sleeps far past any budget before answering.
pub struct SlowProvider<F> {
    pub name: &'static str,
    pub delay: Duration,
    pub fragment: F,
}

#[async_trait]
impl<F> SignalProvider<F> for SlowProvider<F>
where
    F: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self, _location: &LocationRef, _budget: Duration) -> Result<F, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.fragment.clone())
    }
}

pub struct FailingProvider {
    pub name: &'static str,
}

#[async_trait]
impl<F> SignalProvider<F> for FailingProvider
where
    F: Send + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self, _location: &LocationRef, _budget: Duration) -> Result<F, ProviderError> {
        Err(ProviderError::transport(self.name, "connection refused"))
    }
}

/// Monsoon conditions on coastal Odisha alluvium.
pub fn kharif_weather() -> WeatherFragment {
    WeatherFragment { temperature: Some(30.0), humidity: Some(82.0), rainfall_mm: Some(1400.0) }
}

/// Cool and dry enough to be ideal for wheat.
pub fn wheat_weather() -> WeatherFragment {
    WeatherFragment { temperature: Some(20.0), humidity: Some(60.0), rainfall_mm: Some(500.0) }
}

pub fn alluvial_soil() -> SoilFragment {
    SoilFragment { soil_type: Some(SoilType::Alluvial), ph: Some(6.5), nutrient_index: Some(0.7) }
}

pub fn mandi_prices() -> MarketFragment {
    let mut prices = BTreeMap::new();
    prices.insert(CropId::new("rice"), 2_400.0);
    prices.insert(CropId::new("wheat"), 2_300.0);
    prices.insert(CropId::new("cotton"), 7_000.0);
    MarketFragment { prices, demand_index: Some(0.7) }
}

pub fn msp_support() -> GovernmentSupportSignal {
    let mut support = GovernmentSupportSignal::default();
    for (crop, msp) in [("rice", 2_300.0), ("wheat", 2_275.0), ("cotton", 7_121.0)] {
        support.msp.insert(CropId::new(crop), msp);
        support.schemes.insert(CropId::new(crop), vec!["MSP procurement".to_string()]);
    }
    support
}

pub fn live_providers(weather: WeatherFragment) -> ProviderSet {
    ProviderSet::new(
        Arc::new(StaticProvider::new("scripted_weather", weather)),
        Arc::new(StaticProvider::new("scripted_soil", alluvial_soil())),
        Arc::new(StaticProvider::new("scripted_market", mandi_prices())),
        Arc::new(StaticProvider::new("scripted_support", msp_support())),
    )
}

pub fn slow_providers(delay: Duration) -> ProviderSet {
    ProviderSet::new(
        Arc::new(SlowProvider { name: "slow_weather", delay, fragment: kharif_weather() }),
        Arc::new(SlowProvider { name: "slow_soil", delay, fragment: alluvial_soil() }),
        Arc::new(SlowProvider { name: "slow_market", delay, fragment: mandi_prices() }),
        Arc::new(SlowProvider { name: "slow_support", delay, fragment: msp_support() }),
    )
}

pub fn engine(providers: ProviderSet) -> RecommendationEngine {
    engine_with(AppConfig::default(), providers)
}

pub fn engine_with(config: AppConfig, providers: ProviderSet) -> RecommendationEngine {
    RecommendationEngine::with_builtin_catalog(&config, providers).expect("engine should start")
}

pub fn fallback_config(provider_timeout_ms: u64, request_deadline_ms: u64) -> FallbackConfig {
    FallbackConfig { provider_timeout_ms, request_deadline_ms, ..FallbackConfig::default() }
}

pub fn cuttack() -> LocationRef {
    LocationRef::named("Cuttack").with_coordinates(20.46, 85.88)
}
