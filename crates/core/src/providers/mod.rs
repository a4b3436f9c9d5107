//! Signal provider contracts
//!
//! A provider turns a [`LocationRef`] into one fragment of the signal
//! snapshot. Providers must give up once their budget is spent and return no
//! partial data on error; the fallback coordinator enforces the budget again
//! from the outside and never retries within a request.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::crop::{CropId, SoilType};
use crate::domain::location::LocationRef;
use crate::domain::signals::GovernmentSupportSignal;
use crate::errors::ProviderError;

#[async_trait]
pub trait SignalProvider<F>: Send + Sync
where
    F: Send + 'static,
{
    /// Stable name recorded in provenance for every field this provider fills.
    fn name(&self) -> &str;

    async fn fetch(&self, location: &LocationRef, budget: Duration) -> Result<F, ProviderError>;
}

/// Current weather plus seasonal rainfall. Missing readings stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherFragment {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall_mm: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilFragment {
    pub soil_type: Option<SoilType>,
    pub ph: Option<f64>,
    pub nutrient_index: Option<f64>,
}

/// Mandi prices in ₹/quintal keyed by crop, plus an optional demand index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketFragment {
    pub prices: BTreeMap<CropId, f64>,
    pub demand_index: Option<f64>,
}

pub type SupportFragment = GovernmentSupportSignal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSlot {
    Weather,
    Soil,
    Market,
    Support,
}

impl ProviderSlot {
    pub const ALL: [ProviderSlot; 4] =
        [ProviderSlot::Weather, ProviderSlot::Soil, ProviderSlot::Market, ProviderSlot::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Soil => "soil",
            Self::Market => "market",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for ProviderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider per slot, shared across requests.
#[derive(Clone)]
pub struct ProviderSet {
    pub weather: Arc<dyn SignalProvider<WeatherFragment>>,
    pub soil: Arc<dyn SignalProvider<SoilFragment>>,
    pub market: Arc<dyn SignalProvider<MarketFragment>>,
    pub support: Arc<dyn SignalProvider<SupportFragment>>,
}

impl ProviderSet {
    pub fn new(
        weather: Arc<dyn SignalProvider<WeatherFragment>>,
        soil: Arc<dyn SignalProvider<SoilFragment>>,
        market: Arc<dyn SignalProvider<MarketFragment>>,
        support: Arc<dyn SignalProvider<SupportFragment>>,
    ) -> Self {
        Self { weather, soil, market, support }
    }

    /// Every slot fails immediately, so every snapshot is built from defaults.
    pub fn unavailable() -> Self {
        let provider = Arc::new(UnavailableProvider);
        Self {
            weather: provider.clone(),
            soil: provider.clone(),
            market: provider.clone(),
            support: provider,
        }
    }

    pub fn with_weather(mut self, provider: Arc<dyn SignalProvider<WeatherFragment>>) -> Self {
        self.weather = provider;
        self
    }

    pub fn with_soil(mut self, provider: Arc<dyn SignalProvider<SoilFragment>>) -> Self {
        self.soil = provider;
        self
    }

    pub fn with_market(mut self, provider: Arc<dyn SignalProvider<MarketFragment>>) -> Self {
        self.market = provider;
        self
    }

    pub fn with_support(mut self, provider: Arc<dyn SignalProvider<SupportFragment>>) -> Self {
        self.support = provider;
        self
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSet")
            .field("weather", &self.weather.name())
            .field("soil", &self.soil.name())
            .field("market", &self.market.name())
            .field("support", &self.support.name())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableProvider;

#[async_trait]
impl<F> SignalProvider<F> for UnavailableProvider
where
    F: Send + 'static,
{
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn fetch(&self, _location: &LocationRef, _budget: Duration) -> Result<F, ProviderError> {
        Err(ProviderError::unavailable("unavailable", "no provider configured for this slot"))
    }
}

/// Returns the same fragment for every location.
#[derive(Clone, Debug)]
pub struct StaticProvider<F> {
    name: String,
    fragment: F,
}

impl<F> StaticProvider<F> {
    pub fn new(name: impl Into<String>, fragment: F) -> Self {
        Self { name: name.into(), fragment }
    }
}

#[async_trait]
impl<F> SignalProvider<F> for StaticProvider<F>
where
    F: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _location: &LocationRef, _budget: Duration) -> Result<F, ProviderError> {
        Ok(self.fragment.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ProviderSet, SignalProvider, StaticProvider, WeatherFragment};
    use crate::domain::location::LocationRef;

    #[tokio::test]
    async fn unavailable_set_fails_every_slot() {
        let providers = ProviderSet::unavailable();
        let location = LocationRef::named("Pune");
        let budget = Duration::from_millis(10);

        let weather = providers.weather.fetch(&location, budget).await;
        let soil = providers.soil.fetch(&location, budget).await;
        let market = providers.market.fetch(&location, budget).await;
        let support = providers.support.fetch(&location, budget).await;

        assert!(weather.is_err());
        assert!(soil.is_err());
        assert!(market.is_err());
        assert!(support.is_err());
        assert_eq!(weather.err().map(|error| error.kind()), Some("unavailable"));
    }

    #[tokio::test]
    async fn static_provider_returns_its_fragment() {
        let fragment = WeatherFragment {
            temperature: Some(31.0),
            humidity: Some(70.0),
            rainfall_mm: Some(1200.0),
        };
        let provider = StaticProvider::new("scripted_weather", fragment.clone());

        let fetched = provider.fetch(&LocationRef::named("Cuttack"), Duration::ZERO).await;

        assert_eq!(provider.name(), "scripted_weather");
        assert_eq!(fetched.ok(), Some(fragment));
    }

    #[test]
    fn debug_lists_provider_names() {
        let debug = format!("{:?}", ProviderSet::unavailable());

        assert!(debug.contains("weather: \"unavailable\""));
    }
}
