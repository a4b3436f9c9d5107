//! Fallback coordinator
//!
//! Fans out to the four signal providers concurrently, each under its own
//! timeout, and assembles one fully populated [`LocationSignalSnapshot`].
//! A slot that fails or times out is served from the stale cache when
//! possible and from the region's default profile otherwise. Every field
//! records its origin in the snapshot provenance.

pub mod cache;
pub mod defaults;

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FallbackConfig;
use crate::domain::crop::SoilType;
use crate::domain::location::LocationRef;
use crate::domain::signals::{
    GovernmentSupportSignal, LocationSignalSnapshot, Provenance, SignalField, SignalOrigin,
};
use crate::providers::{
    MarketFragment, ProviderSet, ProviderSlot, SignalProvider, SoilFragment, SupportFragment,
    WeatherFragment,
};

pub use cache::SignalCache;
pub use defaults::RegionDefaults;

/// Provenance source for a caller-supplied soil type.
pub const SOIL_HINT_SOURCE: &str = "soil_type_hint";

/// Outcome of one provider slot after timeout, cache and failure handling.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotOutcome<F> {
    pub fragment: Option<F>,
    pub origin: SignalOrigin,
    pub source: String,
}

impl<F> SlotOutcome<F> {
    fn missing() -> Self {
        Self { fragment: None, origin: SignalOrigin::Fallback, source: String::new() }
    }
}

#[derive(Debug)]
pub struct FallbackCoordinator {
    providers: ProviderSet,
    provider_timeout: Duration,
    request_deadline: Duration,
    weather_cache: SignalCache<WeatherFragment>,
    soil_cache: SignalCache<SoilFragment>,
    market_cache: SignalCache<MarketFragment>,
    support_cache: SignalCache<SupportFragment>,
}

impl FallbackCoordinator {
    pub fn new(providers: ProviderSet, config: &FallbackConfig) -> Self {
        let fresh = config.cache_ttl();
        let stale = config.stale_ttl();
        Self {
            providers,
            provider_timeout: config.provider_timeout(),
            request_deadline: config.request_deadline(),
            weather_cache: SignalCache::new(fresh, stale),
            soil_cache: SignalCache::new(fresh, stale),
            market_cache: SignalCache::new(fresh, stale),
            support_cache: SignalCache::new(fresh, stale),
        }
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    /// Builds the snapshot for one request. Never fails.
    ///
    /// `caller_deadline` shortens the configured request deadline; it never
    /// extends it. Slots still pending when it passes fall back.
    pub async fn assemble(
        &self,
        location: &LocationRef,
        soil_type_hint: Option<&str>,
        caller_deadline: Option<Duration>,
        correlation_id: Uuid,
    ) -> LocationSignalSnapshot {
        let allowed = caller_deadline
            .map_or(self.request_deadline, |deadline| deadline.min(self.request_deadline));
        let deadline = Instant::now() + allowed;
        let key = location.cache_key();

        let (weather, soil, market, support) = tokio::join!(
            self.resolve(
                ProviderSlot::Weather,
                self.providers.weather.as_ref(),
                &self.weather_cache,
                location,
                &key,
                deadline,
                correlation_id,
            ),
            self.resolve(
                ProviderSlot::Soil,
                self.providers.soil.as_ref(),
                &self.soil_cache,
                location,
                &key,
                deadline,
                correlation_id,
            ),
            self.resolve(
                ProviderSlot::Market,
                self.providers.market.as_ref(),
                &self.market_cache,
                location,
                &key,
                deadline,
                correlation_id,
            ),
            self.resolve(
                ProviderSlot::Support,
                self.providers.support.as_ref(),
                &self.support_cache,
                location,
                &key,
                deadline,
                correlation_id,
            ),
        );

        let snapshot =
            merge(location, weather, soil, market, support, soil_type_hint, correlation_id);

        info!(
            event_name = "fallback.snapshot.assembled",
            correlation_id = %correlation_id,
            location = %location.name,
            region = %snapshot.region,
            fallback_fields = snapshot.provenance.fallback_count(),
            "signal snapshot assembled"
        );
        snapshot
    }

    #[allow(clippy::too_many_arguments)]
    async fn resolve<F>(
        &self,
        slot: ProviderSlot,
        provider: &dyn SignalProvider<F>,
        cache: &SignalCache<F>,
        location: &LocationRef,
        key: &str,
        deadline: Instant,
        correlation_id: Uuid,
    ) -> SlotOutcome<F>
    where
        F: Clone + Send + Sync + 'static,
    {
        let name = provider.name().to_string();

        if let Some(fragment) = cache.fresh(key).await {
            debug!(
                event_name = "fallback.provider.cache_hit",
                correlation_id = %correlation_id,
                slot = %slot,
                provider = %name,
                "reusing cached provider fragment"
            );
            return SlotOutcome {
                fragment: Some(fragment),
                origin: SignalOrigin::Live,
                source: name,
            };
        }

        let budget = self.provider_timeout.min(deadline.saturating_duration_since(Instant::now()));
        let started = Instant::now();
        match timeout(budget, provider.fetch(location, budget)).await {
            Ok(Ok(fragment)) => {
                cache.put(key, fragment.clone()).await;
                debug!(
                    event_name = "fallback.provider.fetched",
                    correlation_id = %correlation_id,
                    slot = %slot,
                    provider = %name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "provider fragment fetched"
                );
                return SlotOutcome {
                    fragment: Some(fragment),
                    origin: SignalOrigin::Live,
                    source: name,
                };
            }
            Ok(Err(error)) => {
                warn!(
                    event_name = "fallback.provider.failed",
                    correlation_id = %correlation_id,
                    slot = %slot,
                    provider = %name,
                    error_kind = error.kind(),
                    error = %error,
                    "provider failed, falling back"
                );
            }
            Err(_) => {
                warn!(
                    event_name = "fallback.provider.timeout",
                    correlation_id = %correlation_id,
                    slot = %slot,
                    provider = %name,
                    budget_ms = budget.as_millis() as u64,
                    "provider timed out, falling back"
                );
            }
        }

        if let Some(fragment) = cache.stale(key).await {
            info!(
                event_name = "fallback.provider.stale_cache",
                correlation_id = %correlation_id,
                slot = %slot,
                provider = %name,
                "serving stale cached fragment"
            );
            return SlotOutcome {
                fragment: Some(fragment),
                origin: SignalOrigin::StaleCache,
                source: name,
            };
        }

        SlotOutcome::missing()
    }
}

/// Per-field merge of provider outcomes over the region defaults.
pub fn merge(
    location: &LocationRef,
    weather: SlotOutcome<WeatherFragment>,
    soil: SlotOutcome<SoilFragment>,
    market: SlotOutcome<MarketFragment>,
    support: SlotOutcome<SupportFragment>,
    soil_type_hint: Option<&str>,
    correlation_id: Uuid,
) -> LocationSignalSnapshot {
    let region = location.resolve_region();
    let defaults = RegionDefaults::for_region(region);
    let default_source = defaults.source();
    let mut provenance = Provenance::default();

    let mut filler = FieldFiller { provenance: &mut provenance, default_source: &default_source };

    let weather_fragment = weather.fragment.clone().unwrap_or_default();
    let temperature = filler.number(
        SignalField::Temperature,
        weather_fragment.temperature,
        &weather,
        defaults.temperature,
    );
    let humidity = filler.number(
        SignalField::Humidity,
        weather_fragment.humidity.filter(|percent| (0.0..=100.0).contains(percent)),
        &weather,
        defaults.humidity,
    );
    let rainfall_mm = filler.number(
        SignalField::Rainfall,
        weather_fragment.rainfall_mm.filter(|value| *value >= 0.0),
        &weather,
        defaults.rainfall_mm,
    );

    let soil_fragment = soil.fragment.clone().unwrap_or_default();
    let soil_type = match parse_soil_hint(soil_type_hint, correlation_id) {
        Some(hinted) => {
            filler.provenance.record(SignalField::SoilType, SignalOrigin::Live, SOIL_HINT_SOURCE);
            hinted
        }
        None => {
            filler.value(SignalField::SoilType, soil_fragment.soil_type, &soil, defaults.soil_type)
        }
    };
    let soil_ph = filler.number(
        SignalField::SoilPh,
        soil_fragment.ph.filter(|ph| (0.0..=14.0).contains(ph)),
        &soil,
        defaults.soil_ph,
    );
    let nutrient_index = filler.number(
        SignalField::NutrientIndex,
        soil_fragment.nutrient_index.filter(|index| (0.0..=1.0).contains(index)),
        &soil,
        defaults.nutrient_index,
    );

    let market_fragment = market.fragment.clone().unwrap_or_default();
    let market_prices: BTreeMap<_, _> = market_fragment
        .prices
        .into_iter()
        .filter(|(_, price)| price.is_finite() && *price > 0.0)
        .collect();
    let market_prices = filler.value(
        SignalField::MarketPrice,
        (!market_prices.is_empty()).then_some(market_prices),
        &market,
        Default::default(),
    );
    let demand_index = filler.number(
        SignalField::DemandIndex,
        market_fragment.demand_index.filter(|index| (0.0..=1.0).contains(index)),
        &market,
        defaults.demand_index,
    );

    let support = filler.value(
        SignalField::Support,
        support.fragment.clone().filter(|signal| !signal.is_empty()),
        &support,
        GovernmentSupportSignal::default(),
    );

    LocationSignalSnapshot {
        location: location.clone(),
        region,
        temperature,
        humidity,
        rainfall_mm,
        soil_type,
        soil_ph,
        nutrient_index,
        market_prices,
        demand_index,
        support,
        provenance,
    }
}

fn parse_soil_hint(hint: Option<&str>, correlation_id: Uuid) -> Option<SoilType> {
    let hint = hint.map(str::trim).filter(|hint| !hint.is_empty())?;
    match SoilType::from_str(hint) {
        Ok(soil_type) => Some(soil_type),
        Err(error) => {
            warn!(
                event_name = "fallback.soil_hint.ignored",
                correlation_id = %correlation_id,
                hint,
                error = %error,
                "ignoring unrecognised soil type hint"
            );
            None
        }
    }
}

struct FieldFiller<'a> {
    provenance: &'a mut Provenance,
    default_source: &'a str,
}

impl FieldFiller<'_> {
    fn number<F>(
        &mut self,
        field: SignalField,
        observed: Option<f64>,
        outcome: &SlotOutcome<F>,
        default: f64,
    ) -> f64 {
        self.value(field, observed.filter(|value| value.is_finite()), outcome, default)
    }

    fn value<T, F>(
        &mut self,
        field: SignalField,
        observed: Option<T>,
        outcome: &SlotOutcome<F>,
        default: T,
    ) -> T {
        match observed {
            Some(value) if outcome.fragment.is_some() => {
                self.provenance.record(field, outcome.origin, outcome.source.clone());
                value
            }
            _ => {
                self.provenance.record(field, SignalOrigin::Fallback, self.default_source);
                default
            }
        }
    }
}
