//! Concrete signal providers for the recommendation engine.
//!
//! Weather and mandi prices come from public HTTP APIs; soil and government
//! support are served from bundled tables.

pub mod agmarknet;
pub mod district_soil;
pub mod http;
pub mod msp_support;
pub mod open_meteo;

use std::sync::Arc;

use krishi_core::config::ProviderConfig;
use krishi_core::ProviderSet;
use thiserror::Error;
use tracing::info;

pub use agmarknet::AgmarknetProvider;
pub use district_soil::DistrictSoilProvider;
pub use msp_support::MspSupportProvider;
pub use open_meteo::OpenMeteoProvider;

#[derive(Debug, Error)]
pub enum ProviderSetupError {
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Builds the production provider set. Missing credentials do not fail setup;
/// the affected provider reports them per request and its fields fall back.
pub fn provider_set(config: &ProviderConfig) -> Result<ProviderSet, ProviderSetupError> {
    let client = http::client(config)?;

    if config.market_api_key.is_none() {
        info!(
            event_name = "providers.market.disabled",
            provider = agmarknet::PROVIDER_NAME,
            "no market api key configured, mandi prices will use reference prices"
        );
    }

    Ok(ProviderSet::new(
        Arc::new(OpenMeteoProvider::new(client.clone(), config.weather_base_url.clone())),
        Arc::new(DistrictSoilProvider),
        Arc::new(AgmarknetProvider::new(
            client,
            config.market_base_url.clone(),
            config.market_api_key.clone(),
        )),
        Arc::new(MspSupportProvider::new()),
    ))
}
