//! Agmarknet mandi prices from the data.gov.in open data API
//!
//! Records carry one modal price per commodity, variety and market. Only the
//! most recent arrival date per crop is kept and its modal prices are averaged.
//! The feed has no demand signal, so fragments never carry a demand index.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use krishi_core::{CropId, LocationRef, MarketFragment, ProviderError, SignalProvider};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::fetch_body;

pub const PROVIDER_NAME: &str = "agmarknet";

const RECORD_LIMIT: u32 = 500;

/// Agmarknet commodity names, lowercased, up to any parenthesised variety.
/// Milled and processed goods ("Rice", "Wheat Atta", "Mustard Oil") are left
/// out so they never blend into raw crop prices.
const COMMODITY_ALIASES: &[(&str, &str)] = &[
    ("paddy", "rice"),
    ("wheat", "wheat"),
    ("maize", "maize"),
    ("potato", "potato"),
    ("cotton", "cotton"),
    ("kapas", "cotton"),
    ("sugarcane", "sugarcane"),
    ("soyabean", "soybean"),
    ("soybean", "soybean"),
    ("mustard", "mustard"),
    ("bengal gram", "chickpea"),
    ("gram", "chickpea"),
    ("lentil", "lentil"),
    ("masur", "lentil"),
    ("arhar", "pigeon_pea"),
    ("turmeric", "turmeric"),
    ("tur", "pigeon_pea"),
    ("green gram", "green_gram"),
    ("moong", "green_gram"),
    ("black gram", "black_gram"),
    ("urd", "black_gram"),
    ("groundnut", "groundnut"),
    ("sesamum", "sesame"),
    ("sesame", "sesame"),
    ("sunflower", "sunflower"),
    ("bajra", "pearl_millet"),
    ("jowar", "sorghum"),
    ("barley", "barley"),
    ("onion", "onion"),
    ("tomato", "tomato"),
    ("banana", "banana"),
];

pub struct AgmarknetProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl AgmarknetProvider {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<SecretString>) -> Self {
        Self { client, base_url: base_url.into(), api_key }
    }
}

impl std::fmt::Debug for AgmarknetProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgmarknetProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl SignalProvider<MarketFragment> for AgmarknetProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(
        &self,
        location: &LocationRef,
        budget: Duration,
    ) -> Result<MarketFragment, ProviderError> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(ProviderError::MissingCredentials { provider: PROVIDER_NAME.to_string() });
        };

        let request = self.client.get(&self.base_url).query(&[
            ("api-key", api_key.expose_secret().to_string()),
            ("format", "json".to_string()),
            ("limit", RECORD_LIMIT.to_string()),
            ("filters[district]", district_filter(&location.name)),
        ]);

        let body = fetch_body(PROVIDER_NAME, request, budget).await?;
        let fragment = parse_records(&body)?;
        if fragment.prices.is_empty() {
            warn!(
                provider = PROVIDER_NAME,
                location = %location.name,
                "no recognised commodities in mandi feed"
            );
        } else {
            debug!(
                provider = PROVIDER_NAME,
                location = %location.name,
                crops = fragment.prices.len(),
                "mandi prices fetched"
            );
        }
        Ok(fragment)
    }
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<MandiRecord>,
}

#[derive(Debug, Deserialize)]
struct MandiRecord {
    #[serde(default)]
    commodity: String,
    #[serde(default)]
    arrival_date: Option<String>,
    #[serde(default)]
    modal_price: Option<PriceValue>,
}

/// The API serves prices as strings, older snapshots as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    fn amount(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(raw) => raw.trim().replace(',', "").parse().ok()?,
        };
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

pub fn parse_records(body: &str) -> Result<MarketFragment, ProviderError> {
    let response: RecordsResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::invalid_response(PROVIDER_NAME, error.to_string()))?;

    let mut latest: BTreeMap<CropId, (Option<NaiveDate>, Vec<f64>)> = BTreeMap::new();
    for record in response.records {
        let crop = crop_for_commodity(&record.commodity);
        let price = record.modal_price.as_ref().and_then(PriceValue::amount);
        let (Some(crop), Some(price)) = (crop, price) else {
            continue;
        };
        let date = record.arrival_date.as_deref().and_then(parse_arrival_date);
        let entry = latest.entry(crop).or_insert_with(|| (date, Vec::new()));
        if date > entry.0 {
            *entry = (date, vec![price]);
        } else if date == entry.0 {
            entry.1.push(price);
        }
    }

    let prices = latest
        .into_iter()
        .map(|(crop, (_, prices))| {
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            (crop, mean)
        })
        .collect();

    Ok(MarketFragment { prices, demand_index: None })
}

pub fn crop_for_commodity(commodity: &str) -> Option<CropId> {
    let lowered = commodity.to_ascii_lowercase();
    let head = lowered.split('(').next().unwrap_or_default();
    let head = head.split_whitespace().collect::<Vec<_>>().join(" ");
    COMMODITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == head)
        .map(|(_, crop)| CropId::new(*crop))
}

fn parse_arrival_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d"))
        .ok()
}

/// Agmarknet district names are title case ("Cuttack", "North 24 Parganas").
fn district_filter(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
