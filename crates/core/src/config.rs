use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregation::{SoilWeights, WeightVector, DEFAULT_SOIL_WEIGHTS, DEFAULT_WEIGHTS};
use crate::errors::EngineError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub weights: WeightVector,
    pub soil_weights: SoilWeights,
    pub fallback: FallbackConfig,
    pub ranking: RankingConfig,
    pub providers: ProviderConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackConfig {
    pub provider_timeout_ms: u64,
    pub request_deadline_ms: u64,
    pub cache_ttl_secs: u64,
    pub stale_ttl_secs: u64,
}

impl FallbackConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn request_deadline(&self) -> Duration {
        Duration::from_millis(self.request_deadline_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn stale_ttl(&self) -> Duration {
        Duration::from_secs(self.stale_ttl_secs)
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: 2_500,
            request_deadline_ms: 8_000,
            cache_ttl_secs: 300,
            stale_ttl_secs: 1_800,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankingConfig {
    pub default_top_n: usize,
    pub max_top_n: usize,
    /// Below this total score a candidate does not count as a real recommendation.
    pub minimum_score: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { default_top_n: 4, max_top_n: 10, minimum_score: 30.0 }
    }
}

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
/// Agmarknet daily mandi prices on the data.gov.in open data API.
pub const DEFAULT_MARKET_BASE_URL: &str =
    "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070";

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub weather_base_url: String,
    pub market_base_url: String,
    pub market_api_key: Option<SecretString>,
    pub http_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            market_base_url: DEFAULT_MARKET_BASE_URL.to_string(),
            market_api_key: None,
            http_timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub weights: Option<WeightVector>,
    pub provider_timeout_ms: Option<u64>,
    pub request_deadline_ms: Option<u64>,
    pub default_top_n: Option<usize>,
    pub minimum_score: Option<f64>,
    pub market_api_key: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error(transparent)]
    Weights(#[from] EngineError),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            soil_weights: DEFAULT_SOIL_WEIGHTS,
            fallback: FallbackConfig::default(),
            ranking: RankingConfig::default(),
            providers: ProviderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("krishi.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(weights) = patch.weights {
            let target = &mut self.weights;
            apply_f64(&mut target.climate, weights.climate);
            apply_f64(&mut target.market, weights.market);
            apply_f64(&mut target.soil, weights.soil);
            apply_f64(&mut target.seasonal, weights.seasonal);
            apply_f64(&mut target.government_support, weights.government_support);
            apply_f64(&mut target.risk, weights.risk);
            apply_f64(&mut target.profitability, weights.profitability);
        }

        if let Some(soil_weights) = patch.soil_weights {
            apply_f64(&mut self.soil_weights.soil_type, soil_weights.soil_type);
            apply_f64(&mut self.soil_weights.ph, soil_weights.ph);
            apply_f64(&mut self.soil_weights.nutrient, soil_weights.nutrient);
        }

        if let Some(fallback) = patch.fallback {
            if let Some(provider_timeout_ms) = fallback.provider_timeout_ms {
                self.fallback.provider_timeout_ms = provider_timeout_ms;
            }
            if let Some(request_deadline_ms) = fallback.request_deadline_ms {
                self.fallback.request_deadline_ms = request_deadline_ms;
            }
            if let Some(cache_ttl_secs) = fallback.cache_ttl_secs {
                self.fallback.cache_ttl_secs = cache_ttl_secs;
            }
            if let Some(stale_ttl_secs) = fallback.stale_ttl_secs {
                self.fallback.stale_ttl_secs = stale_ttl_secs;
            }
        }

        if let Some(ranking) = patch.ranking {
            if let Some(default_top_n) = ranking.default_top_n {
                self.ranking.default_top_n = default_top_n;
            }
            if let Some(max_top_n) = ranking.max_top_n {
                self.ranking.max_top_n = max_top_n;
            }
            apply_f64(&mut self.ranking.minimum_score, ranking.minimum_score);
        }

        if let Some(providers) = patch.providers {
            if let Some(weather_base_url) = providers.weather_base_url {
                self.providers.weather_base_url = weather_base_url;
            }
            if let Some(market_base_url) = providers.market_base_url {
                self.providers.market_base_url = market_base_url;
            }
            if let Some(market_api_key_value) = providers.market_api_key {
                self.providers.market_api_key = Some(secret_value(market_api_key_value));
            }
            if let Some(http_timeout_secs) = providers.http_timeout_secs {
                self.providers.http_timeout_secs = http_timeout_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let weights = [
            ("KRISHI_WEIGHTS_CLIMATE", &mut self.weights.climate),
            ("KRISHI_WEIGHTS_MARKET", &mut self.weights.market),
            ("KRISHI_WEIGHTS_SOIL", &mut self.weights.soil),
            ("KRISHI_WEIGHTS_SEASONAL", &mut self.weights.seasonal),
            ("KRISHI_WEIGHTS_GOVERNMENT_SUPPORT", &mut self.weights.government_support),
            ("KRISHI_WEIGHTS_RISK", &mut self.weights.risk),
            ("KRISHI_WEIGHTS_PROFITABILITY", &mut self.weights.profitability),
            ("KRISHI_SOIL_WEIGHTS_SOIL_TYPE", &mut self.soil_weights.soil_type),
            ("KRISHI_SOIL_WEIGHTS_PH", &mut self.soil_weights.ph),
            ("KRISHI_SOIL_WEIGHTS_NUTRIENT", &mut self.soil_weights.nutrient),
        ];
        for (key, target) in weights {
            if let Some(value) = read_env(key) {
                *target = parse_f64(key, &value)?;
            }
        }

        if let Some(value) = read_env("KRISHI_FALLBACK_PROVIDER_TIMEOUT_MS") {
            self.fallback.provider_timeout_ms =
                parse_u64("KRISHI_FALLBACK_PROVIDER_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = read_env("KRISHI_FALLBACK_REQUEST_DEADLINE_MS") {
            self.fallback.request_deadline_ms =
                parse_u64("KRISHI_FALLBACK_REQUEST_DEADLINE_MS", &value)?;
        }
        if let Some(value) = read_env("KRISHI_FALLBACK_CACHE_TTL_SECS") {
            self.fallback.cache_ttl_secs = parse_u64("KRISHI_FALLBACK_CACHE_TTL_SECS", &value)?;
        }
        if let Some(value) = read_env("KRISHI_FALLBACK_STALE_TTL_SECS") {
            self.fallback.stale_ttl_secs = parse_u64("KRISHI_FALLBACK_STALE_TTL_SECS", &value)?;
        }

        if let Some(value) = read_env("KRISHI_RANKING_DEFAULT_TOP_N") {
            self.ranking.default_top_n = parse_usize("KRISHI_RANKING_DEFAULT_TOP_N", &value)?;
        }
        if let Some(value) = read_env("KRISHI_RANKING_MAX_TOP_N") {
            self.ranking.max_top_n = parse_usize("KRISHI_RANKING_MAX_TOP_N", &value)?;
        }
        if let Some(value) = read_env("KRISHI_RANKING_MINIMUM_SCORE") {
            self.ranking.minimum_score = parse_f64("KRISHI_RANKING_MINIMUM_SCORE", &value)?;
        }

        if let Some(value) = read_env("KRISHI_PROVIDERS_WEATHER_BASE_URL") {
            self.providers.weather_base_url = value;
        }
        if let Some(value) = read_env("KRISHI_PROVIDERS_MARKET_BASE_URL") {
            self.providers.market_base_url = value;
        }
        let market_api_key =
            read_env("KRISHI_PROVIDERS_MARKET_API_KEY").or_else(|| read_env("DATA_GOV_IN_API_KEY"));
        if let Some(value) = market_api_key {
            self.providers.market_api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("KRISHI_PROVIDERS_HTTP_TIMEOUT_SECS") {
            self.providers.http_timeout_secs =
                parse_u64("KRISHI_PROVIDERS_HTTP_TIMEOUT_SECS", &value)?;
        }

        let log_level = read_env("KRISHI_LOGGING_LEVEL").or_else(|| read_env("KRISHI_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("KRISHI_LOGGING_FORMAT").or_else(|| read_env("KRISHI_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(weights) = overrides.weights {
            self.weights = weights;
        }
        if let Some(provider_timeout_ms) = overrides.provider_timeout_ms {
            self.fallback.provider_timeout_ms = provider_timeout_ms;
        }
        if let Some(request_deadline_ms) = overrides.request_deadline_ms {
            self.fallback.request_deadline_ms = request_deadline_ms;
        }
        if let Some(default_top_n) = overrides.default_top_n {
            self.ranking.default_top_n = default_top_n;
        }
        if let Some(minimum_score) = overrides.minimum_score {
            self.ranking.minimum_score = minimum_score;
        }
        if let Some(market_api_key) = overrides.market_api_key {
            self.providers.market_api_key = Some(secret_value(market_api_key));
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.soil_weights.validate()?;
        validate_fallback(&self.fallback)?;
        validate_ranking(&self.ranking)?;
        validate_providers(&self.providers)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn apply_f64(target: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("krishi.toml"), PathBuf::from("config/krishi.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_fallback(fallback: &FallbackConfig) -> Result<(), ConfigError> {
    if fallback.provider_timeout_ms == 0 || fallback.provider_timeout_ms > 60_000 {
        return Err(ConfigError::Validation(
            "fallback.provider_timeout_ms must be in range 1..=60000".to_string(),
        ));
    }

    if fallback.request_deadline_ms == 0 || fallback.request_deadline_ms > 120_000 {
        return Err(ConfigError::Validation(
            "fallback.request_deadline_ms must be in range 1..=120000".to_string(),
        ));
    }

    if fallback.stale_ttl_secs < fallback.cache_ttl_secs {
        return Err(ConfigError::Validation(
            "fallback.stale_ttl_secs must not be shorter than fallback.cache_ttl_secs".to_string(),
        ));
    }

    Ok(())
}

fn validate_ranking(ranking: &RankingConfig) -> Result<(), ConfigError> {
    if ranking.default_top_n == 0 {
        return Err(ConfigError::Validation(
            "ranking.default_top_n must be greater than zero".to_string(),
        ));
    }

    if ranking.max_top_n < ranking.default_top_n {
        return Err(ConfigError::Validation(
            "ranking.max_top_n must be at least ranking.default_top_n".to_string(),
        ));
    }

    if !ranking.minimum_score.is_finite() || !(0.0..=100.0).contains(&ranking.minimum_score) {
        return Err(ConfigError::Validation(
            "ranking.minimum_score must be in range 0..=100".to_string(),
        ));
    }

    Ok(())
}

fn validate_providers(providers: &ProviderConfig) -> Result<(), ConfigError> {
    for (key, url) in [
        ("providers.weather_base_url", &providers.weather_base_url),
        ("providers.market_base_url", &providers.market_base_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "{key} must start with http:// or https://"
            )));
        }
    }

    if providers.http_timeout_secs == 0 || providers.http_timeout_secs > 120 {
        return Err(ConfigError::Validation(
            "providers.http_timeout_secs must be in range 1..=120".to_string(),
        ));
    }

    let blank_key = providers
        .market_api_key
        .as_ref()
        .map(|value| value.expose_secret().trim().is_empty())
        .unwrap_or(false);
    if blank_key {
        return Err(ConfigError::Validation(
            "providers.market_api_key is set but empty; remove it to disable live mandi prices"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    weights: Option<WeightsPatch>,
    soil_weights: Option<SoilWeightsPatch>,
    fallback: Option<FallbackPatch>,
    ranking: Option<RankingPatch>,
    providers: Option<ProvidersPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    climate: Option<f64>,
    market: Option<f64>,
    soil: Option<f64>,
    seasonal: Option<f64>,
    government_support: Option<f64>,
    risk: Option<f64>,
    profitability: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SoilWeightsPatch {
    soil_type: Option<f64>,
    ph: Option<f64>,
    nutrient: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct FallbackPatch {
    provider_timeout_ms: Option<u64>,
    request_deadline_ms: Option<u64>,
    cache_ttl_secs: Option<u64>,
    stale_ttl_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RankingPatch {
    default_top_n: Option<usize>,
    max_top_n: Option<usize>,
    minimum_score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ProvidersPatch {
    weather_base_url: Option<String>,
    market_base_url: Option<String>,
    market_api_key: Option<String>,
    http_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::aggregation::DEFAULT_WEIGHTS;
    use crate::errors::EngineError;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid_and_canonical() -> Result<(), String> {
        let config = AppConfig::default();
        config.validate().map_err(|err| format!("default config should validate: {err}"))?;

        ensure(config.weights == DEFAULT_WEIGHTS, "default weights should be canonical")?;
        ensure(config.fallback.provider_timeout_ms == 2_500, "provider timeout default")?;
        ensure(config.fallback.request_deadline_ms == 8_000, "request deadline default")?;
        ensure(config.ranking.default_top_n == 4, "default top n")?;
        ensure(config.ranking.max_top_n == 10, "max top n")?;
        ensure(config.providers.market_api_key.is_none(), "no market key by default")
    }

    #[test]
    fn request_deadline_may_undercut_provider_timeout() -> Result<(), String> {
        let mut config = AppConfig::default();
        config.fallback.provider_timeout_ms = 2_500;
        config.fallback.request_deadline_ms = 1_000;
        config.validate().map_err(|err| format!("short deadline should validate: {err}"))?;

        config.fallback.request_deadline_ms = 0;
        match config.validate() {
            Err(ConfigError::Validation(message)) => ensure(
                message.contains("fallback.request_deadline_ms"),
                "zero deadline should name the offending key",
            ),
            other => Err(format!("expected validation error, got {other:?}")),
        }
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_KRISHI_MANDI_KEY", "mandi-key-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("krishi.toml");
            fs::write(
                &path,
                r#"
[providers]
market_api_key = "${TEST_KRISHI_MANDI_KEY}"

[fallback]
provider_timeout_ms = 1500
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            let key = config
                .providers
                .market_api_key
                .as_ref()
                .map(|value| value.expose_secret().to_string());
            ensure(
                key.as_deref() == Some("mandi-key-from-env"),
                "market key should be loaded from environment",
            )?;
            ensure(config.fallback.provider_timeout_ms == 1_500, "file timeout should apply")?;
            Ok(())
        })();

        clear_vars(&["TEST_KRISHI_MANDI_KEY"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        env::remove_var("TEST_KRISHI_UNSET_VAR");

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("krishi.toml");
        fs::write(&path, "[providers]\nmarket_api_key = \"${TEST_KRISHI_UNSET_VAR}\"\n")
            .map_err(|err| err.to_string())?;

        let error =
            match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
            {
                Ok(_) => return Err("expected interpolation failure".to_string()),
                Err(error) => error,
            };
        let names_var = matches!(
            error,
            ConfigError::MissingEnvInterpolation { ref var } if var == "TEST_KRISHI_UNSET_VAR"
        );
        ensure(names_var, "error should name the missing variable")
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("KRISHI_LOG_LEVEL", "warn");
        env::set_var("KRISHI_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["KRISHI_LOG_LEVEL", "KRISHI_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("KRISHI_FALLBACK_PROVIDER_TIMEOUT_MS", "2000");
        env::set_var("KRISHI_RANKING_DEFAULT_TOP_N", "6");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("krishi.toml");
            fs::write(
                &path,
                r#"
[fallback]
provider_timeout_ms = 1000
request_deadline_ms = 5000

[ranking]
default_top_n = 3
minimum_score = 25.0

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    default_top_n: Some(8),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.ranking.default_top_n == 8, "override top n should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.fallback.provider_timeout_ms == 2_000,
                "env timeout should win over file and defaults",
            )?;
            ensure(config.fallback.request_deadline_ms == 5_000, "file deadline should apply")?;
            ensure(config.ranking.minimum_score == 25.0, "file minimum score should apply")?;
            Ok(())
        })();

        clear_vars(&["KRISHI_FALLBACK_PROVIDER_TIMEOUT_MS", "KRISHI_RANKING_DEFAULT_TOP_N"]);
        result
    }

    #[test]
    fn weights_that_do_not_sum_to_one_fail_loading() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("KRISHI_WEIGHTS_CLIMATE", "0.40");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected weight validation failure but load succeeded".to_string())
                }
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::Weights(EngineError::InvalidWeightConfiguration(_))
                ),
                "weight failure should surface as InvalidWeightConfiguration",
            )
        })();

        clear_vars(&["KRISHI_WEIGHTS_CLIMATE"]);
        result
    }

    #[test]
    fn invalid_env_number_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("KRISHI_FALLBACK_REQUEST_DEADLINE_MS", "soon");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env override failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "KRISHI_FALLBACK_REQUEST_DEADLINE_MS"
                ),
                "invalid env override should name the key",
            )
        })();

        clear_vars(&["KRISHI_FALLBACK_REQUEST_DEADLINE_MS"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("KRISHI_RANKING_MAX_TOP_N", "2");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("ranking.max_top_n")
            );
            ensure(has_message, "validation failure should mention ranking.max_top_n")
        })();

        clear_vars(&["KRISHI_RANKING_MAX_TOP_N"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("KRISHI_PROVIDERS_MARKET_API_KEY", "mandi-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(
                !debug.contains("mandi-secret-value"),
                "debug output should not contain the market api key",
            )?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )?;
            Ok(())
        })();

        clear_vars(&["KRISHI_PROVIDERS_MARKET_API_KEY"]);
        result
    }
}
