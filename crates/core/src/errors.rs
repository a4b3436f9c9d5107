use std::time::Duration;

use thiserror::Error;

use crate::domain::crop::CropId;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("invalid interval: min {min} must be finite and not exceed max {max}")]
    InvalidInterval { min: f64, max: f64 },
    #[error("invalid crop definition `{crop}`: {reason}")]
    InvalidCrop { crop: CropId, reason: String },
    #[error("unknown season `{0}` (expected kharif|rabi|zaid|year_round)")]
    UnknownSeason(String),
    #[error("unknown soil type `{0}`")]
    UnknownSoilType(String),
    #[error("unknown region `{0}` (expected north|central|south|east|northeast)")]
    UnknownRegion(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failures surfaced by the recommendation engine.
///
/// Everything except `UnknownCrop` is a startup failure: an engine that
/// constructed successfully never fails a `recommend` call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid weight configuration: {0}")]
    InvalidWeightConfiguration(String),
    #[error("invalid soil weights: {0}")]
    InvalidSoilWeights(String),
    #[error("invalid crop catalog: {0}")]
    Catalog(#[from] DomainError),
    #[error("unknown crop `{0}`")]
    UnknownCrop(CropId),
}

impl EngineError {
    pub fn is_startup_failure(&self) -> bool {
        !matches!(self, Self::UnknownCrop(_))
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider `{provider}` is unavailable: {message}")]
    Unavailable { provider: String, message: String },
    #[error("provider `{provider}` timed out after {budget:?}")]
    Timeout { provider: String, budget: Duration },
    #[error("provider `{provider}` returned an invalid response: {message}")]
    InvalidResponse { provider: String, message: String },
    #[error("transport failure talking to `{provider}`: {message}")]
    Transport { provider: String, message: String },
    #[error("provider `{provider}` is missing credentials")]
    MissingCredentials { provider: String },
}

impl ProviderError {
    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable { provider: provider.into(), message: message.into() }
    }

    pub fn invalid_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse { provider: provider.into(), message: message.into() }
    }

    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport { provider: provider.into(), message: message.into() }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::Unavailable { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::InvalidResponse { provider, .. }
            | Self::Transport { provider, .. }
            | Self::MissingCredentials { provider } => provider,
        }
    }

    /// Stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "unavailable",
            Self::Timeout { .. } => "timeout",
            Self::InvalidResponse { .. } => "invalid_response",
            Self::Transport { .. } => "transport",
            Self::MissingCredentials { .. } => "missing_credentials",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::domain::crop::CropId;
    use crate::errors::{DomainError, EngineError, ProviderError};

    #[test]
    fn catalog_errors_convert_into_startup_failures() {
        let engine = EngineError::from(DomainError::InvariantViolation("no staples".to_owned()));

        assert!(matches!(engine, EngineError::Catalog(_)));
        assert!(engine.is_startup_failure());
    }

    #[test]
    fn unknown_crop_is_a_request_error() {
        let error = EngineError::UnknownCrop(CropId::new("dragonfruit"));

        assert!(!error.is_startup_failure());
        assert_eq!(error.to_string(), "unknown crop `dragonfruit`");
    }

    #[test]
    fn provider_errors_expose_provider_and_kind() {
        let timeout = ProviderError::Timeout {
            provider: "open_meteo".to_owned(),
            budget: Duration::from_millis(2500),
        };
        let missing = ProviderError::MissingCredentials { provider: "agmarknet".to_owned() };

        assert_eq!(timeout.provider(), "open_meteo");
        assert_eq!(timeout.kind(), "timeout");
        assert_eq!(missing.kind(), "missing_credentials");
        assert!(missing.to_string().contains("agmarknet"));
    }
}
