use std::time::Duration;

use krishi_core::config::ProviderConfig;
use krishi_core::ProviderError;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

const USER_AGENT: &str = concat!("krishi-providers/", env!("CARGO_PKG_VERSION"));

pub fn client(config: &ProviderConfig) -> Result<Client, reqwest::Error> {
    client_with_settings(config.http_timeout_secs, 4)
}

pub fn client_with_settings(
    timeout_secs: u64,
    max_idle_per_host: usize,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .connect_timeout(Duration::from_secs(timeout_secs.clamp(1, 5)))
        .pool_max_idle_per_host(max_idle_per_host)
        .build()
}

/// Sends `request` under `budget` and returns the body of a 2xx response.
pub(crate) async fn fetch_body(
    provider: &str,
    request: RequestBuilder,
    budget: Duration,
) -> Result<String, ProviderError> {
    let response = request
        .timeout(budget)
        .send()
        .await
        .map_err(|error| classify(provider, budget, error))?;

    let status = response.status();
    if !status.is_success() {
        debug!(provider, status = %status, "provider answered with an error status");
        return Err(match status.as_u16() {
            401 | 403 => ProviderError::MissingCredentials { provider: provider.to_string() },
            _ => ProviderError::unavailable(provider, format!("upstream returned {status}")),
        });
    }

    response.text().await.map_err(|error| classify(provider, budget, error))
}

fn classify(provider: &str, budget: Duration, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout { provider: provider.to_string(), budget }
    } else if error.is_decode() {
        ProviderError::invalid_response(provider, error.to_string())
    } else {
        ProviderError::transport(provider, error.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{client, client_with_settings};
    use krishi_core::config::ProviderConfig;

    #[test]
    fn client_builds_from_default_provider_config() {
        assert!(client(&ProviderConfig::default()).is_ok());
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        assert!(client_with_settings(0, 0).is_ok());
    }
}
