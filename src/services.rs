use crate::config::Config;
use crate::errors::LookupError;
use crate::models::LookupOutcome;
use crate::normalization::{http_error_message, normalize_body, not_found_message};
use crate::validation::{validate, ValidIp};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;

pub const MISSING_KEY_MESSAGE: &str =
    "RAPIDAPI_KEY is missing or not loaded at runtime. Check the .env file and server configuration.";

/// Client for the third-party IP blacklist lookup API.
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Clone)]
pub struct BlacklistService {
    client: Client,
    endpoint: String,
    host: String,
    api_key: Option<String>,
}

impl BlacklistService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.api_endpoint.clone(),
            host: config.api_host.clone(),
            api_key: config.rapidapi_key.clone(),
        }
    }

    /// Look up a validated address.
    ///
    /// Never returns an error: every failure is folded into
    /// `LookupOutcome::Failure`. Performs at most one outbound request and no
    /// retries.
    pub async fn lookup(&self, ip: &ValidIp) -> LookupOutcome {
        match self.fetch(ip).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("Lookup for {} failed ({}): {}", ip, err.code(), err);
                err.into()
            }
        }
    }

    async fn fetch(&self, ip: &ValidIp) -> Result<LookupOutcome, LookupError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LookupError::Configuration(MISSING_KEY_MESSAGE.to_string()))?;
        tracing::debug!("Using API key starting with: {}...", key_prefix(api_key));

        // Build URL with proper parameter encoding (zone indexes contain '%')
        let url = reqwest::Url::parse_with_params(&self.endpoint, &[("ip", ip.as_str())])
            .map_err(|e| {
                LookupError::Configuration(format!(
                    "Invalid blacklist API endpoint '{}': {}",
                    self.endpoint, e
                ))
            })?;

        tracing::info!("Fetching from: {}", url);
        tracing::info!("Using host: {}", self.host);

        let response = self
            .client
            .get(url.clone())
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.host)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        tracing::info!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("API error body: {}", error_text);

            let message = if status == StatusCode::NOT_FOUND {
                not_found_message(url.as_str(), &self.host)
            } else {
                http_error_message(status.as_u16(), status.canonical_reason(), &error_text)
            };

            return Err(LookupError::UpstreamHttp {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await.map_err(transport_error)?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            LookupError::UpstreamData(format!(
                "API returned a response body that is not valid JSON: {}",
                e
            ))
        })?;

        let outcome = normalize_body(&body, ip.as_str())?;
        if let Some(warning) = outcome.warning() {
            tracing::warn!("{} (ip: {})", warning, ip);
        }

        Ok(outcome)
    }
}

/// Entry point for the presentation layer: validate a raw address, then look
/// it up. Validation always runs here, even if the caller already checked.
pub async fn lookup_ip_address(service: &BlacklistService, raw: &str) -> LookupOutcome {
    tracing::info!("Received lookup request for IP: {}", raw);

    match validate(raw) {
        Ok(ip) => service.lookup(&ip).await,
        Err(err) => {
            tracing::warn!("Rejected lookup input {:?}: {}", raw, err);
            LookupError::from(err).into()
        }
    }
}

fn transport_error(err: reqwest::Error) -> LookupError {
    let mut message = format!("Network error or failed to fetch: {}", err);
    if let Some(cause) = std::error::Error::source(&err) {
        message.push_str(&format!(" (Cause: {})", cause));
    }
    LookupError::Transport(message)
}

fn key_prefix(key: &str) -> &str {
    match key.char_indices().nth(5) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;

    fn config(key: Option<&str>) -> Config {
        Config {
            port: 3000,
            rapidapi_key: key.map(str::to_string),
            api_endpoint: "http://127.0.0.1:9/v1/ipblacklistlookup".to_string(),
            api_host: "test.host".to_string(),
        }
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(key_prefix("0439e6a05b"), "0439e");
        assert_eq!(key_prefix("abc"), "abc");
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_failure() {
        let service = BlacklistService::new(&config(None));
        let ip = validate("8.8.8.8").unwrap();

        match service.lookup(&ip).await {
            LookupOutcome::Failure {
                message,
                code,
                kind,
            } => {
                assert_eq!(code, 500);
                assert_eq!(kind, FailureKind::Configuration);
                assert_eq!(message, MISSING_KEY_MESSAGE);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_config_check() {
        let service = BlacklistService::new(&config(None));
        let outcome = lookup_ip_address(&service, "not-an-ip").await;
        assert_eq!(outcome.code(), 400);
    }
}
