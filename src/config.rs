use serde::Deserialize;
use std::fmt;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://ip-blacklist-lookup-api-apiverve.p.rapidapi.com/v1/ipblacklistlookup";
pub const DEFAULT_API_HOST: &str = "ip-blacklist-lookup-api-apiverve.p.rapidapi.com";

#[derive(Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Upstream API key. `None` is allowed at startup; lookups then fail with a
    /// configuration error instead of the process refusing to start.
    pub rapidapi_key: Option<String>,
    pub api_endpoint: String,
    pub api_host: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("rapidapi_key_set", &self.rapidapi_key.is_some())
            .field("api_endpoint", &self.api_endpoint)
            .field("api_host", &self.api_host)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Blacklist API endpoint: {}", config.api_endpoint);
        tracing::debug!("Blacklist API host: {}", config.api_host);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            rapidapi_key: var("RAPIDAPI_KEY").filter(|key| !key.trim().is_empty()),
            api_endpoint: {
                let url = var("BLACKLIST_API_ENDPOINT")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("BLACKLIST_API_ENDPOINT must start with http:// or https://");
                }
                url::Url::parse(&url).map_err(|e| {
                    anyhow::anyhow!("BLACKLIST_API_ENDPOINT is not a valid URL: {}", e)
                })?;
                url
            },
            api_host: var("BLACKLIST_API_HOST")
                .map(|host| host.trim().to_string())
                .unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
        };

        if config.api_host.is_empty() {
            anyhow::bail!("BLACKLIST_API_HOST cannot be empty");
        }

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.rapidapi_key.is_some()
    }
}
