use sumo_client::{Endpoint, HttpClient};

use crate::error::ProviderError;

/// Credentials and endpoint for the fields API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub access_id: String,
    pub access_key: String,
    pub endpoint: Endpoint,
}

impl ProviderConfig {
    pub const ACCESS_ID: &'static str = "SUMOLOGIC_ACCESSID";
    pub const ACCESS_KEY: &'static str = "SUMOLOGIC_ACCESSKEY";
    pub const ENVIRONMENT: &'static str = "SUMOLOGIC_ENVIRONMENT";
    pub const BASE_URL: &'static str = "SUMOLOGIC_BASE_URL";

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `SUMOLOGIC_BASE_URL` wins over `SUMOLOGIC_ENVIRONMENT`, which defaults to `us1`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ProviderError::Config(format!("{key} is required")))
        };
        let access_id = required(Self::ACCESS_ID)?;
        let access_key = required(Self::ACCESS_KEY)?;

        let endpoint = match lookup(Self::BASE_URL).filter(|v| !v.is_empty()) {
            Some(url) => Endpoint::from_base_url(&url),
            None => {
                let environment = lookup(Self::ENVIRONMENT)
                    .unwrap_or_else(|| Endpoint::DEFAULT_DEPLOYMENT.to_string());
                Endpoint::for_deployment(&environment)
            }
        };

        Ok(Self {
            access_id,
            access_key,
            endpoint,
        })
    }

    pub fn client(&self) -> HttpClient {
        HttpClient::new(self.endpoint.clone(), &self.access_id, &self.access_key)
    }
}
